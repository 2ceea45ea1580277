// データベースライフサイクル管理サービス
//
// 対象データベースの作成・削除・再生成・状態確認を行う。
// 再生成は常に「削除 → 作成 → 接続 → テーブル作成 → 外部キー追加」の全面再構築で、
// 文は1つずつ順に実行し、前の文が完了するまで次の文を送らない。

use crate::adapters::database::DatabaseBackend;
use crate::adapters::sql_generator::postgres::PostgresSqlGenerator;
use crate::adapters::sql_generator::SqlGenerator;
use crate::core::error::{DatabaseError, RegenerationError, StatementKind};
use crate::core::lifecycle::{DatabaseHealth, DatabaseStatus, LifecyclePhase, RegenerationReport};
use crate::core::schema::SchemaData;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// データベースライフサイクル管理サービス
///
/// スキーマの状態は保持しません。
#[derive(Clone)]
pub struct DatabaseLifecycleService {
    backend: Arc<dyn DatabaseBackend>,
    generator: Arc<dyn SqlGenerator + Send + Sync>,
}

impl std::fmt::Debug for DatabaseLifecycleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseLifecycleService").finish()
    }
}

/// フェーズ遷移の記録
struct PhaseTracker<'a> {
    database: &'a str,
    phases: Vec<LifecyclePhase>,
}

impl<'a> PhaseTracker<'a> {
    fn new(database: &'a str) -> Self {
        Self {
            database,
            phases: vec![LifecyclePhase::Idle],
        }
    }

    fn enter(&mut self, phase: LifecyclePhase) {
        debug!(database = %self.database, phase = %phase, "Lifecycle phase transition");
        self.phases.push(phase);
    }

    fn fail(&mut self, phase: LifecyclePhase, source: DatabaseError) -> RegenerationError {
        warn!(
            database = %self.database,
            phase = %phase,
            error = %source,
            "Database regeneration failed"
        );
        self.phases.push(LifecyclePhase::Error);
        RegenerationError::new(phase, source)
    }
}

impl DatabaseLifecycleService {
    /// 新しいDatabaseLifecycleServiceを作成
    pub fn new(backend: Arc<dyn DatabaseBackend>) -> Self {
        Self::with_generator(backend, Arc::new(PostgresSqlGenerator::new()))
    }

    /// SQLジェネレーターを指定して作成
    pub fn with_generator(
        backend: Arc<dyn DatabaseBackend>,
        generator: Arc<dyn SqlGenerator + Send + Sync>,
    ) -> Self {
        Self { backend, generator }
    }

    /// SQLジェネレーターを取得
    pub fn generator(&self) -> &(dyn SqlGenerator + Send + Sync) {
        self.generator.as_ref()
    }

    /// 対象データベースを作成
    ///
    /// 管理用データベースへの一時接続で CREATE DATABASE を実行します。
    pub async fn create_database(&self, name: &str) -> Result<(), DatabaseError> {
        let statement = self.generator.generate_create_database(name)?;
        self.backend
            .execute_admin(&statement, StatementKind::CreateDatabase)
            .await?;
        info!(database = %name, "Created database");
        Ok(())
    }

    /// 対象データベースを削除
    ///
    /// 存在しない場合も成功します。
    pub async fn drop_database(&self, name: &str) -> Result<(), DatabaseError> {
        let statement = self.generator.generate_drop_database(name)?;
        self.backend
            .execute_admin(&statement, StatementKind::DropDatabase)
            .await?;
        info!(database = %name, "Dropped database");
        Ok(())
    }

    /// 対象データベースを再生成
    ///
    /// 削除の失敗は警告として記録して続行し、以降の失敗は即座に中断します。
    /// ロールバックは行いません。次回の再生成が削除から始まるため回復できます。
    ///
    /// # Arguments
    ///
    /// * `schema` - スキーマ記述
    /// * `name` - 対象データベース名
    ///
    /// # Returns
    ///
    /// 成功時は再生成レポート、失敗時は失敗フェーズ付きのエラー
    pub async fn regenerate_database(
        &self,
        schema: &SchemaData,
        name: &str,
    ) -> Result<RegenerationReport, RegenerationError> {
        let mut tracker = PhaseTracker::new(name);

        // 名前検証はDDL生成時に行われるため、ここで先に生成しておく
        let drop_statement = self
            .generator
            .generate_drop_database(name)
            .map_err(|e| tracker.fail(LifecyclePhase::Idle, e))?;
        let create_statement = self
            .generator
            .generate_create_database(name)
            .map_err(|e| tracker.fail(LifecyclePhase::Idle, e))?;
        let table_statements = self.generator.generate_create_tables(schema);
        let (fk_statements, skipped_foreign_keys) =
            self.generator.generate_foreign_keys_with_warnings(schema);

        tracker.enter(LifecyclePhase::Dropping);
        let drop_warning = match self
            .backend
            .execute_admin(&drop_statement, StatementKind::DropDatabase)
            .await
        {
            Ok(()) => None,
            Err(e) => {
                warn!(database = %name, error = %e, "Failed to drop database, continuing");
                Some(e.to_string())
            }
        };

        tracker.enter(LifecyclePhase::Creating);
        self.backend
            .execute_admin(&create_statement, StatementKind::CreateDatabase)
            .await
            .map_err(|e| tracker.fail(LifecyclePhase::Creating, e))?;

        tracker.enter(LifecyclePhase::Connecting);
        let mut conn = self
            .backend
            .connect(name)
            .await
            .map_err(|e| tracker.fail(LifecyclePhase::Connecting, e))?;

        let outcome = async {
            tracker.enter(LifecyclePhase::ExecutingTables);
            for statement in &table_statements {
                conn.execute(statement, StatementKind::CreateTable)
                    .await
                    .map_err(|e| tracker.fail(LifecyclePhase::ExecutingTables, e))?;
            }

            tracker.enter(LifecyclePhase::ExecutingForeignKeys);
            for statement in &fk_statements {
                conn.execute(statement, StatementKind::AddForeignKey)
                    .await
                    .map_err(|e| tracker.fail(LifecyclePhase::ExecutingForeignKeys, e))?;
            }
            Ok::<(), RegenerationError>(())
        }
        .await;

        // 成否にかかわらず対象接続は閉じる
        if let Err(e) = conn.close().await {
            warn!(database = %name, error = %e, "Failed to close target connection");
        }
        outcome?;

        tracker.enter(LifecyclePhase::Done);
        info!(
            database = %name,
            tables = table_statements.len(),
            foreign_keys = fk_statements.len(),
            skipped_foreign_keys = skipped_foreign_keys.len(),
            "Regenerated database"
        );

        Ok(RegenerationReport {
            database_name: name.to_string(),
            table_count: table_statements.len(),
            foreign_key_count: fk_statements.len(),
            skipped_foreign_keys,
            drop_warning,
            phases: tracker.phases,
        })
    }

    /// 対象データベースの状態を取得
    ///
    /// 接続できない場合は失敗とせず、状態 error を返します。
    /// テーブル数の取得に失敗した場合は 0 件として扱います。
    pub async fn get_database_status(&self, name: &str) -> DatabaseStatus {
        let connection_string = Some(self.backend.masked_connection_string(name));

        let mut conn = match self.backend.connect(name).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(database = %name, error = %e, "Database status check failed to connect");
                return DatabaseStatus {
                    schema_id: None,
                    database_name: name.to_string(),
                    status: DatabaseHealth::Error,
                    table_count: 0,
                    last_checked: Utc::now(),
                    connection_string,
                };
            }
        };

        let table_count = match conn.count_user_tables().await {
            Ok(count) => count,
            Err(e) => {
                warn!(database = %name, error = %e, "Failed to count tables");
                0
            }
        };
        if let Err(e) = conn.close().await {
            debug!(database = %name, error = %e, "Failed to close status connection");
        }

        DatabaseStatus {
            schema_id: None,
            database_name: name.to_string(),
            status: DatabaseHealth::Healthy,
            table_count,
            last_checked: Utc::now(),
            connection_string,
        }
    }
}
