// スキーマオーケストレーションサービス
//
// レコードストア・バリデーター・ライフサイクル管理を組み合わせ、
// スキーマの作成・更新・再生成・削除と二段階のステータス記録を行う。

use crate::adapters::sql_generator::SqlGenerator;
use crate::core::error::{DatabaseError, RegenerationError, StoreError, ValidationResult};
use crate::core::lifecycle::{DatabaseStatus, RegenerationReport};
use crate::core::naming::generate_database_name;
use crate::core::schema::SchemaData;
use crate::core::schema_record::{
    CreateSchemaRequest, SchemaRecord, SchemaStatus, SchemaSummary, SqlExport,
    UpdateSchemaRequest, INITIAL_VERSION, UPDATED_VERSION,
};
use crate::services::database_lifecycle::DatabaseLifecycleService;
use crate::services::schema_store::SchemaRepository;
use crate::services::schema_validator::SchemaValidatorService;
use chrono::{SecondsFormat, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// オーケストレーション層のエラー
#[derive(Debug, Error)]
pub enum ServiceError {
    /// スキーマ記述が不正
    #[error("Schema validation failed:\n{}", .0.errors_to_string())]
    Validation(ValidationResult),

    /// レコードストアのエラー
    #[error(transparent)]
    Store(#[from] StoreError),

    /// 再生成の失敗
    #[error(transparent)]
    Regeneration(#[from] RegenerationError),

    /// 単発のデータベース操作の失敗
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl ServiceError {
    /// エラーコードを取得
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "VALIDATION_ERROR",
            ServiceError::Store(StoreError::NotFound { .. }) => "SCHEMA_NOT_FOUND",
            ServiceError::Store(StoreError::DuplicateName { .. }) => "DUPLICATE_NAME",
            ServiceError::Store(_) => "INTERNAL_ERROR",
            ServiceError::Regeneration(_) | ServiceError::Database(_) => "DATABASE_ERROR",
        }
    }

    /// スキーマ未検出エラーかどうか
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Store(e) if e.is_not_found())
    }
}

/// 実体化の結果
#[derive(Debug, Clone)]
pub struct MaterializedSchema {
    /// 最終ステータスを反映したレコード
    pub record: SchemaRecord,
    /// 再生成レポート
    pub report: RegenerationReport,
}

/// スキーマオーケストレーションサービス
///
/// 同一スキーマIDに対する再生成はプロセス内で直列化されます。
pub struct SchemaService {
    repository: Arc<dyn SchemaRepository>,
    lifecycle: DatabaseLifecycleService,
    validator: SchemaValidatorService,
    locks: Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>,
}

impl SchemaService {
    /// 新しいSchemaServiceを作成
    pub fn new(repository: Arc<dyn SchemaRepository>, lifecycle: DatabaseLifecycleService) -> Self {
        Self {
            repository,
            lifecycle,
            validator: SchemaValidatorService::new(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// スキーマID単位のロックを取得
    fn lock_for(&self, id: Uuid) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(id).or_default().clone()
    }

    /// ロックを返却し、他に保持者がいなければエントリを破棄
    fn release_lock(&self, id: Uuid, lock: Arc<tokio::sync::Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        // マップ側と呼び出し側の2つだけなら待機中のタスクはいない
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&id);
        }
    }

    /// 記述にバージョンとエクスポート日時を付与
    fn stamp_definition(definition: &mut SchemaData, version: &str) {
        definition.version = Some(version.to_string());
        definition.exported_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
    }

    /// 最終ステータスを記録（失敗は警告のみ）
    async fn record_final_status(&self, record: &mut SchemaRecord, status: SchemaStatus) {
        record.set_status(status);
        if let Err(e) = self.repository.update(record).await {
            warn!(
                schema_id = %record.id,
                status = %status,
                error = %e,
                "Failed to update schema status"
            );
        }
    }

    /// 検証してから再生成し、ステータスを記録
    async fn materialize(
        &self,
        mut record: SchemaRecord,
        success: SchemaStatus,
    ) -> Result<MaterializedSchema, ServiceError> {
        let validation = self.validator.validate(&record.definition);
        if !validation.is_valid() {
            self.record_final_status(&mut record, SchemaStatus::Error)
                .await;
            return Err(ServiceError::Validation(validation));
        }

        let id = record.id;
        let lock = self.lock_for(id);
        let guard = lock.lock().await;
        let outcome = match self
            .lifecycle
            .regenerate_database(&record.definition, &record.database_name)
            .await
        {
            Ok(report) => {
                self.record_final_status(&mut record, success).await;
                info!(
                    schema_id = %record.id,
                    database = %record.database_name,
                    status = %record.status,
                    "Schema materialized"
                );
                Ok(MaterializedSchema { record, report })
            }
            Err(e) => {
                self.record_final_status(&mut record, SchemaStatus::Error)
                    .await;
                Err(e.into())
            }
        };
        drop(guard);
        self.release_lock(id, lock);
        outcome
    }

    /// スキーマを作成して対象データベースを実体化
    ///
    /// レコードは creating で保存され、成功時に created、失敗時に error となります。
    pub async fn create_schema(
        &self,
        request: CreateSchemaRequest,
        owner_id: Uuid,
    ) -> Result<MaterializedSchema, ServiceError> {
        if self
            .repository
            .get_by_name_and_owner(&request.name, owner_id)
            .await?
            .is_some()
        {
            return Err(StoreError::DuplicateName { name: request.name }.into());
        }

        let mut definition = request.definition;
        Self::stamp_definition(&mut definition, INITIAL_VERSION);

        let record = SchemaRecord::new(
            owner_id,
            request.name,
            request.description,
            generate_database_name(),
            definition,
        );
        self.repository.create(&record).await?;
        info!(schema_id = %record.id, name = %record.name, "Schema record created");

        self.materialize(record, SchemaStatus::Created).await
    }

    /// スキーマを更新して対象データベースを再生成
    ///
    /// 名前・説明は省略時に現在値を維持し、バージョンは 1.1 になります。
    pub async fn update_schema(
        &self,
        id: Uuid,
        owner_id: Uuid,
        request: UpdateSchemaRequest,
    ) -> Result<MaterializedSchema, ServiceError> {
        let mut record = self.repository.get_by_id_and_owner(id, owner_id).await?;

        if let Some(name) = request.name {
            if name != record.name {
                if let Some(existing) = self
                    .repository
                    .get_by_name_and_owner(&name, owner_id)
                    .await?
                {
                    if existing.id != id {
                        return Err(StoreError::DuplicateName { name }.into());
                    }
                }
            }
            record.name = name;
        }
        if let Some(description) = request.description {
            record.description = description;
        }

        let mut definition = request.definition;
        Self::stamp_definition(&mut definition, UPDATED_VERSION);
        record.definition = definition;
        record.version = UPDATED_VERSION.to_string();
        record.set_status(SchemaStatus::Updating);
        self.repository.update(&record).await?;

        self.materialize(record, SchemaStatus::Updated).await
    }

    /// 現在の記述から対象データベースを再生成
    pub async fn regenerate_schema(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<MaterializedSchema, ServiceError> {
        let mut record = self.repository.get_by_id_and_owner(id, owner_id).await?;
        record.set_status(SchemaStatus::Updating);
        self.repository.update(&record).await?;

        self.materialize(record, SchemaStatus::Updated).await
    }

    /// スキーマを取得
    pub async fn get_schema(&self, id: Uuid, owner_id: Uuid) -> Result<SchemaRecord, ServiceError> {
        Ok(self.repository.get_by_id_and_owner(id, owner_id).await?)
    }

    /// 対象データベースの状態を取得
    pub async fn database_status(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<DatabaseStatus, ServiceError> {
        let record = self.repository.get_by_id_and_owner(id, owner_id).await?;
        let mut status = self
            .lifecycle
            .get_database_status(&record.database_name)
            .await;
        status.schema_id = Some(record.id.to_string());
        Ok(status)
    }

    /// スキーマを削除
    ///
    /// `drop_database` が true の場合は先に対象データベースを削除し、失敗時はレコードを残します。
    pub async fn delete_schema(
        &self,
        id: Uuid,
        owner_id: Uuid,
        drop_database: bool,
    ) -> Result<(), ServiceError> {
        let record = self.repository.get_by_id_and_owner(id, owner_id).await?;

        let lock = self.lock_for(id);
        let guard = lock.lock().await;
        let outcome = self.delete_locked(&record, owner_id, drop_database).await;
        drop(guard);
        self.release_lock(id, lock);

        outcome?;
        info!(schema_id = %id, dropped_database = drop_database, "Schema deleted");
        Ok(())
    }

    async fn delete_locked(
        &self,
        record: &SchemaRecord,
        owner_id: Uuid,
        drop_database: bool,
    ) -> Result<(), ServiceError> {
        if drop_database {
            self.lifecycle.drop_database(&record.database_name).await?;
        }
        self.repository
            .delete_by_id_and_owner(record.id, owner_id)
            .await?;
        Ok(())
    }

    /// 所有者のスキーマ一覧（更新日時の降順）
    pub async fn list_schemas(&self, owner_id: Uuid) -> Result<Vec<SchemaSummary>, ServiceError> {
        let records = self.repository.list_by_owner(owner_id).await?;
        Ok(records.iter().map(SchemaSummary::from).collect())
    }

    /// スキーマのSQLスクリプトを生成
    pub async fn export_sql(&self, id: Uuid, owner_id: Uuid) -> Result<SqlExport, ServiceError> {
        let record = self.repository.get_by_id_and_owner(id, owner_id).await?;
        let body = self
            .lifecycle
            .generator()
            .generate_script(&record.definition, Some(&record.database_name))?;

        Ok(SqlExport {
            schema_id: record.id,
            sql: format!("-- Generated SQL for schema: {}\n{}", record.name, body),
            generated_at: Utc::now(),
        })
    }

    /// スキーマ記述を検証し、有効な場合はCREATE TABLEのプレビューを添付
    pub fn validate(&self, schema: &SchemaData) -> ValidationResult {
        self.validator
            .validate_with_preview(schema, self.lifecycle.generator())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lifecycle::DatabaseHealth;
    use crate::core::schema::{Column, Table};
    use crate::services::schema_store::InMemorySchemaRepository;
    use crate::services::testing::{BackendEvent, RecordingBackend};

    fn definition(data_type: &str) -> SchemaData {
        let mut table = Table::new("t1".to_string(), "users".to_string());
        let mut id = Column::new(
            "c1".to_string(),
            "id".to_string(),
            data_type.to_string(),
            false,
        );
        id.primary_key = true;
        table.add_column(id);
        let mut schema = SchemaData::new();
        schema.add_table(table);
        schema
    }

    fn request(name: &str) -> CreateSchemaRequest {
        CreateSchemaRequest {
            name: name.to_string(),
            description: "test".to_string(),
            definition: definition("INT"),
        }
    }

    struct Fixture {
        service: SchemaService,
        repository: Arc<InMemorySchemaRepository>,
        backend: Arc<RecordingBackend>,
        owner: Uuid,
    }

    fn fixture(backend: RecordingBackend) -> Fixture {
        let backend = Arc::new(backend);
        let repository = Arc::new(InMemorySchemaRepository::new());
        let service = SchemaService::new(
            repository.clone(),
            DatabaseLifecycleService::new(backend.clone()),
        );
        Fixture {
            service,
            repository,
            backend,
            owner: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn test_create_schema_success() {
        let f = fixture(RecordingBackend::new());

        let created = f.service.create_schema(request("shop"), f.owner).await.unwrap();

        assert_eq!(created.record.status, SchemaStatus::Created);
        assert_eq!(created.record.version, "1.0");
        assert!(created.record.database_name.starts_with("schema_"));
        assert_eq!(created.record.definition.version.as_deref(), Some("1.0"));
        assert!(created.record.definition.exported_at.is_some());
        assert_eq!(created.report.table_count, 1);

        let stored = f
            .repository
            .get_by_id_and_owner(created.record.id, f.owner)
            .await
            .unwrap();
        assert_eq!(stored.status, SchemaStatus::Created);
    }

    #[tokio::test]
    async fn test_create_schema_duplicate_name() {
        let f = fixture(RecordingBackend::new());
        f.service.create_schema(request("shop"), f.owner).await.unwrap();

        let err = f
            .service
            .create_schema(request("shop"), f.owner)
            .await
            .unwrap_err();

        assert_eq!(err.code(), "DUPLICATE_NAME");
    }

    #[tokio::test]
    async fn test_create_schema_invalid_definition_marks_error() {
        let f = fixture(RecordingBackend::new());
        let mut invalid = request("shop");
        invalid.definition = definition("MONEY");

        let err = f.service.create_schema(invalid, f.owner).await.unwrap_err();

        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("Unsupported data type: MONEY"));
        let listed = f.service.list_schemas(f.owner).await.unwrap();
        assert_eq!(listed[0].status, SchemaStatus::Error);
        // 検証エラー時はデータベースに触れない
        assert!(f.backend.events().is_empty());
    }

    #[tokio::test]
    async fn test_create_schema_regeneration_failure_marks_error() {
        let f = fixture(RecordingBackend::new().fail_on("CREATE TABLE"));

        let err = f
            .service
            .create_schema(request("shop"), f.owner)
            .await
            .unwrap_err();

        assert_eq!(err.code(), "DATABASE_ERROR");
        let listed = f.service.list_schemas(f.owner).await.unwrap();
        assert_eq!(listed[0].status, SchemaStatus::Error);
    }

    #[tokio::test]
    async fn test_update_schema_bumps_version_and_keeps_name() {
        let f = fixture(RecordingBackend::new());
        let created = f.service.create_schema(request("shop"), f.owner).await.unwrap();

        let updated = f
            .service
            .update_schema(
                created.record.id,
                f.owner,
                UpdateSchemaRequest {
                    name: None,
                    description: Some("v2".to_string()),
                    definition: definition("BIGINT"),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.record.name, "shop");
        assert_eq!(updated.record.description, "v2");
        assert_eq!(updated.record.version, "1.1");
        assert_eq!(updated.record.status, SchemaStatus::Updated);
        assert_eq!(updated.record.database_name, created.record.database_name);
        assert_eq!(updated.record.definition.tables[0].columns[0].data_type, "BIGINT");
    }

    #[tokio::test]
    async fn test_update_schema_name_conflict() {
        let f = fixture(RecordingBackend::new());
        f.service.create_schema(request("shop"), f.owner).await.unwrap();
        let blog = f.service.create_schema(request("blog"), f.owner).await.unwrap();

        let err = f
            .service
            .update_schema(
                blog.record.id,
                f.owner,
                UpdateSchemaRequest {
                    name: Some("shop".to_string()),
                    description: None,
                    definition: definition("INT"),
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), "DUPLICATE_NAME");
    }

    #[tokio::test]
    async fn test_other_owner_cannot_see_schema() {
        let f = fixture(RecordingBackend::new());
        let created = f.service.create_schema(request("shop"), f.owner).await.unwrap();

        let err = f
            .service
            .regenerate_schema(created.record.id, Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.code(), "SCHEMA_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_database_status_fills_schema_id() {
        let f = fixture(RecordingBackend::new().with_table_count(1));
        let created = f.service.create_schema(request("shop"), f.owner).await.unwrap();

        let status = f
            .service
            .database_status(created.record.id, f.owner)
            .await
            .unwrap();

        assert_eq!(status.schema_id, Some(created.record.id.to_string()));
        assert_eq!(status.status, DatabaseHealth::Healthy);
        assert_eq!(status.table_count, 1);
    }

    #[tokio::test]
    async fn test_delete_schema_with_drop_database() {
        let f = fixture(RecordingBackend::new());
        let created = f.service.create_schema(request("shop"), f.owner).await.unwrap();

        f.service
            .delete_schema(created.record.id, f.owner, true)
            .await
            .unwrap();

        let drop_statement = format!("DROP DATABASE IF EXISTS {};", created.record.database_name);
        let drops = f
            .backend
            .events()
            .into_iter()
            .filter(|e| *e == BackendEvent::Admin(drop_statement.clone()))
            .count();
        // 作成時の再生成と削除時の2回
        assert_eq!(drops, 2);
        assert!(f.service.list_schemas(f.owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_schema_keeps_database_by_default() {
        let f = fixture(RecordingBackend::new());
        let created = f.service.create_schema(request("shop"), f.owner).await.unwrap();
        let events_before = f.backend.events().len();

        f.service
            .delete_schema(created.record.id, f.owner, false)
            .await
            .unwrap();

        assert_eq!(f.backend.events().len(), events_before);
    }

    #[tokio::test]
    async fn test_export_sql_contains_full_script() {
        let f = fixture(RecordingBackend::new());
        let created = f.service.create_schema(request("shop"), f.owner).await.unwrap();

        let export = f.service.export_sql(created.record.id, f.owner).await.unwrap();

        assert_eq!(export.schema_id, created.record.id);
        assert!(export.sql.starts_with("-- Generated SQL for schema: shop\n"));
        assert!(export
            .sql
            .contains(&format!("CREATE DATABASE {};", created.record.database_name)));
        assert!(export.sql.contains("CREATE TABLE users"));
    }

    #[tokio::test]
    async fn test_validate_attaches_preview() {
        let f = fixture(RecordingBackend::new());

        let result = f.service.validate(&definition("INT"));

        assert!(result.valid);
        assert_eq!(result.generated_sql.map(|s| s.len()), Some(1));
    }

    #[tokio::test]
    async fn test_concurrent_regenerations_do_not_interleave() {
        let f = fixture(RecordingBackend::new());
        let created = f.service.create_schema(request("shop"), f.owner).await.unwrap();
        let service = Arc::new(f.service);
        let before = f.backend.events().len();

        let first = {
            let service = service.clone();
            let id = created.record.id;
            let owner = f.owner;
            tokio::spawn(async move { service.regenerate_schema(id, owner).await })
        };
        let second = {
            let service = service.clone();
            let id = created.record.id;
            let owner = f.owner;
            tokio::spawn(async move { service.regenerate_schema(id, owner).await })
        };
        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        // 各再生成は DROP から Close までの連続したブロックになる
        let events = f.backend.events().split_off(before);
        assert_eq!(events.len(), 10);
        for block in events.chunks(5) {
            assert!(matches!(&block[0], BackendEvent::Admin(s) if s.starts_with("DROP")));
            assert_eq!(block[4], BackendEvent::Close);
        }
        assert!(service.locks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_locks_are_released_after_each_operation() {
        let f = fixture(RecordingBackend::new());
        let first = f.service.create_schema(request("shop"), f.owner).await.unwrap();
        let second = f.service.create_schema(request("blog"), f.owner).await.unwrap();
        f.service
            .regenerate_schema(first.record.id, f.owner)
            .await
            .unwrap();

        assert!(f.service.locks.lock().unwrap().is_empty());

        f.service
            .delete_schema(second.record.id, f.owner, true)
            .await
            .unwrap();
        assert!(f.service.locks.lock().unwrap().is_empty());
    }
}
