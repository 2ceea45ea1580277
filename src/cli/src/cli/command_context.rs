// コマンド共通コンテキスト
//
// 設定ファイル読み込み、環境変数による上書き、サービス組み立てをCLI層で集約する。

use crate::adapters::database::PostgresBackend;
use crate::core::config::{Config, DatabaseConfig};
use crate::services::config_loader::ConfigLoader;
use crate::services::database_config_resolver::DatabaseConfigResolver;
use crate::services::database_lifecycle::DatabaseLifecycleService;
use crate::services::schema_service::SchemaService;
use crate::services::schema_store::FileSchemaRepository;
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// CLIコマンド共通の実行コンテキスト
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub project_path: PathBuf,
    pub config_path: PathBuf,
    pub config: Config,
}

impl CommandContext {
    /// プロジェクトルートから設定を読み込んでコンテキストを作成
    pub fn load(project_path: PathBuf) -> Result<Self> {
        Self::load_with_config(project_path, None)
    }

    /// カスタム設定ファイルパスを指定してコンテキストを作成
    pub fn load_with_config(
        project_path: PathBuf,
        custom_config_path: Option<PathBuf>,
    ) -> Result<Self> {
        let config_path = custom_config_path
            .unwrap_or_else(|| project_path.join(Config::DEFAULT_CONFIG_PATH));

        if !config_path.exists() {
            return Err(anyhow!(
                "Config file not found: {:?}. Please initialize the project first with the `init` command.",
                config_path
            ));
        }

        let config = ConfigLoader::load_validated(&config_path)
            .with_context(|| "Failed to read config file")?;

        Ok(Self {
            project_path,
            config_path,
            config,
        })
    }

    /// 設定された所有者ID
    pub fn owner_id(&self) -> Result<Uuid> {
        Ok(self.config.owner_uuid()?)
    }

    /// 状態ディレクトリの絶対パス
    pub fn state_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.state_dir)
    }

    /// プロジェクトルート基準でパスを解決
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_path.join(path)
        }
    }

    /// データベース設定を取得（環境変数上書き込み）
    pub fn database_config(&self) -> Result<DatabaseConfig> {
        let config = DatabaseConfigResolver::apply_env_overrides(&self.config.database)
            .with_context(|| "Failed to apply database environment overrides")?;
        config
            .validate()
            .with_context(|| "Invalid database config")?;
        Ok(config)
    }

    /// ファイルストアとPostgreSQLバックエンドでSchemaServiceを組み立てる
    pub fn schema_service(&self) -> Result<SchemaService> {
        let db_config = self.database_config()?;
        let state_dir = self.state_dir();
        debug!(
            host = %db_config.host,
            port = db_config.resolved_port(),
            state_dir = %state_dir.display(),
            "Building schema service"
        );

        let backend = Arc::new(PostgresBackend::new(db_config));
        let repository = Arc::new(FileSchemaRepository::new(&state_dir));
        Ok(SchemaService::new(
            repository,
            DatabaseLifecycleService::new(backend),
        ))
    }
}
