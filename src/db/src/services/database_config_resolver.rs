// データベース設定の解決サービス
//
// 環境変数による上書きをCLI/サービス層で扱い、coreは純粋な構造体に保つ。

use crate::core::config::DatabaseConfig;
use crate::core::error::ConfigError;

/// データベース設定の解決ユーティリティ
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfigResolver;

impl DatabaseConfigResolver {
    /// 環境変数による上書きを適用
    ///
    /// 対応する環境変数: DB_HOST, DB_PORT, DB_USER, DB_PASSWORD, DB_ADMIN_DATABASE
    pub fn apply_env_overrides(base: &DatabaseConfig) -> Result<DatabaseConfig, ConfigError> {
        let mut config = base.clone();

        if let Ok(host) = std::env::var("DB_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("DB_PORT") {
            let port_num = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidEnvOverride {
                    name: "DB_PORT".to_string(),
                    value: port.clone(),
                })?;
            config.port = Some(port_num);
        }
        if let Ok(user) = std::env::var("DB_USER") {
            config.user = Some(user);
        }
        if let Ok(password) = std::env::var("DB_PASSWORD") {
            config.password = Some(password);
        }
        if let Ok(admin_database) = std::env::var("DB_ADMIN_DATABASE") {
            config.admin_database = admin_database;
        }

        Ok(config)
    }
}
