// 設定ファイル管理
//
// プロジェクトの設定ファイル（YAML形式）の構造と検証、
// データベース接続設定の管理を行います。

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// PostgreSQLの既定ポート
pub const DEFAULT_PORT: u16 = 5432;

/// SSL接続モード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SslMode {
    Disable,
    #[serde(rename = "prefer")]
    Prefer,
    Require,
    #[serde(rename = "verify-ca")]
    VerifyCa,
    #[serde(rename = "verify-full")]
    VerifyFull,
}

impl std::fmt::Display for SslMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SslMode::Disable => write!(f, "disable"),
            SslMode::Prefer => write!(f, "prefer"),
            SslMode::Require => write!(f, "require"),
            SslMode::VerifyCa => write!(f, "verify-ca"),
            SslMode::VerifyFull => write!(f, "verify-full"),
        }
    }
}

/// プロジェクト設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 設定ファイルのバージョン
    pub version: String,

    /// CLIが操作するスキーマの所有者ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,

    /// ファイルベースのレコードストアの保存先
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    /// データベース接続設定
    pub database: DatabaseConfig,
}

fn default_state_dir() -> PathBuf {
    PathBuf::from(crate::core::naming::STATE_DIR)
}

impl Config {
    /// デフォルトの設定ファイルパス
    pub const DEFAULT_CONFIG_PATH: &'static str = crate::core::naming::CONFIG_FILE;

    /// 新しい所有者IDで初期設定を作成
    pub fn with_owner(owner_id: Uuid) -> Self {
        Self {
            version: "1.0".to_string(),
            owner_id: Some(owner_id.to_string()),
            state_dir: default_state_dir(),
            database: DatabaseConfig::default(),
        }
    }

    /// 所有者IDをUUIDとして取得
    pub fn owner_uuid(&self) -> Result<Uuid, ConfigError> {
        let value = self
            .owner_id
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingOwnerId)?;

        Uuid::parse_str(value).map_err(|_| ConfigError::InvalidOwnerId {
            value: value.to_string(),
        })
    }

    /// 設定の妥当性を検証
    pub fn validate(&self) -> Result<(), ConfigError> {
        // バージョンチェック
        if self.version.is_empty() {
            return Err(ConfigError::MissingVersion);
        }

        self.owner_uuid()?;
        self.database.validate()
    }
}

/// データベース接続設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// ホスト名
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号（Noneの場合は5432）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// ユーザー名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// パスワード
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// CREATE/DROP DATABASE に使う管理用データベース
    #[serde(default = "default_admin_database")]
    pub admin_database: String,

    /// 接続タイムアウト（秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// SSL接続モード
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_mode: Option<SslMode>,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_admin_database() -> String {
    "postgres".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: None,
            user: Some("postgres".to_string()),
            password: Some("postgres".to_string()),
            admin_database: default_admin_database(),
            timeout: None,
            ssl_mode: None,
        }
    }
}

impl DatabaseConfig {
    /// 解決済みポート番号を取得
    pub fn resolved_port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin_database.is_empty() {
            return Err(ConfigError::MissingAdminDatabase);
        }

        Ok(())
    }
}
