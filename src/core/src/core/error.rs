// エラー型定義
//
// アプリケーション全体で使用されるカスタムエラー型を提供します。
// thiserrorを使用して、ValidationError, DatabaseError, RegenerationError,
// StoreError, ConfigError を定義します。

use crate::core::lifecycle::LifecyclePhase;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// バリデーションエラーコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorCode {
    /// テーブルが1つも定義されていない
    MissingTables,
    /// 未対応のデータ型
    UnsupportedDataType,
}

impl ValidationErrorCode {
    /// ワイヤ表記を取得
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorCode::MissingTables => "MISSING_TABLES",
            ValidationErrorCode::UnsupportedDataType => "UNSUPPORTED_DATA_TYPE",
        }
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// バリデーションエラー
///
/// スキーマ記述の検証時に発生するエラーを表現します。
/// `field` は `tables[0].columns[1].dataType` のようなパス表記です。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("[{code}] {field}: {message}")]
pub struct ValidationError {
    /// エラー発生箇所
    pub field: String,
    /// エラーメッセージ
    pub message: String,
    /// エラーコード
    pub code: ValidationErrorCode,
}

impl ValidationError {
    /// 新しいバリデーションエラーを作成
    pub fn new(field: String, message: String, code: ValidationErrorCode) -> Self {
        Self {
            field,
            message,
            code,
        }
    }

    /// テーブル未定義エラーを作成
    pub fn missing_tables() -> Self {
        Self::new(
            "tables".to_string(),
            "At least one table is required".to_string(),
            ValidationErrorCode::MissingTables,
        )
    }

    /// 未対応データ型エラーを作成
    pub fn unsupported_data_type(table_index: usize, column_index: usize, data_type: &str) -> Self {
        Self::new(
            format!(
                "tables[{}].columns[{}].dataType",
                table_index, column_index
            ),
            format!("Unsupported data type: {}", data_type),
            ValidationErrorCode::UnsupportedDataType,
        )
    }

    /// テーブル未定義エラーかどうか
    pub fn is_missing_tables(&self) -> bool {
        self.code == ValidationErrorCode::MissingTables
    }

    /// 未対応データ型エラーかどうか
    pub fn is_unsupported_data_type(&self) -> bool {
        self.code == ValidationErrorCode::UnsupportedDataType
    }
}

/// バリデーション結果
///
/// スキーマ検証の結果を表現します。
/// 警告は有効性に影響しません。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// エラーがない場合にtrue
    pub valid: bool,
    /// エラーのリスト
    pub errors: Vec<ValidationError>,
    /// 警告のリスト
    pub warnings: Vec<String>,
    /// 有効な場合のCREATE TABLEプレビュー
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_sql: Option<Vec<String>>,
}

impl ValidationResult {
    /// 新しいバリデーション結果を作成
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            generated_sql: None,
        }
    }

    /// エラーを追加
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.valid = false;
    }

    /// 警告を追加
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// 検証が成功したかどうか（エラーがない場合は成功）
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// エラーの数を取得
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// 警告の数を取得
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// 他のバリデーション結果をマージ
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.valid = self.errors.is_empty();
    }

    /// 複数のバリデーション結果を一括マージ
    pub fn merge_all(&mut self, results: impl IntoIterator<Item = ValidationResult>) {
        for result in results {
            self.merge(result);
        }
    }

    /// 全エラーを改行区切りの文字列に変換
    pub fn errors_to_string(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// 実行したSQL文の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    CreateDatabase,
    DropDatabase,
    CreateTable,
    AddForeignKey,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatementKind::CreateDatabase => "CREATE DATABASE",
            StatementKind::DropDatabase => "DROP DATABASE",
            StatementKind::CreateTable => "CREATE TABLE",
            StatementKind::AddForeignKey => "ADD FOREIGN KEY",
        };
        f.write_str(label)
    }
}

/// データベースエラー
///
/// データベース操作時に発生するエラーを表現します。
#[derive(Debug, Clone, Error)]
pub enum DatabaseError {
    /// Invalid database name
    #[error("Invalid database name '{name}': must match ^[a-z_][a-z0-9_]{{0,62}}$")]
    InvalidDatabaseName {
        /// 不正なデータベース名
        name: String,
    },

    /// Connection error
    #[error("Failed to connect to database '{database}': {cause}")]
    Connection {
        /// 接続先データベース名
        database: String,
        /// エラー原因
        cause: String,
    },

    /// Statement execution error
    #[error("Failed to execute {kind} statement: {cause}\nStatement: {statement}")]
    Statement {
        /// 文の種類
        kind: StatementKind,
        /// 失敗した文
        statement: String,
        /// ドライバのエラー
        cause: String,
    },

    /// Query error
    #[error("Query execution error: {message}")]
    Query {
        /// エラーメッセージ
        message: String,
    },
}

impl DatabaseError {
    /// 不正なデータベース名エラーかどうか
    pub fn is_invalid_database_name(&self) -> bool {
        matches!(self, DatabaseError::InvalidDatabaseName { .. })
    }

    /// 接続エラーかどうか
    pub fn is_connection(&self) -> bool {
        matches!(self, DatabaseError::Connection { .. })
    }

    /// 文の実行エラーかどうか
    pub fn is_statement(&self) -> bool {
        matches!(self, DatabaseError::Statement { .. })
    }

    /// 失敗したSQL文を取得
    pub fn statement(&self) -> Option<&str> {
        match self {
            DatabaseError::Statement { statement, .. } => Some(statement),
            _ => None,
        }
    }
}

/// 再生成エラー
///
/// どのフェーズで失敗したかを保持します。
#[derive(Debug, Clone, Error)]
#[error("Database regeneration failed while {phase}: {source}")]
pub struct RegenerationError {
    /// 失敗したフェーズ
    pub phase: LifecyclePhase,
    /// 原因
    #[source]
    pub source: DatabaseError,
}

impl RegenerationError {
    /// 新しい再生成エラーを作成
    pub fn new(phase: LifecyclePhase, source: DatabaseError) -> Self {
        Self { phase, source }
    }
}

/// スキーマレコードストアのエラー
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found
    #[error("Schema not found: {id}")]
    NotFound {
        /// スキーマID
        id: String,
    },

    /// Duplicate schema name for the owner
    #[error("Schema with name '{name}' already exists")]
    DuplicateName {
        /// 重複した名前
        name: String,
    },

    /// I/O error
    #[error("Schema store I/O error at {path}: {cause}")]
    Io {
        /// 対象パス
        path: String,
        /// エラー原因
        cause: String,
    },

    /// Serialization error
    #[error("Failed to (de)serialize schema record: {cause}")]
    Serialization {
        /// エラー原因
        cause: String,
    },
}

impl StoreError {
    /// 未検出エラーかどうか
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// 名前重複エラーかどうか
    pub fn is_duplicate_name(&self) -> bool {
        matches!(self, StoreError::DuplicateName { .. })
    }
}

/// 設定エラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing config version
    #[error("Config file version is not specified")]
    MissingVersion,

    /// Missing admin database
    #[error("Admin database is not specified (database.admin_database)")]
    MissingAdminDatabase,

    /// Missing owner id
    #[error("Owner id is not specified (owner_id)")]
    MissingOwnerId,

    /// Invalid owner id
    #[error("Owner id '{value}' is not a valid UUID")]
    InvalidOwnerId {
        /// 設定値
        value: String,
    },

    /// Invalid environment override
    #[error("Invalid value for environment variable {name}: '{value}'")]
    InvalidEnvOverride {
        /// 環境変数名
        name: String,
        /// 設定値
        value: String,
    },
}
