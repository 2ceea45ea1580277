// スキーマレコード
//
// レコードストアに保存されるスキーマのメタデータと、
// 作成・更新リクエストの型を提供します。

use crate::core::schema::SchemaData;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 作成直後のバージョン
pub const INITIAL_VERSION: &str = "1.0";

/// 更新後のバージョン
pub const UPDATED_VERSION: &str = "1.1";

/// スキーマのステータス
///
/// 作成時は creating → created、更新時は updating → updated と遷移し、
/// 失敗した場合は error となります。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaStatus {
    Creating,
    Created,
    Updating,
    Updated,
    Error,
}

impl SchemaStatus {
    /// 処理中のステータスかどうか
    pub fn is_in_progress(&self) -> bool {
        matches!(self, SchemaStatus::Creating | SchemaStatus::Updating)
    }
}

impl fmt::Display for SchemaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SchemaStatus::Creating => "creating",
            SchemaStatus::Created => "created",
            SchemaStatus::Updating => "updating",
            SchemaStatus::Updated => "updated",
            SchemaStatus::Error => "error",
        };
        f.write_str(label)
    }
}

/// スキーマレコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// 対象データベース名
    pub database_name: String,
    pub status: SchemaStatus,
    pub version: String,
    /// スキーマ記述
    pub definition: SchemaData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SchemaRecord {
    /// 新しいレコードを作成（ステータス creating、バージョン 1.0）
    pub fn new(
        owner_id: Uuid,
        name: String,
        description: String,
        database_name: String,
        definition: SchemaData,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name,
            description,
            database_name,
            status: SchemaStatus::Creating,
            version: INITIAL_VERSION.to_string(),
            definition,
            created_at: now,
            updated_at: now,
        }
    }

    /// ステータスを変更し、更新日時を進める
    pub fn set_status(&mut self, status: SchemaStatus) {
        self.status = status;
        self.touch();
    }

    /// 更新日時を現在時刻にする
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// スキーマ作成リクエスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchemaRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub definition: SchemaData,
}

/// スキーマ更新リクエスト
///
/// 名前・説明は省略時に現在値を維持します。記述は常に置き換えます。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSchemaRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub definition: SchemaData,
}

/// 一覧表示用のスキーマ概要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub database_name: String,
    pub status: SchemaStatus,
    pub table_count: usize,
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&SchemaRecord> for SchemaSummary {
    fn from(record: &SchemaRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            description: record.description.clone(),
            database_name: record.database_name.clone(),
            status: record.status,
            table_count: record.definition.table_count(),
            version: record.version.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// SQLエクスポート結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlExport {
    pub schema_id: Uuid,
    pub sql: String,
    pub generated_at: DateTime<Utc>,
}
