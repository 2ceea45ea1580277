// データベースライフサイクルのドメイン型
//
// 再生成のフェーズ、再生成レポート、スキップされた外部キー、
// 対象データベースの状態を表現します。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 再生成のフェーズ
///
/// idle → dropping → creating → connecting → executing-tables → executing-fks → done
/// の順に進み、どこからでも error に遷移します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifecyclePhase {
    Idle,
    Dropping,
    Creating,
    Connecting,
    ExecutingTables,
    #[serde(rename = "executing-fks")]
    ExecutingForeignKeys,
    Done,
    Error,
}

impl LifecyclePhase {
    /// 終端フェーズかどうか
    pub fn is_terminal(&self) -> bool {
        matches!(self, LifecyclePhase::Done | LifecyclePhase::Error)
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LifecyclePhase::Idle => "idle",
            LifecyclePhase::Dropping => "dropping",
            LifecyclePhase::Creating => "creating",
            LifecyclePhase::Connecting => "connecting",
            LifecyclePhase::ExecutingTables => "executing tables",
            LifecyclePhase::ExecutingForeignKeys => "executing foreign keys",
            LifecyclePhase::Done => "done",
            LifecyclePhase::Error => "error",
        };
        f.write_str(label)
    }
}

/// 参照先を解決できずに生成をスキップした外部キー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedForeignKey {
    /// 外部キーID
    pub foreign_key_id: String,
    /// 解決できなかったID（テーブルまたはカラム）
    pub unresolved: Vec<String>,
}

impl fmt::Display for SkippedForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Foreign key '{}' skipped: unresolved reference(s) {}",
            self.foreign_key_id,
            self.unresolved.join(", ")
        )
    }
}

/// 再生成レポート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerationReport {
    /// 対象データベース名
    pub database_name: String,
    /// 実行したCREATE TABLE文の数
    pub table_count: usize,
    /// 実行したALTER TABLE文の数
    pub foreign_key_count: usize,
    /// スキップした外部キー
    pub skipped_foreign_keys: Vec<SkippedForeignKey>,
    /// DROP DATABASE 失敗時の警告
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_warning: Option<String>,
    /// 通過したフェーズ
    pub phases: Vec<LifecyclePhase>,
}

/// 対象データベースの健全性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseHealth {
    Healthy,
    Error,
}

impl fmt::Display for DatabaseHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseHealth::Healthy => write!(f, "healthy"),
            DatabaseHealth::Error => write!(f, "error"),
        }
    }
}

/// 対象データベースの状態
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStatus {
    /// スキーマID（オーケストレーション層が設定）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_id: Option<String>,
    /// データベース名
    pub database_name: String,
    /// 健全性
    pub status: DatabaseHealth,
    /// publicスキーマのユーザーテーブル数
    pub table_count: i64,
    /// 確認日時
    pub last_checked: DateTime<Utc>,
    /// パスワードをマスクした接続文字列
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_string: Option<String>,
}

impl DatabaseStatus {
    /// 健全かどうか
    pub fn is_healthy(&self) -> bool {
        self.status == DatabaseHealth::Healthy
    }
}
