// statusコマンドハンドラー
//
// 対象データベースの状態確認機能を実装します。
// - スキーマレコードから対象データベース名を解決
// - 接続可否とユーザーテーブル数の取得
// - マスク済み接続文字列の表示

use crate::cli::command_context::CommandContext;
use crate::cli::commands::{parse_schema_id, render_output, CommandOutput};
use crate::cli::OutputFormat;
use crate::core::lifecycle::DatabaseStatus;
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// statusコマンドの出力構造体
#[derive(Debug, Clone, Serialize)]
pub struct StatusOutput {
    #[serde(flatten)]
    pub status: DatabaseStatus,
    /// テキスト出力メッセージ
    #[serde(skip)]
    pub text_message: String,
}

impl CommandOutput for StatusOutput {
    fn to_text(&self) -> String {
        self.text_message.clone()
    }
}

/// statusコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct StatusCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// カスタム設定ファイルパス
    pub config_path: Option<PathBuf>,
    /// スキーマID
    pub id: String,
    /// 出力フォーマット
    pub format: OutputFormat,
}

/// statusコマンドハンドラー
#[derive(Debug, Default)]
pub struct StatusCommandHandler {}

impl StatusCommandHandler {
    /// 新しいStatusCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// statusコマンドを実行
    ///
    /// 接続に失敗した場合もエラーにはせず、状態 error として表示します。
    pub async fn execute(&self, command: &StatusCommand) -> Result<String> {
        let id = parse_schema_id(&command.id)?;
        let context = CommandContext::load_with_config(
            command.project_path.clone(),
            command.config_path.clone(),
        )?;
        let owner_id = context.owner_id()?;

        let service = context.schema_service()?;
        let status = service
            .database_status(id, owner_id)
            .await
            .with_context(|| format!("Failed to get status of schema {}", id))?;
        debug!(database = %status.database_name, healthy = status.is_healthy(), "Checked database");

        let output = StatusOutput {
            text_message: self.format_status(&status),
            status,
        };
        render_output(&output, &command.format)
    }

    /// 状態をテキスト表示用にフォーマット
    pub fn format_status(&self, status: &DatabaseStatus) -> String {
        let health = if status.is_healthy() {
            "healthy".green().to_string()
        } else {
            "error".red().to_string()
        };

        let mut output = String::new();
        output.push_str(&format!("Database:     {}\n", status.database_name));
        output.push_str(&format!("Status:       {}\n", health));
        output.push_str(&format!("Tables:       {}\n", status.table_count));
        if let Some(connection) = &status.connection_string {
            output.push_str(&format!("Connection:   {}\n", connection));
        }
        output.push_str(&format!("Last checked: {}", status.last_checked.to_rfc3339()));
        output
    }
}
