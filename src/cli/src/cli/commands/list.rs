// listコマンドハンドラー
//
// 設定された所有者のスキーマ一覧を表示します（更新日時の降順）。

use crate::cli::command_context::CommandContext;
use crate::cli::commands::{render_output, CommandOutput};
use crate::cli::OutputFormat;
use crate::core::schema_record::{SchemaStatus, SchemaSummary};
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

/// listコマンドの出力構造体
#[derive(Debug, Clone, Serialize)]
pub struct ListOutput {
    pub schemas: Vec<SchemaSummary>,
    #[serde(skip)]
    pub text_message: String,
}

impl CommandOutput for ListOutput {
    fn to_text(&self) -> String {
        self.text_message.clone()
    }
}

/// listコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct ListCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// カスタム設定ファイルパス
    pub config_path: Option<PathBuf>,
    /// 出力フォーマット
    pub format: OutputFormat,
}

/// listコマンドハンドラー
#[derive(Debug, Clone, Default)]
pub struct ListCommandHandler {}

impl ListCommandHandler {
    /// 新しいListCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// listコマンドを実行
    pub async fn execute(&self, command: &ListCommand) -> Result<String> {
        let context = CommandContext::load_with_config(
            command.project_path.clone(),
            command.config_path.clone(),
        )?;
        let owner_id = context.owner_id()?;

        let service = context.schema_service()?;
        let schemas = service
            .list_schemas(owner_id)
            .await
            .with_context(|| "Failed to list schemas")?;

        let output = ListOutput {
            text_message: self.format_table(&schemas),
            schemas,
        };
        render_output(&output, &command.format)
    }

    /// 一覧をテーブル形式でフォーマット
    pub fn format_table(&self, schemas: &[SchemaSummary]) -> String {
        if schemas.is_empty() {
            return "No schemas found.".to_string();
        }

        let name_width = schemas
            .iter()
            .map(|s| s.name.len())
            .max()
            .unwrap_or(0)
            .max("Name".len());

        let mut output = format!(
            "{:<36}  {:<name_width$}  {:<8}  {:>6}  {:<7}  {}\n",
            "ID",
            "Name",
            "Status",
            "Tables",
            "Version",
            "Updated",
            name_width = name_width
        );
        output.push_str(&"-".repeat(output.trim_end().len()));

        for schema in schemas {
            let status = format!("{:<8}", schema.status.to_string());
            let status = match schema.status {
                SchemaStatus::Error => status.red().to_string(),
                SchemaStatus::Created | SchemaStatus::Updated => status.green().to_string(),
                _ => status.yellow().to_string(),
            };
            output.push_str(&format!(
                "\n{:<36}  {:<name_width$}  {}  {:>6}  {:<7}  {}",
                schema.id,
                schema.name,
                status,
                schema.table_count,
                schema.version,
                schema.updated_at.format("%Y-%m-%d %H:%M:%S"),
                name_width = name_width
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_format_empty() {
        assert_eq!(ListCommandHandler::new().format_table(&[]), "No schemas found.");
    }

    #[test]
    fn test_format_rows() {
        let summary = SchemaSummary {
            id: Uuid::new_v4(),
            name: "shop".to_string(),
            description: String::new(),
            database_name: "schema_abc".to_string(),
            status: SchemaStatus::Created,
            table_count: 2,
            version: "1.0".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let text = ListCommandHandler::new().format_table(&[summary.clone()]);

        assert_eq!(text.lines().count(), 3);
        assert!(text.contains(&summary.id.to_string()));
        assert!(text.contains("shop"));
    }
}
