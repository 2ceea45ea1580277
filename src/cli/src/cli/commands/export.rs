// exportコマンドハンドラー
//
// 保存済みスキーマのSQLスクリプトを出力します。

use crate::cli::command_context::CommandContext;
use crate::cli::commands::{parse_schema_id, render_output, write_sql_file, CommandOutput};
use crate::cli::OutputFormat;
use crate::core::schema_record::SqlExport;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

/// exportコマンドの出力構造体
#[derive(Debug, Clone, Serialize)]
pub struct ExportOutput {
    #[serde(flatten)]
    pub export: SqlExport,
    #[serde(skip)]
    pub text_message: String,
}

impl CommandOutput for ExportOutput {
    fn to_text(&self) -> String {
        self.text_message.clone()
    }
}

/// exportコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct ExportCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// カスタム設定ファイルパス
    pub config_path: Option<PathBuf>,
    /// スキーマID
    pub id: String,
    /// 出力ファイル（未指定時は標準出力）
    pub output: Option<PathBuf>,
    /// 出力フォーマット
    pub format: OutputFormat,
}

/// exportコマンドハンドラー
#[derive(Debug, Clone, Default)]
pub struct ExportCommandHandler {}

impl ExportCommandHandler {
    /// 新しいExportCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// exportコマンドを実行
    pub async fn execute(&self, command: &ExportCommand) -> Result<String> {
        let id = parse_schema_id(&command.id)?;
        let context = CommandContext::load_with_config(
            command.project_path.clone(),
            command.config_path.clone(),
        )?;
        let owner_id = context.owner_id()?;

        let service = context.schema_service()?;
        let export = service
            .export_sql(id, owner_id)
            .await
            .with_context(|| format!("Failed to export schema {}", id))?;

        let text_message = match &command.output {
            Some(path) => {
                let path = context.resolve_path(path);
                write_sql_file(&path, &export.sql)?;
                format!("SQL script written to {}", path.display())
            }
            None => export.sql.trim_end().to_string(),
        };

        let output = ExportOutput {
            export,
            text_message,
        };
        render_output(&output, &command.format)
    }
}
