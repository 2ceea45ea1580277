// updateコマンドハンドラー
//
// スキーマ記述を置き換え、対象データベースを再生成します。

use crate::cli::command_context::CommandContext;
use crate::cli::commands::{parse_schema_id, render_output, MaterializeOutput};
use crate::cli::OutputFormat;
use crate::core::schema_record::UpdateSchemaRequest;
use crate::services::schema_parser::SchemaParserService;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// updateコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct UpdateCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// カスタム設定ファイルパス
    pub config_path: Option<PathBuf>,
    /// スキーマID
    pub id: String,
    /// スキーマ記述ファイルのパス
    pub file: PathBuf,
    /// 新しいスキーマ名（省略時は維持）
    pub name: Option<String>,
    /// 新しい説明（省略時は維持）
    pub description: Option<String>,
    /// 出力フォーマット
    pub format: OutputFormat,
}

/// updateコマンドハンドラー
#[derive(Debug, Clone, Default)]
pub struct UpdateCommandHandler {}

impl UpdateCommandHandler {
    /// 新しいUpdateCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// updateコマンドを実行
    pub async fn execute(&self, command: &UpdateCommand) -> Result<String> {
        let id = parse_schema_id(&command.id)?;
        let context = CommandContext::load_with_config(
            command.project_path.clone(),
            command.config_path.clone(),
        )?;
        let owner_id = context.owner_id()?;

        let definition = SchemaParserService::new()
            .parse_schema_file(&context.resolve_path(&command.file))
            .with_context(|| "Failed to parse schema")?;

        let request = UpdateSchemaRequest {
            name: command.name.clone(),
            description: command.description.clone(),
            definition,
        };

        let service = context.schema_service()?;
        let updated = service
            .update_schema(id, owner_id, request)
            .await
            .with_context(|| format!("Failed to update schema {}", id))?;

        let output = MaterializeOutput::new("updated", &updated.record, updated.report);
        render_output(&output, &command.format)
    }
}
