// createコマンドハンドラー
//
// スキーマレコードを作成し、対象データベースを実体化します。

use crate::cli::command_context::CommandContext;
use crate::cli::commands::{render_output, MaterializeOutput};
use crate::cli::OutputFormat;
use crate::core::schema_record::CreateSchemaRequest;
use crate::services::schema_parser::SchemaParserService;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// createコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct CreateCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// カスタム設定ファイルパス
    pub config_path: Option<PathBuf>,
    /// スキーマ記述ファイルのパス
    pub file: PathBuf,
    /// スキーマ名
    pub name: String,
    /// 説明
    pub description: Option<String>,
    /// 出力フォーマット
    pub format: OutputFormat,
}

/// createコマンドハンドラー
#[derive(Debug, Clone, Default)]
pub struct CreateCommandHandler {}

impl CreateCommandHandler {
    /// 新しいCreateCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// createコマンドを実行
    pub async fn execute(&self, command: &CreateCommand) -> Result<String> {
        let context = CommandContext::load_with_config(
            command.project_path.clone(),
            command.config_path.clone(),
        )?;
        let owner_id = context.owner_id()?;

        let definition = SchemaParserService::new()
            .parse_schema_file(&context.resolve_path(&command.file))
            .with_context(|| "Failed to parse schema")?;

        let request = CreateSchemaRequest {
            name: command.name.clone(),
            description: command.description.clone().unwrap_or_default(),
            definition,
        };

        let service = context.schema_service()?;
        let created = service
            .create_schema(request, owner_id)
            .await
            .with_context(|| format!("Failed to create schema '{}'", command.name))?;

        let output = MaterializeOutput::new("created", &created.record, created.report);
        render_output(&output, &command.format)
    }
}
