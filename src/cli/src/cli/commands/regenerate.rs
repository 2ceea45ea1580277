// regenerateコマンドハンドラー
//
// 保存済みのスキーマ記述から対象データベースを作り直します。

use crate::cli::command_context::CommandContext;
use crate::cli::commands::{parse_schema_id, render_output, MaterializeOutput};
use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// regenerateコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct RegenerateCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// カスタム設定ファイルパス
    pub config_path: Option<PathBuf>,
    /// スキーマID
    pub id: String,
    /// 出力フォーマット
    pub format: OutputFormat,
}

/// regenerateコマンドハンドラー
#[derive(Debug, Clone, Default)]
pub struct RegenerateCommandHandler {}

impl RegenerateCommandHandler {
    /// 新しいRegenerateCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// regenerateコマンドを実行
    pub async fn execute(&self, command: &RegenerateCommand) -> Result<String> {
        let id = parse_schema_id(&command.id)?;
        let context = CommandContext::load_with_config(
            command.project_path.clone(),
            command.config_path.clone(),
        )?;
        let owner_id = context.owner_id()?;

        let service = context.schema_service()?;
        let regenerated = service
            .regenerate_schema(id, owner_id)
            .await
            .with_context(|| format!("Failed to regenerate schema {}", id))?;

        let output =
            MaterializeOutput::new("regenerated", &regenerated.record, regenerated.report);
        render_output(&output, &command.format)
    }
}
