// deleteコマンドハンドラー
//
// スキーマレコードを削除します。--drop-database 指定時は対象データベースも削除します。

use crate::cli::command_context::CommandContext;
use crate::cli::commands::parse_schema_id;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// deleteコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct DeleteCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// カスタム設定ファイルパス
    pub config_path: Option<PathBuf>,
    /// スキーマID
    pub id: String,
    /// 対象データベースも削除する
    pub drop_database: bool,
}

/// deleteコマンドハンドラー
#[derive(Debug, Clone, Default)]
pub struct DeleteCommandHandler {}

impl DeleteCommandHandler {
    /// 新しいDeleteCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// deleteコマンドを実行
    pub async fn execute(&self, command: &DeleteCommand) -> Result<String> {
        let id = parse_schema_id(&command.id)?;
        let context = CommandContext::load_with_config(
            command.project_path.clone(),
            command.config_path.clone(),
        )?;
        let owner_id = context.owner_id()?;

        let service = context.schema_service()?;
        service
            .delete_schema(id, owner_id, command.drop_database)
            .await
            .with_context(|| format!("Failed to delete schema {}", id))?;

        if command.drop_database {
            Ok(format!("Schema {} deleted (database dropped).", id))
        } else {
            Ok(format!("Schema {} deleted.", id))
        }
    }
}
