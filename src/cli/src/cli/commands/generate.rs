// generateコマンドハンドラー
//
// スキーマ記述からSQLスクリプトを生成します。
// - スキーマ記述の読み込みと検証（エラー時は生成しない）
// - CREATE DATABASE / CREATE TABLE / ALTER TABLE の生成
// - 標準出力またはファイルへの書き出し

use crate::adapters::sql_generator::postgres::PostgresSqlGenerator;
use crate::adapters::sql_generator::SqlGenerator;
use crate::cli::commands::write_sql_file;
use crate::services::schema_parser::SchemaParserService;
use crate::services::schema_validator::SchemaValidatorService;
use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use tracing::warn;

/// generateコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct GenerateCommand {
    /// スキーマ記述ファイルのパス
    pub file: PathBuf,
    /// CREATE DATABASE に使うデータベース名
    pub database_name: Option<String>,
    /// 出力ファイル（未指定時は標準出力）
    pub output: Option<PathBuf>,
}

/// generateコマンドハンドラー
#[derive(Debug, Clone, Default)]
pub struct GenerateCommandHandler {}

impl GenerateCommandHandler {
    /// 新しいGenerateCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// generateコマンドを実行
    ///
    /// # Returns
    ///
    /// 出力ファイル未指定時はSQLスクリプト、指定時は書き出し先の案内
    pub fn execute(&self, command: &GenerateCommand) -> Result<String> {
        let schema = SchemaParserService::new()
            .parse_schema_file(&command.file)
            .with_context(|| "Failed to parse schema")?;

        let validation = SchemaValidatorService::new().validate(&schema);
        if !validation.is_valid() {
            return Err(anyhow!(
                "Schema validation failed:\n{}",
                validation.errors_to_string()
            ));
        }
        for warning in &validation.warnings {
            warn!(file = %command.file.display(), "{}", warning);
        }

        let script = PostgresSqlGenerator::new()
            .generate_script(&schema, command.database_name.as_deref())
            .with_context(|| "Failed to generate SQL")?;

        match &command.output {
            Some(path) => {
                write_sql_file(path, &script)?;
                Ok(format!("SQL script written to {}", path.display()))
            }
            None => Ok(script.trim_end().to_string()),
        }
    }
}
