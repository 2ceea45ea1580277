// コマンドハンドラー層
// 各CLIコマンドの実装

pub mod create;
pub mod delete;
pub mod export;
pub mod generate;
pub mod init;
pub mod list;
pub mod regenerate;
pub mod status;
pub mod update;
pub mod validate;

use crate::cli::OutputFormat;
use crate::core::lifecycle::RegenerationReport;
use crate::core::schema_record::{SchemaRecord, SchemaSummary};
use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// テキスト出力を持つコマンド結果
pub trait CommandOutput {
    /// テキスト形式の出力
    fn to_text(&self) -> String;
}

/// 出力フォーマットに応じてコマンド結果を文字列化
pub fn render_output<T>(output: &T, format: &OutputFormat) -> Result<String>
where
    T: CommandOutput + Serialize,
{
    match format {
        OutputFormat::Text => Ok(output.to_text()),
        OutputFormat::Json => serde_json::to_string_pretty(output)
            .with_context(|| "Failed to serialize output as JSON"),
    }
}

/// スキーマID引数をパース
pub fn parse_schema_id(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|_| anyhow!("Invalid schema id: '{}'", value))
}

/// 生成したSQLをファイルに書き出す
pub(crate) fn write_sql_file(path: &Path, sql: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    fs::write(path, sql).with_context(|| format!("Failed to write SQL file: {:?}", path))
}

/// create/update/regenerate 共通の出力
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterializeOutput {
    pub schema: SchemaSummary,
    pub report: RegenerationReport,
    #[serde(skip)]
    pub text_message: String,
}

impl MaterializeOutput {
    /// レコードと再生成レポートから出力を構築
    pub fn new(action: &str, record: &SchemaRecord, report: RegenerationReport) -> Self {
        let mut text = format!(
            "{} Schema '{}' {}\n",
            "✓".green(),
            record.name,
            action
        );
        text.push_str(&format!("  ID:       {}\n", record.id));
        text.push_str(&format!("  Database: {}\n", record.database_name));
        text.push_str(&format!("  Status:   {}\n", record.status));
        text.push_str(&format!("  Version:  {}\n", record.version));
        text.push_str(&format!(
            "  Tables: {}, Foreign keys: {}",
            report.table_count, report.foreign_key_count
        ));
        for skipped in &report.skipped_foreign_keys {
            text.push_str(&format!("\n{} {}", "⚠".yellow(), skipped));
        }
        if let Some(warning) = &report.drop_warning {
            text.push_str(&format!(
                "\n{} Previous database could not be dropped: {}",
                "⚠".yellow(),
                warning
            ));
        }

        Self {
            schema: SchemaSummary::from(record),
            report,
            text_message: text,
        }
    }
}

impl CommandOutput for MaterializeOutput {
    fn to_text(&self) -> String {
        self.text_message.clone()
    }
}
