// validateコマンドハンドラー
//
// スキーマ記述の検証機能を実装します。
// - スキーマ記述ファイルの読み込み（JSON/YAML）
// - バリデーションルールの実行
// - エラーと警告、CREATE TABLEプレビューの表示
// - 無効な場合は終了コード1

use crate::adapters::sql_generator::postgres::PostgresSqlGenerator;
use crate::cli::commands::{render_output, CommandOutput};
use crate::cli::OutputFormat;
use crate::core::error::ValidationResult;
use crate::core::schema::SchemaData;
use crate::services::schema_parser::SchemaParserService;
use crate::services::schema_validator::SchemaValidatorService;
use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// validateコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct ValidateCommand {
    /// スキーマ記述ファイルのパス
    pub file: PathBuf,
    /// 出力フォーマット
    pub format: OutputFormat,
}

/// 検証統計
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStatistics {
    pub tables: usize,
    pub columns: usize,
    pub foreign_keys: usize,
}

impl ValidationStatistics {
    fn from_schema(schema: &SchemaData) -> Self {
        Self {
            tables: schema.table_count(),
            columns: schema.column_count(),
            foreign_keys: schema.foreign_keys.len(),
        }
    }
}

/// validateコマンドの出力構造体
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOutput {
    #[serde(flatten)]
    pub result: ValidationResult,
    pub statistics: ValidationStatistics,
    #[serde(skip)]
    pub text_message: String,
}

impl CommandOutput for ValidateOutput {
    fn to_text(&self) -> String {
        self.text_message.clone()
    }
}

/// validateコマンドハンドラー
#[derive(Debug, Clone, Default)]
pub struct ValidateCommandHandler {}

impl ValidateCommandHandler {
    /// 新しいValidateCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// validateコマンドを実行
    ///
    /// # Returns
    ///
    /// 有効な場合は検証結果、無効な場合は検証結果を含むエラー
    pub fn execute(&self, command: &ValidateCommand) -> Result<String> {
        let output = self.run(command)?;
        let rendered = render_output(&output, &command.format)?;

        if output.result.is_valid() {
            Ok(rendered)
        } else {
            Err(anyhow!("{}", rendered))
        }
    }

    /// 検証を実行して出力を構築
    pub fn run(&self, command: &ValidateCommand) -> Result<ValidateOutput> {
        let parser = SchemaParserService::new();
        let schema = parser
            .parse_schema_file(&command.file)
            .with_context(|| "Failed to parse schema")?;
        debug!(
            file = %command.file.display(),
            tables = schema.table_count(),
            "Loaded schema description"
        );

        let generator = PostgresSqlGenerator::new();
        let result = SchemaValidatorService::new().validate_with_preview(&schema, &generator);
        let statistics = ValidationStatistics::from_schema(&schema);
        let text_message = self.format_validation_result(&result, &statistics);

        Ok(ValidateOutput {
            result,
            statistics,
            text_message,
        })
    }

    /// 検証結果をフォーマット
    fn format_validation_result(
        &self,
        result: &ValidationResult,
        statistics: &ValidationStatistics,
    ) -> String {
        let mut output = String::new();

        output.push_str("=== Schema Validation Results ===\n\n");

        if !result.errors.is_empty() {
            output.push_str(&format!(
                "{} {} error(s) found:\n",
                "✗".red(),
                result.error_count()
            ));
            for (i, error) in result.errors.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, error));
            }
            output.push('\n');
        }

        if !result.warnings.is_empty() {
            output.push_str(&format!(
                "{} {} warning(s):\n",
                "⚠".yellow(),
                result.warning_count()
            ));
            for warning in &result.warnings {
                output.push_str(&format!("  - {}\n", warning));
            }
            output.push('\n');
        }

        if let Some(statements) = &result.generated_sql {
            output.push_str("=== Generated SQL Preview ===\n");
            output.push_str(&statements.join("\n\n"));
            output.push_str("\n\n");
        }

        output.push_str("=== Validation Statistics ===\n");
        output.push_str(&format!("Tables: {}\n", statistics.tables));
        output.push_str(&format!("Columns: {}\n", statistics.columns));
        output.push_str(&format!("Foreign keys: {}\n", statistics.foreign_keys));

        output.push_str("\n=== Result ===\n");
        if result.is_valid() {
            output.push_str(&format!(
                "{} Validation complete. No errors found.",
                "✓".green()
            ));
        } else {
            output.push_str(&format!(
                "{} Validation complete. {} error(s) found.",
                "✗".red(),
                result.error_count()
            ));
        }

        output
    }
}
