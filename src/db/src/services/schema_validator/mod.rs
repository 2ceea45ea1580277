// スキーマバリデーターサービス
//
// スキーマ記述の構造、データ型、外部キー参照の検証を行うサービス。
// 入力を変更せず、データベースにも接続しない。全ルールを実行し、途中で打ち切らない。

mod column_type_validator;
mod foreign_key_validator;
mod table_validator;

use crate::adapters::sql_generator::SqlGenerator;
use crate::core::error::ValidationResult;
use crate::core::schema::SchemaData;

/// スキーマバリデーターサービス
///
/// スキーマ記述の検証を行います。
#[derive(Debug, Clone)]
pub struct SchemaValidatorService {
    // 将来的な拡張のためのフィールドを予約
}

impl SchemaValidatorService {
    /// 新しいSchemaValidatorServiceを作成
    pub fn new() -> Self {
        Self {}
    }

    /// スキーマ記述の全体的な検証を実行
    ///
    /// # Arguments
    ///
    /// * `schema` - 検証対象のスキーマ記述
    ///
    /// # Returns
    ///
    /// 検証結果（エラーと警告を含む）。警告は有効性に影響しません。
    pub fn validate(&self, schema: &SchemaData) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.merge_all([
            table_validator::validate_tables_present(schema),
            table_validator::validate_primary_keys(schema),
            column_type_validator::validate_data_types(schema),
            column_type_validator::validate_auto_increment(schema),
            foreign_key_validator::validate_foreign_key_references(schema),
        ]);

        result
    }

    /// 検証を実行し、有効な場合はCREATE TABLE文のプレビューを添付
    pub fn validate_with_preview(
        &self,
        schema: &SchemaData,
        generator: &dyn SqlGenerator,
    ) -> ValidationResult {
        let mut result = self.validate(schema);
        if result.is_valid() {
            result.generated_sql = Some(generator.generate_create_tables(schema));
        }
        result
    }
}

impl Default for SchemaValidatorService {
    fn default() -> Self {
        Self::new()
    }
}
