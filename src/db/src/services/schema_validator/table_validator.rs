// テーブル構造の検証

use crate::core::error::{ValidationError, ValidationResult};
use crate::core::schema::SchemaData;

/// テーブルの存在確認
pub fn validate_tables_present(schema: &SchemaData) -> ValidationResult {
    let mut result = ValidationResult::new();

    if schema.tables.is_empty() {
        result.add_error(ValidationError::missing_tables());
    }

    result
}

/// プライマリキーの存在確認（警告のみ）
pub fn validate_primary_keys(schema: &SchemaData) -> ValidationResult {
    let mut result = ValidationResult::new();

    for table in schema.tables.iter().filter(|t| !t.has_primary_key()) {
        result.add_warning(format!(
            "Table '{}' has no primary key defined",
            table.name
        ));
    }

    result
}
