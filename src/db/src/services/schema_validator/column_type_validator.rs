// カラム型の検証

use crate::core::error::{ValidationError, ValidationResult};
use crate::core::schema::{DataType, SchemaData};

/// データ型名の検証
///
/// 未対応のデータ型はエラーとして `tables[i].columns[j].dataType` に報告します。
pub fn validate_data_types(schema: &SchemaData) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (table_index, table) in schema.tables.iter().enumerate() {
        for (column_index, column) in table.columns.iter().enumerate() {
            if DataType::parse(&column.data_type).is_none() {
                result.add_error(ValidationError::unsupported_data_type(
                    table_index,
                    column_index,
                    &column.data_type,
                ));
            }
        }
    }

    result
}

/// 自動増分フラグの検証（警告のみ）
///
/// INT/BIGINT以外の自動増分フラグは無視されるため警告します。
/// 未対応のデータ型は validate_data_types で報告済みのため対象外です。
pub fn validate_auto_increment(schema: &SchemaData) -> ValidationResult {
    let mut result = ValidationResult::new();

    for table in &schema.tables {
        for column in table.columns.iter().filter(|c| c.auto_increment) {
            if let Some(data_type) = column.parsed_data_type() {
                if !data_type.is_integer() {
                    result.add_warning(format!(
                        "Column '{}.{}' has autoIncrement set on non-integer type {}; the flag is ignored",
                        table.name, column.name, data_type
                    ));
                }
            }
        }
    }

    result
}
