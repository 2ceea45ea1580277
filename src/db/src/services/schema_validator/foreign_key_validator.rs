// 外部キー参照の検証

use crate::core::error::ValidationResult;
use crate::core::schema::SchemaData;
use std::collections::HashSet;

/// 外部キー参照の解決確認（警告のみ）
///
/// 解決できない外部キーはDDL生成時にスキップされるため、検証時点で警告します。
/// カラムIDはテーブルを問わずスキーマ全体で解決します。
pub fn validate_foreign_key_references(schema: &SchemaData) -> ValidationResult {
    let mut result = ValidationResult::new();
    let column_ids: HashSet<&str> = schema
        .tables
        .iter()
        .flat_map(|table| table.columns.iter().map(|column| column.id.as_str()))
        .collect();

    for fk in &schema.foreign_keys {
        let mut unresolved = Vec::new();

        if schema.get_table_by_id(&fk.source_table_id).is_none() {
            unresolved.push(format!("source table '{}'", fk.source_table_id));
        }
        if !column_ids.contains(fk.source_column_id.as_str()) {
            unresolved.push(format!("source column '{}'", fk.source_column_id));
        }
        if schema.get_table_by_id(&fk.target_table_id).is_none() {
            unresolved.push(format!("target table '{}'", fk.target_table_id));
        }
        if !column_ids.contains(fk.target_column_id.as_str()) {
            unresolved.push(format!("target column '{}'", fk.target_column_id));
        }

        if !unresolved.is_empty() {
            result.add_warning(format!(
                "Foreign key '{}' references unknown {} and will be skipped",
                fk.id,
                unresolved.join(", ")
            ));
        }
    }

    result
}
