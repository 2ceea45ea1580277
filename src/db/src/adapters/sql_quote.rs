// SQLリテラル・識別子ユーティリティ
//
// デフォルト値リテラルのクォートと、データベース名の検証を提供します。
// type_mappingとsql_generatorの両方から使用される共有モジュールです。

use crate::core::error::DatabaseError;
use crate::core::schema::DefaultValue;
use regex::Regex;
use std::sync::LazyLock;

/// 対象データベース名として許可するパターン
static DATABASE_NAME_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[a-z_][a-z0-9_]{0,62}$"));

/// PostgreSQL用文字列リテラルクォート（シングルクォート）
///
/// リテラル内のシングルクォートは二重にエスケープします。
///
/// # Examples
/// ```
/// use schemata_db::adapters::sql_quote::quote_literal_postgres;
/// assert_eq!(quote_literal_postgres("draft"), "'draft'");
/// assert_eq!(quote_literal_postgres("it's"), "'it''s'");
/// ```
pub fn quote_literal_postgres(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// デフォルト値をSQL式に変換
///
/// 文字列はクォート、真偽値は `true`/`false`、数値は入力の表記のまま出力します。
pub fn format_default_value(value: &DefaultValue) -> String {
    match value {
        DefaultValue::Text(text) => quote_literal_postgres(text),
        DefaultValue::Bool(flag) => flag.to_string(),
        DefaultValue::Number(number) => number.to_string(),
    }
}

/// データベース名を検証
///
/// 識別子はクォートせずに埋め込むため、小文字・数字・アンダースコアのみを許可します。
pub fn validate_database_name(name: &str) -> Result<(), DatabaseError> {
    let matches = DATABASE_NAME_PATTERN
        .as_ref()
        .map(|re| re.is_match(name))
        .unwrap_or(false);

    if matches {
        Ok(())
    } else {
        Err(DatabaseError::InvalidDatabaseName {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_literal_postgres_simple() {
        assert_eq!(quote_literal_postgres("active"), "'active'");
        assert_eq!(quote_literal_postgres(""), "''");
    }

    #[test]
    fn test_quote_literal_postgres_with_embedded_quote() {
        // シングルクォートは二重にエスケープ
        assert_eq!(quote_literal_postgres("O'Reilly"), "'O''Reilly'");
        assert_eq!(quote_literal_postgres("'"), "''''");
    }

    #[test]
    fn test_format_default_value() {
        assert_eq!(
            format_default_value(&DefaultValue::Text("pending".to_string())),
            "'pending'"
        );
        assert_eq!(format_default_value(&DefaultValue::Bool(true)), "true");
        assert_eq!(format_default_value(&DefaultValue::Bool(false)), "false");

        let integer: serde_json::Number = serde_json::from_str("42").unwrap();
        assert_eq!(format_default_value(&DefaultValue::Number(integer)), "42");

        let float: serde_json::Number = serde_json::from_str("0.5").unwrap();
        assert_eq!(format_default_value(&DefaultValue::Number(float)), "0.5");
    }

    #[test]
    fn test_validate_database_name_accepts_generated_names() {
        assert!(validate_database_name("schema_550e8400_e29b_41d4_a716_446655440000").is_ok());
        assert!(validate_database_name("_private").is_ok());
        assert!(validate_database_name("a").is_ok());
    }

    #[test]
    fn test_validate_database_name_rejects_invalid() {
        let too_long = "a".repeat(64);
        for name in [
            "",
            "1abc",
            "Upper",
            "with-dash",
            "drop; --",
            "name with space",
            too_long.as_str(),
        ] {
            let result = validate_database_name(name);
            assert!(
                matches!(result, Err(DatabaseError::InvalidDatabaseName { .. })),
                "expected rejection for {:?}",
                name
            );
        }
    }

    #[test]
    fn test_validate_database_name_max_length() {
        assert!(validate_database_name(&"a".repeat(63)).is_ok());
    }
}
