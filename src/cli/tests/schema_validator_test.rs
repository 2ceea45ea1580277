// スキーマ検証の統合テスト

mod common;

use common::{parse_schema, USERS_POSTS_JSON};
use schemata::adapters::sql_generator::postgres::PostgresSqlGenerator;
use schemata::core::error::ValidationErrorCode;
use schemata::services::schema_validator::SchemaValidatorService;

#[test]
fn test_valid_schema_has_preview() {
    let schema = parse_schema(USERS_POSTS_JSON);

    let result = SchemaValidatorService::new()
        .validate_with_preview(&schema, &PostgresSqlGenerator::new());

    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
    let preview = result.generated_sql.unwrap();
    assert_eq!(preview.len(), 2);
    assert!(preview[0].starts_with("CREATE TABLE users"));
}

#[test]
fn test_table_without_primary_key_is_warning() {
    let json = r#"{"tables": [{"id": "t1", "name": "logs", "position": {"x": 0, "y": 0},
        "columns": [{"id": "c1", "name": "message", "dataType": "TEXT", "nullable": true, "primaryKey": false, "autoIncrement": false}]}],
        "foreignKeys": []}"#;
    let schema = parse_schema(json);

    let result = SchemaValidatorService::new().validate(&schema);

    assert!(result.is_valid());
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("logs"));
}

#[test]
fn test_unsupported_data_type_is_error() {
    let json = USERS_POSTS_JSON.replace(r#""dataType": "TEXT""#, r#""dataType": "MONEY""#);
    let schema = parse_schema(&json);

    let result = SchemaValidatorService::new()
        .validate_with_preview(&schema, &PostgresSqlGenerator::new());

    assert!(!result.is_valid());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].code, ValidationErrorCode::UnsupportedDataType);
    assert_eq!(result.errors[0].field, "tables[1].columns[2].dataType");
    assert!(result.generated_sql.is_none());
}

#[test]
fn test_empty_schema_is_error() {
    let schema = parse_schema(r#"{"tables": [], "foreignKeys": []}"#);

    let result = SchemaValidatorService::new().validate(&schema);

    assert!(!result.is_valid());
    assert_eq!(result.errors[0].code, ValidationErrorCode::MissingTables);
}

#[test]
fn test_dangling_foreign_key_is_warning() {
    let json = USERS_POSTS_JSON.replace(r#""targetTableId": "t_users""#, r#""targetTableId": "t9""#);
    let schema = parse_schema(&json);

    let result = SchemaValidatorService::new().validate(&schema);

    assert!(result.is_valid());
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("fk1"));
}
