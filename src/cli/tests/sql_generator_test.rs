// DDL生成の統合テスト
//
// JSONのスキーマ記述からPostgreSQL用DDLを生成し、出力形式と順序を検証する。

mod common;

use common::{parse_schema, USERS_POSTS_FK_SQL, USERS_POSTS_JSON};
use schemata::adapters::sql_generator::postgres::PostgresSqlGenerator;
use schemata::adapters::sql_generator::SqlGenerator;
use schemata::core::schema::DataType;

#[test]
fn test_users_posts_round_trip() {
    let schema = parse_schema(USERS_POSTS_JSON);
    let generator = PostgresSqlGenerator::new();

    let tables = generator.generate_create_tables(&schema);
    let foreign_keys = generator.generate_foreign_keys(&schema);

    assert_eq!(tables.len(), 2);
    assert_eq!(
        tables[0],
        "CREATE TABLE users (\n    id SERIAL NOT NULL,\n    email VARCHAR(255) NOT NULL,\n    PRIMARY KEY (id),\n    UNIQUE (email)\n);"
    );
    assert_eq!(
        tables[1],
        "CREATE TABLE posts (\n    id SERIAL NOT NULL,\n    user_id INTEGER NOT NULL,\n    title TEXT DEFAULT 'untitled',\n    created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT CURRENT_TIMESTAMP,\n    PRIMARY KEY (id)\n);"
    );
    assert_eq!(foreign_keys, vec![USERS_POSTS_FK_SQL.to_string()]);
}

#[test]
fn test_generation_is_idempotent() {
    let schema = parse_schema(USERS_POSTS_JSON);
    let generator = PostgresSqlGenerator::new();

    let first = generator.generate_script(&schema, Some("schema_abc")).unwrap();
    let second = generator.generate_script(&schema, Some("schema_abc")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_script_orders_sections() {
    let schema = parse_schema(USERS_POSTS_JSON);
    let script = PostgresSqlGenerator::new()
        .generate_script(&schema, Some("schema_abc"))
        .unwrap();

    let database = script.find("CREATE DATABASE schema_abc;").unwrap();
    let users = script.find("CREATE TABLE users").unwrap();
    let posts = script.find("CREATE TABLE posts").unwrap();
    let alter = script.find("ALTER TABLE posts").unwrap();
    assert!(database < users && users < posts && posts < alter);
    assert!(script.ends_with('\n'));
}

#[test]
fn test_unknown_target_table_is_skipped() {
    let json = USERS_POSTS_JSON.replace(r#""targetTableId": "t_users""#, r#""targetTableId": "t_missing""#);
    let schema = parse_schema(&json);
    let generator = PostgresSqlGenerator::new();

    let (statements, skipped) = generator.generate_foreign_keys_with_warnings(&schema);

    assert!(statements.is_empty());
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].foreign_key_id, "fk1");
    assert_eq!(skipped[0].unresolved, vec!["t_missing".to_string()]);
    // CREATE TABLE は影響を受けない
    assert_eq!(generator.generate_create_tables(&schema).len(), 2);
}

#[test]
fn test_every_data_type_is_mapped() {
    let columns: Vec<String> = DataType::ALL
        .iter()
        .enumerate()
        .map(|(i, data_type)| {
            format!(
                r#"{{"id": "c{i}", "name": "col_{i}", "dataType": "{}", "nullable": true, "primaryKey": false, "autoIncrement": false}}"#,
                data_type
            )
        })
        .collect();
    let json = format!(
        r#"{{"tables": [{{"id": "t1", "name": "all_types", "position": {{"x": 0, "y": 0}}, "columns": [{}]}}], "foreignKeys": []}}"#,
        columns.join(",")
    );
    let schema = parse_schema(&json);

    let sql = PostgresSqlGenerator::new().generate_create_table(&schema.tables[0]);

    for expected in [
        "col_0 INTEGER",
        "col_2 VARCHAR(255)",
        "col_5 TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP",
        "col_8 DECIMAL(10,2)",
        "col_11 JSONB",
        "col_12 UUID DEFAULT gen_random_uuid()",
    ] {
        assert!(sql.contains(expected), "missing '{}' in:\n{}", expected, sql);
    }
}

#[test]
fn test_table_order_follows_input_order() {
    let mut schema = parse_schema(USERS_POSTS_JSON);
    let generator = PostgresSqlGenerator::new();
    let forward = generator.generate_create_tables(&schema);

    schema.tables.reverse();
    let reversed = generator.generate_create_tables(&schema);

    assert_eq!(reversed.len(), 2);
    assert_eq!(reversed[0], forward[1]);
    assert_eq!(reversed[1], forward[0]);
}
