// CLIテスト共通ヘルパー
//
// テスト全体で共有されるユーティリティ関数を集約する。
// テストファイルから `mod common;` で利用可能。

use anyhow::Result;
use schemata::core::config::{Config, DatabaseConfig};
use schemata::core::schema::SchemaData;
use schemata::services::config_serializer::ConfigSerializer;
use schemata::services::schema_parser::SchemaParserService;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use uuid::Uuid;

/// users / posts の2テーブルと外部キー1件を持つスキーマ記述
#[allow(dead_code)]
pub const USERS_POSTS_JSON: &str = r#"{
  "tables": [
    {
      "id": "t_users",
      "name": "users",
      "position": {"x": 0, "y": 0},
      "columns": [
        {"id": "c_users_id", "name": "id", "dataType": "INT", "nullable": false, "primaryKey": true, "autoIncrement": true},
        {"id": "c_users_email", "name": "email", "dataType": "VARCHAR", "length": 255, "nullable": false, "primaryKey": false, "autoIncrement": false, "unique": true}
      ]
    },
    {
      "id": "t_posts",
      "name": "posts",
      "position": {"x": 300, "y": 0},
      "columns": [
        {"id": "c_posts_id", "name": "id", "dataType": "INT", "nullable": false, "primaryKey": true, "autoIncrement": true},
        {"id": "c_posts_user_id", "name": "user_id", "dataType": "INT", "nullable": false, "primaryKey": false, "autoIncrement": false},
        {"id": "c_posts_title", "name": "title", "dataType": "TEXT", "nullable": true, "primaryKey": false, "autoIncrement": false, "defaultValue": "untitled"},
        {"id": "c_posts_created", "name": "created_at", "dataType": "TIMESTAMP", "nullable": false, "primaryKey": false, "autoIncrement": false}
      ]
    }
  ],
  "foreignKeys": [
    {
      "id": "fk1",
      "sourceTableId": "t_posts",
      "sourceColumnId": "c_posts_user_id",
      "targetTableId": "t_users",
      "targetColumnId": "c_users_id",
      "onDelete": "CASCADE",
      "onUpdate": "RESTRICT"
    }
  ]
}"#;

/// 期待されるALTER TABLE文
#[allow(dead_code)]
pub const USERS_POSTS_FK_SQL: &str = "ALTER TABLE posts ADD CONSTRAINT fk_posts_user_id FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE ON UPDATE RESTRICT;";

/// JSON文字列からスキーマ記述をパース
#[allow(dead_code)]
pub fn parse_schema(json: &str) -> SchemaData {
    SchemaParserService::new().parse_json(json).unwrap()
}

/// スキーマ記述ファイルを書き込む
#[allow(dead_code)]
pub fn write_schema_file(dir: &Path, file_name: &str, content: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, content).unwrap();
    path
}

/// テスト用のプロジェクトディレクトリを作成（設定ファイル付き）
#[allow(dead_code)]
pub fn setup_test_project(database: DatabaseConfig) -> Result<(TempDir, PathBuf, Uuid)> {
    let temp_dir = TempDir::new()?;
    let project_path = temp_dir.path().to_path_buf();
    let owner_id = Uuid::new_v4();

    let mut config = Config::with_owner(owner_id);
    config.database = database;
    ConfigSerializer::write_to_file(&config, &project_path.join(Config::DEFAULT_CONFIG_PATH))?;
    fs::create_dir_all(project_path.join(&config.state_dir))?;

    Ok((temp_dir, project_path, owner_id))
}

/// 指定ホスト・ポートのPostgreSQL接続設定
#[allow(dead_code)]
pub fn postgres_config(host: &str, port: u16) -> DatabaseConfig {
    DatabaseConfig {
        host: host.to_string(),
        port: Some(port),
        timeout: Some(10),
        ..Default::default()
    }
}
