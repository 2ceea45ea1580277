// SQL生成アダプター
//
// スキーマ記述から対象データベース用のDDL文を生成するアダプター層。
// 生成は純粋かつ決定的で、同じ入力からは常に同じ文字列が得られる。

pub mod postgres;

use crate::adapters::sql_quote::format_default_value;
use crate::core::error::DatabaseError;
use crate::core::lifecycle::SkippedForeignKey;
use crate::core::schema::{Column, SchemaData, Table};

/// カラム定義のインデント
pub(crate) const INDENT: &str = "    ";

/// カラム定義の共通組み立てヘルパー
///
/// `<name> <type>[ NOT NULL][ DEFAULT <expr>]` を組み立てます。
/// 明示的なデフォルト値が暗黙のデフォルト式より優先されます。
pub(crate) fn build_column_definition(
    column: &Column,
    type_str: String,
    implicit_default: Option<&str>,
) -> String {
    let mut parts = Vec::new();

    parts.push(column.name.clone());
    parts.push(type_str);

    if !column.nullable {
        parts.push("NOT NULL".to_string());
    }

    // 暗黙のデフォルトはdefaultValueが未指定の場合のみ（空文字列の指定でも抑止される）
    let default_expr = match &column.default_value {
        None => implicit_default.map(str::to_string),
        Some(_) => column.explicit_default().map(format_default_value),
    };
    if let Some(expr) = default_expr {
        parts.push(format!("DEFAULT {}", expr));
    }

    parts.join(" ")
}

/// 外部キー制約名を生成
///
/// 命名規則: fk_{source_table}_{source_column}
pub(crate) fn generate_fk_constraint_name(source_table: &str, source_column: &str) -> String {
    format!("fk_{}_{}", source_table, source_column)
}

/// SQLジェネレータートレイト
///
/// 対象データベース方言用のSQLジェネレーターが実装すべきインターフェース。
pub trait SqlGenerator {
    /// CREATE DATABASE文を生成
    ///
    /// # Arguments
    ///
    /// * `name` - 対象データベース名
    ///
    /// # Returns
    ///
    /// CREATE DATABASE文、名前が不正な場合はエラー
    fn generate_create_database(&self, name: &str) -> Result<String, DatabaseError>;

    /// DROP DATABASE IF EXISTS文を生成
    fn generate_drop_database(&self, name: &str) -> Result<String, DatabaseError>;

    /// CREATE TABLE文を生成
    ///
    /// # Arguments
    ///
    /// * `table` - テーブル定義
    ///
    /// # Returns
    ///
    /// CREATE TABLE文のSQL文字列
    fn generate_create_table(&self, table: &Table) -> String;

    /// 外部キー制約を生成し、解決できなかった外部キーを返す
    ///
    /// # Returns
    ///
    /// (ALTER TABLE文のリスト, スキップした外部キーのリスト)
    fn generate_foreign_keys_with_warnings(
        &self,
        schema: &SchemaData,
    ) -> (Vec<String>, Vec<SkippedForeignKey>);

    /// 全テーブルのCREATE TABLE文を宣言順に生成
    fn generate_create_tables(&self, schema: &SchemaData) -> Vec<String> {
        schema
            .tables
            .iter()
            .map(|table| self.generate_create_table(table))
            .collect()
    }

    /// 外部キー制約のALTER TABLE文を宣言順に生成
    ///
    /// 参照先を解決できない外部キーはスキップされます。
    fn generate_foreign_keys(&self, schema: &SchemaData) -> Vec<String> {
        self.generate_foreign_keys_with_warnings(schema).0
    }

    /// SQLスクリプト全体を生成
    ///
    /// CREATE DATABASE（名前指定時のみ）、CREATE TABLE、ALTER TABLE の順に並べます。
    fn generate_script(
        &self,
        schema: &SchemaData,
        database_name: Option<&str>,
    ) -> Result<String, DatabaseError> {
        let mut sections = Vec::new();

        if let Some(name) = database_name {
            sections.push(format!(
                "-- Database: {}\n{}",
                name,
                self.generate_create_database(name)?
            ));
        }

        let tables = self.generate_create_tables(schema);
        if !tables.is_empty() {
            sections.push(format!("-- Tables\n{}", tables.join("\n\n")));
        }

        let (foreign_keys, skipped) = self.generate_foreign_keys_with_warnings(schema);
        if !foreign_keys.is_empty() {
            sections.push(format!("-- Foreign keys\n{}", foreign_keys.join("\n")));
        }
        if !skipped.is_empty() {
            let notes = skipped
                .iter()
                .map(|s| format!("-- {}", s))
                .collect::<Vec<_>>()
                .join("\n");
            sections.push(notes);
        }

        Ok(format!("{}\n", sections.join("\n\n")))
    }
}
