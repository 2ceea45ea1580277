// PostgreSQL用SQLジェネレーター
//
// スキーマ記述からPostgreSQL用のDDL文を生成します。

use crate::adapters::sql_generator::{
    build_column_definition, generate_fk_constraint_name, SqlGenerator, INDENT,
};
use crate::adapters::sql_quote::validate_database_name;
use crate::adapters::type_mapping::{PostgresTypeMapper, TypeMapper};
use crate::core::error::DatabaseError;
use crate::core::lifecycle::SkippedForeignKey;
use crate::core::schema::{Column, SchemaData, Table};
use std::collections::HashMap;
use tracing::warn;

/// PostgreSQL用SQLジェネレーター
pub struct PostgresSqlGenerator {
    type_mapper: Box<dyn TypeMapper>,
}

impl std::fmt::Debug for PostgresSqlGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresSqlGenerator").finish()
    }
}

impl PostgresSqlGenerator {
    /// 新しいPostgresSqlGeneratorを作成
    pub fn new() -> Self {
        Self::with_type_mapper(Box::new(PostgresTypeMapper))
    }

    /// 型マッパーを指定して作成
    pub fn with_type_mapper(type_mapper: Box<dyn TypeMapper>) -> Self {
        Self { type_mapper }
    }

    /// カラム定義を生成
    fn generate_column_definition(&self, column: &Column) -> String {
        let mapped = self.type_mapper.map_column(column);
        build_column_definition(column, mapped.sql_type, mapped.implicit_default)
    }
}

impl Default for PostgresSqlGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// 外部キー解決用のルックアップ
///
/// テーブルIDとカラムIDから名前を引くマップを一度だけ構築します。
struct ReferenceLookup<'a> {
    tables: HashMap<&'a str, &'a Table>,
    columns: HashMap<&'a str, &'a Column>,
}

impl<'a> ReferenceLookup<'a> {
    fn build(schema: &'a SchemaData) -> Self {
        let mut tables = HashMap::new();
        let mut columns = HashMap::new();
        for table in &schema.tables {
            tables.insert(table.id.as_str(), table);
            for column in &table.columns {
                columns.insert(column.id.as_str(), column);
            }
        }
        Self { tables, columns }
    }

    fn table(&self, table_id: &str) -> Option<&'a Table> {
        self.tables.get(table_id).copied()
    }

    fn column(&self, column_id: &str) -> Option<&'a Column> {
        self.columns.get(column_id).copied()
    }
}

impl SqlGenerator for PostgresSqlGenerator {
    fn generate_create_database(&self, name: &str) -> Result<String, DatabaseError> {
        validate_database_name(name)?;
        Ok(format!("CREATE DATABASE {};", name))
    }

    fn generate_drop_database(&self, name: &str) -> Result<String, DatabaseError> {
        validate_database_name(name)?;
        Ok(format!("DROP DATABASE IF EXISTS {};", name))
    }

    fn generate_create_table(&self, table: &Table) -> String {
        let mut parts: Vec<String> = table
            .columns
            .iter()
            .map(|column| self.generate_column_definition(column))
            .collect();

        let primary_keys = table.primary_key_columns();
        if !primary_keys.is_empty() {
            parts.push(format!("PRIMARY KEY ({})", primary_keys.join(", ")));
        }

        // プライマリキー以外のUNIQUEカラムは列ごとに制約を付ける
        for column in table.columns.iter().filter(|c| c.unique && !c.primary_key) {
            parts.push(format!("UNIQUE ({})", column.name));
        }

        format!(
            "CREATE TABLE {} (\n{}{}\n);",
            table.name,
            INDENT,
            parts.join(&format!(",\n{}", INDENT))
        )
    }

    fn generate_foreign_keys_with_warnings(
        &self,
        schema: &SchemaData,
    ) -> (Vec<String>, Vec<SkippedForeignKey>) {
        let lookup = ReferenceLookup::build(schema);
        let mut statements = Vec::new();
        let mut skipped = Vec::new();

        for fk in &schema.foreign_keys {
            let source_table = lookup.table(&fk.source_table_id);
            let source_column = lookup.column(&fk.source_column_id);
            let target_table = lookup.table(&fk.target_table_id);
            let target_column = lookup.column(&fk.target_column_id);

            let (source_table, source_column, target_table, target_column) =
                match (source_table, source_column, target_table, target_column) {
                    (Some(st), Some(sc), Some(tt), Some(tc)) => (st, sc, tt, tc),
                    (st, sc, tt, tc) => {
                        let mut unresolved = Vec::new();
                        if st.is_none() {
                            unresolved.push(fk.source_table_id.clone());
                        }
                        if sc.is_none() {
                            unresolved.push(fk.source_column_id.clone());
                        }
                        if tt.is_none() {
                            unresolved.push(fk.target_table_id.clone());
                        }
                        if tc.is_none() {
                            unresolved.push(fk.target_column_id.clone());
                        }
                        warn!(
                            foreign_key = %fk.id,
                            unresolved = ?unresolved,
                            "Skipping foreign key with unresolved references"
                        );
                        skipped.push(SkippedForeignKey {
                            foreign_key_id: fk.id.clone(),
                            unresolved,
                        });
                        continue;
                    }
                };

            let constraint_name = fk.explicit_name().map(str::to_string).unwrap_or_else(|| {
                generate_fk_constraint_name(&source_table.name, &source_column.name)
            });

            statements.push(format!(
                "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE {} ON UPDATE {};",
                source_table.name,
                constraint_name,
                source_column.name,
                target_table.name,
                target_column.name,
                fk.on_delete_action(),
                fk.on_update_action()
            ));
        }

        (statements, skipped)
    }
}
