// Schemata DBクレート
//
// DDL生成、スキーマ検証、データベースライフサイクル管理、
// スキーマレコードストアとオーケストレーションを提供する。

pub use schemata_core::core;

pub mod adapters;
pub mod services;
