// Core Domain
// スキーマ記述、検証結果、エラー、設定の純粋なドメイン型

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod naming;
pub mod schema;
pub mod schema_record;
