// Adapters
// データベースへのアクセスとSQL文字列の生成を抽象化

pub mod connection_string;
pub mod database;
pub mod sql_generator;
pub mod sql_quote;
pub mod type_mapping;
