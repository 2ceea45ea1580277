// Services Layer
// ドメインロジックを実行するサービス層

pub mod config_loader;
pub mod config_serializer;
pub mod database_config_resolver;
pub mod database_lifecycle;
pub mod schema_parser;
pub mod schema_service;
pub mod schema_store;
pub mod schema_validator;

#[cfg(test)]
pub(crate) mod testing;
