// Schemataライブラリのエントリーポイント
//
// ワークスペース分割後も既存のパス互換を保つため、各crateを再公開する。

pub mod cli;

pub use schemata_core::core;
pub use schemata_db::{adapters, services};
