// Schemata コアクレート
//
// ドメインモデル、エラー型、設定構造体を提供する。I/Oは持たない。

pub mod core;
