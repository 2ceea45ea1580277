// スキーマパーサーサービス
//
// スキーマ記述ファイル（JSON、またはYAML）の読み込みと解析を行うサービス。

use crate::core::schema::SchemaData;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

/// スキーマパーサーサービス
///
/// 拡張子が .yaml / .yml の場合はYAML、それ以外はJSONとして解析します。
#[derive(Debug, Clone)]
pub struct SchemaParserService {}

impl SchemaParserService {
    /// 新しいSchemaParserServiceを作成
    pub fn new() -> Self {
        Self {}
    }

    /// スキーマ記述ファイルを解析
    ///
    /// # Arguments
    ///
    /// * `file_path` - スキーマ記述ファイルのパス
    ///
    /// # Errors
    ///
    /// - ファイルの読み込みに失敗した場合
    /// - JSON/YAMLの解析に失敗した場合（位置情報付き）
    pub fn parse_schema_file(&self, file_path: &Path) -> Result<SchemaData> {
        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read schema file: {}", file_path.display()))?;

        if is_yaml(file_path) {
            serde_saphyr::from_str(&content).map_err(|e| {
                anyhow!("Failed to parse YAML at {}: {}", file_path.display(), e)
            })
        } else {
            self.parse_json(&content).map_err(|e| {
                anyhow!("Failed to parse JSON at {}:{}", file_path.display(), e)
            })
        }
    }

    /// JSON文字列を解析
    ///
    /// エラーメッセージは `行:列: 原因` の形式になります。
    pub fn parse_json(&self, content: &str) -> Result<SchemaData> {
        serde_json::from_str(content)
            .map_err(|e| anyhow!("{}:{}: {}", e.line(), e.column(), e))
    }
}

impl Default for SchemaParserService {
    fn default() -> Self {
        Self::new()
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
