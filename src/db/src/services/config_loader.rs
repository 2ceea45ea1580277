// 設定ファイル読み込みサービス
//
// core::config の純粋性を保つため、ファイルI/Oはこのサービスに集約する。

use crate::core::config::Config;
use anyhow::{Context, Result};
use std::path::Path;

/// 設定ファイル読み込みサービス
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// YAMLファイルから設定を読み込む
    pub fn from_file(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_str(&content)
    }

    /// YAML文字列から設定を読み込む
    pub fn from_str(content: &str) -> Result<Config> {
        serde_saphyr::from_str(content).with_context(|| "Failed to parse config file")
    }

    /// 設定を読み込み、妥当性を検証する
    pub fn load_validated(path: &Path) -> Result<Config> {
        let config = Self::from_file(path)?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {:?}", path))?;
        Ok(config)
    }

    /// デフォルトパスから設定を読み込む
    pub fn load_default() -> Result<Config> {
        let path = Path::new(Config::DEFAULT_CONFIG_PATH);
        Self::load_validated(path)
    }
}
