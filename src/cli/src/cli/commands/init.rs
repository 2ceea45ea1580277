// initコマンドハンドラー
//
// プロジェクトの初期化処理を実装します。
// - デフォルト設定ファイルの生成（.schemata.yaml、所有者IDを含む）
// - 状態ディレクトリの作成
// - 初期化済みプロジェクトの検出と警告

use crate::core::config::Config;
use crate::services::config_loader::ConfigLoader;
use crate::services::config_serializer::ConfigSerializer;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// initコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct InitCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// 強制的に初期化（既存の設定を上書き）
    pub force: bool,
}

/// initコマンドハンドラー
#[derive(Debug, Default)]
pub struct InitCommandHandler {}

impl InitCommandHandler {
    /// 新しいInitCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// initコマンドを実行
    ///
    /// # Arguments
    ///
    /// * `command` - initコマンドのパラメータ
    ///
    /// # Returns
    ///
    /// 成功時は完了メッセージ、失敗時はエラーメッセージ
    pub fn execute(&self, command: &InitCommand) -> Result<String> {
        // 初期化済みチェック
        if self.is_already_initialized(&command.project_path) && !command.force {
            return Err(anyhow!(
                "Project is already initialized. Use --force option to force re-initialization."
            ));
        }

        // 再初期化でも既存の所有者IDは引き継ぐ
        let owner_id = self
            .existing_owner(&command.project_path)
            .unwrap_or_else(Uuid::new_v4);
        let config = Config::with_owner(owner_id);

        self.create_state_dir(&command.project_path, &config)?;

        let config_path = command.project_path.join(Config::DEFAULT_CONFIG_PATH);
        ConfigSerializer::write_to_file(&config, &config_path)?;

        // .gitignoreに設定ファイルが含まれていない場合は警告
        self.warn_gitignore(&command.project_path);

        Ok(format!(
            "Project initialized.\n  Config:   {}\n  Owner id: {}",
            config_path.display(),
            owner_id
        ))
    }

    /// プロジェクトが既に初期化されているかチェック
    pub fn is_already_initialized(&self, project_path: &Path) -> bool {
        project_path.join(Config::DEFAULT_CONFIG_PATH).exists()
    }

    /// 既存設定の所有者IDを取得
    fn existing_owner(&self, project_path: &Path) -> Option<Uuid> {
        let config_path = project_path.join(Config::DEFAULT_CONFIG_PATH);
        ConfigLoader::from_file(&config_path)
            .ok()
            .and_then(|config| config.owner_uuid().ok())
    }

    /// 状態ディレクトリを作成
    pub fn create_state_dir(&self, project_path: &Path, config: &Config) -> Result<()> {
        let state_dir = project_path.join(&config.state_dir);
        fs::create_dir_all(&state_dir)
            .with_context(|| format!("Failed to create state directory: {:?}", state_dir))
    }

    /// .gitignoreに設定ファイルが含まれているかチェックし、警告を出力
    fn warn_gitignore(&self, project_path: &Path) {
        if self.is_gitignored(project_path) {
            return;
        }

        let config_file_name = Config::DEFAULT_CONFIG_PATH;
        eprintln!(
            "Warning: '{}' is not listed in .gitignore. The config file contains database credentials. Consider adding '{}' to your .gitignore file or using the DB_PASSWORD environment variable.",
            config_file_name, config_file_name
        );
    }

    /// 設定ファイルが.gitignoreに記載されているか
    fn is_gitignored(&self, project_path: &Path) -> bool {
        let config_file_name = Config::DEFAULT_CONFIG_PATH;
        fs::read_to_string(project_path.join(".gitignore"))
            .map(|content| {
                content.lines().any(|line| {
                    let trimmed = line.trim();
                    trimmed == config_file_name || trimmed == format!("/{}", config_file_name)
                })
            })
            .unwrap_or(false)
    }
}
