use anyhow::{Context, Result};
use clap::Parser;
use colored::control as color_control;
use schemata::cli::commands::create::{CreateCommand, CreateCommandHandler};
use schemata::cli::commands::delete::{DeleteCommand, DeleteCommandHandler};
use schemata::cli::commands::export::{ExportCommand, ExportCommandHandler};
use schemata::cli::commands::generate::{GenerateCommand, GenerateCommandHandler};
use schemata::cli::commands::init::{InitCommand, InitCommandHandler};
use schemata::cli::commands::list::{ListCommand, ListCommandHandler};
use schemata::cli::commands::regenerate::{RegenerateCommand, RegenerateCommandHandler};
use schemata::cli::commands::status::{StatusCommand, StatusCommandHandler};
use schemata::cli::commands::update::{UpdateCommand, UpdateCommandHandler};
use schemata::cli::commands::validate::{ValidateCommand, ValidateCommandHandler};
use schemata::cli::{Cli, Commands};
use std::env;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // CLIをパースして実行
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // 非同期ランタイムを作成して実行
    let runtime = tokio::runtime::Runtime::new()
        .context("Failed to create Tokio runtime")
        .unwrap_or_else(|e| {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        });

    let result = runtime.block_on(run_command(cli));

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// トレーシングを初期化する
///
/// RUST_LOG が優先され、未設定時は warn（--verbose 指定時は debug）。
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 二重初期化は無視する
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// コマンドを実行する
async fn run_command(cli: Cli) -> Result<String> {
    // --no-color フラグの処理
    if cli.no_color {
        color_control::set_override(false);
    }

    // プロジェクトのルートパスを取得
    let project_path = env::current_dir()?;

    // --config フラグの処理（絶対パスに変換）
    let config_path: Option<PathBuf> = cli.config.map(|p| {
        if p.is_absolute() {
            p
        } else {
            project_path.join(p)
        }
    });
    let format = cli.format;

    match cli.command {
        Commands::Init { force } => {
            let handler = InitCommandHandler::new();
            let command = InitCommand {
                project_path,
                force,
            };
            handler.execute(&command)
        }

        Commands::Validate { file } => {
            let handler = ValidateCommandHandler::new();
            let command = ValidateCommand { file, format };
            handler.execute(&command)
        }

        Commands::Generate {
            file,
            database_name,
            output,
        } => {
            let handler = GenerateCommandHandler::new();
            let command = GenerateCommand {
                file,
                database_name,
                output,
            };
            handler.execute(&command)
        }

        Commands::Create {
            file,
            name,
            description,
        } => {
            let handler = CreateCommandHandler::new();
            let command = CreateCommand {
                project_path,
                config_path,
                file,
                name,
                description,
                format,
            };
            handler.execute(&command).await
        }

        Commands::Update {
            id,
            file,
            name,
            description,
        } => {
            let handler = UpdateCommandHandler::new();
            let command = UpdateCommand {
                project_path,
                config_path,
                id,
                file,
                name,
                description,
                format,
            };
            handler.execute(&command).await
        }

        Commands::Regenerate { id } => {
            let handler = RegenerateCommandHandler::new();
            let command = RegenerateCommand {
                project_path,
                config_path,
                id,
                format,
            };
            handler.execute(&command).await
        }

        Commands::Status { id } => {
            let handler = StatusCommandHandler::new();
            let command = StatusCommand {
                project_path,
                config_path,
                id,
                format,
            };
            handler.execute(&command).await
        }

        Commands::List => {
            let handler = ListCommandHandler::new();
            let command = ListCommand {
                project_path,
                config_path,
                format,
            };
            handler.execute(&command).await
        }

        Commands::Export { id, output } => {
            let handler = ExportCommandHandler::new();
            let command = ExportCommand {
                project_path,
                config_path,
                id,
                output,
                format,
            };
            handler.execute(&command).await
        }

        Commands::Delete { id, drop_database } => {
            let handler = DeleteCommandHandler::new();
            let command = DeleteCommand {
                project_path,
                config_path,
                id,
                drop_database,
            };
            handler.execute(&command).await
        }
    }
}
