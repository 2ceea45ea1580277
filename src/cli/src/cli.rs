// CLI Layer
// ユーザー入力の受付とコマンドルーティング

pub mod command_context;
pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// 出力フォーマット
#[derive(Clone, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Structured JSON output
    Json,
}

/// Schemata - Schema Materialization CLI
///
/// Turn JSON schema descriptions into real PostgreSQL databases.
#[derive(Parser, Debug)]
#[command(name = "schemata")]
#[command(author = "Schemata Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Materialize schema descriptions as PostgreSQL databases")]
#[command(long_about = "Schemata - Schema Materialization CLI

Turn declarative schema descriptions (tables, columns, foreign keys)
into real PostgreSQL databases.

Schemata helps you:
  • Validate schema descriptions before touching a database
  • Generate the DDL script for a description
  • Materialize each schema as its own database
  • Rebuild a database from the latest description at any time

Supported databases: PostgreSQL")]
#[command(propagate_version = true)]
#[command(after_help = "GETTING STARTED:
  1. Initialize a new project:      schemata init
  2. Validate a description:        schemata validate schema.json
  3. Materialize it:                schemata create schema.json --name shop
  4. Check the database:            schemata status <ID>

For detailed help on each command, use: schemata <command> --help")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Output format (text or json)
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new project
    ///
    /// Writes .schemata.yaml with a fresh owner id and creates the
    /// state directory used by the schema record store.
    ///
    /// EXAMPLES:
    ///   schemata init
    ///   schemata init --force
    Init {
        /// Force initialization even if config exists
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a schema description
    ///
    /// Prints errors, warnings and a CREATE TABLE preview.
    /// Exits with status 1 when the description is invalid.
    ///
    /// EXAMPLES:
    ///   schemata validate schema.json
    ///   schemata validate schema.yaml --format json
    Validate {
        /// Schema description file (JSON or YAML)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate the SQL script for a schema description
    ///
    /// EXAMPLES:
    ///   schemata generate schema.json
    ///   schemata generate schema.json --database-name shop_db --output shop.sql
    Generate {
        /// Schema description file (JSON or YAML)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Include CREATE DATABASE for this name
        #[arg(long, value_name = "NAME")]
        database_name: Option<String>,

        /// Write the script to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Create a schema and materialize its database
    ///
    /// EXAMPLES:
    ///   schemata create schema.json --name shop
    Create {
        /// Schema description file (JSON or YAML)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Schema name (unique per owner)
        #[arg(short, long, value_name = "NAME")]
        name: String,

        /// Schema description text
        #[arg(short, long, value_name = "TEXT")]
        description: Option<String>,
    },

    /// Replace a schema's description and rebuild its database
    ///
    /// EXAMPLES:
    ///   schemata update <ID> schema.json
    ///   schemata update <ID> schema.json --name shop_v2
    Update {
        /// Schema id
        #[arg(value_name = "ID")]
        id: String,

        /// Schema description file (JSON or YAML)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// New schema name
        #[arg(short, long, value_name = "NAME")]
        name: Option<String>,

        /// New description text
        #[arg(short, long, value_name = "TEXT")]
        description: Option<String>,
    },

    /// Drop and rebuild a schema's database from its stored description
    Regenerate {
        /// Schema id
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Show the health and table count of a schema's database
    Status {
        /// Schema id
        #[arg(value_name = "ID")]
        id: String,
    },

    /// List schemas of the configured owner
    List,

    /// Export the SQL script of a stored schema
    ///
    /// EXAMPLES:
    ///   schemata export <ID>
    ///   schemata export <ID> --output shop.sql
    Export {
        /// Schema id
        #[arg(value_name = "ID")]
        id: String,

        /// Write the script to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Delete a schema record
    ///
    /// EXAMPLES:
    ///   schemata delete <ID>
    ///   schemata delete <ID> --drop-database
    Delete {
        /// Schema id
        #[arg(value_name = "ID")]
        id: String,

        /// Also drop the materialized database
        #[arg(long)]
        drop_database: bool,
    },
}
