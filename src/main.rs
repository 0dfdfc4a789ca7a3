// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Vertimar
//
//! Vertimar CLI - order and quote builder for the back office

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use vertimar::commands;

#[derive(Parser)]
#[command(name = "vertimar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,

    /// Data directory override
    #[arg(long, env = "VERTIMAR_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the product catalog
    Catalog {
        /// Action: add, list, show
        action: String,

        /// Product ID
        id: Option<String>,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Unit of measure
        #[arg(long)]
        unit: Option<String>,

        /// Price per unit
        #[arg(long)]
        price: Option<rust_decimal::Decimal>,

        /// IVA percentage (defaults to 21)
        #[arg(long)]
        tax_rate: Option<rust_decimal::Decimal>,

        /// Available stock
        #[arg(long)]
        stock: Option<rust_decimal::Decimal>,
    },

    /// Manage clients
    Client {
        /// Action: add, list, show
        action: String,

        /// Client ID
        id: Option<String>,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Tax identifier (CUIT)
        #[arg(long)]
        tax_id: Option<String>,

        /// Tax category
        #[arg(long)]
        tax_category: Option<String>,
    },

    /// Build an order from a script of cart actions
    Build {
        /// Path to the JSON action script
        #[arg(short, long)]
        script: std::path::PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        out: Option<std::path::PathBuf>,

        /// Output format (json, quote)
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// Show effective configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    // Execute command
    match cli.command {
        Commands::Catalog {
            action,
            id,
            name,
            unit,
            price,
            tax_rate,
            stock,
        } => commands::catalog::run(
            cli.data_dir,
            &action,
            id,
            commands::catalog::ProductArgs {
                name,
                unit,
                price,
                tax_rate,
                stock,
            },
        ),
        Commands::Client {
            action,
            id,
            name,
            tax_id,
            tax_category,
        } => commands::client::run(
            cli.data_dir,
            &action,
            id,
            commands::client::ClientArgs {
                name,
                tax_id,
                tax_category,
            },
        ),
        Commands::Build {
            script,
            out,
            format,
        } => commands::build::run(cli.data_dir, &script, out, &format),
        Commands::Config => commands::config::run(cli.data_dir),
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    }
}
