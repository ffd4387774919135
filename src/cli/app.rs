//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::clear_cmd::{self, ClearOptions, LineRange};
use super::output::{Output, OutputFormat};
use crate::plugin::CommandRegistry;
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "clear-todos")]
#[command(author, version, about = "Remove completed checklist items from markdown notes")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to a config file
    #[arg(long, global = true, env = "CLEAR_TODOS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remove completed items from files (or stdin to stdout)
    Clear {
        /// Files to rewrite in place
        files: Vec<PathBuf>,

        /// Only clear within these lines (1-based, inclusive)
        #[arg(long, value_name = "START:END")]
        lines: Option<LineRange>,

        /// Report what would be removed without writing
        #[arg(long)]
        dry_run: bool,

        /// Print the result instead of rewriting files
        #[arg(long)]
        stdout: bool,
    },

    /// Count completed items; fails if any are found
    Check {
        /// Files to inspect (defaults to stdin)
        files: Vec<PathBuf>,
    },

    /// List registered commands
    Commands,

    /// Show the effective configuration
    Config,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let format = cli.format.unwrap_or_else(|| config.default_format.into());
    let output = Output::new(format, cli.verbose);
    let registry = CommandRegistry::with_builtins();

    output.verbose("clear-todos starting");

    match cli.command {
        Commands::Clear {
            files,
            lines,
            dry_run,
            stdout,
        } => {
            let options = ClearOptions {
                lines,
                dry_run,
                to_stdout: stdout,
                skip_unchanged: config.skip_unchanged,
            };
            output.verbose_ctx("clear", &format!("{} input(s), {:?}", files.len().max(1), options));
            clear_cmd::clear(&registry, &output, &files, &options)?
        }

        Commands::Check { files } => clear_cmd::check(&output, &files)?,

        Commands::Commands => list_commands(&output, &registry),

        Commands::Config => show_config(&output, &config, cli.config)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Lists registered commands
fn list_commands(output: &Output, registry: &CommandRegistry) {
    if output.is_json() {
        let items: Vec<_> = registry
            .commands()
            .map(|c| {
                serde_json::json!({
                    "id": c.id,
                    "name": c.name,
                })
            })
            .collect();
        output.data(&items);
    } else {
        for command in registry.commands() {
            output.row(&[command.id.as_str(), command.name.as_str()]);
        }
    }
}

/// Prints the effective configuration and where it came from
fn show_config(output: &Output, config: &Config, explicit: Option<PathBuf>) -> Result<()> {
    let path = explicit.or_else(Config::default_path);

    if output.is_json() {
        output.data(&serde_json::json!({
            "path": path.map(|p| p.display().to_string()),
            "config": config,
        }));
    } else {
        if let Some(path) = path {
            println!("# {}", path.display());
        }
        print!("{}", config.to_toml()?);
    }

    Ok(())
}
