//! lingua CLI entry point.
//!
//! Provides command-line tools for working with translation directories:
//! - `lingua check` - Validate every template in a directory
//! - `lingua eval` - Render a template with parameters
//! - `lingua coverage` - Compare languages against a source language
//! - `lingua sync` - Add missing keys and rewrite files in a stable order

mod commands;
mod config;
mod output;

use std::io;
use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    run_check, run_coverage, run_eval, run_sync, CheckArgs, CoverageArgs, EvalArgs, SyncArgs,
};
use config::{FileConfig, Overrides, Settings};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

/// Translation file tools.
#[derive(Debug, Parser)]
#[command(name = "lingua")]
#[command(about = "Translation file tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to ./lingua.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Language used when a requested language is not loaded
    #[arg(long, global = true, env = "LINGUA_DEFAULT_LANGUAGE")]
    pub default_language: Option<String>,

    /// Regex selecting translation files; the first capture group is the language
    #[arg(long, global = true)]
    pub file_pattern: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that every template in a directory parses
    Check(CheckArgs),
    /// Report translation coverage against a source language
    Coverage(CoverageArgs),
    /// Render a template string
    Eval(EvalArgs),
    /// Add keys missing from other languages and rewrite the files
    Sync(SyncArgs),
}

impl Commands {
    /// Directory given to the subcommand itself.
    fn dir(&self) -> Option<PathBuf> {
        match self {
            Commands::Check(args) => args.dir.clone(),
            Commands::Coverage(args) => args.dir.clone(),
            Commands::Eval(args) => args.dir.clone(),
            Commands::Sync(args) => args.dir.clone(),
        }
    }
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` when set.
fn setup_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_tracing(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let file = FileConfig::load(cli.config.as_deref()).into_diagnostic()?;
    let overrides = Overrides {
        dir: cli.command.dir(),
        default_language: cli.default_language,
        file_pattern: cli.file_pattern,
    };
    let settings = Settings::resolve(file, overrides).into_diagnostic()?;

    let result = match cli.command {
        Commands::Check(args) => run_check(args, &settings),
        Commands::Coverage(args) => run_coverage(args, &settings),
        Commands::Eval(args) => run_eval(args, &settings),
        Commands::Sync(args) => run_sync(args, &settings),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{e:?}");
            exit(exitcode::SOFTWARE);
        }
    }
}
