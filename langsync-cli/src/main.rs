mod check;
mod config;
mod discover;
mod path_glob;
mod preview;
mod sync;
mod validation;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use env_logger::Env;

use crate::check::run_check_command;
use crate::discover::run_discover_command;
use crate::preview::run_preview_command;
use crate::sync::{SyncOptions, run_sync_command};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log debug details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Rewrite every target locale file to follow the source file.
    Sync {
        /// The canonical strings.xml (usually res/values/strings.xml)
        #[arg(short, long)]
        source: String,

        /// Target file or glob; repeatable. Defaults to the config file's
        /// targets, then to the sibling values-* directories
        #[arg(short, long = "target")]
        targets: Vec<String>,

        /// Refuse sources containing <string-array> elements
        #[arg(long)]
        strict: bool,

        /// Delay in milliseconds before each target
        #[arg(long)]
        pace_ms: Option<u64>,

        /// Write a JSON report of the run to this file
        #[arg(long)]
        report_json: Option<String>,

        /// Config file (defaults to ./langsync.toml when present)
        #[arg(long)]
        config: Option<String>,
    },

    /// Print the merged version of one target without writing it.
    Preview {
        /// The canonical strings.xml
        #[arg(short, long)]
        source: String,

        /// The locale file to merge
        #[arg(short, long)]
        target: String,
    },

    /// Check that a file can be used as a sync source.
    Check {
        /// The file to check
        #[arg(short, long)]
        source: String,
    },

    /// List the locale files a sync would pick up.
    Discover {
        /// The canonical strings.xml
        #[arg(short, long)]
        source: String,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let result = match args.commands {
        Commands::Sync {
            source,
            targets,
            strict,
            pace_ms,
            report_json,
            config,
        } => run_sync_command(SyncOptions {
            source,
            targets,
            strict,
            pace_ms,
            report_json,
            config,
        }),
        Commands::Preview { source, target } => run_preview_command(&source, &target),
        Commands::Check { source } => run_check_command(&source),
        Commands::Discover { source } => run_discover_command(&source),
        Commands::Completions { shell } => {
            let mut cmd = Args::command();
            generate(shell, &mut cmd, "langsync", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
