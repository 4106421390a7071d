use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::Layer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod translator;

#[derive(Parser)]
#[command(name = "faultloc", version, about = "AGV fault catalogue toolkit: sync, coherence, header repair")]
struct Cli {
    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sync the other language variants of one catalogue file
    SyncOne {
        /// Source file; its language suffix decides the translation direction
        #[arg(short, long)]
        file: PathBuf,
        /// Retranslate entries that already carry text
        #[arg(long, default_value_t = false)]
        force: bool,
        /// Keep a .json.bak of every replaced file
        #[arg(long, default_value_t = false)]
        backup: bool,
        /// Legacy index-based entry alignment instead of by Id
        #[arg(long, default_value_t = false)]
        positional: bool,
    },

    /// Sync every source-language document under a directory tree
    SyncAll {
        #[arg(short, long)]
        root: PathBuf,
        /// Ground-truth language (default from faultloc.toml, then fr)
        #[arg(long)]
        source_lang: Option<String>,
        #[arg(long, default_value_t = false)]
        force: bool,
        #[arg(long, default_value_t = false)]
        backup: bool,
        #[arg(long, default_value_t = false)]
        positional: bool,
    },

    /// Report structural divergences between language variants (read-only)
    CheckCoherence {
        #[arg(short, long)]
        root: PathBuf,
        /// "text" or "json"
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List missing language variants and generate them
    GenMissing {
        #[arg(short, long)]
        root: PathBuf,
        /// Generate without asking for confirmation
        #[arg(long, default_value_t = false)]
        yes: bool,
        #[arg(long, default_value_t = false)]
        backup: bool,
    },

    /// Make every header agree with its filename
    FixHeaders {
        #[arg(short, long)]
        root: PathBuf,
        /// Report what would change without writing
        #[arg(long, default_value_t = false)]
        dry_run: bool,
        #[arg(long, default_value_t = false)]
        backup: bool,
    },
}

trait Runnable {
    fn run(self, use_color: bool) -> Result<i32>;
}

impl Runnable for Commands {
    fn run(self, use_color: bool) -> Result<i32> {
        let cmd_name = match &self {
            Commands::SyncOne { .. } => "sync-one",
            Commands::SyncAll { .. } => "sync-all",
            Commands::CheckCoherence { .. } => "check-coherence",
            Commands::GenMissing { .. } => "gen-missing",
            Commands::FixHeaders { .. } => "fix-headers",
        };
        info!("starting command: {}", cmd_name);

        let result = match self {
            Commands::SyncOne {
                file,
                force,
                backup,
                positional,
            } => commands::sync_one::run(file, force, backup, positional, use_color),
            Commands::SyncAll {
                root,
                source_lang,
                force,
                backup,
                positional,
            } => commands::sync_all::run(root, source_lang, force, backup, positional, use_color),
            Commands::CheckCoherence { root, format } => {
                commands::check_coherence::run(root, &format, use_color)
            }
            Commands::GenMissing { root, yes, backup } => {
                commands::gen_missing::run(root, yes, backup, use_color)
            }
            Commands::FixHeaders {
                root,
                dry_run,
                backup,
            } => commands::fix_headers::run(root, dry_run, backup, use_color),
        };

        match &result {
            Ok(_) => info!("finished command: {}", cmd_name),
            Err(e) => error!("command {} failed: {:?}", cmd_name, e),
        }

        result
    }
}

fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = rolling::daily("logs", "faultloc.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

fn main() -> Result<()> {
    color_eyre::install()?;

    // process::exit skips destructors, so the appender guard must be dropped
    // (flushing buffered file logs) before the exit code is raised
    let code = {
        let _guard = init_tracing();
        let cli = Cli::parse();
        let use_color = !cli.no_color
            && std::io::stdout().is_terminal()
            && std::env::var_os("NO_COLOR").is_none();
        cli.cmd.run(use_color)?
    };
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
