mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "glogi-demo", version, about = "Exercise the glogi console logger")]
struct Cli {
    /// TOML settings file; `LOG_*` environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Minimum level (overrides file and environment).
    #[arg(long, global = true)]
    level: Option<String>,
    #[arg(long, global = true)]
    no_color: bool,
    #[arg(long, global = true)]
    source_width: Option<i64>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Log one record at every non-terminal level plus the compat calls.
    Tour,
    /// Log a single INFO record.
    Info {
        message: String,
        /// Attribute as `key=value`; repeatable.
        #[arg(long = "attr", value_name = "KEY=VALUE")]
        attrs: Vec<String>,
    },
    /// Log at FATAL and exit with status 1.
    Fatal {
        message: String,
        /// Go through the `log`-package style `fatalf!` instead.
        #[arg(long)]
        compat: bool,
    },
    /// Log at PANIC inside a recovery scope, then keep running.
    Panic {
        message: String,
        /// Unwind instead of returning the abort signal.
        #[arg(long)]
        raise: bool,
    },
    /// Emit `tracing` events through the glogi format.
    Tracing,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let overrides = cli::Overrides {
        level: cli.level,
        no_color: cli.no_color,
        source_width: cli.source_width,
    };
    cli::init_logging(cli.config.as_deref(), overrides)?;
    match cli.command.unwrap_or(Command::Tour) {
        Command::Tour => cli::tour(),
        Command::Info { message, attrs } => cli::info(&message, &attrs),
        Command::Fatal { message, compat } => cli::fatal(&message, compat),
        Command::Panic { message, raise } => cli::panic(&message, raise),
        Command::Tracing => cli::tracing_events(),
    }
}
