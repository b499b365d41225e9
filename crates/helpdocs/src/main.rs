//! helpdocs CLI - Help documentation browser.
//!
//! Provides commands for:
//! - `resolve`: Print the files a help page resolves to
//! - `show`: Render a help page (HTML or JSON)
//! - `modules`: List installed or active modules

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ModulesArgs, ResolveArgs, ShowArgs};
use output::Output;

/// helpdocs - Help documentation browser.
#[derive(Parser)]
#[command(name = "helpdocs", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the files a help page resolves to.
    Resolve(ResolveArgs),
    /// Render a help page.
    Show(ShowArgs),
    /// List modules with help pages.
    Modules(ModulesArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Resolve(args) => args.common.verbose,
            Self::Show(args) => args.common.verbose,
            Self::Modules(args) => args.common.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Resolve(args) => args.execute(&output),
        Commands::Show(args) => args.execute(&output),
        Commands::Modules(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
