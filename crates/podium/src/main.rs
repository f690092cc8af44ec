//! Podium CLI - markdown slide renderer.
//!
//! Provides commands for:
//! - `render`: Render a markdown file or stdin to HTML
//! - `slide`: Render one numbered slide from the deck directory
//! - `list`: List the slides of the deck directory

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ListArgs, RenderArgs, SlideArgs};
use output::Output;

/// Podium - markdown slide renderer.
#[derive(Parser)]
#[command(name = "podium", version, about)]
struct Cli {
    /// Log progress at info level (otherwise RUST_LOG applies).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render markdown to an HTML fragment.
    Render(RenderArgs),
    /// Render one slide by number.
    Slide(SlideArgs),
    /// List slides in the deck directory.
    List(ListArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(&output),
        Commands::Slide(args) => args.execute(&output),
        Commands::List(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
