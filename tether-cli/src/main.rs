mod render;
mod stylesheet;
mod tree;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use stylesheet::OutputFormat;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tether")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log every lifecycle transition and host command to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON element tree, writing host commands to stdout as JSON lines
    Render {
        /// Element tree, or an array of trees rendered in sequence
        tree: PathBuf,
        /// JSON-lines host events to replay after rendering
        #[arg(short, long)]
        events: Option<PathBuf>,
        /// Bridge config file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Use node-1, node-2, ... instead of UUIDs
        #[arg(long)]
        sequential_ids: bool,
        /// Unmount the whole tree before exiting
        #[arg(long)]
        unmount: bool,
    },
    /// Distill a named style spec into host attribute names
    Stylesheet {
        /// JSON object of named styles
        spec: PathBuf,
        /// Bridge config file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Render {
            tree,
            events,
            config,
            sequential_ids,
            unmount,
        } => render::run_render(render::RenderOptions {
            tree,
            events,
            config,
            sequential_ids,
            unmount,
        }),
        Commands::Stylesheet {
            spec,
            config,
            format,
        } => stylesheet::run_stylesheet(stylesheet::StylesheetOptions {
            spec,
            config,
            format,
        }),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli.command) {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}
