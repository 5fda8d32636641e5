mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, export, init, list, new, tree, ApplyArgs, ExportArgs, InitArgs, ListArgs, NewArgs,
    TreeArgs,
};
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - build and export pages from the terminal
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Pagecraft project
    Init(InitArgs),

    /// Create a page on the starter layout
    New(NewArgs),

    /// List pages
    List(ListArgs),

    /// Export a page as a standalone HTML document
    Export(ExportArgs),

    /// Apply an edit script to a page and save it
    Apply(ApplyArgs),

    /// Print a page's layer outline
    Tree(TreeArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::New(args) => new(args, &cwd),
        Command::List(args) => list(args, &cwd),
        Command::Export(args) => export(args, &cwd),
        Command::Apply(args) => apply(args, &cwd),
        Command::Tree(args) => tree(args, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
