use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "rbencode", version, about = "Inspect and canonicalize bencoded data")]
struct Cli {
    /// Refuse inputs larger than this many bytes.
    #[arg(long, global = true, value_name = "BYTES")]
    max_input: Option<usize>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every value in a file as an indented tree.
    Show(cmd::show::Args),
    /// Rewrite a file's value in canonical form.
    Canon(cmd::canon::Args),
    /// SHA-1 of the canonical encoding of a value or one of its entries.
    Hash(cmd::hash::Args),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show(args) => cmd::show::run(args, cli.max_input),
        Commands::Canon(args) => cmd::canon::run(args, cli.max_input),
        Commands::Hash(args) => cmd::hash::run(args, cli.max_input),
    }
}
