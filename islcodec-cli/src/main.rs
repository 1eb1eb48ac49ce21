mod compile;
mod decode;
mod verify;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "islcompiler",
    author,
    version,
    about = "Converts ISL translation files to the binary lookup format, and back",
    long_about = None
)]
struct Args {
    /// Enable diagnostic logging to stderr (RUST_LOG overrides the level)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile ISL sources into a binary lookup table.
    Compile {
        /// An ISL file, or a directory whose .isl files are merged into one set
        #[arg(short, long)]
        input: String,
        /// The output file (defaults to the input path with a .bin extension)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Decode a binary lookup table back to ISL source text.
    Decode {
        /// The binary file to decode
        #[arg(short, long)]
        input: String,
        /// The output file (defaults to the input path with an .isl extension)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Verify ISL sources and print a per-file report.
    Verify {
        /// An ISL file, or a directory whose .isl files are each verified
        #[arg(short, long)]
        input: String,
        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(enabled: bool) {
    let default_filter = if enabled { "islcodec=debug" } else { "off" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.log);

    match args.commands {
        Commands::Compile { input, output } => compile::run(&input, output.as_deref()),
        Commands::Decode { input, output } => decode::run(&input, output.as_deref()),
        Commands::Verify { input, json } => verify::run(&input, json),
    }
}
