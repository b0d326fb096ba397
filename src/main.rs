#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "bincodec", about = "Pack JSON documents into self-describing binary frames and back")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Encode a JSON document.
	Pack(cmd::pack::Args),
	/// Decode frames back to JSON.
	Unpack(cmd::unpack::Args),
	/// Print the frame tree of packed bytes.
	Inspect(cmd::inspect::Args),
}

fn main() {
	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(EnvFilter::try_from_env("BINCODEC_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
		.init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> bincodec::wire::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Pack(args) => cmd::pack::run(args),
		Commands::Unpack(args) => cmd::unpack::run(args),
		Commands::Inspect(args) => cmd::inspect::run(args),
	}
}
