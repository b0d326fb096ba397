use std::path::PathBuf;

use bincodec::wire::Result;

use crate::cmd::util::{load_codec, read_input};

#[derive(clap::Args)]
pub struct Args {
	/// Packed bytes, `-` for stdin.
	pub input: PathBuf,
	/// Field configuration used when packing.
	#[arg(long)]
	pub config: Option<PathBuf>,
	/// Indent the JSON output.
	#[arg(long)]
	pub pretty: bool,
}

/// Decode frame bytes and print them as JSON.
pub fn run(args: Args) -> Result<()> {
	let Args { input, config, pretty } = args;

	let codec = load_codec(config.as_deref())?;
	let value = codec.unpack(&read_input(&input)?)?;
	let json = value.to_json();
	let text = if pretty { serde_json::to_string_pretty(&json)? } else { serde_json::to_string(&json)? };
	println!("{text}");
	Ok(())
}
