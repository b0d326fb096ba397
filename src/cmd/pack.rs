use std::path::PathBuf;

use bincodec::wire::{Result, Value};

use crate::cmd::util::{load_codec, read_input, write_output};

#[derive(clap::Args)]
pub struct Args {
	/// JSON document to encode, `-` for stdin.
	pub input: PathBuf,
	/// Field configuration (JSON object of name to tag label).
	#[arg(long)]
	pub config: Option<PathBuf>,
	/// Output file; stdout when omitted.
	#[arg(short, long)]
	pub output: Option<PathBuf>,
}

/// Encode a JSON document into frame bytes.
pub fn run(args: Args) -> Result<()> {
	let Args { input, config, output } = args;

	let codec = load_codec(config.as_deref())?;
	let doc: serde_json::Value = serde_json::from_slice(&read_input(&input)?)?;
	let bytes = codec.pack(&Value::from_json(doc))?;
	write_output(output.as_ref(), &bytes)
}
