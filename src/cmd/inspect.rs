use std::path::PathBuf;

use bincodec::wire::{FrameNode, Result};

use crate::cmd::util::{load_codec, read_input};

#[derive(clap::Args)]
pub struct Args {
	/// Packed bytes, `-` for stdin.
	pub input: PathBuf,
	/// Field configuration used when packing.
	#[arg(long)]
	pub config: Option<PathBuf>,
	/// Emit the tree as JSON.
	#[arg(long)]
	pub json: bool,
}

/// Print every frame header without decoding payloads.
pub fn run(args: Args) -> Result<()> {
	let Args { input, config, json } = args;

	let codec = load_codec(config.as_deref())?;
	let bytes = read_input(&input)?;
	let tree = codec.inspect(&bytes)?;

	if json {
		println!("{}", serde_json::to_string_pretty(&tree)?);
		return Ok(());
	}

	println!("path: {}", input.display());
	println!("bytes: {}", bytes.len());
	println!("frames: {}", tree.frame_count());
	print_node(&tree, 0);
	Ok(())
}

fn print_node(node: &FrameNode, indent: usize) {
	println!("{}{}", " ".repeat(indent), render_node(node));
	for child in &node.children {
		print_node(child, indent + 2);
	}
}

fn render_node(node: &FrameNode) -> String {
	let mut line = format!("@{} {}", node.offset, node.tag);
	match (node.key, node.name.as_deref()) {
		(Some(key), Some(name)) => line.push_str(&format!(" key={key} ({name})")),
		(Some(key), None) if key > 0 => line.push_str(&format!(" key={key} (?)")),
		_ => {}
	}
	line.push_str(&format!(" len={}", node.len));
	if let Some(count) = node.elements {
		line.push_str(&format!(" elements={count}"));
	}
	line
}

#[cfg(test)]
mod tests {
	use bincodec::wire::{FrameNode, TypeTag};

	use super::render_node;

	fn node(tag: TypeTag, key: Option<u8>, name: Option<&str>) -> FrameNode {
		FrameNode {
			tag,
			key,
			name: name.map(str::to_owned),
			offset: 6,
			header_len: tag.header_width(),
			len: 6,
			elements: None,
			children: Vec::new(),
		}
	}

	#[test]
	fn named_frame_shows_key_and_name() {
		let mut item = node(TypeTag::ListUint2, Some(1), Some("nums"));
		item.elements = Some(3);
		assert_eq!(render_node(&item), "@6 list_uint2(0x15) key=1 (nums) len=6 elements=3");
	}

	#[test]
	fn unnamed_and_null_frames_omit_key() {
		assert_eq!(render_node(&node(TypeTag::Str, Some(0), None)), "@6 str(0x0d) len=6");
		assert_eq!(render_node(&node(TypeTag::Null, None, None)), "@6 null(0x11) len=6");
	}
}
