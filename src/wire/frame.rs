use serde::Serialize;

use crate::wire::bytes::Cursor;
use crate::wire::{CodecError, KeyDictionary, Result, TypeTag};

/// Parsed frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
	/// Payload interpretation.
	pub tag: TypeTag,
	/// Key byte; always 0 for NULL frames, which carry none.
	pub key: u8,
	/// Declared payload length.
	pub len: usize,
	/// Absolute offset of the tag byte.
	pub offset: usize,
}

impl FrameHeader {
	/// Parse a header at the cursor position.
	pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self> {
		let offset = cursor.abs_pos();
		let byte = cursor.read_u8()?;
		let tag = TypeTag::from_u8(byte).ok_or(CodecError::UnknownTag { tag: byte, at: offset })?;
		let key = if tag.has_key_byte() { cursor.read_u8()? } else { 0 };
		let len = cursor.read_len(tag.length_width())?;
		Ok(Self { tag, key, len, offset })
	}

	/// Bytes taken by the header itself.
	pub fn header_len(&self) -> usize {
		self.tag.header_width()
	}

	/// Absolute offset of the first payload byte.
	pub fn payload_offset(&self) -> usize {
		self.offset + self.header_len()
	}
}

/// Append a frame header for `len` payload bytes.
pub(crate) fn write_header(out: &mut Vec<u8>, tag: TypeTag, key: u8, len: usize) -> Result<()> {
	if len > tag.max_payload_len() {
		return Err(CodecError::PayloadTooLarge {
			tag,
			len,
			max: tag.max_payload_len(),
		});
	}

	out.push(tag.as_u8());
	if tag.has_key_byte() {
		out.push(key);
	}
	match tag.length_width() {
		1 => out.push(len as u8),
		_ => out.extend_from_slice(&(len as u32).to_be_bytes()),
	}
	Ok(())
}

/// Split the root frame, requiring its length to cover the rest of `bytes` exactly.
pub(crate) fn read_root(bytes: &[u8]) -> Result<(FrameHeader, &[u8])> {
	let mut cursor = Cursor::new(bytes);
	let header = FrameHeader::parse(&mut cursor)?;
	if header.len != cursor.remaining() {
		return Err(CodecError::LengthMismatch {
			declared: header.len,
			actual: cursor.remaining(),
		});
	}
	let payload = cursor.read_exact(header.len)?;
	Ok((header, payload))
}

/// Split the next child frame out of a container payload.
pub(crate) fn read_child<'a>(cursor: &mut Cursor<'a>) -> Result<(FrameHeader, &'a [u8])> {
	let header = FrameHeader::parse(cursor)?;
	if header.len > cursor.remaining() {
		return Err(CodecError::FrameOverrun {
			at: header.offset,
			len: header.len,
			rem: cursor.remaining(),
		});
	}
	let payload = cursor.read_exact(header.len)?;
	Ok((header, payload))
}

/// Header-only view of a frame tree, for inspection output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameNode {
	/// Frame tag.
	pub tag: TypeTag,
	/// Raw key byte, absent for NULL frames.
	pub key: Option<u8>,
	/// Dictionary name behind the key byte, when it resolves to one.
	pub name: Option<String>,
	/// Absolute offset of the tag byte.
	pub offset: usize,
	/// Header width in bytes.
	pub header_len: usize,
	/// Payload length in bytes.
	pub len: usize,
	/// Record count for typed lists.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub elements: Option<usize>,
	/// Child frames for LIST and MAP.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub children: Vec<FrameNode>,
}

impl FrameNode {
	/// Total frames in this subtree, including `self`.
	pub fn frame_count(&self) -> usize {
		1 + self.children.iter().map(FrameNode::frame_count).sum::<usize>()
	}
}

/// Walk every frame header under the root without decoding payloads.
pub(crate) fn inspect(bytes: &[u8], dict: &KeyDictionary, max_depth: u32) -> Result<FrameNode> {
	let (header, payload) = read_root(bytes)?;
	inspect_frame(header, payload, dict, max_depth, 0)
}

fn inspect_frame(header: FrameHeader, payload: &[u8], dict: &KeyDictionary, max_depth: u32, depth: u32) -> Result<FrameNode> {
	if depth >= max_depth {
		return Err(CodecError::DecodeDepthExceeded { max_depth });
	}

	let mut node = FrameNode {
		tag: header.tag,
		key: header.tag.has_key_byte().then_some(header.key),
		name: None,
		offset: header.offset,
		header_len: header.header_len(),
		len: header.len,
		elements: None,
		children: Vec::new(),
	};
	if header.key > 0 {
		node.name = dict.name_at(usize::from(header.key) - 1).map(str::to_owned);
	}

	if let Some(element) = header.tag.list_element() {
		if payload.len() % element.width() != 0 {
			return Err(CodecError::TypedListMisaligned {
				tag: header.tag,
				len: payload.len(),
				width: element.width(),
			});
		}
		node.elements = Some(payload.len() / element.width());
	} else if header.tag.is_container() {
		let mut cursor = Cursor::with_base(payload, header.payload_offset());
		while !cursor.is_empty() {
			let (child, child_payload) = read_child(&mut cursor)?;
			if header.tag == TypeTag::Map {
				dict.resolve_key_byte(child.key)?;
			}
			node.children.push(inspect_frame(child, child_payload, dict, max_depth, depth + 1)?);
		}
	}

	Ok(node)
}

#[cfg(test)]
mod tests {
	use super::{FrameHeader, read_child, read_root, write_header};
	use crate::wire::bytes::Cursor;
	use crate::wire::{CodecError, TypeTag};

	#[test]
	fn header_round_trips_through_bytes() {
		let mut out = Vec::new();
		write_header(&mut out, TypeTag::Str, 3, 300).expect("header writes");
		assert_eq!(out, [0x0d, 0x03, 0x00, 0x00, 0x01, 0x2c]);
		let header = FrameHeader::parse(&mut Cursor::new(&out)).expect("header parses");
		assert_eq!(header, FrameHeader { tag: TypeTag::Str, key: 3, len: 300, offset: 0 });
		assert_eq!(header.payload_offset(), 6);
	}

	#[test]
	fn null_header_skips_key_byte() {
		let mut out = Vec::new();
		write_header(&mut out, TypeTag::Null, 9, 1).expect("header writes");
		assert_eq!(out, [0x11, 0x01]);
	}

	#[test]
	fn one_byte_length_caps_payload() {
		let err = write_header(&mut Vec::new(), TypeTag::Num, 0, 256).expect_err("too long");
		assert!(matches!(err, CodecError::PayloadTooLarge { len: 256, max: 255, .. }));
	}

	#[test]
	fn root_length_must_match_exactly() {
		let err = read_root(&[0x13, 0x00, 0x01, 0x05, 0xff]).expect_err("trailing byte");
		assert!(matches!(err, CodecError::LengthMismatch { declared: 1, actual: 2 }));
		let err = read_root(&[0x13, 0x00, 0x02, 0x05]).expect_err("short payload");
		assert!(matches!(err, CodecError::LengthMismatch { declared: 2, actual: 1 }));
	}

	#[test]
	fn unknown_tag_reports_offset() {
		let err = read_root(&[0x7f, 0x00, 0x00]).expect_err("bad tag");
		assert!(matches!(err, CodecError::UnknownTag { tag: 0x7f, at: 0 }));
	}

	#[test]
	fn child_overrun_is_detected() {
		let payload = [0x13, 0x00, 0x05, 0x01];
		let err = read_child(&mut Cursor::with_base(&payload, 6)).expect_err("overrun");
		assert!(matches!(err, CodecError::FrameOverrun { at: 6, len: 5, rem: 1 }));
	}
}
