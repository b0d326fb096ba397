use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One-byte type tag leading every frame.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
	/// Opaque bytes.
	Raw = 0x00,
	/// One byte, `0x01` for true.
	Bool = 0x01,
	/// Signed 16-bit integer.
	Int2 = 0x02,
	/// Signed 32-bit integer.
	Int4 = 0x03,
	/// Signed 64-bit integer.
	Int8 = 0x04,
	/// Unsigned 16-bit integer.
	Uint2 = 0x05,
	/// Unsigned 32-bit integer.
	Uint4 = 0x06,
	/// Unsigned 64-bit integer.
	Uint8 = 0x07,
	/// IEEE-754 single precision float.
	Float32 = 0x08,
	/// IEEE-754 double precision float.
	Double64 = 0x09,
	/// Bytes rendered as lowercase hex text on decode.
	Hex = 0x0a,
	/// Signed byte.
	Char = 0x0b,
	/// Unsigned byte.
	Uchar = 0x0c,
	/// UTF-8 text.
	Str = 0x0d,
	/// Concatenated unnamed child frames.
	List = 0x0e,
	/// Concatenated keyed child frames.
	Map = 0x0f,
	/// Arbitrary-precision non-negative integer as minimal big-endian bytes.
	Num = 0x10,
	/// Null marker; the only frame without a key byte.
	Null = 0x11,
	/// Signed 8-bit integer.
	Int1 = 0x12,
	/// Unsigned 8-bit integer.
	Uint1 = 0x13,
	/// Packed `u8` list.
	ListUint1 = 0x14,
	/// Packed `u16` list.
	ListUint2 = 0x15,
	/// Packed `u32` list.
	ListUint4 = 0x16,
	/// Packed `u64` list.
	ListUint8 = 0x17,
	/// Packed `i8` list.
	ListInt1 = 0x18,
	/// Packed `i16` list.
	ListInt2 = 0x19,
	/// Packed `i32` list.
	ListInt4 = 0x1a,
	/// Packed list of 16-hex-char (8 byte) records.
	ListHex16 = 0x1b,
	/// Packed list of 32-hex-char (16 byte) records.
	ListHex32 = 0x1c,
	/// Packed list of 64-hex-char (32 byte) records.
	ListHex64 = 0x1d,
}

/// Record geometry of a typed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListElement {
	/// Fixed-width big-endian integer.
	Int {
		/// Record width in bytes.
		width: usize,
		/// Two's complement when true.
		signed: bool,
	},
	/// Fixed-length hex string stored as raw bytes.
	Hex {
		/// Record width in bytes (half the hex length).
		width: usize,
	},
}

impl ListElement {
	/// Bytes per record.
	pub fn width(self) -> usize {
		match self {
			Self::Int { width, .. } | Self::Hex { width } => width,
		}
	}
}

impl TypeTag {
	/// Every tag in wire order.
	pub const ALL: [TypeTag; 30] = [
		Self::Raw,
		Self::Bool,
		Self::Int2,
		Self::Int4,
		Self::Int8,
		Self::Uint2,
		Self::Uint4,
		Self::Uint8,
		Self::Float32,
		Self::Double64,
		Self::Hex,
		Self::Char,
		Self::Uchar,
		Self::Str,
		Self::List,
		Self::Map,
		Self::Num,
		Self::Null,
		Self::Int1,
		Self::Uint1,
		Self::ListUint1,
		Self::ListUint2,
		Self::ListUint4,
		Self::ListUint8,
		Self::ListInt1,
		Self::ListInt2,
		Self::ListInt4,
		Self::ListHex16,
		Self::ListHex32,
		Self::ListHex64,
	];

	/// Map a wire byte back to its tag.
	pub fn from_u8(byte: u8) -> Option<Self> {
		Self::ALL.get(usize::from(byte)).copied()
	}

	/// Wire byte of this tag.
	pub fn as_u8(self) -> u8 {
		self as u8
	}

	/// Width in bytes of the length field following the key byte.
	pub fn length_width(self) -> usize {
		match self {
			Self::Raw | Self::Hex | Self::Str | Self::List | Self::Map => 4,
			_ if self.list_element().is_some() => 4,
			_ => 1,
		}
	}

	/// Whether frames of this tag carry a key index byte.
	pub fn has_key_byte(self) -> bool {
		self != Self::Null
	}

	/// Total header width: tag, optional key byte, and length field.
	pub fn header_width(self) -> usize {
		1 + usize::from(self.has_key_byte()) + self.length_width()
	}

	/// Largest payload the length field can declare.
	pub fn max_payload_len(self) -> usize {
		match self.length_width() {
			1 => usize::from(u8::MAX),
			_ => usize::try_from(u32::MAX).unwrap_or(usize::MAX),
		}
	}

	/// Fixed payload width for scalar tags, `None` for variable payloads.
	pub fn fixed_width(self) -> Option<usize> {
		match self {
			Self::Bool | Self::Char | Self::Uchar | Self::Int1 | Self::Uint1 | Self::Null => Some(1),
			Self::Int2 | Self::Uint2 => Some(2),
			Self::Int4 | Self::Uint4 | Self::Float32 => Some(4),
			Self::Int8 | Self::Uint8 | Self::Double64 => Some(8),
			_ => None,
		}
	}

	/// Record geometry when this tag is a typed list.
	pub fn list_element(self) -> Option<ListElement> {
		let int = |width, signed| Some(ListElement::Int { width, signed });
		match self {
			Self::ListUint1 => int(1, false),
			Self::ListUint2 => int(2, false),
			Self::ListUint4 => int(4, false),
			Self::ListUint8 => int(8, false),
			Self::ListInt1 => int(1, true),
			Self::ListInt2 => int(2, true),
			Self::ListInt4 => int(4, true),
			Self::ListHex16 => Some(ListElement::Hex { width: 8 }),
			Self::ListHex32 => Some(ListElement::Hex { width: 16 }),
			Self::ListHex64 => Some(ListElement::Hex { width: 32 }),
			_ => None,
		}
	}

	/// Whether the payload is a sequence of child frames.
	pub fn is_container(self) -> bool {
		matches!(self, Self::List | Self::Map)
	}

	/// Stable snake_case label, matching the configuration spelling.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Raw => "raw",
			Self::Bool => "bool",
			Self::Int2 => "int2",
			Self::Int4 => "int4",
			Self::Int8 => "int8",
			Self::Uint2 => "uint2",
			Self::Uint4 => "uint4",
			Self::Uint8 => "uint8",
			Self::Float32 => "float32",
			Self::Double64 => "double64",
			Self::Hex => "hex",
			Self::Char => "char",
			Self::Uchar => "uchar",
			Self::Str => "str",
			Self::List => "list",
			Self::Map => "map",
			Self::Num => "num",
			Self::Null => "null",
			Self::Int1 => "int1",
			Self::Uint1 => "uint1",
			Self::ListUint1 => "list_uint1",
			Self::ListUint2 => "list_uint2",
			Self::ListUint4 => "list_uint4",
			Self::ListUint8 => "list_uint8",
			Self::ListInt1 => "list_int1",
			Self::ListInt2 => "list_int2",
			Self::ListInt4 => "list_int4",
			Self::ListHex16 => "list_hex16",
			Self::ListHex32 => "list_hex32",
			Self::ListHex64 => "list_hex64",
		}
	}
}

impl fmt::Display for TypeTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}(0x{:02x})", self.as_str(), self.as_u8())
	}
}

impl FromStr for TypeTag {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|tag| tag.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| format!("unknown type tag: {s}"))
	}
}

#[cfg(test)]
mod tests {
	use super::{ListElement, TypeTag};

	#[test]
	fn wire_bytes_are_dense_and_ordered() {
		for (idx, tag) in TypeTag::ALL.iter().enumerate() {
			assert_eq!(usize::from(tag.as_u8()), idx);
			assert_eq!(TypeTag::from_u8(tag.as_u8()), Some(*tag));
		}
		assert_eq!(TypeTag::from_u8(0x1e), None);
		assert_eq!(TypeTag::from_u8(0xff), None);
	}

	#[test]
	fn length_widths_follow_wire_table() {
		assert_eq!(TypeTag::Raw.length_width(), 4);
		assert_eq!(TypeTag::Hex.length_width(), 4);
		assert_eq!(TypeTag::Map.length_width(), 4);
		assert_eq!(TypeTag::ListHex64.length_width(), 4);
		assert_eq!(TypeTag::Num.length_width(), 1);
		assert_eq!(TypeTag::Bool.length_width(), 1);
		assert_eq!(TypeTag::Double64.length_width(), 1);
	}

	#[test]
	fn null_header_has_no_key_byte() {
		assert_eq!(TypeTag::Null.header_width(), 2);
		assert_eq!(TypeTag::Uint1.header_width(), 3);
		assert_eq!(TypeTag::List.header_width(), 6);
	}

	#[test]
	fn typed_list_geometry() {
		assert_eq!(TypeTag::ListUint2.list_element(), Some(ListElement::Int { width: 2, signed: false }));
		assert_eq!(TypeTag::ListInt4.list_element(), Some(ListElement::Int { width: 4, signed: true }));
		assert_eq!(TypeTag::ListHex32.list_element().map(ListElement::width), Some(16));
		assert_eq!(TypeTag::List.list_element(), None);
	}

	#[test]
	fn labels_parse_back() {
		for tag in TypeTag::ALL {
			assert_eq!(tag.as_str().parse::<TypeTag>(), Ok(tag));
		}
		assert!("list_int8".parse::<TypeTag>().is_err());
	}
}
