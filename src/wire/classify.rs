use crate::wire::num::{decimal_to_be_bytes, is_num_literal};
use crate::wire::{TypeTag, Value};

/// Integer tags in priority order with their exclusive native bounds.
///
/// A value takes the first tag where `lo < v < hi`. Both ends are open, so
/// UINT1 covers 1..=254 and 255 moves up to UINT2; 0 lands in INT1.
const INT_LADDER: [(TypeTag, i128, i128); 8] = [
	(TypeTag::Uint1, 0, u8::MAX as i128),
	(TypeTag::Int1, i8::MIN as i128, i8::MAX as i128),
	(TypeTag::Uint2, 0, u16::MAX as i128),
	(TypeTag::Int2, i16::MIN as i128, i16::MAX as i128),
	(TypeTag::Uint4, 0, u32::MAX as i128),
	(TypeTag::Int4, i32::MIN as i128, i32::MAX as i128),
	(TypeTag::Uint8, 0, u64::MAX as i128),
	(TypeTag::Int8, i64::MIN as i128, i64::MAX as i128),
];

/// How a text value goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TextClass {
	/// Decimal literal with its minimal big-endian payload.
	Num(Vec<u8>),
	/// Lowercase, even-length hex.
	Hex,
	/// Anything else, written as UTF-8.
	Str,
}

/// Pick the wire tag for a value without any field configuration.
pub fn classify(value: &Value) -> TypeTag {
	match value {
		Value::Null => TypeTag::Null,
		Value::Bool(_) => TypeTag::Bool,
		Value::Int(v) => classify_int(i128::from(*v)),
		Value::UInt(v) => classify_int(i128::from(*v)),
		Value::Float32(_) => TypeTag::Float32,
		Value::Float(_) => TypeTag::Double64,
		Value::Str(text) => match classify_text(text) {
			TextClass::Num(_) => TypeTag::Num,
			TextClass::Hex => TypeTag::Hex,
			TextClass::Str => TypeTag::Str,
		},
		Value::Bytes(_) => TypeTag::Raw,
		Value::List(_) => TypeTag::List,
		Value::Map(_) => TypeTag::Map,
	}
}

/// Narrowest integer tag for `value`; callers pass values within `i64`/`u64`.
pub(crate) fn classify_int(value: i128) -> TypeTag {
	for (tag, lo, hi) in INT_LADDER {
		if lo < value && value < hi {
			return tag;
		}
	}

	// The only values no open range admits.
	if value == i128::from(u64::MAX) { TypeTag::Uint8 } else { TypeTag::Int8 }
}

pub(crate) fn classify_text(text: &str) -> TextClass {
	if is_num_literal(text) {
		if let Some(bytes) = decimal_to_be_bytes(text).filter(|bytes| bytes.len() <= TypeTag::Num.max_payload_len()) {
			return TextClass::Num(bytes);
		}
		// Too long for NUM's one-byte length; STR still round-trips.
		return TextClass::Str;
	}

	if is_lower_hex(text) {
		return TextClass::Hex;
	}

	TextClass::Str
}

pub(crate) fn is_lower_hex(text: &str) -> bool {
	!text.is_empty() && text.len() % 2 == 0 && text.bytes().all(|byte| matches!(byte, b'0'..=b'9' | b'a'..=b'f'))
}
