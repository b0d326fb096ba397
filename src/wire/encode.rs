use tracing::trace;

use crate::wire::classify::{TextClass, classify_int, classify_text, is_lower_hex};
use crate::wire::frame::write_header;
use crate::wire::{CodecError, KeyDictionary, ListElement, Result, TypeTag, Value};

/// Encoding context shared by every frame of one `pack` call.
pub(crate) struct Encoder<'a> {
	dict: &'a KeyDictionary,
	max_depth: u32,
	out: Vec<u8>,
}

impl<'a> Encoder<'a> {
	pub(crate) fn new(dict: &'a KeyDictionary, max_depth: u32) -> Self {
		Self {
			dict,
			max_depth,
			out: Vec::new(),
		}
	}

	/// Encode `value` as the unnamed root frame and return the bytes.
	pub(crate) fn encode_root(mut self, value: &Value) -> Result<Vec<u8>> {
		self.encode(value, None, 0)?;
		Ok(self.out)
	}

	fn encode(&mut self, value: &Value, key: Option<&str>, depth: u32) -> Result<()> {
		if depth >= self.max_depth {
			return Err(CodecError::EncodeDepthExceeded { max_depth: self.max_depth });
		}

		let key_byte = self.dict.key_byte(key);

		if let (Value::List(items), Some(name)) = (value, key) {
			if let Some(tag) = self.dict.typed_list_tag(name) {
				let payload = typed_list_payload(tag, items)?;
				trace!(field = name, %tag, elements = items.len(), len = payload.len(), "typed list fast path");
				return self.frame(tag, key_byte, &payload);
			}
		}

		match value {
			Value::Null => self.frame(TypeTag::Null, 0, &[0x00]),
			Value::Bool(flag) => self.frame(TypeTag::Bool, key_byte, &[u8::from(*flag)]),
			Value::Int(v) => self.int_frame(i128::from(*v), key_byte),
			Value::UInt(v) => self.int_frame(i128::from(*v), key_byte),
			Value::Float32(v) => self.frame(TypeTag::Float32, key_byte, &v.to_be_bytes()),
			Value::Float(v) => self.frame(TypeTag::Double64, key_byte, &v.to_be_bytes()),
			Value::Str(text) => match classify_text(text) {
				TextClass::Num(bytes) => self.frame(TypeTag::Num, key_byte, &bytes),
				TextClass::Hex => {
					let bytes = hex::decode(text).map_err(|_| unsupported(TypeTag::Hex, value))?;
					self.frame(TypeTag::Hex, key_byte, &bytes)
				}
				TextClass::Str => self.frame(TypeTag::Str, key_byte, text.as_bytes()),
			},
			Value::Bytes(bytes) => self.frame(TypeTag::Raw, key_byte, bytes),
			Value::List(items) => self.container(TypeTag::List, key_byte, |enc| {
				for item in items {
					enc.encode(item, None, depth + 1)?;
				}
				Ok(())
			}),
			Value::Map(entries) => self.container(TypeTag::Map, key_byte, |enc| {
				for (name, item) in entries {
					enc.encode(item, Some(name), depth + 1)?;
				}
				Ok(())
			}),
		}
	}

	fn frame(&mut self, tag: TypeTag, key: u8, payload: &[u8]) -> Result<()> {
		write_header(&mut self.out, tag, key, payload.len())?;
		self.out.extend_from_slice(payload);
		Ok(())
	}

	fn int_frame(&mut self, value: i128, key: u8) -> Result<()> {
		let tag = classify_int(value);
		let width = tag.fixed_width().unwrap_or(8);
		write_header(&mut self.out, tag, key, width)?;
		push_int(&mut self.out, value, width);
		Ok(())
	}

	// Children are written in place; the length is patched once they are done.
	fn container(&mut self, tag: TypeTag, key: u8, body: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
		write_header(&mut self.out, tag, key, 0)?;
		let len_at = self.out.len() - tag.length_width();
		body(self)?;

		let len = self.out.len() - len_at - tag.length_width();
		if len > tag.max_payload_len() {
			return Err(CodecError::PayloadTooLarge {
				tag,
				len,
				max: tag.max_payload_len(),
			});
		}
		self.out[len_at..len_at + 4].copy_from_slice(&(len as u32).to_be_bytes());
		Ok(())
	}
}

/// Pack list items as bare fixed-width records.
fn typed_list_payload(tag: TypeTag, items: &[Value]) -> Result<Vec<u8>> {
	let Some(element) = tag.list_element() else {
		return Err(CodecError::UnsupportedValue {
			tag,
			got: "list".to_owned(),
		});
	};

	let mut out = Vec::with_capacity(items.len() * element.width());
	for item in items {
		match element {
			ListElement::Int { width, signed } => {
				let value = item.as_i128().ok_or_else(|| unsupported(tag, item))?;
				if !int_fits(value, width, signed) {
					return Err(unsupported(tag, item));
				}
				push_int(&mut out, value, width);
			}
			ListElement::Hex { width } => {
				let text = item.as_str().filter(|text| text.len() == width * 2 && is_lower_hex(text)).ok_or_else(|| unsupported(tag, item))?;
				let bytes = hex::decode(text).map_err(|_| unsupported(tag, item))?;
				out.extend_from_slice(&bytes);
			}
		}
	}
	Ok(out)
}

/// Whether `value` fits a `width`-byte integer of the given signedness.
fn int_fits(value: i128, width: usize, signed: bool) -> bool {
	let bits = (width * 8) as u32;
	if signed {
		let bound = 1_i128 << (bits - 1);
		-bound <= value && value < bound
	} else {
		0 <= value && value < (1_i128 << bits)
	}
}

/// Append the low `width` bytes of `value`, big-endian two's complement.
fn push_int(out: &mut Vec<u8>, value: i128, width: usize) {
	let bytes = value.to_be_bytes();
	out.extend_from_slice(&bytes[bytes.len() - width..]);
}

fn unsupported(tag: TypeTag, value: &Value) -> CodecError {
	let got = match value {
		Value::Int(v) => format!("int {v}"),
		Value::UInt(v) => format!("int {v}"),
		Value::Str(text) => format!("str of {} chars", text.len()),
		other => other.kind_name().to_owned(),
	};
	CodecError::UnsupportedValue { tag, got }
}

#[cfg(test)]
mod tests {
	use super::{int_fits, push_int};

	#[test]
	fn int_fit_bounds_are_inclusive_native_ranges() {
		assert!(int_fits(255, 1, false));
		assert!(!int_fits(256, 1, false));
		assert!(!int_fits(-1, 2, false));
		assert!(int_fits(-128, 1, true));
		assert!(!int_fits(128, 1, true));
		assert!(int_fits(i128::from(u64::MAX), 8, false));
		assert!(int_fits(i128::from(i32::MIN), 4, true));
	}

	#[test]
	fn negative_values_truncate_to_twos_complement() {
		let mut out = Vec::new();
		push_int(&mut out, -2, 2);
		push_int(&mut out, 0x0102, 2);
		assert_eq!(out, [0xff, 0xfe, 0x01, 0x02]);
	}
}
