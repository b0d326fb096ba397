use crate::wire::bytes::Cursor;
use crate::wire::frame::{FrameHeader, read_child};
use crate::wire::num::be_bytes_to_decimal;
use crate::wire::value::insert_entry;
use crate::wire::{CodecError, KeyDictionary, ListElement, Result, TypeTag, Value};

/// Recursive descent over one frame tree.
pub(crate) struct Decoder<'a> {
	dict: &'a KeyDictionary,
	max_depth: u32,
}

impl<'a> Decoder<'a> {
	pub(crate) fn new(dict: &'a KeyDictionary, max_depth: u32) -> Self {
		Self { dict, max_depth }
	}

	/// Decode a frame whose payload has already been sliced out.
	pub(crate) fn decode(&self, header: FrameHeader, payload: &[u8], depth: u32) -> Result<Value> {
		if depth >= self.max_depth {
			return Err(CodecError::DecodeDepthExceeded { max_depth: self.max_depth });
		}

		let tag = header.tag;
		if let Some(element) = tag.list_element() {
			return decode_typed_list(tag, element, payload);
		}

		let value = match tag {
			TypeTag::List => {
				let mut items = Vec::new();
				let mut cursor = Cursor::with_base(payload, header.payload_offset());
				while !cursor.is_empty() {
					let (child, child_payload) = read_child(&mut cursor)?;
					items.push(self.decode(child, child_payload, depth + 1)?);
				}
				Value::List(items)
			}
			TypeTag::Map => {
				let mut entries = Vec::new();
				let mut cursor = Cursor::with_base(payload, header.payload_offset());
				while !cursor.is_empty() {
					let (child, child_payload) = read_child(&mut cursor)?;
					let name = self.dict.resolve_key_byte(child.key)?.to_owned();
					let item = self.decode(child, child_payload, depth + 1)?;
					insert_entry(&mut entries, name, item);
				}
				Value::Map(entries)
			}
			TypeTag::Null => Value::Null,
			TypeTag::Bool => Value::Bool(fixed::<1>(tag, payload)? == [0x01]),
			TypeTag::Int1 | TypeTag::Char => Value::Int(i64::from(i8::from_be_bytes(fixed(tag, payload)?))),
			TypeTag::Uint1 | TypeTag::Uchar => Value::Int(i64::from(u8::from_be_bytes(fixed(tag, payload)?))),
			TypeTag::Int2 => Value::Int(i64::from(i16::from_be_bytes(fixed(tag, payload)?))),
			TypeTag::Uint2 => Value::Int(i64::from(u16::from_be_bytes(fixed(tag, payload)?))),
			TypeTag::Int4 => Value::Int(i64::from(i32::from_be_bytes(fixed(tag, payload)?))),
			TypeTag::Uint4 => Value::Int(i64::from(u32::from_be_bytes(fixed(tag, payload)?))),
			TypeTag::Int8 => Value::Int(i64::from_be_bytes(fixed(tag, payload)?)),
			TypeTag::Uint8 => Value::from_u64(u64::from_be_bytes(fixed(tag, payload)?)),
			TypeTag::Float32 => Value::Float32(f32::from_be_bytes(fixed(tag, payload)?)),
			TypeTag::Double64 => Value::Float(f64::from_be_bytes(fixed(tag, payload)?)),
			TypeTag::Num => Value::Str(be_bytes_to_decimal(payload)),
			TypeTag::Hex => Value::Str(hex::encode(payload)),
			TypeTag::Str => match String::from_utf8(payload.to_vec()) {
				Ok(text) => Value::Str(text),
				Err(err) => Value::Bytes(err.into_bytes()),
			},
			TypeTag::Raw => Value::Bytes(payload.to_vec()),
			// typed lists returned above
			_ => return Err(CodecError::UnknownTag { tag: tag.as_u8(), at: header.offset }),
		};

		Ok(value)
	}
}

fn decode_typed_list(tag: TypeTag, element: ListElement, payload: &[u8]) -> Result<Value> {
	let width = element.width();
	if payload.len() % width != 0 {
		return Err(CodecError::TypedListMisaligned {
			tag,
			len: payload.len(),
			width,
		});
	}

	let items = payload
		.chunks_exact(width)
		.map(|record| match element {
			ListElement::Int { signed: true, .. } => Value::Int(sign_extend(record)),
			ListElement::Int { signed: false, .. } => Value::from_u64(record.iter().fold(0_u64, |acc, byte| (acc << 8) | u64::from(*byte))),
			ListElement::Hex { .. } => Value::Str(hex::encode(record)),
		})
		.collect();
	Ok(Value::List(items))
}

/// Big-endian two's complement record of up to 8 bytes widened to `i64`.
fn sign_extend(record: &[u8]) -> i64 {
	let fill = if record.first().is_some_and(|byte| byte & 0x80 != 0) { 0xff } else { 0x00 };
	let mut buf = [fill; 8];
	buf[8 - record.len()..].copy_from_slice(record);
	i64::from_be_bytes(buf)
}

/// Fixed-width scalar payload as an array, rejecting any other length.
fn fixed<const N: usize>(tag: TypeTag, payload: &[u8]) -> Result<[u8; N]> {
	payload.try_into().map_err(|_| CodecError::PayloadWidth {
		tag,
		expected: N,
		got: payload.len(),
	})
}

#[cfg(test)]
mod tests {
	use super::{decode_typed_list, sign_extend};
	use crate::wire::{CodecError, TypeTag, Value};

	#[test]
	fn sign_extension_by_width() {
		assert_eq!(sign_extend(&[0xff]), -1);
		assert_eq!(sign_extend(&[0x7f]), 127);
		assert_eq!(sign_extend(&[0x80, 0x00]), -32768);
		assert_eq!(sign_extend(&[0x00, 0x00, 0x01, 0x00]), 256);
	}

	#[test]
	fn typed_list_splits_records() {
		let element = TypeTag::ListInt2.list_element().expect("typed list");
		let value = decode_typed_list(TypeTag::ListInt2, element, &[0xff, 0xfe, 0x00, 0x07]).expect("decodes");
		assert_eq!(value, Value::list([-2, 7]));
	}

	#[test]
	fn typed_list_rejects_partial_record() {
		let element = TypeTag::ListUint4.list_element().expect("typed list");
		let err = decode_typed_list(TypeTag::ListUint4, element, &[0, 0, 0, 1, 0]).expect_err("misaligned");
		assert!(matches!(err, CodecError::TypedListMisaligned { len: 5, width: 4, .. }));
	}
}
