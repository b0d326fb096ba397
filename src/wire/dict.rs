use std::collections::HashMap;

use tracing::debug;

use crate::wire::{CodecConfig, CodecError, Result, TypeTag};

/// Name used for map entries whose key byte is 0.
pub const UNNAMED: &str = "";

/// Immutable field-name dictionary backing one-byte key references.
///
/// Key byte 0 means "unnamed"; byte `n` refers to `names[n - 1]`.
#[derive(Debug, Clone, Default)]
pub struct KeyDictionary {
	names: Vec<String>,
	tags: Vec<TypeTag>,
	index: HashMap<String, usize>,
}

impl KeyDictionary {
	/// Most names a single key byte can address.
	pub const MAX_KEYS: usize = u8::MAX as usize;

	/// Build from configuration, first-seen order, first tag wins on duplicates.
	pub fn build(config: &CodecConfig) -> Result<Self> {
		let mut dict = Self::default();
		for (name, tag) in config.fields() {
			if dict.index.contains_key(name) {
				debug!(name = %name, "duplicate configured key ignored");
				continue;
			}
			dict.index.insert(name.clone(), dict.names.len());
			dict.names.push(name.clone());
			dict.tags.push(*tag);
		}

		if dict.names.len() > Self::MAX_KEYS {
			return Err(CodecError::KeyDictionaryOverflow {
				count: dict.names.len(),
				max: Self::MAX_KEYS,
			});
		}

		Ok(dict)
	}

	/// Number of names.
	pub fn len(&self) -> usize {
		self.names.len()
	}

	/// Whether the dictionary holds no names.
	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	/// Names in index order.
	pub fn names(&self) -> &[String] {
		&self.names
	}

	/// 0-based position of `name`.
	pub fn index_of(&self, name: &str) -> Option<usize> {
		self.index.get(name).copied()
	}

	/// Name at 0-based position `idx`.
	pub fn name_at(&self, idx: usize) -> Option<&str> {
		self.names.get(idx).map(String::as_str)
	}

	/// Configured tag for `name`.
	pub fn tag_of(&self, name: &str) -> Option<TypeTag> {
		self.index_of(name).map(|idx| self.tags[idx])
	}

	/// Configured tag for `name` when it is a typed list.
	pub fn typed_list_tag(&self, name: &str) -> Option<TypeTag> {
		self.tag_of(name).filter(|tag| tag.list_element().is_some())
	}

	/// Key byte written for `name`; unknown names and `None` collapse to 0.
	pub fn key_byte(&self, name: Option<&str>) -> u8 {
		name.and_then(|name| self.index_of(name))
			.and_then(|idx| u8::try_from(idx + 1).ok())
			.unwrap_or(0)
	}

	/// Map key for a key byte read from the wire.
	pub fn resolve_key_byte(&self, byte: u8) -> Result<&str> {
		if byte == 0 {
			return Ok(UNNAMED);
		}
		self.name_at(usize::from(byte) - 1).ok_or(CodecError::UnknownKeyIndex {
			index: byte,
			max: self.names.len(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::{KeyDictionary, UNNAMED};
	use crate::wire::{CodecConfig, CodecError, ErrorKind, TypeTag};

	fn abc() -> KeyDictionary {
		let config = CodecConfig::new().field("a", TypeTag::Int1).field("b", TypeTag::Int2).field("c", TypeTag::ListUint2);
		KeyDictionary::build(&config).expect("dictionary builds")
	}

	#[test]
	fn key_bytes_are_one_based() {
		let dict = abc();
		assert_eq!(dict.key_byte(Some("a")), 1);
		assert_eq!(dict.key_byte(Some("c")), 3);
		assert_eq!(dict.key_byte(None), 0);
		assert_eq!(dict.key_byte(Some("missing")), 0);
	}

	#[test]
	fn reverse_lookup_inverts_key_bytes() {
		let dict = abc();
		assert_eq!(dict.resolve_key_byte(2).expect("known"), "b");
		assert_eq!(dict.resolve_key_byte(0).expect("unnamed"), UNNAMED);
		let err = dict.resolve_key_byte(4).expect_err("out of range");
		assert!(matches!(err, CodecError::UnknownKeyIndex { index: 4, max: 3 }));
	}

	#[test]
	fn duplicates_keep_first_position_and_tag() {
		let config = CodecConfig::new().field("x", TypeTag::ListUint1).field("y", TypeTag::Str).field("x", TypeTag::Str);
		let dict = KeyDictionary::build(&config).expect("dictionary builds");
		assert_eq!(dict.len(), 2);
		assert_eq!(dict.typed_list_tag("x"), Some(TypeTag::ListUint1));
		assert_eq!(dict.typed_list_tag("y"), None);
	}

	#[test]
	fn exactly_255_keys_fit() {
		let config: CodecConfig = (0..255).map(|idx| (format!("k{idx}"), TypeTag::Str)).collect();
		let dict = KeyDictionary::build(&config).expect("255 keys fit");
		assert_eq!(dict.key_byte(Some("k254")), 255);
	}

	#[test]
	fn overflow_is_rejected() {
		let config: CodecConfig = (0..256).map(|idx| (format!("k{idx}"), TypeTag::Str)).collect();
		let err = KeyDictionary::build(&config).expect_err("256 keys overflow");
		assert_eq!(err.kind(), ErrorKind::KeyDictionaryOverflow);
	}
}
