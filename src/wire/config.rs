use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::wire::{Result, TypeTag};

/// Ordered field name → type tag configuration.
///
/// Order matters: it fixes the key index assigned to each name. The tag is
/// only consulted for typed-list fields; other tags just reserve a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodecConfig {
	fields: Vec<(String, TypeTag)>,
}

impl CodecConfig {
	/// Empty configuration; every map key encodes as unnamed.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a field, builder style.
	pub fn field(mut self, name: impl Into<String>, tag: TypeTag) -> Self {
		self.push(name, tag);
		self
	}

	/// Append a field.
	pub fn push(&mut self, name: impl Into<String>, tag: TypeTag) {
		self.fields.push((name.into(), tag));
	}

	/// Configured fields in declaration order, duplicates included.
	pub fn fields(&self) -> &[(String, TypeTag)] {
		&self.fields
	}

	/// Number of declared fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Whether no field is declared.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Parse a JSON object such as `{"nums": "list_uint2", "id": "uint8"}`.
	pub fn from_json_str(text: &str) -> Result<Self> {
		Ok(serde_json::from_str(text)?)
	}

	/// Read and parse a JSON configuration file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let text = fs::read_to_string(path)?;
		Self::from_json_str(&text)
	}
}

impl<K: Into<String>> FromIterator<(K, TypeTag)> for CodecConfig {
	fn from_iter<I: IntoIterator<Item = (K, TypeTag)>>(iter: I) -> Self {
		Self {
			fields: iter.into_iter().map(|(name, tag)| (name.into(), tag)).collect(),
		}
	}
}

impl<'de> Deserialize<'de> for CodecConfig {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
		deserializer.deserialize_map(ConfigVisitor)
	}
}

// Visits entries in document order; a plain map type would sort them.
struct ConfigVisitor;

impl<'de> Visitor<'de> for ConfigVisitor {
	type Value = CodecConfig;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("an object mapping field names to type tags")
	}

	fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
		let mut config = CodecConfig::new();
		while let Some((name, tag)) = map.next_entry::<String, TypeTag>()? {
			config.push(name, tag);
		}
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::CodecConfig;
	use crate::wire::{ErrorKind, TypeTag};

	#[test]
	fn json_keeps_document_order() {
		let config = CodecConfig::from_json_str(r#"{"zeta": "uint2", "alpha": "list_hex64", "mid": "str"}"#).expect("config parses");
		let names: Vec<&str> = config.fields().iter().map(|(name, _)| name.as_str()).collect();
		assert_eq!(names, ["zeta", "alpha", "mid"]);
		assert_eq!(config.fields()[1].1, TypeTag::ListHex64);
	}

	#[test]
	fn unknown_tag_label_is_config_error() {
		let err = CodecConfig::from_json_str(r#"{"a": "list_int8"}"#).expect_err("bad label");
		assert_eq!(err.kind(), ErrorKind::Config);
	}

	#[test]
	fn builder_and_iterator_agree() {
		let built = CodecConfig::new().field("a", TypeTag::Uint1).field("b", TypeTag::ListUint2);
		let collected: CodecConfig = [("a", TypeTag::Uint1), ("b", TypeTag::ListUint2)].into_iter().collect();
		assert_eq!(built, collected);
		assert_eq!(built.len(), 2);
	}
}
