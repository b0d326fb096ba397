/// In-memory value tree accepted by `pack` and produced by `unpack`.
///
/// Integers have one canonical spelling: `Int` for anything that fits `i64`,
/// `UInt` only above `i64::MAX`. Decoding always yields the canonical form,
/// and the `From` conversions normalize, so round trips compare equal.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Absent value.
	Null,
	/// Boolean.
	Bool(bool),
	/// Signed integer.
	Int(i64),
	/// Unsigned integer above `i64::MAX`.
	UInt(u64),
	/// Explicit single precision float.
	Float32(f32),
	/// Double precision float.
	Float(f64),
	/// Text; decimal and lowercase hex strings get compact encodings.
	Str(String),
	/// Opaque bytes.
	Bytes(Vec<u8>),
	/// Ordered sequence.
	List(Vec<Value>),
	/// Insertion-ordered map with string keys.
	Map(Vec<(String, Value)>),
}

impl Value {
	/// Build a map from key/value pairs, keeping their order.
	pub fn map<K, I>(entries: I) -> Self
	where
		K: Into<String>,
		I: IntoIterator<Item = (K, Value)>,
	{
		Self::Map(entries.into_iter().map(|(key, value)| (key.into(), value)).collect())
	}

	/// Build a list from anything convertible into values.
	pub fn list<T, I>(items: I) -> Self
	where
		T: Into<Value>,
		I: IntoIterator<Item = T>,
	{
		Self::List(items.into_iter().map(Into::into).collect())
	}

	/// Canonical integer value for an unsigned input.
	pub fn from_u64(value: u64) -> Self {
		match i64::try_from(value) {
			Ok(signed) => Self::Int(signed),
			Err(_) => Self::UInt(value),
		}
	}

	/// Short lowercase label of the variant.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Int(_) | Self::UInt(_) => "int",
			Self::Float32(_) => "float32",
			Self::Float(_) => "float",
			Self::Str(_) => "str",
			Self::Bytes(_) => "bytes",
			Self::List(_) => "list",
			Self::Map(_) => "map",
		}
	}

	/// Look up a map entry by key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		match self {
			Self::Map(entries) => entries.iter().find(|(name, _)| name == key).map(|(_, value)| value),
			_ => None,
		}
	}

	/// Integer content widened to `i128`, if this is an integer.
	pub fn as_i128(&self) -> Option<i128> {
		match self {
			Self::Int(value) => Some(i128::from(*value)),
			Self::UInt(value) => Some(i128::from(*value)),
			_ => None,
		}
	}

	/// String content, if this is text.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(value) => Some(value),
			_ => None,
		}
	}
}

/// Insert `value` under `key`, replacing an existing entry in place.
pub(crate) fn insert_entry(entries: &mut Vec<(String, Value)>, key: String, value: Value) {
	match entries.iter_mut().find(|(name, _)| *name == key) {
		Some(slot) => slot.1 = value,
		None => entries.push((key, value)),
	}
}

macro_rules! from_small_int {
	($($ty:ty),*) => {
		$(impl From<$ty> for Value {
			fn from(value: $ty) -> Self {
				Self::Int(i64::from(value))
			}
		})*
	};
}

from_small_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
	fn from(value: u64) -> Self {
		Self::from_u64(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<f32> for Value {
	fn from(value: f32) -> Self {
		Self::Float32(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Str(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Self::List(value)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

#[cfg(test)]
mod tests {
	use super::{Value, insert_entry};

	#[test]
	fn unsigned_inputs_normalize() {
		assert_eq!(Value::from(5_u64), Value::Int(5));
		assert_eq!(Value::from(u64::MAX), Value::UInt(u64::MAX));
		assert_eq!(Value::from(200_u8), Value::Int(200));
	}

	#[test]
	fn insert_replaces_in_place() {
		let mut entries = vec![("a".to_owned(), Value::Int(1)), ("b".to_owned(), Value::Int(2))];
		insert_entry(&mut entries, "a".to_owned(), Value::Int(3));
		insert_entry(&mut entries, "c".to_owned(), Value::Null);
		assert_eq!(Value::Map(entries), Value::map([("a", Value::Int(3)), ("b", Value::Int(2)), ("c", Value::Null)]));
	}

	#[test]
	fn get_reads_map_entries() {
		let value = Value::map([("x", Value::from("y"))]);
		assert_eq!(value.get("x").and_then(Value::as_str), Some("y"));
		assert_eq!(value.get("z"), None);
		assert_eq!(Value::Null.get("x"), None);
	}
}
