use serde_json::{Map, Number, Value as Json};

use crate::wire::Value;

impl Value {
	/// Convert a parsed JSON document into a value tree.
	///
	/// Integral numbers become `Int`/`UInt`, every other number becomes `Float`.
	pub fn from_json(json: Json) -> Self {
		match json {
			Json::Null => Self::Null,
			Json::Bool(flag) => Self::Bool(flag),
			Json::Number(number) => from_number(&number),
			Json::String(text) => Self::Str(text),
			Json::Array(items) => Self::List(items.into_iter().map(Self::from_json).collect()),
			Json::Object(entries) => Self::Map(entries.into_iter().map(|(key, item)| (key, Self::from_json(item))).collect()),
		}
	}

	/// Render as JSON. Bytes become arrays of numbers; non-finite floats become `null`.
	pub fn to_json(&self) -> Json {
		match self {
			Self::Null => Json::Null,
			Self::Bool(flag) => Json::Bool(*flag),
			Self::Int(v) => Json::from(*v),
			Self::UInt(v) => Json::from(*v),
			Self::Float32(v) => Number::from_f64(f64::from(*v)).map_or(Json::Null, Json::Number),
			Self::Float(v) => Number::from_f64(*v).map_or(Json::Null, Json::Number),
			Self::Str(text) => Json::String(text.clone()),
			Self::Bytes(bytes) => Json::Array(bytes.iter().map(|byte| Json::from(*byte)).collect()),
			Self::List(items) => Json::Array(items.iter().map(Self::to_json).collect()),
			Self::Map(entries) => {
				let mut out = Map::new();
				for (key, item) in entries {
					out.insert(key.clone(), item.to_json());
				}
				Json::Object(out)
			}
		}
	}
}

fn from_number(number: &Number) -> Value {
	if let Some(v) = number.as_i64() {
		Value::Int(v)
	} else if let Some(v) = number.as_u64() {
		Value::from_u64(v)
	} else {
		Value::Float(number.as_f64().unwrap_or(f64::NAN))
	}
}
