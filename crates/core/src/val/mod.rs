//! The value model shared by the storage layer and the GraphQL layer.

mod number;
mod object;
mod record_id;

use std::cmp::Ordering;
use std::fmt::{self, Display};

use chrono::{DateTime, SecondsFormat, Utc};

pub use self::number::Number;
pub use self::object::Object;
pub use self::record_id::RecordId;

/// A document value, as held by the document store.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
	/// The field is absent
	#[default]
	None,
	Null,
	Bool(bool),
	Number(Number),
	Strand(String),
	Datetime(DateTime<Utc>),
	RecordId(RecordId),
	Array(Vec<Value>),
	Object(Object),
}

impl Value {
	/// Check if this value is absent or explicitly null
	pub fn is_nullish(&self) -> bool {
		matches!(self, Value::None | Value::Null)
	}

	pub fn as_object(&self) -> Option<&Object> {
		match self {
			Value::Object(o) => Some(o),
			_ => None,
		}
	}

	pub fn as_record_id(&self) -> Option<&RecordId> {
		match self {
			Value::RecordId(r) => Some(r),
			_ => None,
		}
	}

	/// Returns a short name for the kind of this value, used in error messages
	pub fn kind_of(&self) -> &'static str {
		match self {
			Value::None => "none",
			Value::Null => "null",
			Value::Bool(_) => "bool",
			Value::Number(_) => "number",
			Value::Strand(_) => "string",
			Value::Datetime(_) => "datetime",
			Value::RecordId(_) => "record",
			Value::Array(_) => "array",
			Value::Object(_) => "object",
		}
	}

	/// Compares two values of the same family.
	///
	/// Values of different families are unordered: numbers only compare with
	/// numbers, strings with strings and so on.
	pub fn compare(&self, other: &Value) -> Option<Ordering> {
		match (self, other) {
			(Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
			(Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
			(Value::Strand(a), Value::Strand(b)) => Some(a.cmp(b)),
			(Value::Datetime(a), Value::Datetime(b)) => Some(a.cmp(b)),
			(Value::RecordId(a), Value::RecordId(b)) => Some(a.cmp(b)),
			_ => None,
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Value::None => f.write_str("NONE"),
			Value::Null => f.write_str("NULL"),
			Value::Bool(v) => write!(f, "{v}"),
			Value::Number(v) => write!(f, "{v}"),
			Value::Strand(v) => write!(f, "{v:?}"),
			Value::Datetime(v) => {
				write!(f, "d'{}'", v.to_rfc3339_opts(SecondsFormat::AutoSi, true))
			}
			Value::RecordId(v) => write!(f, "{v}"),
			Value::Array(v) => {
				f.write_str("[")?;
				for (i, x) in v.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{x}")?;
				}
				f.write_str("]")
			}
			Value::Object(v) => write!(f, "{v}"),
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Number(Number::Int(v))
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Number(Number::Float(v))
	}
}

impl From<Number> for Value {
	fn from(v: Number) -> Self {
		Value::Number(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Strand(v.to_owned())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Strand(v)
	}
}

impl From<DateTime<Utc>> for Value {
	fn from(v: DateTime<Utc>) -> Self {
		Value::Datetime(v)
	}
}

impl From<RecordId> for Value {
	fn from(v: RecordId) -> Self {
		Value::RecordId(v)
	}
}

impl From<Vec<Value>> for Value {
	fn from(v: Vec<Value>) -> Self {
		Value::Array(v)
	}
}

impl From<Object> for Value {
	fn from(v: Object) -> Self {
		Value::Object(v)
	}
}

impl From<serde_json::Value> for Value {
	fn from(v: serde_json::Value) -> Self {
		match v {
			serde_json::Value::Null => Value::Null,
			serde_json::Value::Bool(b) => Value::Bool(b),
			serde_json::Value::Number(n) => match n.as_i64() {
				Some(i) => Value::Number(Number::Int(i)),
				None => Value::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN))),
			},
			serde_json::Value::String(s) => Value::Strand(s),
			serde_json::Value::Array(a) => Value::Array(a.into_iter().map(Value::from).collect()),
			serde_json::Value::Object(o) => {
				Value::Object(o.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
			}
		}
	}
}

impl From<Value> for serde_json::Value {
	fn from(v: Value) -> Self {
		match v {
			Value::None | Value::Null => serde_json::Value::Null,
			Value::Bool(b) => serde_json::Value::Bool(b),
			Value::Number(Number::Int(i)) => serde_json::Value::from(i),
			Value::Number(Number::Float(f)) => serde_json::Number::from_f64(f)
				.map(serde_json::Value::Number)
				.unwrap_or(serde_json::Value::Null),
			Value::Strand(s) => serde_json::Value::String(s),
			Value::Datetime(d) => {
				serde_json::Value::String(d.to_rfc3339_opts(SecondsFormat::AutoSi, true))
			}
			Value::RecordId(r) => serde_json::Value::String(r.to_string()),
			Value::Array(a) => serde_json::Value::Array(a.into_iter().map(Into::into).collect()),
			Value::Object(o) => {
				serde_json::Value::Object(o.into_iter().map(|(k, v)| (k, v.into())).collect())
			}
		}
	}
}
