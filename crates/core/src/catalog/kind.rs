use std::fmt::{self, Display};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::catalog::{CastError, FieldDef};
use crate::val::{Number, Object, Value};

/// The declared kind of a stored field.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Kind {
	#[default]
	Any,
	Bool,
	Int,
	Float,
	Number,
	String,
	Datetime,
	Record,
	Array(Box<Kind>),
	Object(Vec<FieldDef>),
}

impl Kind {
	/// The kind of the elements of an array kind, or the kind itself
	pub fn element(&self) -> &Kind {
		match self {
			Kind::Array(k) => k.as_ref(),
			k => k,
		}
	}

	/// Coerce a value to this kind.
	///
	/// Absent and null values are accepted for every kind. A single value is
	/// wrapped when an array is expected.
	pub fn coerce(&self, field: &str, val: Value) -> Result<Value, CastError> {
		if val.is_nullish() {
			return Ok(val);
		}
		let fail = |val: &Value| CastError {
			field: field.to_owned(),
			expected: self.to_string(),
			found: val.to_string(),
		};
		match self {
			Kind::Any => Ok(val),
			Kind::Bool => match val {
				Value::Bool(_) => Ok(val),
				Value::Strand(ref s) => match s.as_str() {
					"true" => Ok(Value::Bool(true)),
					"false" => Ok(Value::Bool(false)),
					_ => Err(fail(&val)),
				},
				_ => Err(fail(&val)),
			},
			Kind::Int => match val {
				Value::Number(n) => n.as_int().map(Value::from).ok_or_else(|| fail(&val)),
				Value::Strand(ref s) => {
					s.trim().parse::<i64>().map(Value::from).map_err(|_| fail(&val))
				}
				_ => Err(fail(&val)),
			},
			Kind::Float => match val {
				Value::Number(n) => Ok(Value::from(n.as_float())),
				Value::Strand(ref s) => {
					s.trim().parse::<f64>().map(Value::from).map_err(|_| fail(&val))
				}
				_ => Err(fail(&val)),
			},
			Kind::Number => match val {
				Value::Number(_) => Ok(val),
				Value::Strand(ref s) => match s.trim().parse::<i64>() {
					Ok(i) => Ok(Value::from(i)),
					Err(_) => s.trim().parse::<f64>().map(Value::from).map_err(|_| fail(&val)),
				},
				_ => Err(fail(&val)),
			},
			Kind::String => match val {
				Value::Strand(_) => Ok(val),
				Value::Number(n) => Ok(Value::Strand(match n {
					Number::Int(i) => i.to_string(),
					Number::Float(f) => f.to_string(),
				})),
				Value::Bool(b) => Ok(Value::Strand(b.to_string())),
				_ => Err(fail(&val)),
			},
			Kind::Datetime => match val {
				Value::Datetime(_) => Ok(val),
				Value::Strand(ref s) => {
					parse_datetime(s).map(Value::Datetime).ok_or_else(|| fail(&val))
				}
				Value::Number(Number::Int(ms)) => match Utc.timestamp_millis_opt(ms).single() {
					Some(dt) => Ok(Value::Datetime(dt)),
					None => Err(fail(&val)),
				},
				_ => Err(fail(&val)),
			},
			Kind::Record => match val {
				Value::RecordId(_) => Ok(val),
				Value::Strand(ref s) => s.parse().map(Value::RecordId).map_err(|_| fail(&val)),
				_ => Err(fail(&val)),
			},
			Kind::Array(k) => match val {
				Value::Array(a) => a
					.into_iter()
					.map(|v| k.coerce(field, v))
					.collect::<Result<Vec<_>, _>>()
					.map(Value::Array),
				v => Ok(Value::Array(vec![k.coerce(field, v)?])),
			},
			Kind::Object(fields) => match val {
				Value::Object(o) => cast_fields(field, fields, o).map(Value::Object),
				_ => Err(fail(&val)),
			},
		}
	}
}

/// Cast the declared fields of an embedded object, passing others through
fn cast_fields(path: &str, fields: &[FieldDef], obj: Object) -> Result<Object, CastError> {
	obj.into_iter()
		.map(|(k, v)| match fields.iter().find(|f| f.name == k) {
			Some(fd) => fd.kind.coerce(&format!("{path}.{k}"), v).map(|v| (k, v)),
			None => Ok((k, v)),
		})
		.collect()
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
	if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
		return Some(dt.with_timezone(&Utc));
	}
	NaiveDate::parse_from_str(s, "%Y-%m-%d")
		.ok()
		.and_then(|d| d.and_hms_opt(0, 0, 0))
		.map(|dt| Utc.from_utc_datetime(&dt))
}

impl Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Kind::Any => f.write_str("any"),
			Kind::Bool => f.write_str("bool"),
			Kind::Int => f.write_str("int"),
			Kind::Float => f.write_str("float"),
			Kind::Number => f.write_str("number"),
			Kind::String => f.write_str("string"),
			Kind::Datetime => f.write_str("datetime"),
			Kind::Record => f.write_str("record"),
			Kind::Array(k) => write!(f, "array<{k}>"),
			Kind::Object(_) => f.write_str("object"),
		}
	}
}
