use async_graphql::dynamic::FieldValue;
use async_graphql::dynamic::indexmap::IndexMap;
use async_graphql::{Name, Value as GqlValue};
use chrono::SecondsFormat;

use crate::catalog::Kind;
use crate::gql::error::{GqlError, type_error};
use crate::val::{Number, Object, Value};

/// The documents produced by a resolver.
#[derive(Clone, Debug, PartialEq)]
pub enum Found {
	One(Option<Object>),
	Many(Vec<Object>),
}

impl Found {
	pub(crate) fn into_field_value<'a>(self) -> Option<FieldValue<'a>> {
		match self {
			Found::One(doc) => doc.map(FieldValue::owned_any),
			Found::Many(docs) => {
				Some(FieldValue::list(docs.into_iter().map(FieldValue::owned_any)))
			}
		}
	}
}

/// Convert a request value into a document value
pub(crate) fn gql_to_value(val: &GqlValue) -> Result<Value, GqlError> {
	Ok(match val {
		GqlValue::Null => Value::Null,
		GqlValue::Boolean(b) => Value::Bool(*b),
		GqlValue::Number(n) => match n.as_i64() {
			Some(i) => Value::Number(Number::Int(i)),
			None => match n.as_f64() {
				Some(f) => Value::Number(Number::Float(f)),
				None => return Err(type_error(Kind::Number, val)),
			},
		},
		GqlValue::String(s) => Value::Strand(s.clone()),
		GqlValue::Enum(e) => Value::Strand(e.to_string()),
		GqlValue::List(l) => Value::Array(l.iter().map(gql_to_value).collect::<Result<_, _>>()?),
		GqlValue::Object(o) => Value::Object(gql_to_object(o)?),
		GqlValue::Binary(_) => return Err(type_error(Kind::Any, val)),
	})
}

/// Convert request arguments or an input object into a document
pub(crate) fn gql_to_object(map: &IndexMap<Name, GqlValue>) -> Result<Object, GqlError> {
	map.iter().map(|(k, v)| Ok((k.to_string(), gql_to_value(v)?))).collect()
}

/// Convert a document value into a response value.
///
/// Identifiers and datetimes are rendered as strings.
pub(crate) fn value_to_gql(val: &Value) -> GqlValue {
	match val {
		Value::None | Value::Null => GqlValue::Null,
		Value::Bool(b) => GqlValue::Boolean(*b),
		Value::Number(Number::Int(i)) => GqlValue::Number((*i).into()),
		Value::Number(Number::Float(f)) => {
			serde_json::Number::from_f64(*f).map(GqlValue::Number).unwrap_or(GqlValue::Null)
		}
		Value::Strand(s) => GqlValue::String(s.clone()),
		Value::Datetime(d) => GqlValue::String(d.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
		Value::RecordId(r) => GqlValue::String(r.to_string()),
		Value::Array(a) => GqlValue::List(a.iter().map(value_to_gql).collect()),
		Value::Object(o) => {
			GqlValue::Object(o.iter().map(|(k, v)| (Name::new(k), value_to_gql(v))).collect())
		}
	}
}

/// Convert a document value into a field value of an object-typed field,
/// keeping nested objects resolvable by their own field resolvers
pub(crate) fn value_to_field_value<'a>(val: &Value) -> Option<FieldValue<'a>> {
	match val {
		Value::None | Value::Null => None,
		Value::Object(o) => Some(FieldValue::owned_any(o.clone())),
		Value::Array(a) => Some(FieldValue::list(
			a.iter().map(|v| value_to_field_value(v).unwrap_or(FieldValue::NULL)),
		)),
		v => Some(FieldValue::value(value_to_gql(v))),
	}
}
