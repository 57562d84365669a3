use chrono::Utc;
use nanoid::nanoid;

use crate::catalog::{CastError, Kind};
use crate::cnf::{CODE_CHARS, ID_FIELD};
use crate::kvs::{Condition, Filter};
use crate::val::{Object, Value};

/// How a missing field is filled when a document is inserted.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldDefault {
	/// The current time
	Now,
	/// A fixed value
	Value(Value),
	/// A random upper-case alphanumeric code of the given length. A zero
	/// length yields an empty code.
	Code(usize),
}

impl FieldDefault {
	fn generate(&self) -> Value {
		match self {
			FieldDefault::Now => Value::Datetime(Utc::now()),
			FieldDefault::Value(v) => v.clone(),
			FieldDefault::Code(0) => Value::Strand(String::new()),
			FieldDefault::Code(len) => {
				let len = *len;
				Value::Strand(nanoid!(len, &CODE_CHARS))
			}
		}
	}
}

/// A declared field of a collection.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDef {
	pub name: String,
	pub kind: Kind,
	pub default: Option<FieldDefault>,
	/// No two documents of the collection may hold the same value
	pub unique: bool,
}

impl FieldDef {
	pub fn new(name: impl Into<String>, kind: Kind) -> Self {
		Self {
			name: name.into(),
			kind,
			default: None,
			unique: false,
		}
	}

	pub fn default(mut self, default: FieldDefault) -> Self {
		self.default = Some(default);
		self
	}

	pub fn unique(mut self) -> Self {
		self.unique = true;
		self
	}
}

/// The definition of a stored collection.
///
/// Documents are not restricted to the declared fields: anything undeclared
/// is stored and returned as given.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionDef {
	pub name: String,
	pub fields: Vec<FieldDef>,
}

impl CollectionDef {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			fields: Vec::new(),
		}
	}

	/// Declare a field on this collection
	pub fn field(mut self, field: FieldDef) -> Self {
		self.fields.push(field);
		self
	}

	pub fn get(&self, name: &str) -> Option<&FieldDef> {
		self.fields.iter().find(|f| f.name == name)
	}

	/// Check whether a field is declared. The identifier always is.
	pub fn has_field(&self, name: &str) -> bool {
		name == ID_FIELD || self.get(name).is_some()
	}

	/// The names of the fields declared unique
	pub fn unique_fields(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().filter(|f| f.unique).map(|f| f.name.as_str())
	}

	/// The kind a field is stored as
	pub fn kind_of(&self, name: &str) -> Kind {
		if name == ID_FIELD {
			return Kind::Record;
		}
		self.get(name).map(|f| f.kind.clone()).unwrap_or_default()
	}

	/// Coerce every declared field of a document to its declared kind
	pub fn cast(&self, doc: Object) -> Result<Object, CastError> {
		doc.into_iter()
			.map(|(k, v)| {
				let v = self.kind_of(&k).coerce(&k, v)?;
				Ok((k, v))
			})
			.collect()
	}

	/// Cast a document and fill the defaults of missing fields
	pub fn prepare_insert(&self, doc: Object) -> Result<Object, CastError> {
		let mut doc = self.cast(doc)?;
		for fd in self.fields.iter() {
			if let Some(default) = &fd.default {
				if doc.pick(&fd.name).is_nullish() {
					doc.insert(fd.name.clone(), default.generate());
				}
			}
		}
		Ok(doc)
	}

	/// Cast every operand of a filter by the kind of the field it targets
	pub fn cast_filter(&self, filter: Filter) -> Result<Filter, CastError> {
		filter
			.into_iter()
			.map(|(field, conds)| {
				let kind = self.kind_of(&field);
				let conds = conds
					.into_iter()
					.map(|c| cast_condition(&field, &kind, c))
					.collect::<Result<Vec<_>, _>>()?;
				Ok((field, conds))
			})
			.collect()
	}
}

fn cast_operand(field: &str, kind: &Kind, val: Value) -> Result<Value, CastError> {
	match (kind, val) {
		// A single value compared against an array field
		(Kind::Array(k), v) if !matches!(v, Value::Array(_)) => k.coerce(field, v),
		(k, v) => k.coerce(field, v),
	}
}

fn cast_condition(field: &str, kind: &Kind, cond: Condition) -> Result<Condition, CastError> {
	let elem = kind.element();
	let list = |vals: Vec<Value>| -> Result<Vec<Value>, CastError> {
		vals.into_iter().map(|v| elem.coerce(field, v)).collect()
	};
	Ok(match cond {
		Condition::Eq(v) => Condition::Eq(cast_operand(field, kind, v)?),
		Condition::Lte(v) => Condition::Lte(elem.coerce(field, v)?),
		Condition::Gte(v) => Condition::Gte(elem.coerce(field, v)?),
		Condition::All(vs) => Condition::All(list(vs)?),
		Condition::In(vs) => Condition::In(list(vs)?),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::val::RecordId;

	fn vouchers() -> CollectionDef {
		CollectionDef::new("Vouchers")
			.field(FieldDef::new("code", Kind::String).default(FieldDefault::Code(6)))
			.field(FieldDef::new("points", Kind::Number))
			.field(FieldDef::new("reward_id", Kind::Record))
			.field(FieldDef::new("expiration_date", Kind::Datetime))
			.field(FieldDef::new("created", Kind::Datetime).default(FieldDefault::Now))
	}

	fn doc(pairs: &[(&str, Value)]) -> Object {
		pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
	}

	#[test]
	fn identifier_is_always_declared() {
		let def = vouchers();
		assert!(def.has_field("_id"));
		assert!(def.has_field("reward_id"));
		assert!(!def.has_field("voucher_ids"));
		assert_eq!(def.kind_of("_id"), Kind::Record);
		assert_eq!(def.kind_of("extra"), Kind::Any);
	}

	#[test]
	fn insert_fills_defaults() {
		let out = vouchers().prepare_insert(doc(&[("points", Value::from(5i64))])).unwrap();
		let code = match out.pick("code") {
			Value::Strand(s) => s.clone(),
			v => panic!("unexpected code {v}"),
		};
		assert_eq!(code.len(), 6);
		assert!(code.chars().all(|c| CODE_CHARS.contains(&c)));
		assert!(matches!(out.pick("created"), Value::Datetime(_)));
	}

	#[test]
	fn zero_length_codes_are_empty() {
		let def = CollectionDef::new("Vouchers")
			.field(FieldDef::new("code", Kind::String).default(FieldDefault::Code(0)));
		let out = def.prepare_insert(Object::default()).unwrap();
		assert_eq!(out.pick("code"), &Value::from(""));
	}

	#[test]
	fn insert_keeps_given_values() {
		let out = vouchers()
			.prepare_insert(doc(&[("code", "FREE".into()), ("note", "kept".into())]))
			.unwrap();
		assert_eq!(out.pick("code"), &Value::from("FREE"));
		assert_eq!(out.pick("note"), &Value::from("kept"));
	}

	#[test]
	fn cast_rejects_invalid_identifiers() {
		let err = vouchers().cast(doc(&[("reward_id", "not-an-id".into())])).unwrap_err();
		assert_eq!(err.field, "reward_id");
	}

	#[test]
	fn filter_operands_follow_field_kinds() {
		let id = RecordId::new();
		let def = vouchers().field(FieldDef::new("tag_ids", Kind::Array(Box::new(Kind::Record))));
		let filter = Filter::eq("reward_id", id.to_string())
			.with("tag_ids", Condition::All(vec![id.to_string().into()]))
			.with("points", Condition::Lte("10".into()));
		let out = def.cast_filter(filter).unwrap();
		let expected = Filter::eq("reward_id", id)
			.with("tag_ids", Condition::All(vec![id.into()]))
			.with("points", Condition::Lte(Value::from(10i64)));
		assert_eq!(out, expected);
	}
}
