use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::{self, Display};

use crate::val::{Object, Value};

/// A condition on a single document field.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
	/// The field equals the value, or is an array containing it
	Eq(Value),
	/// The field is less than or equal to the value
	Lte(Value),
	/// The field is greater than or equal to the value
	Gte(Value),
	/// The field is an array containing every one of the values
	All(Vec<Value>),
	/// The field equals any one of the values
	In(Vec<Value>),
}

impl Condition {
	/// Check whether a field value satisfies this condition.
	///
	/// An absent field only satisfies equality with null.
	pub fn matches(&self, val: &Value) -> bool {
		match self {
			Condition::Eq(expected) => equals(val, expected),
			Condition::Lte(bound) => any_element(val, |v| {
				matches!(v.compare(bound), Some(Ordering::Less | Ordering::Equal))
			}),
			Condition::Gte(bound) => any_element(val, |v| {
				matches!(v.compare(bound), Some(Ordering::Greater | Ordering::Equal))
			}),
			Condition::All(expected) => {
				if expected.is_empty() || val.is_nullish() {
					return false;
				}
				let found = match val {
					Value::Array(a) => a.as_slice(),
					v => std::slice::from_ref(v),
				};
				expected.iter().all(|x| found.contains(x))
			}
			Condition::In(expected) => expected.iter().any(|x| equals(val, x)),
		}
	}
}

fn equals(val: &Value, expected: &Value) -> bool {
	match (val, expected) {
		(Value::None | Value::Null, Value::None | Value::Null) => true,
		(Value::Array(a), x) if !matches!(x, Value::Array(_)) => a.contains(x),
		(v, x) => v == x,
	}
}

fn any_element(val: &Value, f: impl Fn(&Value) -> bool) -> bool {
	match val {
		Value::Array(a) => a.iter().any(f),
		v => f(v),
	}
}

/// A conjunction of field conditions, as understood by a [`super::Datastore`].
///
/// A field may carry several conditions, for instance a lower and an upper
/// bound, all of which must hold.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter(BTreeMap<String, Vec<Condition>>);

impl Filter {
	pub fn new() -> Self {
		Self::default()
	}

	/// A filter matching documents whose field equals the value
	pub fn eq(field: impl Into<String>, val: impl Into<Value>) -> Self {
		Self::new().with(field, Condition::Eq(val.into()))
	}

	/// Add a condition on a field
	pub fn with(mut self, field: impl Into<String>, cond: Condition) -> Self {
		self.push(field, cond);
		self
	}

	pub fn push(&mut self, field: impl Into<String>, cond: Condition) {
		self.0.entry(field.into()).or_default().push(cond);
	}

	/// Check whether a document satisfies every condition of this filter
	pub fn matches(&self, doc: &Object) -> bool {
		self.0.iter().all(|(field, conds)| {
			let val = doc.pick(field);
			conds.iter().all(|c| c.matches(val))
		})
	}
}

impl IntoIterator for Filter {
	type Item = (String, Vec<Condition>);
	type IntoIter = std::collections::btree_map::IntoIter<String, Vec<Condition>>;
	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl FromIterator<(String, Vec<Condition>)> for Filter {
	fn from_iter<T: IntoIterator<Item = (String, Vec<Condition>)>>(iter: T) -> Self {
		Self(BTreeMap::from_iter(iter))
	}
}

impl Display for Condition {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		fn list(f: &mut fmt::Formatter, vals: &[Value]) -> fmt::Result {
			f.write_str("[")?;
			for (i, v) in vals.iter().enumerate() {
				if i > 0 {
					f.write_str(", ")?;
				}
				write!(f, "{v}")?;
			}
			f.write_str("]")
		}
		match self {
			Condition::Eq(v) => write!(f, "= {v}"),
			Condition::Lte(v) => write!(f, "<= {v}"),
			Condition::Gte(v) => write!(f, ">= {v}"),
			Condition::All(vs) => {
				f.write_str("CONTAINSALL ")?;
				list(f, vs)
			}
			Condition::In(vs) => {
				f.write_str("IN ")?;
				list(f, vs)
			}
		}
	}
}

impl Display for Filter {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		if self.0.is_empty() {
			return f.write_str("TRUE");
		}
		let mut first = true;
		for (field, conds) in self.0.iter() {
			for c in conds {
				if !first {
					f.write_str(" AND ")?;
				}
				first = false;
				write!(f, "{field} {c}")?;
			}
		}
		Ok(())
	}
}
