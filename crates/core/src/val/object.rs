use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::ops::{Deref, DerefMut};

use crate::cnf::ID_FIELD;
use crate::val::{RecordId, Value};

/// A string-keyed map of values. Stored documents are objects carrying their
/// identifier under the `_id` key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Object(pub BTreeMap<String, Value>);

impl Object {
	/// Returns the document identifier, if this object carries one
	pub fn rid(&self) -> Option<&RecordId> {
		self.0.get(ID_FIELD).and_then(Value::as_record_id)
	}

	/// Returns the value of a field, treating an absent field as `Value::None`
	pub fn pick(&self, field: &str) -> &Value {
		static NONE: Value = Value::None;
		self.0.get(field).unwrap_or(&NONE)
	}
}

impl Deref for Object {
	type Target = BTreeMap<String, Value>;
	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl DerefMut for Object {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

impl From<BTreeMap<String, Value>> for Object {
	fn from(v: BTreeMap<String, Value>) -> Self {
		Self(v)
	}
}

impl FromIterator<(String, Value)> for Object {
	fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
		Self(BTreeMap::from_iter(iter))
	}
}

impl IntoIterator for Object {
	type Item = (String, Value);
	type IntoIter = std::collections::btree_map::IntoIter<String, Value>;
	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl Display for Object {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str("{ ")?;
		for (i, (k, v)) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{k}: {v}")?;
		}
		f.write_str(" }")
	}
}
