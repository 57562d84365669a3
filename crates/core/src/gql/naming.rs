use std::collections::BTreeMap;

use crate::cnf::PLURAL_SUFFIX;

/// Maps GraphQL type names to the collections storing them.
#[derive(Clone, Debug, Default)]
pub struct Naming {
	overrides: BTreeMap<String, String>,
}

impl Naming {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register an explicit plural for a type
	pub fn with_plural(mut self, ty: impl Into<String>, plural: impl Into<String>) -> Self {
		self.overrides.insert(ty.into(), plural.into());
		self
	}

	/// The collection storing documents of the given type: the registered
	/// plural if there is one, else the type name suffixed with `s`
	pub fn collection_name_for(&self, ty: &str) -> String {
		match self.overrides.get(ty) {
			Some(plural) => plural.clone(),
			None => format!("{ty}{PLURAL_SUFFIX}"),
		}
	}
}

/// Lower-case the first character of a type name, e.g. `Voucher` to `voucher`
pub fn lower_first(ty: &str) -> String {
	let mut chars = ty.chars();
	match chars.next() {
		Some(c) => c.to_lowercase().chain(chars).collect(),
		None => String::new(),
	}
}
