//! Storage model definitions.
//!
//! A [`Catalog`] declares, for every collection, the fields documents are
//! expected to carry and the kind of each. It is used to cast incoming
//! values to their stored representation, to fill defaults on insert, and
//! to check naming conventions against declared fields when relation
//! descriptors are built.

mod collection;
mod kind;

use std::collections::BTreeMap;

use thiserror::Error;

pub use collection::{CollectionDef, FieldDef, FieldDefault};
pub use kind::Kind;

/// A value could not be cast to the kind declared for its field.
#[derive(Debug, Error)]
#[error("Expected `{field}` to be {expected}, found {found}")]
pub struct CastError {
	pub field: String,
	pub expected: String,
	pub found: String,
}

/// The immutable set of collection definitions known to the gateway.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
	collections: BTreeMap<String, CollectionDef>,
}

impl Catalog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a collection definition
	pub fn with(mut self, def: CollectionDef) -> Self {
		self.collections.insert(def.name.clone(), def);
		self
	}

	/// Fetch the definition of a collection by name
	pub fn collection(&self, name: &str) -> Option<&CollectionDef> {
		self.collections.get(name)
	}

	pub fn iter(&self) -> impl Iterator<Item = &CollectionDef> {
		self.collections.values()
	}
}
