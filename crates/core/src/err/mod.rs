use thiserror::Error;

use crate::val::RecordId;

/// An error originating from the storage layer.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
	/// The storage layer encountered unreachable logic
	#[error("The storage layer encountered unreachable logic: {0}")]
	Unreachable(String),

	/// There was a problem with the underlying datastore
	#[error("There was a problem with the underlying datastore: {0}")]
	Ds(String),

	/// A document with this identifier already exists
	#[error("Database record `{id}` already exists in `{collection}`")]
	DuplicateId {
		collection: String,
		id: RecordId,
	},

	/// A unique field of another document already holds this value
	#[error("Database index `{collection}.{field}` already contains {value}, with record `{id}`")]
	IndexExists {
		collection: String,
		field: String,
		value: String,
		id: RecordId,
	},
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, Error>;
