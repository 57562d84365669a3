use thiserror::Error;

use crate::catalog::{CastError, Kind};
use crate::val::RecordId;

#[derive(Debug, Error)]
pub enum GqlError {
	#[error("Database error: {0}")]
	DbError(crate::err::Error),
	#[error("No document `{id}` found in `{collection}`")]
	NotFound {
		collection: String,
		id: RecordId,
	},
	#[error("Invalid input: {0}")]
	ValidationError(String),
	#[error("Error generating schema: {0}")]
	SchemaError(String),
	#[error("Internal Error: {0}")]
	InternalError(String),
	#[error("Error converting value: {val} to type: {target}")]
	TypeError {
		target: Kind,
		val: async_graphql::Value,
	},
}

pub fn schema_error(msg: impl Into<String>) -> GqlError {
	GqlError::SchemaError(msg.into())
}

pub fn validation_error(msg: impl Into<String>) -> GqlError {
	GqlError::ValidationError(msg.into())
}

pub fn internal_error(msg: impl Into<String>) -> GqlError {
	let msg = msg.into();
	error!("{}", msg);
	GqlError::InternalError(msg)
}

pub fn type_error(kind: Kind, val: &async_graphql::Value) -> GqlError {
	GqlError::TypeError {
		target: kind,
		val: val.to_owned(),
	}
}

impl From<crate::err::Error> for GqlError {
	fn from(value: crate::err::Error) -> Self {
		GqlError::DbError(value)
	}
}

impl From<CastError> for GqlError {
	fn from(value: CastError) -> Self {
		GqlError::ValidationError(value.to_string())
	}
}
