use std::io::Error as IoError;

use docql_core::gql::GqlError;
use serde_json::Error as JsonError;
use thiserror::Error;
use toml::de::Error as TomlError;

#[derive(Error, Debug)]
pub enum Error {
	#[error("{0}")]
	Gql(#[from] GqlError),

	#[error("{0}")]
	Db(#[from] docql_core::err::Error),

	#[error("Couldn't read `{path}`: {error}")]
	Io {
		path: String,
		error: IoError,
	},

	#[error("Invalid configuration: {0}")]
	Config(#[from] TomlError),

	#[error("JSON error: {0}")]
	Json(#[from] JsonError),

	#[error("Invalid seed data: {0}")]
	Seed(String),
}
