use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::gql::naming::Naming;

/// Per-model settings.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
	/// The collection name, when plain pluralisation does not fit
	pub plural: Option<String>,
}

/// What to do with query arguments naming undeclared fields.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKeys {
	/// Treat them as equality filters like any other key
	#[default]
	Pass,
	/// Fail the request with a validation error
	Reject,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArgumentsConfig {
	pub unknown_keys: UnknownKeys,
}

/// The gateway settings, as written in a configuration file.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphQLConfig {
	pub models: BTreeMap<String, ModelConfig>,
	pub arguments: ArgumentsConfig,
}

impl GraphQLConfig {
	pub fn naming(&self) -> Naming {
		self.models.iter().fold(Naming::new(), |naming, (ty, model)| match &model.plural {
			Some(plural) => naming.with_plural(ty, plural),
			None => naming,
		})
	}
}

/// Everything the resolver generation needs, fixed once at startup.
#[derive(Clone, Debug, Default)]
pub struct Config {
	pub naming: Naming,
	pub catalog: Catalog,
	pub unknown_keys: UnknownKeys,
}

impl Config {
	pub fn new(settings: &GraphQLConfig, catalog: Catalog) -> Self {
		Self {
			naming: settings.naming(),
			catalog,
			unknown_keys: settings.arguments.unknown_keys,
		}
	}
}
