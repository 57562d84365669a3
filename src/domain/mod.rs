//! The example domain: users, vouchers, rewards and companies.

mod models;
mod notify;
mod resolvers;

use std::path::Path;
use std::sync::Arc;

use docql_core::catalog::Catalog;
use docql_core::gql::{Config, GraphQLConfig, Registry};
use docql_core::kvs::{Datastore, MemStore};
use docql_core::val::Value;

use crate::err::Error;

pub use models::catalog;
pub use notify::VoucherNotifier;
pub use resolvers::bindings;

/// The GraphQL type declarations
pub const SCHEMA: &str = include_str!("schema.graphql");

/// The configuration used when none is given
pub const CONFIG: &str = include_str!("docql.toml");

/// An empty in-memory store enforcing the unique fields of the domain
pub fn store() -> MemStore {
	MemStore::with_catalog(&catalog())
}

/// Read the gateway configuration from a TOML file, or use the built-in one
pub async fn load_config(path: Option<&Path>) -> Result<GraphQLConfig, Error> {
	let text = match path {
		Some(path) => tokio::fs::read_to_string(path).await.map_err(|error| Error::Io {
			path: path.display().to_string(),
			error,
		})?,
		None => CONFIG.to_owned(),
	};
	Ok(toml::from_str(&text)?)
}

/// Build the executable schema over a datastore
pub fn registry(settings: &GraphQLConfig, ds: Arc<dyn Datastore>) -> Result<Registry, Error> {
	let config = Config::new(settings, catalog());
	Ok(Registry::build(SCHEMA, bindings(), &config, ds)?)
}

/// Load documents given as `{ "<Collection>": [documents...] }`, cast
/// through the storage models. Returns how many documents were loaded.
pub async fn seed(
	ds: &MemStore,
	catalog: &Catalog,
	data: serde_json::Value,
) -> Result<usize, Error> {
	let serde_json::Value::Object(collections) = data else {
		return Err(Error::Seed("expected an object keyed by collection".to_owned()));
	};
	let mut total = 0;
	for (tb, docs) in collections {
		let def = catalog
			.collection(&tb)
			.ok_or_else(|| Error::Seed(format!("unknown collection `{tb}`")))?;
		let serde_json::Value::Array(docs) = docs else {
			return Err(Error::Seed(format!("expected a list of documents for `{tb}`")));
		};
		let docs = docs
			.into_iter()
			.map(|doc| match Value::from(doc) {
				Value::Object(o) => def.prepare_insert(o).map_err(|e| Error::Seed(e.to_string())),
				v => {
					let found = v.kind_of();
					Err(Error::Seed(format!("expected a document in `{tb}`, found {found}")))
				}
			})
			.collect::<Result<Vec<_>, Error>>()?;
		total += ds.import(&tb, docs).await?;
		debug!("seeded `{tb}`");
	}
	Ok(total)
}
