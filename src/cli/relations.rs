use std::sync::Arc;

use anyhow::Result;
use docql_core::gql::GraphQLConfig;

use crate::domain;

pub fn init(config: &GraphQLConfig) -> Result<()> {
	let registry = domain::registry(config, Arc::new(domain::store()))?;
	for relation in registry.relations() {
		println!("{relation}");
	}
	Ok(())
}
