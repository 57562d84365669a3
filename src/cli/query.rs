use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use async_graphql::{Request, Variables};
use clap::Args;
use docql_core::gql::GraphQLConfig;

use crate::cnf::LOG;
use crate::domain;

#[derive(Args, Debug)]
pub struct QueryCommandArguments {
	#[arg(help = "The GraphQL request to execute")]
	#[arg(index = 1)]
	document: String,
	#[arg(help = "Variables for the request, as a JSON object")]
	#[arg(long = "variables")]
	variables: Option<String>,
	#[arg(help = "Path to a JSON file of documents to load before executing the request")]
	#[arg(env = "DOCQL_SEED", short = 's', long = "seed")]
	seed: Option<PathBuf>,
}

pub async fn init(config: &GraphQLConfig, args: QueryCommandArguments) -> Result<()> {
	let QueryCommandArguments {
		document,
		variables,
		seed,
	} = args;

	let ds = Arc::new(domain::store());
	if let Some(path) = seed {
		let text = tokio::fs::read_to_string(&path)
			.await
			.with_context(|| format!("Couldn't read seed file '{}'", path.display()))?;
		let data = serde_json::from_str(&text).context("Seed file is not valid JSON")?;
		let count = domain::seed(&ds, &domain::catalog(), data).await?;
		info!(target: LOG, "Loaded {count} documents from '{}'", path.display());
	}

	let registry = domain::registry(config, ds)?;

	let mut request = Request::new(document);
	if let Some(vars) = variables {
		let vars = serde_json::from_str(&vars).context("Variables are not valid JSON")?;
		request = request.variables(Variables::from_json(vars));
	}

	let response = registry.execute(request).await;
	println!("{}", serde_json::to_string_pretty(&response)?);
	if !response.errors.is_empty() {
		bail!("The request completed with {} error(s)", response.errors.len());
	}
	Ok(())
}
