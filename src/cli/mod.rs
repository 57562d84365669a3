mod query;
mod relations;
mod schema;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::cnf::{LOGO, PKG_NAME, RUNTIME_WORKER_THREADS};
use crate::domain;
use crate::telemetry;
use query::QueryCommandArguments;

const INFO: &str = "
To get started with docql, run a query against the example domain:

    docql query '{ vouchers(voucher: { points_lte: 10 }) { code reward { name } } }' --seed seed.json

Print the generated schema with `docql schema`, and the resolved relations with
`docql relations`.
";

#[derive(Parser, Debug)]
#[command(name = "docql command-line interface", bin_name = PKG_NAME)]
#[command(about = INFO, before_help = LOGO)]
#[command(version, arg_required_else_help = true)]
struct Cli {
	#[arg(help = "The logging level for the command-line tool")]
	#[arg(env = "DOCQL_LOG", short = 'l', long = "log")]
	#[arg(default_value = "info", global = true)]
	log: String,
	#[arg(help = "Path to the gateway configuration file")]
	#[arg(env = "DOCQL_CONFIG", short = 'c', long = "config", global = true)]
	config: Option<PathBuf>,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
	#[command(about = "Execute a GraphQL request against an in-memory store")]
	Query(QueryCommandArguments),
	#[command(about = "Print the generated GraphQL schema")]
	Schema,
	#[command(about = "Print how every relation field is resolved")]
	Relations,
}

pub fn init() -> ExitCode {
	let args = Cli::parse();
	// Initialize logging
	telemetry::builder().with_log_level(&args.log).init();
	// Start the runtime
	let mut builder = tokio::runtime::Builder::new_multi_thread();
	if *RUNTIME_WORKER_THREADS > 0 {
		builder.worker_threads(*RUNTIME_WORKER_THREADS);
	}
	let runtime = match builder.enable_all().build() {
		Ok(runtime) => runtime,
		Err(e) => {
			error!("Failed to start the runtime: {e}");
			return ExitCode::FAILURE;
		}
	};
	let output: anyhow::Result<()> = runtime.block_on(async {
		let config = domain::load_config(args.config.as_deref()).await?;
		match args.command {
			Commands::Query(cmd) => query::init(&config, cmd).await,
			Commands::Schema => schema::init(&config),
			Commands::Relations => relations::init(&config),
		}
	});
	if let Err(e) = output {
		error!("{e}");
		ExitCode::FAILURE
	} else {
		ExitCode::SUCCESS
	}
}
