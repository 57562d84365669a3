use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Default, Debug)]
pub struct Builder {
	filter: Option<EnvFilter>,
}

pub fn builder() -> Builder {
	Builder::default()
}

impl Builder {
	/// Set the log level on the builder
	pub fn with_log_level(self, log_level: &str) -> Self {
		let filter = match log_level {
			"none" => EnvFilter::new("off"),
			"full" => EnvFilter::new("trace"),
			// Only show our own crates at the more verbose levels
			"error" | "warn" | "info" | "debug" | "trace" => {
				EnvFilter::new(format!("error,docql={log_level},docql_core={log_level}"))
			}
			// Anything else is a full filter directive
			_ => EnvFilter::builder().parse_lossy(log_level),
		};
		self.with_filter(filter)
	}

	/// Set the filter on the builder
	pub fn with_filter(mut self, filter: EnvFilter) -> Self {
		self.filter = Some(filter);
		self
	}

	/// Build a tracing dispatcher with the fmt subscriber writing to stderr
	pub fn build(self) -> Box<dyn Subscriber + Send + Sync + 'static> {
		let registry = tracing_subscriber::registry();
		let registry = registry.with(self.filter.map(|filter| {
			tracing_subscriber::fmt::layer()
				.compact()
				.with_ansi(true)
				.with_target(true)
				.with_span_events(FmtSpan::NONE)
				.with_writer(std::io::stderr)
				.with_filter(filter)
				.boxed()
		}));
		Box::new(registry)
	}

	/// Install the dispatcher globally
	pub fn init(self) {
		if self.build().try_init().is_err() {
			eprintln!("A global tracing subscriber was already installed");
		}
	}
}
