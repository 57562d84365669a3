/// Creates a new lazily-initialised static, read from an environment
/// variable and parsed into the given type, falling back to a default.
macro_rules! lazy_env_parse {
	// With no default specified
	($key:expr, $t:ty) => {
		std::sync::LazyLock::new(|| {
			std::env::var($key).ok().and_then(|s| s.parse::<$t>().ok()).unwrap_or_default()
		})
	};
	// With a static expression for the default value
	($key:expr, $t:ty, $default:expr) => {
		std::sync::LazyLock::new(|| {
			std::env::var($key).ok().and_then(|s| s.parse::<$t>().ok()).unwrap_or($default)
		})
	};
}
