use std::num::NonZeroUsize;
use std::sync::LazyLock;

pub const LOGO: &str = "
     _                  _
  __| | ___   ___  __ _| |
 / _` |/ _ \\ / __|/ _` | |
| (_| | (_) | (__| (_| | |
 \\__,_|\\___/ \\___|\\__, |_|
                     |_|
";

/// The publicly visible name of the tool
pub const PKG_NAME: &str = "docql";

/// The log target used by the command-line tool
pub const LOG: &str = "docql::cli";

/// The length of the codes generated for vouchers created without one (defaults to 6)
pub static VOUCHER_CODE_LENGTH: LazyLock<NonZeroUsize> =
	lazy_env_parse!("DOCQL_VOUCHER_CODE_LENGTH", NonZeroUsize, DEFAULT_CODE_LENGTH);

const DEFAULT_CODE_LENGTH: NonZeroUsize = NonZeroUsize::MIN.saturating_add(5);

/// How many worker threads the command-line runtime uses (defaults to the number of cores)
pub static RUNTIME_WORKER_THREADS: LazyLock<usize> =
	lazy_env_parse!("DOCQL_RUNTIME_WORKER_THREADS", usize);
