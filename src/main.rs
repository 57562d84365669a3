use std::process::ExitCode;

fn main() -> ExitCode {
	docql::cli::init() // Initiate the command line
}
