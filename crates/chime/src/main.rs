//! Entry point for the `chime` binary.
//!
//! Reads one request envelope from stdin and writes the response envelope to
//! stdout. Configuration comes from `CHIME_*` variables, an optional file and
//! command-line flags.

use std::io::{self, Write};
use std::process::ExitCode;

use chime::{SystemConfigLoader, bootstrap_with};

fn main() -> ExitCode {
    let runtime = match bootstrap_with(&SystemConfigLoader) {
        Ok(runtime) => runtime,
        Err(error) => {
            let mut stderr = io::stderr().lock();
            if writeln!(stderr, "chime: {error}").is_err() {
                return ExitCode::from(2);
            }
            return ExitCode::FAILURE;
        }
    };
    runtime.run(io::stdin().lock(), io::stdout().lock())
}
