//! Sema CLI - named cross-process semaphores
//!
//! Binary name: `sema`

use std::process;

use sema::cli;

/// Exit code for errors (invalid name, missing semaphore, OS failures).
const EXIT_ERROR: i32 = 2;

fn main() {
    // Initialize tracing subscriber for logging

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli::build_cli().get_matches();

    match cli::handlers::dispatch(&matches) {
        Ok(code) => {
            #[allow(clippy::exit)]
            process::exit(code);
        }
        Err(err) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Error: {err:#}");
            }
            #[allow(clippy::exit)]
            process::exit(EXIT_ERROR);
        }
    }
}
