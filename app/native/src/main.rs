#![allow(clippy::multiple_crate_versions)]

//! Wallweave - command-line interface.
//!
//! Plans composites and manages the configuration file. Log output goes to
//! stderr and is controlled with `RUST_LOG` (default: `warn`).

use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    if let Err(err) = wallweave_lib::cli::run() {
        eprintln!("wallweave: {err}");
        std::process::exit(1);
    }
}
