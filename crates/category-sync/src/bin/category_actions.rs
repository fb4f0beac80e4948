//! `category-actions`: print the update actions for a category delta.
//!
//! Usage:
//!   category-actions ['<sync-config-json>'] < request.json
//!
//! The request `{"delta": …, "old": …, "new": …}` is read from stdin.
//! Set `RUST_LOG=debug` to see why fields were skipped.

use std::io::{self, Read, Write};

use category_sync::cli::build_actions_json;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = std::env::args().nth(1);

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match build_actions_json(buf.trim(), config.as_deref()) {
        Ok(result) => {
            let mut stdout = io::stdout();
            if let Err(e) = stdout.write_all(result.as_bytes()).and_then(|_| stdout.write_all(b"\n")) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
