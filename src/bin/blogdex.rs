//! blogdex CLI - index and search blog content from the command line
//!
//! # Examples
//!
//! ```bash
//! # Index entities exported as JSON
//! blogdex index --owner my-blog --file entries.json
//!
//! # Search
//! blogdex search "tantivy AND segments" --owner my-blog
//!
//! # Rebuild from scratch
//! blogdex rebuild --owner my-blog --file entries.json
//! ```
//!
//! Logs go to stderr. Set `RUST_LOG` to change verbosity and
//! `BLOGDEX_LOG_FORMAT=json` for structured logs.

use blogdex::cli::{output::print_error, run, Cli};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "blogdex=warn".into());
    let json = std::env::var("BLOGDEX_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
