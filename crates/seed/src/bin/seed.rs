//! Seeds the default users and prints the users table.
//!
//! Run with:
//! ```
//! DATABASE_URL=postgres://... cargo run -p seed --bin seed
//! ```

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn init_logging() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("{e}");
    }

    let result = seed::run_from_env(&mut std::io::stdout()).await;
    ExitCode::from(seed::exit_status(&result))
}
