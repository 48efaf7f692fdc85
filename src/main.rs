use clap::Parser;
use tracing_subscriber::EnvFilter;
use vault_extract::cli::Cli;

fn main() {
    // Diagnostics go to stderr so stdout stays safe for `eval "$(vault-extract --env ...)"`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = vault_extract::cli::commands::extract::run(&cli) {
        tracing::debug!(error = ?e, "extract failed");
        vault_extract::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
