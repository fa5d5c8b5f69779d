use clap::Parser;
use tracing_subscriber::EnvFilter;

use clout_cli::{cli, config::CliConfig, format::print_error};

fn main() {
    let cli = cli::Cli::parse();

    let config = match CliConfig::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            print_error(&e.to_string(), e.hint());
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the config file's level. Logs go to stderr so
    // stdout stays clean for JSON output and the remote-signer protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");
    let result = rt.block_on(cli::run(cli, config));
    // The stdin reader of a remote signer may still be blocked; don't wait for it.
    rt.shutdown_background();

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        print_error(&e.to_string(), e.hint());
        std::process::exit(1);
    }
}
