//! nvoi - Deploy CLI with an encrypted, validated deployment configuration.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use nvoi::cli::output;
use nvoi::cli::{execute, Cli};
use nvoi::core::constants;
use nvoi::error::{CipherError, ConfigError, CredentialError, Error};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("nvoi=debug")
        } else {
            EnvFilter::new("nvoi=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let options = cli.store_options();
    if let Err(e) = execute(cli.command, &options) {
        output::error(&e.to_string());
        if let Some(hint) = hint(&e) {
            output::error_hint(hint);
        }
        std::process::exit(1);
    }
}

/// Follow-up suggestion for errors the user can fix.
fn hint(e: &Error) -> Option<&'static str> {
    match e {
        Error::Credential(CredentialError::KeyNotFound) => {
            Some("pass --master-key, set NVOI_MASTER_KEY, or create deploy.key")
        }
        Error::Credential(CredentialError::NotInitialized(_)) => Some("run: nvoi init"),
        Error::Credential(CredentialError::AlreadyInitialized(_)) => {
            Some("run: nvoi credentials edit")
        }
        Error::Cipher(CipherError::DecryptionFailed | CipherError::TooShort { .. }) => {
            Some("check that the master key belongs to this credentials file")
        }
        Error::Config(ConfigError::Parse(_) | ConfigError::NotAMapping) | Error::Validation(_) => {
            Some("run: nvoi credentials edit")
        }
        _ => None,
    }
}
