//! Command-line interface.

pub mod check;
pub mod completions;
pub mod credentials;
pub mod init;
pub mod output;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::constants;
use crate::core::store::StoreOptions;

/// nvoi - Deploy CLI with an encrypted deployment configuration.
#[derive(Parser)]
#[command(
    name = "nvoi",
    about = "Deploy CLI with an encrypted, validated deployment configuration",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Working directory
    #[arg(long, global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Encrypted credentials file (default: deploy.enc, then config/deploy.enc)
    #[arg(long, global = true, env = constants::CREDENTIALS_ENV)]
    pub credentials: Option<PathBuf>,

    /// Master key file (takes precedence over NVOI_MASTER_KEY)
    #[arg(long, global = true)]
    pub master_key: Option<PathBuf>,
}

impl Cli {
    /// Store options from the global flags.
    pub fn store_options(&self) -> StoreOptions {
        let mut options = StoreOptions::new(&self.dir);
        if let Some(path) = &self.credentials {
            options = options.credentials_path(path);
        }
        if let Some(path) = &self.master_key {
            options = options.master_key_path(path);
        }
        options
    }
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate a master key and an encrypted credentials template
    Init {
        /// Application name (defaults to the directory name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Read and modify the encrypted credentials
    Credentials {
        #[command(subcommand)]
        action: CredentialsAction,
    },

    /// Decrypt, parse and validate the configuration
    Check {
        /// Apply a preview-branch override first
        #[arg(short, long)]
        branch: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show credentials path and key source
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Credentials subcommands.
#[derive(Subcommand)]
pub enum CredentialsAction {
    /// Print the decrypted YAML
    Show,

    /// Edit in $EDITOR, re-prompting until the result is valid
    Edit,

    /// Set one value by dot path (e.g. application.compute_provider.hetzner.api_token)
    Set {
        /// Dot-separated key path
        path: String,
        /// Value, interpreted as a YAML scalar
        value: String,
    },
}

/// Execute a command.
pub fn execute(command: Command, options: &StoreOptions) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Init { name } => init::execute(options, name),
        Credentials { action } => match action {
            CredentialsAction::Show => credentials::show(options),
            CredentialsAction::Edit => credentials::edit(options),
            CredentialsAction::Set { path, value } => credentials::set(options, &path, &value),
        },
        Check { branch, json } => check::execute(options, branch.as_deref(), json),
        Status => status::execute(options),
        Completions { shell } => completions::execute(shell),
    }
}
