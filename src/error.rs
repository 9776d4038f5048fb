//! Error types.
//!
//! Each subsystem owns its error enum; [`Error`] folds them together so the
//! CLI can match on the kind and print a hint.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::constants;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Crypto primitive failures.
///
/// Wrong key, truncated ciphertext and tampered ciphertext all surface as
/// [`CipherError::DecryptionFailed`].
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("invalid master key: {0}")]
    InvalidKey(String),

    #[error("encrypted data too short: {len} bytes (minimum {min})")]
    TooShort { len: usize, min: usize },

    #[error("decryption failed: wrong key or corrupted data")]
    DecryptionFailed,

    #[error("encryption failed")]
    EncryptionFailed,
}

/// Credential store and key resolution failures.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error(
        "master key not found: set {} or create {}",
        constants::MASTER_KEY_ENV,
        constants::KEY_FILE
    )]
    KeyNotFound,

    #[error("master key not loaded")]
    KeyNotLoaded,

    #[error("failed to read master key from {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("key file already exists: {0}")]
    KeyFileExists(PathBuf),

    #[error("credentials already initialized: {0}")]
    AlreadyInitialized(PathBuf),

    #[error("credentials not found: {0}")]
    NotInitialized(PathBuf),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// YAML decode and document editing failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid YAML: {0}")]
    Parse(#[source] serde_yaml_ng::Error),

    #[error("configuration root must be a mapping")]
    NotAMapping,

    #[error("failed to serialize YAML: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    #[error("decrypted configuration is not valid UTF-8")]
    NotUtf8,

    #[error("invalid key path '{0}'")]
    InvalidPath(String),

    #[error("cannot set '{path}': '{segment}' is not a mapping")]
    PathConflict { path: String, segment: String },
}

/// A violated configuration rule.
///
/// Every variant names the field, entity or reference at fault.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: String },

    #[error("compute_provider must define one of hetzner, aws or scaleway")]
    NoComputeProvider,

    #[error("compute_provider must define exactly one provider, found: {}", .found.join(", "))]
    MultipleComputeProviders { found: Vec<String> },

    #[error("servers must be defined when deploying services")]
    NoServers,

    #[error("{entity} references undefined server '{server}'")]
    UnknownServer { entity: String, server: String },

    #[error("one server must be marked master when {count} servers are defined")]
    NoMasterServer { count: usize },

    #[error("only one server can be marked master, found: {}", .servers.join(", "))]
    MultipleMasterServers { servers: Vec<String> },

    #[error("servers.{server}.count must be at least 1")]
    InvalidServerCount { server: String },

    #[error("database.secrets.{key} is required for the {adapter} adapter")]
    MissingDatabaseSecret { adapter: String, key: String },

    #[error("unsupported database adapter '{0}'")]
    UnsupportedAdapter(String),

    #[error("app.{first} and app.{second} both resolve to {hostname}")]
    DuplicateHostname {
        first: String,
        second: String,
        hostname: String,
    },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::MissingField`].
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
