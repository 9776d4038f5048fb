//! Constants used throughout nvoi.
//!
//! Centralizes file names, search paths and environment variable names.

/// Encrypted credentials file name.
pub const CREDENTIALS_FILE: &str = "deploy.enc";

/// Master key file name.
pub const KEY_FILE: &str = "deploy.key";

/// Subdirectory searched after the working directory.
pub const CONFIG_DIR: &str = "config";

/// Suffix appended to the credentials path while an atomic write is in flight.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Environment variable holding the hex-encoded master key.
pub const MASTER_KEY_ENV: &str = "NVOI_MASTER_KEY";

/// Environment variable overriding the credentials path.
pub const CREDENTIALS_ENV: &str = "NVOI_CREDENTIALS";

/// Environment variable controlling the log filter.
pub const LOG_ENV: &str = "NVOI_LOG";

/// Owner-only file mode for the key and credentials files.
pub const PRIVATE_MODE: u32 = 0o600;

/// Comment line written above the key entry in `.gitignore`.
pub const GITIGNORE_COMMENT: &str = "# nvoi master key (never commit)";

/// Default environment name.
pub const DEFAULT_ENVIRONMENT: &str = "production";
