//! nvoi - Deploy CLI with an encrypted, validated deployment configuration.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # First-time setup
//! │   ├── credentials   # show / edit / set
//! │   ├── check         # Decrypt, parse and validate
//! │   ├── status        # Paths and key source
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── cipher/       # AES-256-GCM envelope
//!     ├── domain/       # Master key
//!     ├── fs/           # Filesystem abstraction
//!     │   └── local     # Local disk implementation
//!     ├── env           # Environment accessor
//!     ├── keys          # Master key resolution
//!     ├── store/        # Encrypted credential store
//!     └── config/       # Parser, model, validator, adapters
//! ```
//!
//! # Features
//!
//! - AES-256-GCM encrypted `deploy.enc` with a 256-bit master key
//! - Deterministic key discovery: flag, `NVOI_MASTER_KEY`, key files
//! - Atomic writes with owner-only permissions
//! - Ordered validation of the deployment schema
//! - Database connection env derived for app services

pub mod cli;
pub mod core;
pub mod error;
