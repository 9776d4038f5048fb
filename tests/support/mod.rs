//! Test support utilities for nvoi integration tests.
//!
//! Provides an isolated working directory and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use nvoi::core::env::MapEnv;
use nvoi::core::store::{CredentialStore, StoreOptions};
use tempfile::TempDir;

/// Test environment with an isolated temp working directory.
///
/// Child processes run with `.current_dir()` and a scrubbed environment, so
/// tests can safely run in parallel.
pub struct Test {
    /// Temporary working directory
    pub dir: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Create a test environment with `nvoi init` already run.
    pub fn init(name: &str) -> Self {
        let t = Self::new();
        let output = t.init_cmd(name);
        assert!(
            output.status.success(),
            "Failed to initialize: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Initialized environment whose credentials hold `yaml`.
    pub fn with_config(yaml: &str) -> Self {
        let t = Self::init("fixture");
        t.store().write(yaml.as_bytes()).expect("failed to seed credentials");
        t
    }

    /// Path inside the working directory.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Library-level store over the working directory, key auto-discovered.
    pub fn store(&self) -> CredentialStore {
        CredentialStore::open(&StoreOptions::new(self.dir.path()), &MapEnv::new())
            .expect("failed to open store")
    }

    /// Decrypted credentials as text.
    pub fn plaintext(&self) -> String {
        String::from_utf8(self.store().read().expect("failed to read credentials"))
            .expect("credentials are not UTF-8")
    }

    /// Contents of the generated key file.
    pub fn key_hex(&self) -> String {
        std::fs::read_to_string(self.path("deploy.key"))
            .expect("failed to read deploy.key")
            .trim()
            .to_string()
    }
}
