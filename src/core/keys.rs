//! Master key resolution.
//!
//! Sources are tried in a fixed order and the first hit wins:
//!
//! 1. explicit `--master-key` path (errors are fatal, no fallback)
//! 2. `NVOI_MASTER_KEY`
//! 3. `deploy.key` beside the credentials file, then in the working
//!    directory, then in `config/`

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::constants;
use crate::core::domain::{KeySource, MasterKey};
use crate::core::env::Environment;
use crate::core::fs::FileSystem;
use crate::error::{CredentialError, Result};

/// A key together with where it was found.
#[derive(Debug, Clone)]
pub struct ResolvedKey {
    pub key: MasterKey,
    pub source: KeySource,
}

/// Resolves the master key from flag, environment or key files.
pub struct KeyResolver<'a> {
    fs: &'a dyn FileSystem,
    env: &'a dyn Environment,
}

impl<'a> KeyResolver<'a> {
    pub fn new(fs: &'a dyn FileSystem, env: &'a dyn Environment) -> Self {
        Self { fs, env }
    }

    /// Key-file search order for a given credentials path.
    pub fn candidates(working_dir: &Path, credentials_path: &Path) -> Vec<PathBuf> {
        let beside = credentials_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(constants::KEY_FILE);

        vec![
            beside,
            working_dir.join(constants::KEY_FILE),
            working_dir
                .join(constants::CONFIG_DIR)
                .join(constants::KEY_FILE),
        ]
    }

    /// Resolve the key, failing with `CredentialError::KeyNotFound` when no
    /// source yields one.
    ///
    /// # Errors
    ///
    /// An unreadable or malformed explicit key file, a malformed
    /// `NVOI_MASTER_KEY`, or a malformed discovered key file is fatal.
    pub fn resolve(
        &self,
        working_dir: &Path,
        credentials_path: &Path,
        explicit: Option<&Path>,
    ) -> Result<ResolvedKey> {
        self.try_resolve(working_dir, credentials_path, explicit)?
            .ok_or_else(|| CredentialError::KeyNotFound.into())
    }

    /// Like [`resolve`](Self::resolve) but reports "no key anywhere" as `None`.
    pub fn try_resolve(
        &self,
        working_dir: &Path,
        credentials_path: &Path,
        explicit: Option<&Path>,
    ) -> Result<Option<ResolvedKey>> {
        if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
            debug!(path = %path.display(), "using explicit master key path");
            let key = self.read_key_file(path)?;
            return Ok(Some(ResolvedKey {
                key,
                source: KeySource::Flag(path.to_path_buf()),
            }));
        }

        if let Some(value) = self.env.non_empty(constants::MASTER_KEY_ENV) {
            debug!(var = constants::MASTER_KEY_ENV, "using master key from environment");
            let value = Zeroizing::new(value);
            let key = MasterKey::from_hex(value.trim())?;
            return Ok(Some(ResolvedKey {
                key,
                source: KeySource::Env,
            }));
        }

        for candidate in Self::candidates(working_dir, credentials_path) {
            if !self.fs.exists(&candidate) {
                continue;
            }
            debug!(path = %candidate.display(), "found master key file");
            let key = self.read_key_file(&candidate)?;
            return Ok(Some(ResolvedKey {
                key,
                source: KeySource::File(candidate),
            }));
        }

        debug!("no master key found");
        Ok(None)
    }

    /// Read, trim and validate a key file.
    pub fn read_key_file(&self, path: &Path) -> Result<MasterKey> {
        let raw = Zeroizing::new(self.fs.read(path).map_err(|source| {
            CredentialError::KeyRead {
                path: path.to_path_buf(),
                source,
            }
        })?);

        if let Some(mode) = self.fs.mode(path) {
            if mode != constants::PRIVATE_MODE {
                warn!(
                    path = %path.display(),
                    mode = %format!("{:o}", mode),
                    "insecure key file permissions"
                );
            }
        }

        let text = String::from_utf8_lossy(&raw);
        let text = Zeroizing::new(text.trim().to_string());
        MasterKey::from_hex(&text)
    }
}
