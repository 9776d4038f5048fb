//! Encrypted credential store.
//!
//! Owns the path of `deploy.enc` and the resolved master key, and is the only
//! code that reads or writes the encrypted file. Writes go through a temp file
//! and a rename so the target is never half-written.

mod gitignore;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::cipher;
use crate::core::constants;
use crate::core::domain::{KeySource, MasterKey};
use crate::core::env::Environment;
use crate::core::fs::{self, FileSystem};
use crate::core::keys::{KeyResolver, ResolvedKey};
use crate::error::{CredentialError, Result};

pub use gitignore::update_gitignore;

/// Where to look for credentials and key.
#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    /// Base directory for relative paths and the file search.
    pub working_dir: PathBuf,
    /// Explicit credentials file (`--credentials`).
    pub credentials_path: Option<PathBuf>,
    /// Explicit key file (`--master-key`).
    pub master_key_path: Option<PathBuf>,
}

impl StoreOptions {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            ..Self::default()
        }
    }

    pub fn credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    pub fn master_key_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.master_key_path = Some(path.into());
        self
    }
}

/// Read/write access to the encrypted credentials file.
pub struct CredentialStore {
    fs: Box<dyn FileSystem>,
    working_dir: PathBuf,
    path: PathBuf,
    key: Option<ResolvedKey>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("path", &self.path)
            .field("key_source", &self.key_source())
            .finish()
    }
}

impl CredentialStore {
    /// Open the store, requiring a master key.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::KeyNotFound` when no key source yields a key,
    /// or any fatal key-resolution error.
    pub fn open(options: &StoreOptions, env: &dyn Environment) -> Result<Self> {
        Self::open_with(fs::default_backend(), options, env)
    }

    /// [`open`](Self::open) with an explicit filesystem backend.
    pub fn open_with(
        fs: Box<dyn FileSystem>,
        options: &StoreOptions,
        env: &dyn Environment,
    ) -> Result<Self> {
        let store = Self::locate_with(fs, options, env)?;
        if store.key.is_none() {
            return Err(CredentialError::KeyNotFound.into());
        }
        Ok(store)
    }

    /// Locate the store without requiring a key.
    ///
    /// Used by first-time setup and status reporting. Malformed keys are
    /// still errors; only total absence is tolerated.
    pub fn locate(options: &StoreOptions, env: &dyn Environment) -> Result<Self> {
        Self::locate_with(fs::default_backend(), options, env)
    }

    /// [`locate`](Self::locate) with an explicit filesystem backend.
    pub fn locate_with(
        fs: Box<dyn FileSystem>,
        options: &StoreOptions,
        env: &dyn Environment,
    ) -> Result<Self> {
        let working_dir = options.working_dir.clone();
        let path = Self::resolve_path(fs.as_ref(), &working_dir, options.credentials_path.as_deref());
        debug!(path = %path.display(), "credentials path");

        let explicit_key = options
            .master_key_path
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| working_dir.join(p));

        let key = KeyResolver::new(fs.as_ref(), env).try_resolve(
            &working_dir,
            &path,
            explicit_key.as_deref(),
        )?;

        if let Some(resolved) = &key {
            debug!(source = %resolved.source, "master key resolved");
        }

        Ok(Self {
            fs,
            working_dir,
            path,
            key,
        })
    }

    /// Credentials path: explicit, else the first existing of
    /// `deploy.enc` and `config/deploy.enc`, else `deploy.enc`.
    pub fn resolve_path(fs: &dyn FileSystem, working_dir: &Path, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
            return working_dir.join(path);
        }

        let primary = working_dir.join(constants::CREDENTIALS_FILE);
        let nested = working_dir
            .join(constants::CONFIG_DIR)
            .join(constants::CREDENTIALS_FILE);

        if fs.exists(&primary) {
            primary
        } else if fs.exists(&nested) {
            nested
        } else {
            primary
        }
    }

    /// Encrypted file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Key file written by [`initialize`](Self::initialize): beside the
    /// encrypted file.
    pub fn key_path(&self) -> PathBuf {
        self.path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(constants::KEY_FILE)
    }

    /// Where the loaded key came from.
    pub fn key_source(&self) -> Option<&KeySource> {
        self.key.as_ref().map(|k| &k.source)
    }

    /// The loaded key, if any.
    pub fn master_key(&self) -> Option<&MasterKey> {
        self.key.as_ref().map(|k| &k.key)
    }

    /// Whether the encrypted file exists. Never decrypts.
    pub fn exists(&self) -> bool {
        self.fs.exists(&self.path)
    }

    fn require_key(&self) -> Result<&MasterKey> {
        self.master_key()
            .ok_or_else(|| CredentialError::KeyNotLoaded.into())
    }

    /// Decrypt the credentials file.
    ///
    /// # Errors
    ///
    /// `KeyNotLoaded` without a key, `NotInitialized` when the file is
    /// missing, cipher errors when decryption fails.
    pub fn read(&self) -> Result<Vec<u8>> {
        let key = self.require_key()?;

        if !self.exists() {
            return Err(CredentialError::NotInitialized(self.path.clone()).into());
        }

        debug!(path = %self.path.display(), "reading credentials");
        let bytes = self.fs.read(&self.path)?;
        cipher::decrypt(&bytes, key)
    }

    /// Encrypt and atomically replace the credentials file.
    ///
    /// The ciphertext is written to `<path>.tmp` (mode 0600) and renamed over
    /// the target. On failure the temp file is removed and the original file
    /// is left untouched.
    pub fn write(&self, plaintext: &[u8]) -> Result<()> {
        let key = self.require_key()?;
        let envelope = cipher::encrypt(plaintext, key)?;
        let tmp = self.temp_path();

        debug!(path = %tmp.display(), bytes = envelope.len(), "writing temp file");
        if let Err(source) = self
            .fs
            .write(&tmp, &envelope, Some(constants::PRIVATE_MODE))
        {
            self.discard(&tmp);
            return Err(CredentialError::Write { path: tmp, source }.into());
        }

        if let Err(source) = self.fs.rename(&tmp, &self.path) {
            self.discard(&tmp);
            return Err(CredentialError::Write {
                path: self.path.clone(),
                source,
            }
            .into());
        }

        info!(path = %self.path.display(), "credentials saved");
        Ok(())
    }

    /// First-time setup: generate a key, write it beside the credentials
    /// file, then write `template`. If writing the template fails the new key
    /// file is deleted again.
    ///
    /// # Errors
    ///
    /// `AlreadyInitialized` when the credentials file exists,
    /// `KeyFileExists` when a key file is already present.
    pub fn initialize(&mut self, template: &[u8]) -> Result<MasterKey> {
        if self.exists() {
            return Err(CredentialError::AlreadyInitialized(self.path.clone()).into());
        }

        let key_path = self.key_path();
        if self.fs.exists(&key_path) {
            return Err(CredentialError::KeyFileExists(key_path).into());
        }

        if let Some(parent) = key_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs.create_dir_all(parent)?;
        }

        let key = MasterKey::generate();
        let line = format!("{}\n", key.to_hex().as_str());
        let line = zeroize::Zeroizing::new(line);
        self.fs
            .write(&key_path, line.as_bytes(), Some(constants::PRIVATE_MODE))
            .map_err(|source| CredentialError::Write {
                path: key_path.clone(),
                source,
            })?;
        debug!(path = %key_path.display(), "master key written");

        let previous = self.key.replace(ResolvedKey {
            key: key.clone(),
            source: KeySource::Generated(key_path.clone()),
        });

        if let Err(e) = self.write(template) {
            if let Err(rm) = self.fs.remove_file(&key_path) {
                warn!(path = %key_path.display(), error = %rm, "failed to remove orphaned key file");
            }
            self.key = previous;
            return Err(e);
        }

        info!(path = %self.path.display(), "credentials initialized");
        Ok(key)
    }

    /// Append the key file name to `.gitignore` in the working directory.
    ///
    /// Returns `true` when the file was changed.
    pub fn update_gitignore(&self) -> Result<bool> {
        update_gitignore(self.fs.as_ref(), &self.working_dir)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(constants::TEMP_SUFFIX);
        PathBuf::from(name)
    }

    fn discard(&self, tmp: &Path) {
        if self.fs.exists(tmp) {
            if let Err(e) = self.fs.remove_file(tmp) {
                warn!(path = %tmp.display(), error = %e, "failed to remove temp file");
            }
        }
    }
}
