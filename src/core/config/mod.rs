//! Deployment configuration.
//!
//! Decrypted YAML goes through one pipeline:
//!
//! ```text
//! bytes -> parse -> validate -> [branch override -> validate] -> inject database env
//! ```
//!
//! Parsing failures are [`ConfigError`]s, rule violations are
//! [`ValidationError`]s; callers can tell them apart.

mod de;

pub mod branch;
pub mod database;
pub mod document;
pub mod inject;
pub mod model;
pub mod provider;
pub mod validate;

pub use branch::{apply_branch_override, sanitize_branch};
pub use database::{ConnectionInfo, DatabaseAdapter};
pub use inject::inject_database_env;
pub use model::{Application, Document};
pub use provider::ComputeProvider;
pub use validate::validate;

use serde_yaml_ng::Value;
use tracing::debug;

use crate::error::{ConfigError, Result, ValidationError};

/// A parsed configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    document: Document,
}

impl Configuration {
    /// Decode YAML bytes. Does not validate.
    ///
    /// # Errors
    ///
    /// `ConfigError::Parse` for malformed YAML, `ConfigError::NotAMapping`
    /// when the root is a scalar or sequence.
    pub fn parse(bytes: &[u8]) -> std::result::Result<Self, ConfigError> {
        let value = document::decode(bytes)?;
        let value = match value {
            Value::Null => Value::Mapping(Default::default()),
            Value::Mapping(_) => value,
            _ => return Err(ConfigError::NotAMapping),
        };
        let document: Document = serde_yaml_ng::from_value(value).map_err(ConfigError::Parse)?;
        Ok(Self { document })
    }

    /// Parse and validate, then inject derived database env.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        Self::load_for_branch(bytes, None)
    }

    /// Like [`Configuration::load`], applying a branch override when one is
    /// given. The tree is validated as written and again after the override,
    /// since prefixed hostnames must stay unique too.
    pub fn load_for_branch(bytes: &[u8], branch: Option<&str>) -> Result<Self> {
        let mut config = Self::parse(bytes)?;
        if let Some(e) = config.validate() {
            return Err(e.into());
        }
        if let Some(branch) = branch {
            config = config.with_branch(branch);
            if let Some(e) = config.validate() {
                return Err(e.into());
            }
        }
        let config = config.with_database_env();
        debug!(app = %config.application().name, "configuration loaded");
        Ok(config)
    }

    /// Run every rule; `None` means valid.
    pub fn validate(&self) -> Option<ValidationError> {
        validate::validate(self.application())
    }

    /// Copy with the branch prefix applied.
    pub fn with_branch(&self, branch: &str) -> Self {
        Self::from(apply_branch_override(self.application(), branch))
    }

    /// Copy with database connection env merged into app services.
    pub fn with_database_env(&self) -> Self {
        Self::from(inject_database_env(self.application()))
    }

    pub fn application(&self) -> &Application {
        &self.document.application
    }

    /// The compute provider, when exactly one is configured.
    pub fn compute_provider(&self) -> Option<ComputeProvider<'_>> {
        self.application().compute_provider.selected()
    }

    /// The database adapter, when a supported one is configured.
    pub fn database_adapter(&self) -> Option<DatabaseAdapter> {
        self.application()
            .database
            .as_ref()
            .and_then(|db| DatabaseAdapter::from_name(&db.adapter))
    }

    /// Resolved database connection settings.
    pub fn database_connection(&self) -> Option<(DatabaseAdapter, ConnectionInfo)> {
        inject::connection_info(self.application())
    }

    /// Serialize the tree back to YAML.
    pub fn to_yaml(&self) -> std::result::Result<String, ConfigError> {
        serde_yaml_ng::to_string(&self.document).map_err(ConfigError::Serialize)
    }
}

impl From<Application> for Configuration {
    fn from(application: Application) -> Self {
        Self {
            document: Document { application },
        }
    }
}

/// Starting document written by `init`.
pub fn template(name: &str) -> String {
    format!(
        r#"application:
  name: {name}
  environment: production

  domain_provider:
    cloudflare:
      api_token: ""
      account_id: ""

  compute_provider:
    hetzner:
      api_token: ""
      server_type: cx22
      server_location: fsn1

  servers:
    master:
      master: true
      type: cx22
      location: fsn1

  app: {{}}
  services: {{}}
  env: {{}}
  secrets: {{}}

  ssh_keys:
    private_key: ""
    public_key: ""
"#,
        name = serde_yaml_ng::to_string(name)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{:?}", name))
    )
}
