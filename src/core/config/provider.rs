//! Compute provider selection.
//!
//! The YAML section holds up to three optional blocks; the rest of the
//! system works with a [`ComputeProvider`] borrowed from whichever one is set.

use super::model::{AwsConfig, ComputeProviders, HetznerConfig, ScalewayConfig};

/// The configured cloud provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComputeProvider<'a> {
    Hetzner(&'a HetznerConfig),
    Aws(&'a AwsConfig),
    Scaleway(&'a ScalewayConfig),
}

impl ComputeProvider<'_> {
    /// Provider key as written in YAML.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hetzner(_) => "hetzner",
            Self::Aws(_) => "aws",
            Self::Scaleway(_) => "scaleway",
        }
    }

    /// First required field left empty, as `compute_provider.<name>.<field>`.
    pub fn missing_field(&self) -> Option<String> {
        let required: Vec<(&str, &str)> = match self {
            Self::Hetzner(c) => vec![
                ("api_token", c.api_token.as_str()),
                ("server_type", c.server_type.as_str()),
                ("server_location", c.server_location.as_str()),
            ],
            Self::Aws(c) => vec![
                ("access_key_id", c.access_key_id.as_str()),
                ("secret_access_key", c.secret_access_key.as_str()),
                ("region", c.region.as_str()),
                ("instance_type", c.instance_type.as_str()),
            ],
            Self::Scaleway(c) => vec![
                ("secret_key", c.secret_key.as_str()),
                ("project_id", c.project_id.as_str()),
                ("server_type", c.server_type.as_str()),
            ],
        };

        required
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| format!("compute_provider.{}.{}", self.name(), field))
    }
}

impl ComputeProviders {
    /// Every block present, in a fixed order.
    pub fn configured(&self) -> Vec<ComputeProvider<'_>> {
        let mut found = Vec::new();
        if let Some(c) = &self.hetzner {
            found.push(ComputeProvider::Hetzner(c));
        }
        if let Some(c) = &self.aws {
            found.push(ComputeProvider::Aws(c));
        }
        if let Some(c) = &self.scaleway {
            found.push(ComputeProvider::Scaleway(c));
        }
        found
    }

    /// The provider when exactly one block is present.
    pub fn selected(&self) -> Option<ComputeProvider<'_>> {
        match self.configured().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}
