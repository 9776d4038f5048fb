//! Configuration tree.
//!
//! Immutable value records produced once by the parser. Every optional field
//! has an explicit default: maps and lists are empty, strings are empty,
//! `environment` is `production`, `count` is 1, `master` is false.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::de;
use crate::core::constants;
use crate::core::types::{EnvMap, ServerName, ServiceName};

/// Document root: everything lives under `application:`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(deserialize_with = "de::null_default")]
    pub application: Application,
}

/// The application being deployed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    #[serde(deserialize_with = "de::string")]
    pub name: String,
    #[serde(deserialize_with = "de::string")]
    pub environment: String,
    #[serde(deserialize_with = "de::null_default")]
    pub domain_provider: DomainProvider,
    #[serde(deserialize_with = "de::null_default")]
    pub compute_provider: ComputeProviders,
    #[serde(deserialize_with = "de::null_default")]
    pub servers: BTreeMap<ServerName, ServerSpec>,
    #[serde(deserialize_with = "de::null_default")]
    pub app: BTreeMap<ServiceName, AppService>,
    pub database: Option<DatabaseSpec>,
    #[serde(deserialize_with = "de::null_default")]
    pub services: BTreeMap<ServiceName, ServiceSpec>,
    #[serde(deserialize_with = "de::string_map")]
    pub env: EnvMap,
    #[serde(deserialize_with = "de::string_map")]
    pub secrets: EnvMap,
    pub ssh_keys: Option<SshKeys>,
}

impl Default for Application {
    fn default() -> Self {
        Self {
            name: String::new(),
            environment: constants::DEFAULT_ENVIRONMENT.to_string(),
            domain_provider: DomainProvider::default(),
            compute_provider: ComputeProviders::default(),
            servers: BTreeMap::new(),
            app: BTreeMap::new(),
            database: None,
            services: BTreeMap::new(),
            env: EnvMap::new(),
            secrets: EnvMap::new(),
            ssh_keys: None,
        }
    }
}

impl Application {
    /// The server marked `master`, if exactly one is.
    pub fn master_server(&self) -> Option<(&ServerName, &ServerSpec)> {
        let mut masters = self.servers.iter().filter(|(_, s)| s.master);
        match (masters.next(), masters.next()) {
            (Some(master), None) => Some(master),
            _ => None,
        }
    }

    /// Names of servers marked `master`, in map order.
    pub fn master_servers(&self) -> Vec<&ServerName> {
        self.servers
            .iter()
            .filter(|(_, s)| s.master)
            .map(|(name, _)| name)
            .collect()
    }

    /// Whether anything needs to be scheduled on servers.
    pub fn has_workloads(&self) -> bool {
        !self.app.is_empty() || self.database.is_some() || !self.services.is_empty()
    }
}

/// DNS provider credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainProvider {
    pub cloudflare: Option<Cloudflare>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cloudflare {
    #[serde(deserialize_with = "de::string")]
    pub api_token: String,
    #[serde(deserialize_with = "de::string")]
    pub account_id: String,
}

/// Raw compute provider section. Exactly one block must be present; see
/// `ComputeProviders::selected`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputeProviders {
    pub hetzner: Option<HetznerConfig>,
    pub aws: Option<AwsConfig>,
    pub scaleway: Option<ScalewayConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HetznerConfig {
    #[serde(deserialize_with = "de::string")]
    pub api_token: String,
    #[serde(deserialize_with = "de::string")]
    pub server_type: String,
    #[serde(deserialize_with = "de::string")]
    pub server_location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    #[serde(deserialize_with = "de::string")]
    pub access_key_id: String,
    #[serde(deserialize_with = "de::string")]
    pub secret_access_key: String,
    #[serde(deserialize_with = "de::string")]
    pub region: String,
    #[serde(deserialize_with = "de::string")]
    pub instance_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalewayConfig {
    #[serde(deserialize_with = "de::string")]
    pub secret_key: String,
    #[serde(deserialize_with = "de::string")]
    pub project_id: String,
    #[serde(deserialize_with = "de::string")]
    pub zone: String,
    #[serde(deserialize_with = "de::string")]
    pub server_type: String,
}

impl Default for ScalewayConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            project_id: String::new(),
            zone: "fr-par-1".to_string(),
            server_type: String::new(),
        }
    }
}

/// A group of identical servers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSpec {
    pub master: bool,
    #[serde(rename = "type", deserialize_with = "de::string")]
    pub server_type: String,
    #[serde(deserialize_with = "de::string")]
    pub location: String,
    #[serde(deserialize_with = "de::count")]
    pub count: u32,
    #[serde(deserialize_with = "de::null_default")]
    pub volumes: BTreeMap<String, VolumeSpec>,
}

impl Default for ServerSpec {
    fn default() -> Self {
        Self {
            master: false,
            server_type: String::new(),
            location: String::new(),
            count: 1,
            volumes: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeSpec {
    /// Size in GB.
    pub size: u32,
}

impl Default for VolumeSpec {
    fn default() -> Self {
        Self { size: 10 }
    }
}

/// A user application process, optionally routed under a hostname.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppService {
    #[serde(deserialize_with = "de::string_list")]
    pub servers: Vec<ServerName>,
    #[serde(deserialize_with = "de::string")]
    pub domain: String,
    #[serde(deserialize_with = "de::string")]
    pub subdomain: String,
    pub port: Option<u16>,
    pub healthcheck: Option<Healthcheck>,
    #[serde(deserialize_with = "de::string")]
    pub command: String,
    #[serde(deserialize_with = "de::string")]
    pub pre_run_command: String,
    #[serde(deserialize_with = "de::string_map")]
    pub env: EnvMap,
    #[serde(deserialize_with = "de::string_map")]
    pub mounts: BTreeMap<String, String>,
}

impl AppService {
    /// Fully-qualified hostname, or `None` when the service has no domain.
    ///
    /// An empty or `@` subdomain means the bare domain.
    pub fn hostname(&self) -> Option<String> {
        let domain = self.domain.trim().trim_end_matches('.');
        if domain.is_empty() {
            return None;
        }

        let subdomain = self.subdomain.trim();
        let host = if subdomain.is_empty() || subdomain == "@" {
            domain.to_string()
        } else {
            format!("{}.{}", subdomain, domain)
        };
        Some(host.to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Healthcheck {
    #[serde(rename = "type", deserialize_with = "de::string")]
    pub kind: String,
    #[serde(deserialize_with = "de::string")]
    pub path: String,
    pub port: Option<u16>,
    /// Seconds between probes.
    pub interval: u32,
    /// Seconds before a probe counts as failed.
    pub timeout: u32,
    pub retries: u32,
}

impl Default for Healthcheck {
    fn default() -> Self {
        Self {
            kind: "http".to_string(),
            path: "/".to_string(),
            port: None,
            interval: 10,
            timeout: 5,
            retries: 3,
        }
    }
}

/// Database section; `adapter` picks a [`DatabaseAdapter`](super::DatabaseAdapter).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSpec {
    #[serde(deserialize_with = "de::string_list")]
    pub servers: Vec<ServerName>,
    #[serde(deserialize_with = "de::string")]
    pub adapter: String,
    #[serde(deserialize_with = "de::string")]
    pub url: String,
    #[serde(deserialize_with = "de::string_map")]
    pub secrets: EnvMap,
    #[serde(deserialize_with = "de::string_map")]
    pub mount: BTreeMap<String, String>,
    /// Database file for sqlite.
    #[serde(deserialize_with = "de::string")]
    pub path: String,
}

/// Supporting container (redis, meilisearch, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSpec {
    #[serde(deserialize_with = "de::string_list")]
    pub servers: Vec<ServerName>,
    #[serde(deserialize_with = "de::string")]
    pub image: String,
    pub port: Option<u16>,
    #[serde(deserialize_with = "de::string")]
    pub command: String,
    #[serde(deserialize_with = "de::string_map")]
    pub env: EnvMap,
    #[serde(deserialize_with = "de::string_map")]
    pub mount: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SshKeys {
    #[serde(deserialize_with = "de::string")]
    pub private_key: String,
    #[serde(deserialize_with = "de::string")]
    pub public_key: String,
}
