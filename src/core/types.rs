//! Type aliases for domain concepts.

/// Name of an entry in the root `servers` map.
pub type ServerName = String;

/// Name of an entry in the `app` or `services` maps.
pub type ServiceName = String;

/// Flat string map used for env vars and secrets.
pub type EnvMap = std::collections::BTreeMap<String, String>;
