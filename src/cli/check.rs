//! Check command - full decrypt, parse and validate cycle.

use serde::Serialize;
use tracing::info;

use crate::cli::output;
use crate::core::config::Configuration;
use crate::core::env::SystemEnv;
use crate::core::store::{CredentialStore, StoreOptions};
use crate::error::{Error, Result};

/// What `check` reports. Never includes secret values.
#[derive(Debug, Serialize)]
struct Summary {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    application: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    servers: Vec<ServerSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    app: Vec<AppSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    services: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<String>,
}

#[derive(Debug, Serialize)]
struct ServerSummary {
    name: String,
    master: bool,
    count: u32,
}

#[derive(Debug, Serialize)]
struct AppSummary {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hostname: Option<String>,
}

impl Summary {
    fn invalid(error: String) -> Self {
        Self {
            valid: false,
            error: Some(error),
            application: None,
            environment: None,
            provider: None,
            servers: Vec::new(),
            app: Vec::new(),
            services: Vec::new(),
            database: None,
        }
    }

    fn of(config: &Configuration) -> Self {
        let app = config.application();
        Self {
            valid: true,
            error: None,
            application: Some(app.name.clone()),
            environment: Some(app.environment.clone()),
            provider: config.compute_provider().map(|p| p.name().to_string()),
            servers: app
                .servers
                .iter()
                .map(|(name, spec)| ServerSummary {
                    name: name.clone(),
                    master: spec.master,
                    count: spec.count,
                })
                .collect(),
            app: app
                .app
                .iter()
                .map(|(name, service)| AppSummary {
                    name: name.clone(),
                    hostname: service.hostname(),
                })
                .collect(),
            services: app.services.keys().cloned().collect(),
            database: config.database_adapter().map(|a| a.name().to_string()),
        }
    }
}

/// Validate the stored configuration; non-zero exit on the first violation.
pub fn execute(options: &StoreOptions, branch: Option<&str>, json: bool) -> Result<()> {
    let store = CredentialStore::open(options, &SystemEnv)?;
    let bytes = store.read()?;

    let config = match Configuration::load_for_branch(&bytes, branch) {
        Ok(config) => config,
        Err(e @ (Error::Validation(_) | Error::Config(_))) if json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&Summary::invalid(e.to_string()))?
            );
            return Err(e);
        }
        Err(e) => return Err(e),
    };
    info!(path = %store.path().display(), "configuration valid");

    let summary = Summary::of(&config);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &Summary) {
    output::success("configuration valid");
    let none = || "-".to_string();

    output::kv("application", summary.application.clone().unwrap_or_else(none));
    output::kv("environment", summary.environment.clone().unwrap_or_else(none));
    output::kv("provider", summary.provider.clone().unwrap_or_else(none));
    output::kv("database", summary.database.clone().unwrap_or_else(none));

    if !summary.servers.is_empty() {
        output::section("Servers");
        for server in &summary.servers {
            let role = if server.master { " (master)" } else { "" };
            output::list_item(&format!("{} x{}{}", server.name, server.count, role));
        }
    }

    if !summary.app.is_empty() {
        output::section("App");
        for app in &summary.app {
            match &app.hostname {
                Some(host) => output::list_item(&format!("{} → {}", app.name, host)),
                None => output::list_item(&app.name),
            }
        }
    }

    if !summary.services.is_empty() {
        output::section("Services");
        for name in &summary.services {
            output::list_item(name);
        }
    }
}
