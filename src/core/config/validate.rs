//! Configuration rules.
//!
//! Rules run in a fixed order and stop at the first violation. Expected
//! violations are returned as values so interactive callers can show the
//! message and let the user retry.

use std::collections::HashMap;

use tracing::debug;

use super::database::DatabaseAdapter;
use super::model::Application;
use crate::error::ValidationError;

type Check = std::result::Result<(), ValidationError>;

/// Validate a parsed application. `None` means valid.
pub fn validate(app: &Application) -> Option<ValidationError> {
    let result = run(app).err();
    if let Some(e) = &result {
        debug!(error = %e, "configuration invalid");
    }
    result
}

fn run(app: &Application) -> Check {
    check_identity(app)?;
    check_domain_provider(app)?;
    check_compute_provider(app)?;
    check_servers_present(app)?;
    check_server_references(app)?;
    check_master_server(app)?;
    check_server_counts(app)?;
    check_database(app)?;
    check_ssh_keys(app)?;
    check_hostnames(app)
}

fn required(value: &str, field: &str) -> Check {
    if value.trim().is_empty() {
        return Err(ValidationError::missing(field));
    }
    Ok(())
}

fn check_identity(app: &Application) -> Check {
    required(&app.name, "application.name")?;
    required(&app.environment, "application.environment")
}

fn check_domain_provider(app: &Application) -> Check {
    let Some(cloudflare) = &app.domain_provider.cloudflare else {
        return Err(ValidationError::missing("domain_provider.cloudflare"));
    };
    required(&cloudflare.api_token, "domain_provider.cloudflare.api_token")?;
    required(&cloudflare.account_id, "domain_provider.cloudflare.account_id")
}

fn check_compute_provider(app: &Application) -> Check {
    let configured = app.compute_provider.configured();
    match configured.as_slice() {
        [] => Err(ValidationError::NoComputeProvider),
        [provider] => match provider.missing_field() {
            Some(field) => Err(ValidationError::MissingField { field }),
            None => Ok(()),
        },
        many => Err(ValidationError::MultipleComputeProviders {
            found: many.iter().map(|p| p.name().to_string()).collect(),
        }),
    }
}

fn check_servers_present(app: &Application) -> Check {
    if app.has_workloads() && app.servers.is_empty() {
        return Err(ValidationError::NoServers);
    }
    Ok(())
}

fn check_server_references(app: &Application) -> Check {
    let refs = app
        .app
        .iter()
        .map(|(name, svc)| (format!("app.{}", name), &svc.servers))
        .chain(
            app.database
                .iter()
                .map(|db| ("database".to_string(), &db.servers)),
        )
        .chain(
            app.services
                .iter()
                .map(|(name, svc)| (format!("services.{}", name), &svc.servers)),
        );

    for (entity, servers) in refs {
        if let Some(missing) = servers.iter().find(|s| !app.servers.contains_key(*s)) {
            return Err(ValidationError::UnknownServer {
                entity,
                server: missing.clone(),
            });
        }
    }
    Ok(())
}

fn check_master_server(app: &Application) -> Check {
    let masters = app.master_servers();

    if app.servers.len() > 1 && masters.is_empty() {
        return Err(ValidationError::NoMasterServer {
            count: app.servers.len(),
        });
    }
    if masters.len() > 1 {
        return Err(ValidationError::MultipleMasterServers {
            servers: masters.into_iter().cloned().collect(),
        });
    }
    Ok(())
}

fn check_server_counts(app: &Application) -> Check {
    match app.servers.iter().find(|(_, spec)| spec.count == 0) {
        Some((name, _)) => Err(ValidationError::InvalidServerCount {
            server: name.clone(),
        }),
        None => Ok(()),
    }
}

fn check_database(app: &Application) -> Check {
    let Some(db) = &app.database else {
        return Ok(());
    };

    required(&db.adapter, "database.adapter")?;
    let adapter = DatabaseAdapter::from_name(&db.adapter)
        .ok_or_else(|| ValidationError::UnsupportedAdapter(db.adapter.clone()))?;

    if !db.url.trim().is_empty() {
        return Ok(());
    }

    for key in adapter.required_secrets() {
        let present = db.secrets.get(*key).is_some_and(|v| !v.trim().is_empty());
        if !present {
            return Err(ValidationError::MissingDatabaseSecret {
                adapter: adapter.name().to_string(),
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

fn check_ssh_keys(app: &Application) -> Check {
    let Some(keys) = &app.ssh_keys else {
        return Err(ValidationError::missing("ssh_keys"));
    };
    required(&keys.private_key, "ssh_keys.private_key")?;
    required(&keys.public_key, "ssh_keys.public_key")
}

fn check_hostnames(app: &Application) -> Check {
    let mut seen: HashMap<String, &str> = HashMap::new();

    for (name, svc) in &app.app {
        let Some(hostname) = svc.hostname() else {
            continue;
        };
        if let Some(first) = seen.get(&hostname) {
            return Err(ValidationError::DuplicateHostname {
                first: first.to_string(),
                second: name.clone(),
                hostname,
            });
        }
        seen.insert(hostname, name);
    }
    Ok(())
}
