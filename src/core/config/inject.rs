//! Derived environment for app services.
//!
//! When the database runs as a container, every app service gets its
//! connection settings. Keys the user already set are never overwritten, so
//! applying this twice gives the same tree.

use super::database::{ConnectionInfo, DatabaseAdapter};
use super::model::{Application, DatabaseSpec};
use crate::core::types::EnvMap;

/// In-cluster hostname of the database container.
pub fn database_host(app: &Application) -> String {
    format!("{}-db", app.name)
}

/// Connection info for the configured database, if it is supported.
///
/// The URL wins over secrets when it parses; an empty URL host falls back to
/// [`database_host`].
pub fn connection_info(app: &Application) -> Option<(DatabaseAdapter, ConnectionInfo)> {
    let db = app.database.as_ref()?;
    let adapter = DatabaseAdapter::from_name(&db.adapter)?;
    let host = database_host(app);

    let info = if db.url.trim().is_empty() {
        match adapter {
            DatabaseAdapter::Sqlite => ConnectionInfo {
                database: db.path.clone(),
                ..ConnectionInfo::default()
            },
            _ => adapter.credentials_from_secrets(&db.secrets, &host),
        }
    } else {
        let mut info = adapter.parse_url(&db.url)?;
        if info.host.is_empty() && adapter.needs_container() {
            info.host = host;
        }
        info
    };
    Some((adapter, info))
}

/// Env vars derived from the database section, before merging.
pub fn derived_env(app: &Application) -> EnvMap {
    let Some(db) = &app.database else {
        return EnvMap::new();
    };
    let Some(adapter) = DatabaseAdapter::from_name(&db.adapter) else {
        return EnvMap::new();
    };
    if !adapter.needs_container() {
        return EnvMap::new();
    }

    match connection_info(app) {
        Some((adapter, info)) => {
            let mut env = adapter.app_env(&info);
            keep_user_url(db, &mut env);
            env
        }
        // unparseable URL: pass it through untouched
        None => EnvMap::from([("DATABASE_URL".to_string(), db.url.trim().to_string())]),
    }
}

fn keep_user_url(db: &DatabaseSpec, env: &mut EnvMap) {
    if !db.url.trim().is_empty() {
        env.insert("DATABASE_URL".to_string(), db.url.trim().to_string());
    }
}

/// Merge [`derived_env`] into every app service, existing keys winning.
pub fn inject_database_env(app: &Application) -> Application {
    let derived = derived_env(app);
    let mut out = app.clone();
    if derived.is_empty() {
        return out;
    }

    for service in out.app.values_mut() {
        for (key, value) in &derived {
            service
                .env
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }
    out
}
