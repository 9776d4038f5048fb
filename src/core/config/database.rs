//! Database adapters.
//!
//! One variant per supported engine. Everything adapter-specific (ports,
//! required secrets, env var names, dump/restore commands) hangs off
//! [`DatabaseAdapter`] so callers never switch on the adapter string.

use std::fmt;

use url::Url;

use crate::core::types::EnvMap;

/// Supported database engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseAdapter {
    Postgres,
    Mysql,
    Sqlite,
}

/// Connection parameters, either parsed from a URL or assembled from secrets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub host: String,
    pub port: Option<u16>,
    pub user: String,
    pub password: String,
    /// Database name, or file path for sqlite.
    pub database: String,
}

impl DatabaseAdapter {
    /// Map an adapter name to a variant. Case-insensitive.
    ///
    /// Returns `None` for unsupported adapters.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Some(Self::Postgres),
            "mysql" => Some(Self::Mysql),
            "sqlite" | "sqlite3" => Some(Self::Sqlite),
            _ => None,
        }
    }

    /// Canonical adapter name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
        }
    }

    pub fn default_port(&self) -> Option<u16> {
        match self {
            Self::Postgres => Some(5432),
            Self::Mysql => Some(3306),
            Self::Sqlite => None,
        }
    }

    /// Keys that must be in `database.secrets` when no URL is given.
    pub fn required_secrets(&self) -> &'static [&'static str] {
        match self {
            Self::Postgres => &["POSTGRES_USER", "POSTGRES_PASSWORD", "POSTGRES_DB"],
            Self::Mysql => &["MYSQL_USER", "MYSQL_PASSWORD", "MYSQL_DATABASE"],
            Self::Sqlite => &[],
        }
    }

    /// Whether the database runs as its own container.
    pub fn needs_container(&self) -> bool {
        !matches!(self, Self::Sqlite)
    }

    /// Prefix of the host/port env vars given to app services.
    fn env_prefix(&self) -> &'static str {
        match self {
            Self::Postgres => "POSTGRES",
            Self::Mysql => "MYSQL",
            Self::Sqlite => "SQLITE",
        }
    }

    /// URL scheme used by [`build_url`](Self::build_url).
    fn scheme(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite3",
        }
    }

    /// Parse a connection URL. Percent-encoded user info is decoded.
    ///
    /// Returns `None` for unparseable URLs.
    pub fn parse_url(&self, raw: &str) -> Option<ConnectionInfo> {
        let url = Url::parse(raw.trim()).ok()?;
        let decode = |s: &str| {
            urlencoding::decode(s)
                .map(|c| c.into_owned())
                .unwrap_or_else(|_| s.to_string())
        };

        if let Self::Sqlite = self {
            return Some(ConnectionInfo {
                database: decode(url.path()),
                ..ConnectionInfo::default()
            });
        }

        Some(ConnectionInfo {
            host: url.host_str().unwrap_or_default().to_string(),
            port: url.port().or(self.default_port()),
            user: decode(url.username()),
            password: url.password().map(decode).unwrap_or_default(),
            database: decode(url.path().trim_start_matches('/')),
        })
    }

    /// Assemble a connection URL, percent-encoding user info and the
    /// database name.
    pub fn build_url(&self, info: &ConnectionInfo) -> String {
        if let Self::Sqlite = self {
            return format!("{}://{}", self.scheme(), info.database);
        }

        let host = if info.host.is_empty() {
            "localhost"
        } else {
            info.host.as_str()
        };
        let database = urlencoding::encode(&info.database);
        let fallback = format!("{}://{}/{}", self.scheme(), host, database);

        let Ok(mut url) = Url::parse(&format!("{}://{}", self.scheme(), host)) else {
            return fallback;
        };
        url.set_path(&format!("/{}", database));
        url.set_username(&info.user).ok();
        if !info.password.is_empty() {
            url.set_password(Some(&info.password)).ok();
        }
        url.set_port(info.port.or(self.default_port())).ok();
        url.to_string()
    }

    /// Connection info from `database.secrets`.
    pub fn credentials_from_secrets(&self, secrets: &EnvMap, host: &str) -> ConnectionInfo {
        let get = |key: &str| secrets.get(key).cloned().unwrap_or_default();
        match self {
            Self::Postgres => ConnectionInfo {
                host: host.to_string(),
                port: self.default_port(),
                user: get("POSTGRES_USER"),
                password: get("POSTGRES_PASSWORD"),
                database: get("POSTGRES_DB"),
            },
            Self::Mysql => ConnectionInfo {
                host: host.to_string(),
                port: self.default_port(),
                user: get("MYSQL_USER"),
                password: get("MYSQL_PASSWORD"),
                database: get("MYSQL_DATABASE"),
            },
            Self::Sqlite => ConnectionInfo::default(),
        }
    }

    /// Environment for the database container itself.
    pub fn container_env(&self, info: &ConnectionInfo) -> EnvMap {
        let mut env = EnvMap::new();
        match self {
            Self::Postgres => {
                env.insert("POSTGRES_USER".into(), info.user.clone());
                env.insert("POSTGRES_PASSWORD".into(), info.password.clone());
                env.insert("POSTGRES_DB".into(), info.database.clone());
            }
            Self::Mysql => {
                env.insert("MYSQL_USER".into(), info.user.clone());
                env.insert("MYSQL_PASSWORD".into(), info.password.clone());
                env.insert("MYSQL_DATABASE".into(), info.database.clone());
                env.insert("MYSQL_ROOT_PASSWORD".into(), info.password.clone());
            }
            Self::Sqlite => {}
        }
        env
    }

    /// Environment injected into app services that talk to this database.
    pub fn app_env(&self, info: &ConnectionInfo) -> EnvMap {
        let mut env = self.container_env(info);
        env.remove("MYSQL_ROOT_PASSWORD");
        env.insert("DATABASE_URL".into(), self.build_url(info));

        if self.needs_container() {
            let prefix = self.env_prefix();
            env.insert(format!("{}_HOST", prefix), info.host.clone());
            if let Some(port) = info.port.or(self.default_port()) {
                env.insert(format!("{}_PORT", prefix), port.to_string());
            }
        }
        env
    }

    /// Command that writes a logical dump to stdout.
    pub fn dump_command(&self, info: &ConnectionInfo) -> Vec<String> {
        match self {
            Self::Postgres => argv(&[
                "pg_dump",
                "-U",
                &info.user,
                "-d",
                &info.database,
                "--clean",
                "--if-exists",
                "--no-owner",
            ]),
            Self::Mysql => argv(&[
                "mysqldump",
                "-u",
                &info.user,
                "--single-transaction",
                &info.database,
            ]),
            Self::Sqlite => argv(&["sqlite3", &info.database, ".dump"]),
        }
    }

    /// Command that reads a dump from stdin.
    pub fn restore_command(&self, info: &ConnectionInfo) -> Vec<String> {
        match self {
            Self::Postgres => argv(&["psql", "-U", &info.user, "-d", &info.database]),
            Self::Mysql => argv(&["mysql", "-u", &info.user, &info.database]),
            Self::Sqlite => argv(&["sqlite3", &info.database]),
        }
    }

    /// Command that creates the database if missing.
    pub fn create_database_command(&self, info: &ConnectionInfo) -> Vec<String> {
        match self {
            Self::Postgres => argv(&["createdb", "-U", &info.user, &info.database]),
            Self::Mysql => argv(&[
                "mysql",
                "-u",
                &info.user,
                "-e",
                &format!("CREATE DATABASE IF NOT EXISTS `{}`", info.database),
            ]),
            Self::Sqlite => argv(&["sqlite3", &info.database, "VACUUM;"]),
        }
    }
}

impl fmt::Display for DatabaseAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}
