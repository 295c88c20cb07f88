use std::env;

use anyhow::Result;

use crate::error::MockError;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;

/// Connection settings read from `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`
/// and `DB_PASSWORD`.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl DbConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let host = non_empty("DB_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match non_empty("DB_PORT") {
            Some(raw_port) => raw_port
                .trim()
                .parse::<u16>()
                .map_err(|_| MockError::InvalidPort(raw_port))?,
            None => DEFAULT_PORT,
        };

        let dbname = non_empty("DB_NAME");
        let user = non_empty("DB_USER");
        let password = non_empty("DB_PASSWORD");

        match (dbname, user, password) {
            (Some(dbname), Some(user), Some(password)) => Ok(Self {
                host,
                port,
                dbname,
                user,
                password,
            }),
            (dbname, user, password) => {
                let missing = [
                    ("DB_NAME", dbname.is_none()),
                    ("DB_USER", user.is_none()),
                    ("DB_PASSWORD", password.is_none()),
                ]
                .into_iter()
                .filter(|(_, is_missing)| *is_missing)
                .map(|(key, _)| key)
                .collect::<Vec<_>>()
                .join(", ");
                Err(MockError::MissingCredentials { missing }.into())
            }
        }
    }

    pub fn to_postgres_config(&self) -> postgres::Config {
        let mut config = postgres::Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .dbname(&self.dbname)
            .user(&self.user)
            .password(&self.password);
        config
    }
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dbname", &self.dbname)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}
