//! Layered configuration for the sales service
//!
//! Settings come from an optional `config.yaml` next to the binary, merged
//! with `SALES_`-prefixed environment variables. Constructed once at startup
//! and passed down; there is no global configuration singleton.

use common::database::MongoConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub listen: Listen,
    pub mongo: Mongo,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Listen {
    pub bind_ip: String,
    pub port: u16,
}

/// Document-store settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Mongo {
    pub host: String,
    pub port: u16,
    pub db_name: String,
    pub user_collection: String,
    pub sale_collection: String,
    pub auth_db: String,
    pub username: String,
    pub password: String,
}

impl Default for Listen {
    fn default() -> Self {
        Listen {
            bind_ip: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for Mongo {
    fn default() -> Self {
        Mongo {
            host: "localhost".to_string(),
            port: 27017,
            db_name: "sales".to_string(),
            user_collection: "users".to_string(),
            sale_collection: "sales".to_string(),
            auth_db: String::new(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl Settings {
    /// Load settings from `config.yaml` (optional) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("SALES").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.listen.bind_ip, self.listen.port)
    }

    pub fn mongo_config(&self) -> MongoConfig {
        MongoConfig {
            host: self.mongo.host.clone(),
            port: self.mongo.port,
            db_name: self.mongo.db_name.clone(),
            auth_db: self.mongo.auth_db.clone(),
            username: self.mongo.username.clone(),
            password: self.mongo.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_a_local_setup() {
        let settings = Settings::default();
        assert_eq!(settings.listen_addr(), "0.0.0.0:8080");
        assert_eq!(settings.mongo.port, 27017);
        assert_eq!(settings.mongo.user_collection, "users");
    }

    #[test]
    fn mongo_config_carries_the_store_settings() {
        let mut settings = Settings::default();
        settings.mongo.username = "app".to_string();
        settings.mongo.auth_db = "admin".to_string();

        let config = settings.mongo_config();
        assert_eq!(config.username, "app");
        assert_eq!(config.auth_db, "admin");
        assert_eq!(config.db_name, "sales");
    }
}
