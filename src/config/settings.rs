use std::env;

/// Bootstrap settings for infrastructure configuration
#[derive(Debug, Clone)]
pub struct Settings {
    database_url: String,
    server_host: String,
    server_port: u16,
    roles_config_path: String,
}

impl Settings {
    /// Load settings from environment variables, falling back to
    /// development defaults.
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://shoplist.db?mode=rwc".to_string());

        let server_host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let server_port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let roles_config_path =
            env::var("ROLES_CONFIG").unwrap_or_else(|_| "config/roles.json".to_string());

        Self {
            database_url,
            server_host,
            server_port,
            roles_config_path,
        }
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn roles_config_path(&self) -> &str {
        &self.roles_config_path
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
