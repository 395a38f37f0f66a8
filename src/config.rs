//! Server configuration from environment variables.
//!
//! HOST (default 0.0.0.0), PORT (default 5005), ADMIN_USERNAME (default "admin"),
//! ADMIN_PASSWORD (no default: without it nobody can log in), SESSION_SECRET (at least 64 bytes;
//! generated per start when absent, which logs everyone out on restart).

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5005
}

fn default_admin_username() -> String {
    "admin".to_string()
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub admin_username: String,
    pub admin_password: Option<String>,
    pub session_secret: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid PORT {:?}", raw);
                default_port()
            }),
            None => default_port(),
        };
        Self {
            host: get("HOST").unwrap_or_else(default_host),
            port,
            admin_username: get("ADMIN_USERNAME").unwrap_or_else(default_admin_username),
            admin_password: get("ADMIN_PASSWORD"),
            session_secret: get("SESSION_SECRET"),
        }
    }

    /// Whether the login matches the configured admin account.
    pub fn accepts_login(&self, username: &str, password: &str) -> bool {
        match &self.admin_password {
            Some(expected) => username == self.admin_username && password == expected,
            None => false,
        }
    }
}
