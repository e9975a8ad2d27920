use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use umpire_core::{
    source::{LibratoCredentials, DEFAULT_LIBRATO_URL},
    Backend, GraphiteSource, LibratoSource, SourceRegistry,
};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub graphite: GraphiteSettings,
    #[serde(default)]
    pub librato: LibratoSettings,
    /// Applies to every backend request; expiry counts as a failed request.
    #[serde(with = "humantime_serde", default = "default_backend_timeout")]
    pub backend_timeout: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub force_https: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphiteSettings {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibratoSettings {
    #[serde(default = "default_librato_url")]
    pub url: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// TOML files nest everything under `[service]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfigFile {
    pub service: ServiceConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_librato_url() -> String {
    DEFAULT_LIBRATO_URL.to_string()
}

fn default_backend_timeout() -> Duration {
    DEFAULT_BACKEND_TIMEOUT
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            force_https: false,
        }
    }
}

impl Default for LibratoSettings {
    fn default() -> Self {
        Self {
            url: default_librato_url(),
            email: None,
            token: None,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            auth: AuthSettings::default(),
            graphite: GraphiteSettings::default(),
            librato: LibratoSettings::default(),
            backend_timeout: DEFAULT_BACKEND_TIMEOUT,
        }
    }
}

impl LibratoSettings {
    pub fn credentials(&self) -> Option<LibratoCredentials> {
        match (&self.email, &self.token) {
            (Some(email), Some(token)) => Some(LibratoCredentials {
                email: email.clone(),
                token: token.clone(),
            }),
            _ => None,
        }
    }
}

impl ServiceConfig {
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Overrides file values with whatever `lookup` returns for each
    /// `UMPIRE_*` variable.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("UMPIRE_PORT") {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::Env {
                var: "UMPIRE_PORT",
                value: port.clone(),
            })?;
        }

        if let Some(force) = lookup("UMPIRE_FORCE_HTTPS") {
            self.server.force_https = match force.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(ConfigError::Env {
                        var: "UMPIRE_FORCE_HTTPS",
                        value: force,
                    })
                }
            };
        }

        if let Some(api_key) = lookup("UMPIRE_API_KEY") {
            self.auth.api_key = api_key;
        }

        if let Some(url) = lookup("UMPIRE_GRAPHITE_URL") {
            self.graphite.url = Some(url);
        }

        if let Some(email) = lookup("UMPIRE_LIBRATO_EMAIL") {
            self.librato.email = Some(email);
        }

        if let Some(token) = lookup("UMPIRE_LIBRATO_TOKEN") {
            self.librato.token = Some(token);
        }

        if let Some(timeout) = lookup("UMPIRE_BACKEND_TIMEOUT") {
            self.backend_timeout =
                humantime::parse_duration(timeout.trim()).map_err(|_| ConfigError::Env {
                    var: "UMPIRE_BACKEND_TIMEOUT",
                    value: timeout.clone(),
                })?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.api_key.is_empty() {
            return Err(ConfigError::Invalid("API key cannot be empty".to_string()));
        }

        match self.graphite.url.as_deref() {
            None | Some("") => {
                return Err(ConfigError::Invalid("Graphite URL is required".to_string()))
            }
            Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                return Err(ConfigError::Invalid(format!(
                    "Graphite URL '{}' must be http(s)",
                    url
                )))
            }
            Some(_) => {}
        }

        if self.backend_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "Backend timeout must be > 0".to_string(),
            ));
        }

        if self.librato.email.is_some() != self.librato.token.is_some() {
            return Err(ConfigError::Invalid(
                "Librato email and token must be set together".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the backend clients. Librato is registered only when credentials
    /// are present.
    pub fn build_registry(&self) -> Result<SourceRegistry, ConfigError> {
        let url = self
            .graphite
            .url
            .clone()
            .ok_or_else(|| ConfigError::Invalid("Graphite URL is required".to_string()))?;

        let mut registry = SourceRegistry::new();
        registry.register(
            Backend::Graphite,
            Arc::new(GraphiteSource::new(url, self.backend_timeout)?),
        );

        if let Some(credentials) = self.librato.credentials() {
            registry.register(
                Backend::Librato,
                Arc::new(LibratoSource::new(
                    self.librato.url.clone(),
                    credentials,
                    self.backend_timeout,
                )?),
            );
        }

        Ok(registry)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
