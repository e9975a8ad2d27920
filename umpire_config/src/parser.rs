use crate::config::{ServiceConfig, ServiceConfigFile};
use anyhow::Result;
use std::path::Path;
use tracing::info;

pub async fn parse_config_from_file(path: impl AsRef<Path>) -> Result<ServiceConfig> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path).await?;

    let extension = path.extension().and_then(|s| s.to_str());

    match extension {
        Some("yaml") | Some("yml") => parse_yaml(&contents),
        Some("toml") => parse_toml(&contents),
        Some("json") => parse_json(&contents),
        _ => Err(anyhow::anyhow!(
            "Unsupported file format. Use .yaml, .yml, .toml, or .json"
        )),
    }
}

pub fn parse_config_from_str(content: &str, format: &str) -> Result<ServiceConfig> {
    match format.to_lowercase().as_str() {
        "yaml" | "yml" => parse_yaml(content),
        "toml" => parse_toml(content),
        "json" => parse_json(content),
        _ => Err(anyhow::anyhow!("Unsupported format: {}", format)),
    }
}

/// Load the file (or defaults when there is none), apply environment
/// overrides, then validate the result.
pub async fn load_config(path: Option<&Path>) -> Result<ServiceConfig> {
    let mut config = match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            parse_config_from_file(path).await?
        }
        None => ServiceConfig::default(),
    };

    config.apply_env()?;
    config.validate()?;
    Ok(config)
}

fn parse_yaml(content: &str) -> Result<ServiceConfig> {
    Ok(serde_yaml::from_str(content)?)
}

fn parse_toml(content: &str) -> Result<ServiceConfig> {
    let file: ServiceConfigFile = toml::from_str(content)?;
    Ok(file.service)
}

fn parse_json(content: &str) -> Result<ServiceConfig> {
    Ok(serde_json::from_str(content)?)
}
