use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::{bail, Context};
use client_core::{lookup::DEFAULT_LOOKUP_BASE_URL, LookupConfig};
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = "venue_finder.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub lookup_base_url: Url,
    pub lookup_api_key: Option<String>,
    pub lookup_timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lookup_base_url: Url::parse(DEFAULT_LOOKUP_BASE_URL)
                .expect("default lookup url is valid"),
            lookup_api_key: None,
            lookup_timeout_seconds: 10,
        }
    }
}

impl Settings {
    pub fn lookup_config(&self) -> LookupConfig {
        LookupConfig::new(self.lookup_base_url.clone(), self.lookup_api_key.clone())
            .with_timeout(Duration::from_secs(self.lookup_timeout_seconds))
    }
}

/// Defaults, then the config file if present, then environment overrides.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    load_settings_with_env(path, |key| std::env::var(key).ok())
}

fn load_settings_with_env(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => apply_file_config(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?,
        Err(err) => debug!(path = %path.display(), error = %err, "no config file loaded"),
    }

    apply_env_overrides(&mut settings, env)?;

    if settings.lookup_api_key.is_none() {
        warn!("no lookup API key configured; set LOOKUP_API_KEY or lookup_api_key in the config file");
    }

    Ok(settings)
}

fn apply_file_config(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, toml::Value>>(raw)
        .context("config file is not valid TOML")?;

    if let Some(v) = file_cfg.get("lookup_base_url") {
        let Some(v) = v.as_str() else {
            bail!("lookup_base_url must be a string");
        };
        settings.lookup_base_url = parse_base_url(v)?;
    }
    if let Some(v) = file_cfg.get("lookup_api_key") {
        let Some(v) = v.as_str() else {
            bail!("lookup_api_key must be a string");
        };
        settings.lookup_api_key = non_empty(v);
    }
    if let Some(v) = file_cfg.get("lookup_timeout_seconds") {
        settings.lookup_timeout_seconds = match v {
            toml::Value::Integer(n) if *n > 0 => *n as u64,
            toml::Value::String(s) => parse_timeout(s)?,
            other => bail!("lookup_timeout_seconds must be a positive integer, got {other}"),
        };
    }

    Ok(())
}

fn apply_env_overrides(
    settings: &mut Settings,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = env("LOOKUP_BASE_URL") {
        settings.lookup_base_url = parse_base_url(&v)?;
    }
    if let Some(v) = env("APP__LOOKUP_BASE_URL") {
        settings.lookup_base_url = parse_base_url(&v)?;
    }

    if let Some(v) = env("LOOKUP_API_KEY") {
        settings.lookup_api_key = non_empty(&v);
    }
    if let Some(v) = env("APP__LOOKUP_API_KEY") {
        settings.lookup_api_key = non_empty(&v);
    }

    if let Some(v) = env("APP__LOOKUP_TIMEOUT_SECONDS") {
        match parse_timeout(&v) {
            Ok(parsed) => settings.lookup_timeout_seconds = parsed,
            Err(err) => warn!(value = %v, error = %err, "ignoring invalid lookup timeout override"),
        }
    }

    Ok(())
}

fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim())
        .with_context(|| format!("invalid lookup base url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("lookup base url must use http or https, got '{}'", url.scheme());
    }
    Ok(url)
}

fn parse_timeout(raw: &str) -> anyhow::Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => bail!("timeout must be a positive number of seconds, got '{raw}'"),
        Ok(seconds) => Ok(seconds),
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
