use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use client_core::DEFAULT_CITIES_URL;

pub const SETTINGS_FILE: &str = "cities.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_CITIES_URL.into(),
            log_filter: "info".into(),
        }
    }
}

/// Defaults, then `cities.toml` in the working directory, then environment,
/// then the `--api-url` flag.
pub fn load_settings(api_url_flag: Option<&str>) -> anyhow::Result<Settings> {
    let path = Path::new(SETTINGS_FILE);
    let raw = if path.exists() {
        Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))?,
        )
    } else {
        None
    };

    resolve_settings(raw.as_deref(), |key| std::env::var(key).ok(), api_url_flag)
        .with_context(|| format!("invalid settings file '{}'", path.display()))
}

fn resolve_settings(
    file: Option<&str>,
    var: impl Fn(&str) -> Option<String>,
    api_url_flag: Option<&str>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();
    if let Some(raw) = file {
        apply_file_overrides(&mut settings, raw)?;
    }
    apply_env_overrides(&mut settings, var);
    if let Some(api_url) = api_url_flag {
        settings.api_url = api_url.to_string();
    }
    settings.api_url = normalize_api_url(&settings.api_url);
    Ok(settings)
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, String>>(raw)?;
    if let Some(v) = file_cfg.get("api_url") {
        settings.api_url = v.clone();
    }
    if let Some(v) = file_cfg.get("log_filter") {
        settings.log_filter = v.clone();
    }
    Ok(())
}

fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("CITIES_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = var("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = var("CITIES_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

pub fn normalize_api_url(raw_api_url: &str) -> String {
    let raw_api_url = raw_api_url.trim();

    if raw_api_url.is_empty() {
        return Settings::default().api_url;
    }

    if raw_api_url.ends_with('/') {
        raw_api_url.to_string()
    } else {
        format!("{raw_api_url}/")
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
