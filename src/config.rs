use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DisplayError, Result};
use crate::ui::RenderSettings;
use crate::ui::container::{DEFAULT_CONTAINER_ID, DEFAULT_URL_ATTRIBUTE};

pub const DEFAULT_CONFIG_PATH: &str = "config/display.json";

pub const BASE_URL_ENV: &str = "MESSAGE_DISPLAY_BASE_URL";
pub const ESCAPE_HTML_ENV: &str = "MESSAGE_DISPLAY_ESCAPE_HTML";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base for relative `data-url` values, e.g. `http://localhost:8000/`.
    pub base_url: Option<String>,
    pub container_id: String,
    pub url_attribute: String,
    pub escape_html: bool,
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            url_attribute: DEFAULT_URL_ATTRIBUTE.to_string(),
            escape_html: true,
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn render_settings(&self) -> Result<RenderSettings> {
        let base_url = self
            .base_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw)
                    .map_err(|err| DisplayError::Config(format!("invalid base url \"{raw}\": {err}")))
            })
            .transpose()?;

        Ok(RenderSettings {
            url_attribute: self.url_attribute.clone(),
            base_url,
            escape_html: self.escape_html,
        })
    }

    /// Apply `MESSAGE_DISPLAY_*` variables on top of the file values.
    pub fn apply_env(&mut self) {
        self.apply_overrides(env::var(BASE_URL_ENV).ok(), env::var(ESCAPE_HTML_ENV).ok());
    }

    fn apply_overrides(&mut self, base_url: Option<String>, escape_html: Option<String>) {
        if let Some(base_url) = base_url.filter(|v| !v.trim().is_empty()) {
            self.base_url = Some(base_url);
        }
        if let Some(raw) = escape_html {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.escape_html = true,
                "0" | "false" | "no" | "off" => self.escape_html = false,
                other => log::warn!("Ignoring {ESCAPE_HTML_ENV}={other}: expected a boolean"),
            }
        }
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}
