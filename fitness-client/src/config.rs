use std::time::Duration;

use anyhow::{Context, Result, anyhow};

/// Default base URL of the image host API.
pub const DEFAULT_CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com";

#[derive(Debug, Clone, Default)]
/// Client configuration, built once at startup and shared by reference.
///
/// Required keys may be absent: startup continues and the calls that need
/// them fail instead.
pub struct ClientConfig {
    /// Spreadsheet endpoint URL (`APP_SCRIPT_URL`).
    pub endpoint_url: Option<String>,
    /// Static API key (`API_KEY`).
    pub api_key: Option<String>,
    /// Image host settings.
    pub image_host: ImageHostConfig,
    /// Optional whole-request timeout (`HTTP_TIMEOUT_SECS`).
    pub request_timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
/// Image host account used for unsigned uploads.
pub struct ImageHostConfig {
    /// API base URL (`CLOUDINARY_API_BASE`).
    pub api_base: String,
    /// Account name (`CLOUDINARY_NAME`).
    pub cloud_name: Option<String>,
    /// Unsigned upload preset (`CLOUDINARY_UPLOAD_PRESET`).
    pub upload_preset: Option<String>,
}

impl Default for ImageHostConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_CLOUDINARY_API_BASE.to_string(),
            cloud_name: None,
            upload_preset: None,
        }
    }
}

impl ClientConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the raw value
    /// of a key if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint_url = get_optional(&lookup, "APP_SCRIPT_URL");
        let api_key = get_optional(&lookup, "API_KEY");
        let image_host = ImageHostConfig {
            api_base: get_optional(&lookup, "CLOUDINARY_API_BASE")
                .unwrap_or_else(|| DEFAULT_CLOUDINARY_API_BASE.to_string()),
            cloud_name: get_optional(&lookup, "CLOUDINARY_NAME"),
            upload_preset: get_optional(&lookup, "CLOUDINARY_UPLOAD_PRESET"),
        };
        let request_timeout = match get_optional(&lookup, "HTTP_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(parse_positive_secs(
                "HTTP_TIMEOUT_SECS",
                &raw,
            )?)),
            None => None,
        };

        Ok(Self {
            endpoint_url,
            api_key,
            image_host,
            request_timeout,
        })
    }

    /// Names of required keys that are not set.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.endpoint_url.is_none() {
            missing.push("APP_SCRIPT_URL");
        }
        if self.api_key.is_none() {
            missing.push("API_KEY");
        }
        if self.image_host.cloud_name.is_none() {
            missing.push("CLOUDINARY_NAME");
        }
        if self.image_host.upload_preset.is_none() {
            missing.push("CLOUDINARY_UPLOAD_PRESET");
        }
        missing
    }

    /// Logs one configuration error per missing key.
    pub fn report_missing(&self) {
        for key in self.missing_keys() {
            tracing::error!(key, "missing environment variable");
        }
    }
}

fn get_optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_positive_secs(key: &str, raw: &str) -> Result<u64> {
    let value = raw
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
