use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::constants::{
    DEFAULT_MEDIA_MAX_BYTES, DISCORD_CDN_HOST, SUPABASE_PUBLIC_STORAGE_PATH,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// A remote host that the media proxy is allowed to fetch images from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedMediaHost {
    pub scheme: String,
    pub hostname: String,
    /// Only paths starting with this prefix are allowed. `/` allows everything.
    pub path_prefix: String,
}

impl AllowedMediaHost {
    #[must_use]
    pub fn new(hostname: impl Into<String>, path_prefix: impl Into<String>) -> Self {
        Self {
            scheme: "https".to_string(),
            hostname: hostname.into(),
            path_prefix: path_prefix.into(),
        }
    }

    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Check whether an absolute URL is covered by this entry.
    #[must_use]
    pub fn permits(&self, url: &Url) -> bool {
        url.scheme() == self.scheme
            && url.host_str() == Some(self.hostname.as_str())
            && url.path().starts_with(&self.path_prefix)
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Supabase
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub highlights_table: String,
    pub request_timeout: Duration,

    // Web Server
    pub web_host: String,
    pub web_port: u16,
    pub site_title: String,

    // Media proxy
    pub extra_media_hosts: Vec<String>,
    /// Upstream images larger than this are refused.
    pub media_max_bytes: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// The `NEXT_PUBLIC_` prefixed names from older deployments are accepted
    /// when the plain names are not set.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Supabase
            supabase_url: required_env_with_fallback("SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL")?,
            supabase_anon_key: required_env_with_fallback(
                "SUPABASE_ANON_KEY",
                "NEXT_PUBLIC_SUPABASE_ANON_KEY",
            )?,
            highlights_table: env_or_default("HIGHLIGHTS_TABLE", "highlights"),
            request_timeout: Duration::from_secs(parse_env_u64("REQUEST_TIMEOUT_SECS", 30)?),

            // Web Server
            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("WEB_PORT", 8080)?,
            site_title: env_or_default("SITE_TITLE", "Discord Memo Estz"),

            // Media proxy
            extra_media_hosts: optional_env("MEDIA_ALLOWED_HOSTS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|h| !h.is_empty())
                        .map(str::to_lowercase)
                        .collect()
                })
                .unwrap_or_default(),
            media_max_bytes: parse_env_u64("MEDIA_MAX_BYTES", DEFAULT_MEDIA_MAX_BYTES)?,
        })
    }

    /// Configuration pointing at the given store, with defaults for the rest.
    #[must_use]
    pub fn for_store(supabase_url: &str, supabase_anon_key: &str) -> Self {
        Self {
            supabase_url: supabase_url.to_string(),
            supabase_anon_key: supabase_anon_key.to_string(),
            highlights_table: "highlights".to_string(),
            request_timeout: Duration::from_secs(30),
            web_host: "127.0.0.1".to_string(),
            web_port: 8080,
            site_title: "Discord Memo Estz".to_string(),
            extra_media_hosts: Vec::new(),
            media_max_bytes: DEFAULT_MEDIA_MAX_BYTES,
        }
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.supabase_url).map_err(|e| ConfigError::InvalidValue {
            name: "SUPABASE_URL".to_string(),
            message: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(ConfigError::InvalidValue {
                name: "SUPABASE_URL".to_string(),
                message: "must be an http(s) URL with a host".to_string(),
            });
        }
        if self.supabase_anon_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "SUPABASE_ANON_KEY".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.highlights_table.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "HIGHLIGHTS_TABLE".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "REQUEST_TIMEOUT_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.media_max_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                name: "MEDIA_MAX_BYTES".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Hosts the media proxy may fetch from.
    ///
    /// Always contains the store's public storage bucket and the Discord CDN.
    #[must_use]
    pub fn media_allow_list(&self) -> Vec<AllowedMediaHost> {
        let mut hosts = Vec::new();
        // Local Supabase stacks serve storage over plain http.
        if let Ok(url) = Url::parse(&self.supabase_url) {
            if let Some(host) = url.host_str() {
                hosts.push(
                    AllowedMediaHost::new(host.to_lowercase(), SUPABASE_PUBLIC_STORAGE_PATH)
                        .with_scheme(url.scheme()),
                );
            }
        }
        hosts.push(AllowedMediaHost::new(DISCORD_CDN_HOST, "/"));
        for extra in &self.extra_media_hosts {
            hosts.push(AllowedMediaHost::new(extra.clone(), "/"));
        }
        hosts
    }
}

fn required_env_with_fallback(name: &str, fallback: &str) -> Result<String, ConfigError> {
    optional_env(name)
        .or_else(|| optional_env(fallback))
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}
