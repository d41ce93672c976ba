//! Environment configuration and API key resolution.

use crate::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Key value shipped in sample HTML/env files; never a real credential.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_GOOGLE_API_KEY_HERE";

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// API key sources in priority order.
///
/// `build_time` is baked in with `option_env!("GEMINI_API_KEY")`; `runtime`
/// is read from `GOOGLE_API_KEY` when the process starts.
#[derive(Debug, Clone, Default)]
pub struct KeySources {
    pub build_time: Option<String>,
    pub runtime: Option<String>,
}

impl KeySources {
    pub fn from_env() -> Self {
        Self {
            build_time: option_env!("GEMINI_API_KEY").map(str::to_string),
            runtime: std::env::var("GOOGLE_API_KEY").ok(),
        }
    }

    /// Returns the first non-empty key, rejecting the placeholder value.
    pub fn resolve(&self) -> Result<String> {
        let (source, key) = [
            ("build-time", self.build_time.as_deref()),
            ("runtime", self.runtime.as_deref()),
        ]
        .into_iter()
        .find_map(|(source, key)| {
            key.map(str::trim)
                .filter(|k| !k.is_empty())
                .map(|k| (source, k))
        })
        .ok_or_else(|| Error::Configuration("GOOGLE_API_KEY not configured".to_string()))?;

        if key == PLACEHOLDER_API_KEY {
            return Err(Error::Configuration(format!(
                "{} API key is still the placeholder value",
                source
            )));
        }

        tracing::debug!("Using {} API key {}", source, mask_key(key));
        Ok(key.to_string())
    }
}

/// Shows the first four characters of a key and masks the rest.
pub fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    format!("{}...", visible)
}

#[derive(Debug, Clone)]
pub struct Config {
    pub keys: KeySources,
    pub text_model: String,
    pub image_model: String,
    pub timeout: Duration,
    pub data_dir: PathBuf,
}

impl Config {
    /// Loads configuration from the environment (and `.env` when present).
    ///
    /// A missing API key is not an error here; it surfaces on the first
    /// model call so that offline commands keep working.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let timeout_secs = match std::env::var("WARDROBE_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::Configuration(format!(
                    "WARDROBE_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        if timeout_secs == 0 {
            return Err(Error::Configuration(
                "WARDROBE_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let data_dir = match std::env::var("WARDROBE_DATA_DIR") {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir()
                .map(|dir| dir.join("wardrobe-assistant"))
                .ok_or_else(|| {
                    Error::Configuration(
                        "No config directory found; set WARDROBE_DATA_DIR".to_string(),
                    )
                })?,
        };

        Ok(Self {
            keys: KeySources::from_env(),
            text_model: env_or("WARDROBE_TEXT_MODEL", DEFAULT_TEXT_MODEL),
            image_model: env_or("WARDROBE_IMAGE_MODEL", DEFAULT_IMAGE_MODEL),
            timeout: Duration::from_secs(timeout_secs),
            data_dir,
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(build_time: Option<&str>, runtime: Option<&str>) -> KeySources {
        KeySources {
            build_time: build_time.map(str::to_string),
            runtime: runtime.map(str::to_string),
        }
    }

    #[test]
    fn test_resolve_prefers_build_time_key() {
        let key = sources(Some("build-key"), Some("runtime-key"))
            .resolve()
            .unwrap();
        assert_eq!(key, "build-key");
    }

    #[test]
    fn test_resolve_falls_back_to_runtime_key() {
        let key = sources(None, Some("runtime-key")).resolve().unwrap();
        assert_eq!(key, "runtime-key");

        let key = sources(Some("   "), Some("runtime-key")).resolve().unwrap();
        assert_eq!(key, "runtime-key");
    }

    #[test]
    fn test_resolve_without_keys_is_configuration_error() {
        let err = sources(None, None).resolve().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_resolve_rejects_placeholder() {
        let err = sources(None, Some(PLACEHOLDER_API_KEY))
            .resolve()
            .unwrap_err();
        assert!(err.is_configuration());

        let err = sources(Some(PLACEHOLDER_API_KEY), Some("real-key"))
            .resolve()
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_mask_key_hides_tail() {
        assert_eq!(mask_key("AIzaSyExample"), "AIza...");
        assert_eq!(mask_key("ab"), "ab...");
    }
}
