use std::time::Duration;

use crate::utils::IdCheckError;

pub const DEFAULT_REGISTRY_URL: &str = "https://sandbox.surepass.io/api/v1/pan/pan-comprehensive";
pub const DEFAULT_REGISTRY_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_OCR_LANGUAGES: &str = "eng+hin";

/// Runtime settings, read from the environment (and `.env` when the
/// binary loads one).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub registry_url: String,
    pub registry_token: Option<String>,
    pub registry_timeout: Duration,
    pub ocr_languages: String,
    pub tessdata_prefix: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            registry_token: None,
            registry_timeout: Duration::from_secs(DEFAULT_REGISTRY_TIMEOUT_SECS),
            ocr_languages: DEFAULT_OCR_LANGUAGES.to_string(),
            tessdata_prefix: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, IdCheckError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IdCheckError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Config::default();

        let registry_timeout = match get("IDCHECK_REGISTRY_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| {
                    IdCheckError::Config(format!("IDCHECK_REGISTRY_TIMEOUT_SECS must be a whole number of seconds, got '{}'", raw))
                })?;
                if secs == 0 {
                    return Err(IdCheckError::Config(
                        "IDCHECK_REGISTRY_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => defaults.registry_timeout,
        };

        Ok(Config {
            registry_url: get("IDCHECK_REGISTRY_URL").unwrap_or(defaults.registry_url),
            registry_token: get("IDCHECK_REGISTRY_TOKEN"),
            registry_timeout,
            ocr_languages: get("IDCHECK_OCR_LANGUAGES").unwrap_or(defaults.ocr_languages),
            tessdata_prefix: get("TESSDATA_PREFIX"),
        })
    }
}
