use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::path::PathBuf;

/// Public Gemini REST endpoint.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model the interpreter has always been served by.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";

/// Outbound call budget in seconds.
pub const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 30;

/// Environment variable the key has historically been deployed under.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub gemini: GeminiSettings,
    pub telemetry: TelemetrySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    /// 0 binds a random port (used by tests).
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiSettings {
    /// Absent is allowed at startup; requests then fail with a configuration error.
    #[serde(default)]
    pub api_key: Option<Secret<String>>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl GeminiSettings {
    /// The key, if one is set and non-empty. Whitespace is kept as-is.
    pub fn api_key(&self) -> Option<&Secret<String>> {
        self.api_key
            .as_ref()
            .filter(|key| !key.expose_secret().is_empty())
    }
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout_secs: DEFAULT_GEMINI_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    pub log_level: String,
    /// OTLP collector endpoint; span export is disabled when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

/// Directory holding `base.yaml`, whether we run from the crate or the workspace root.
fn configuration_directory() -> Result<PathBuf, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;

    if base_path.ends_with("interpreter-service") {
        Ok(base_path.join("config"))
    } else {
        Ok(base_path.join("interpreter-service").join("config"))
    }
}

/// Load settings from defaults, `config/base.yaml`, `APP__*` variables and `GEMINI_API_KEY`,
/// in that order of precedence.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    dotenvy::dotenv().ok();

    let configuration_directory = configuration_directory()?;

    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080_i64)?
        .set_default("gemini.base_url", DEFAULT_GEMINI_BASE_URL)?
        .set_default("gemini.model", DEFAULT_GEMINI_MODEL)?
        .set_default("gemini.timeout_secs", DEFAULT_GEMINI_TIMEOUT_SECS as i64)?
        .set_default("telemetry.log_level", "info")?
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(false))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .set_override_option("gemini.api_key", std::env::var(GEMINI_API_KEY_ENV).ok())?
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_key_counts_as_missing() {
        let settings = GeminiSettings {
            api_key: Some(Secret::new(String::new())),
            ..GeminiSettings::default()
        };
        assert!(settings.api_key().is_none());
    }

    #[test]
    fn whitespace_api_key_is_passed_through() {
        let settings = GeminiSettings {
            api_key: Some(Secret::new("  ".to_string())),
            ..GeminiSettings::default()
        };
        assert_eq!(settings.api_key().unwrap().expose_secret(), "  ");
    }

    #[test]
    fn present_api_key_is_returned() {
        let settings = GeminiSettings {
            api_key: Some(Secret::new("abc".to_string())),
            ..GeminiSettings::default()
        };
        assert_eq!(settings.api_key().unwrap().expose_secret(), "abc");
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let settings = GeminiSettings {
            api_key: Some(Secret::new("super-secret-key".to_string())),
            ..GeminiSettings::default()
        };
        assert!(!format!("{:?}", settings).contains("super-secret-key"));
    }

    #[test]
    fn defaults_point_at_public_gemini() {
        let settings = GeminiSettings::default();
        assert_eq!(settings.model, "gemini-1.5-flash-latest");
        assert!(settings.base_url.starts_with("https://generativelanguage.googleapis.com"));
    }
}
