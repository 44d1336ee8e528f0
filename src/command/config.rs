use thiserror::Error;

pub const DEFAULT_TRANSLATE_ENDPOINT: &str =
    "https://translation.googleapis.com/language/translate/v2";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

/// Settings needed to reach the translation service.
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    pub api_key: String,
    pub endpoint: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret Slack sends in the `token` form field.
    pub token: String,
    /// Enables `X-Slack-Signature` verification when set.
    pub signing_secret: Option<String>,
    pub translate: TranslateConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        Ok(Self {
            token: require("TOKEN")?,
            signing_secret: get("SLACK_SIGNING_SECRET"),
            translate: TranslateConfig {
                api_key: require("TRANSLATE_KEY")?,
                endpoint: get("TRANSLATE_ENDPOINT")
                    .unwrap_or_else(|| DEFAULT_TRANSLATE_ENDPOINT.to_string()),
            },
        })
    }
}
