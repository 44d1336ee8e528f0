//! Client for the Google Translate v2 REST API.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::TranslateConfig;
use crate::types::{Translation, TranslationResult};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// A failed translation call. Displays as the underlying failure message,
/// which is shown to the user as is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TranslationError {
    message: String,
}

impl TranslationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.without_url().to_string())
    }
}

/// The translation client could not be built, so no call was attempted.
#[derive(Debug, Error)]
pub enum ClientInitError {
    #[error("invalid translate endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("API key is not a valid header value")]
    InvalidApiKey,

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates a single segment into `target`, letting the service detect
    /// the source language.
    async fn translate(
        &self,
        text: &str,
        target: &str,
    ) -> Result<TranslationResult, TranslationError>;
}

/// Builds a fresh [`Translator`] for each command.
pub trait TranslatorFactory: Send + Sync {
    type Translator: Translator;

    fn build(&self) -> Result<Self::Translator, ClientInitError>;
}

impl TranslatorFactory for TranslateConfig {
    type Translator = GoogleTranslator;

    fn build(&self) -> Result<GoogleTranslator, ClientInitError> {
        GoogleTranslator::new(self)
    }
}

pub struct GoogleTranslator {
    client: Client,
    url: Url,
}

impl GoogleTranslator {
    pub fn new(config: &TranslateConfig) -> Result<Self, ClientInitError> {
        let invalid = |reason: String| ClientInitError::InvalidEndpoint {
            endpoint: config.endpoint.clone(),
            reason,
        };

        let url = Url::parse(&config.endpoint).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", url.scheme())));
        }

        // Never in the URL: reqwest errors and logs print it.
        let mut api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| ClientInitError::InvalidApiKey)?;
        api_key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);

        Ok(Self {
            client: Client::builder().default_headers(headers).build()?,
            url,
        })
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: [&'a str; 1],
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: u16,
    message: String,
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        target: &str,
    ) -> Result<TranslationResult, TranslationError> {
        let request = TranslateRequest {
            q: [text],
            target,
            format: "text",
        };

        debug!("translate: POST {}", self.url.path());

        let response = self
            .client
            .post(self.url.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        parse_response(status, &body)
    }
}

fn parse_response(status: StatusCode, body: &str) -> Result<TranslationResult, TranslationError> {
    if !status.is_success() {
        return Err(match serde_json::from_str::<ErrorResponse>(body) {
            Ok(ErrorResponse { error }) => {
                TranslationError::new(format!("Error {}: {}", error.code, error.message))
            }
            Err(_) => TranslationError::new(format!(
                "Error {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            )),
        });
    }

    serde_json::from_str::<TranslateResponse>(body)
        .map(|response| response.data.translations)
        .map_err(|e| TranslationError::new(format!("invalid translate response: {}", e)))
}
