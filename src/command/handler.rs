use lambda_http::http::{Method, StatusCode};
use lambda_http::{Body, Context, Error, Request, Response};
use tracing::{error, info, info_span, warn, Instrument};

use crate::config::Config;
use crate::slack;
use crate::translate::{Translator, TranslatorFactory};
use crate::types::{IncomingCommand, SlackResponse};

const COMMAND_PATH: &str = "/command";
const TARGET_LANGUAGE: &str = "en";

/// Serves `POST /command`: checks the shared token, translates the text and
/// answers with a Slack message.
pub struct CommandHandler<F> {
    token: String,
    signing_secret: Option<String>,
    translators: F,
}

impl<F: TranslatorFactory> CommandHandler<F> {
    pub fn new(config: &Config, translators: F) -> Self {
        Self {
            token: config.token.clone(),
            signing_secret: config.signing_secret.clone(),
            translators,
        }
    }

    pub async fn call(&self, event: Request) -> Result<Response<Body>, Error> {
        let request_id = event
            .extensions()
            .get::<Context>()
            .map(|ctx| ctx.request_id.clone())
            .unwrap_or_else(|| "-".to_string());

        self.route(event)
            .instrument(info_span!("command", request_id = %request_id))
            .await
    }

    async fn route(&self, event: Request) -> Result<Response<Body>, Error> {
        // API Gateway may prefix the stage name.
        if !event.uri().path().trim_end_matches('/').ends_with(COMMAND_PATH) {
            return empty(StatusCode::NOT_FOUND);
        }
        if *event.method() != Method::POST {
            return empty(StatusCode::METHOD_NOT_ALLOWED);
        }

        let body = String::from_utf8(event.body().to_vec()).unwrap_or_else(|e| {
            warn!("Request body is not valid UTF-8: {}", e);
            String::new()
        });

        if let Some(signing_secret) = &self.signing_secret {
            let header = |name: &str| {
                event
                    .headers()
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("")
            };
            let verified = slack::verify_slack_signature(
                signing_secret,
                &body,
                header("X-Slack-Request-Timestamp"),
                header("X-Slack-Signature"),
                u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default(),
            );
            if !verified {
                warn!("Invalid request signature");
                return empty(StatusCode::UNAUTHORIZED);
            }
        }

        let command = IncomingCommand::from_form(&body);
        if !slack::token_matches(&self.token, &command.token) {
            warn!("Invalid token");
            return empty(StatusCode::UNAUTHORIZED);
        }

        self.handle(command).await
    }

    async fn handle(&self, command: IncomingCommand) -> Result<Response<Body>, Error> {
        let translator = match self.translators.build() {
            Ok(translator) => translator,
            Err(e) => {
                error!("Error initialising translate service: {}", e);
                return empty(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };

        let message = match translator
            .translate(&command.text, TARGET_LANGUAGE)
            .await
        {
            Ok(translations) => {
                info!(count = translations.len(), "Translated command text");
                SlackResponse::translated(&command.text, &translations)
            }
            Err(e) => {
                error!("Error translating: {}", e);
                SlackResponse::error(&e)
            }
        };

        Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&message)?))?)
    }
}

fn empty(status: StatusCode) -> Result<Response<Body>, Error> {
    Ok(Response::builder().status(status).body(Body::Empty)?)
}
