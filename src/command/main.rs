mod config;
mod handler;
mod slack;
mod translate;
mod types;

use lambda_http::{run, service_fn, Error, Request};

use config::Config;
use handler::CommandHandler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .without_time()
        .init();

    let config = Config::from_env()?;
    let handler = CommandHandler::new(&config, config.translate.clone());
    let handler = &handler;

    run(service_fn(move |event: Request| async move {
        handler.call(event).await
    }))
    .await
}
