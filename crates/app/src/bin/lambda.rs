//! Castwright - AWS Lambda Runtime

use lambda_http::{run, Error};
use tower_http::trace::TraceLayer;
use tracing::info;

use castwright_app::{body_limit_layer, build_cors_layer, create_app, Providers};
use castwright_common::config::Config;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .without_time()
        .init();

    info!("Initializing Castwright Lambda");

    let config = Config::from_env_with_defaults(Config::lambda_defaults())
        .map_err(|e| Error::from(format!("Configuration error: {}", e)))?;

    let providers = Providers::from_env()
        .map_err(|e| Error::from(format!("Provider configuration error: {}", e)))?;

    let app = create_app(&config, providers)
        .await
        .map_err(|e| Error::from(format!("App initialization error: {}", e)))?;

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(config.cors_allowed_origins.as_deref()))
        .layer(body_limit_layer(config.max_body_bytes));

    info!("Castwright Lambda ready to serve requests");

    run(app).await
}
