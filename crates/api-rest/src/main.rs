//! REST API server binary.
//!
//! ## Purpose
//! Runs the dental patient record API: environment loading, tracing
//! initialisation, MongoDB client construction, and the axum server.
//!
//! ## Environment Variables
//! - `MONGODB_URI`: connection string (required; startup-fatal if absent)
//! - `PORT`: listen port (default: 3000)
//! - `ODONTO_DB_NAME`: database name (default: "odonto")
//! - `ODONTO_ALLOWED_ORIGIN`: the single permitted CORS origin

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use odonto_core::{
    config::{DEFAULT_ALLOWED_ORIGIN, DEFAULT_DB_NAME},
    CoreConfig, MongoPatientStore, PatientService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mongodb_uri = std::env::var("MONGODB_URI").context("MONGODB_URI must be set")?;
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".into());
    let db_name = std::env::var("ODONTO_DB_NAME").unwrap_or_else(|_| DEFAULT_DB_NAME.into());
    let allowed_origin =
        std::env::var("ODONTO_ALLOWED_ORIGIN").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.into());

    let cfg = CoreConfig::new(mongodb_uri, db_name, allowed_origin)?;

    let store = MongoPatientStore::connect(&cfg).await?;
    // Connectivity problems are not fatal: requests fail with a
    // storage error until the deployment comes back.
    match store.ping().await {
        Ok(()) => tracing::info!("Connected to MongoDB"),
        Err(e) => tracing::warn!("MongoDB unreachable at startup: {e}"),
    }

    let service = PatientService::new(Arc::new(store));
    let app = router(AppState { service }, cfg.allowed_origin())?;

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("-- Starting Odonto REST API on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
