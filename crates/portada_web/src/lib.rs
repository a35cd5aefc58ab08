use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use portada_core::{Environment, Error, Result};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();
    let output = ServeDir::new(state.config.output_dir.clone());

    Router::new()
        .route("/health", get(handlers::health))
        .route("/generate-image", post(handlers::generate_image))
        .nest_service("/output", output)
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Bind and serve the control surface. Production terminates TLS with the
/// configured certificate; development speaks plain HTTP.
pub async fn serve(state: AppState) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let environment = state.config.environment;
    let tls_paths = match (&state.config.tls_cert_path, &state.config.tls_key_path) {
        (Some(cert), Some(key)) => Some((cert.clone(), key.clone())),
        _ => None,
    };
    let app = create_app(state).await;

    match (environment, tls_paths) {
        (Environment::Production, Some((cert, key))) => {
            tracing::info!(%addr, "Serving HTTPS");
            let tls = RustlsConfig::from_pem_file(cert, key).await?;
            axum_server::bind_rustls(addr, tls)
                .serve(app.into_make_service())
                .await?;
        }
        (Environment::Production, None) => {
            return Err(Error::Config(
                "production requires PORTADA_TLS_CERT and PORTADA_TLS_KEY".to_string(),
            ));
        }
        (Environment::Development, _) => {
            tracing::info!(%addr, "Serving HTTP");
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

pub mod prelude {
    pub use crate::AppState;
    pub use portada_core::{Error, Result};
}
