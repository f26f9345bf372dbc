//! Content Showcase
//!
//! Gallery, moderation and kiosk slideshow front end for a content moderation
//! backend. The server binary renders and hydrates the Dioxus app and forwards
//! the backend API; the `web` build is the WASM client.

use content_showcase::app::App;

#[cfg(not(feature = "server"))]
fn main() {
    dioxus::launch(App);
}

#[cfg(feature = "server")]
fn main() {
    use content_showcase::{api, app, config};
    use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Initialize logging
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "content_showcase=debug,tower_http=debug,axum::rejection=trace".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    tracing::info!("Starting Content Showcase");

    dioxus::serve(|| async move {
        // Load configuration
        let config = config::load_config()?;
        tracing::info!(?config, "Configuration loaded");

        let backend = config.backend_origin()?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        // Server-side rendering talks to the backend directly
        app::api::set_backend_origin(client.clone(), backend.clone());

        let state = api::AppState::new(client, backend, config.ui_settings());
        let router = dioxus::server::router(App)
            .merge(api::router(state))
            .layer(CorsLayer::permissive())
            .layer(CompressionLayer::new())
            .layer(TraceLayer::new_for_http());

        Ok(router)
    });
}
