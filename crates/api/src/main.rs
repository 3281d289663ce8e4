use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use desk_core::reference::ReferenceData;
use desk_core::render::render_company_page;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = desk_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let reference = match load_reference(&settings) {
        Ok(reference) => reference,
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "reference data load failed; serving built-in table");
            ReferenceData::builtin()
        }
    };

    let state = AppState {
        reference: Arc::new(reference),
    };

    let app = Router::new()
        .route("/", get(company_page))
        .route("/healthz", get(healthz))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn load_reference(settings: &desk_core::config::Settings) -> anyhow::Result<ReferenceData> {
    match settings.reference_data_path.as_deref() {
        Some(path) => ReferenceData::load(std::path::Path::new(path)),
        None => Ok(ReferenceData::builtin()),
    }
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Clone)]
struct AppState {
    reference: Arc<ReferenceData>,
}

#[derive(Debug, Deserialize)]
struct CompanyPageParams {
    symbol: Option<String>,
}

// Always answers 200 with a full page; unknown symbols render the degraded
// "not found" profile rather than an error status.
async fn company_page(
    State(state): State<AppState>,
    Query(params): Query<CompanyPageParams>,
) -> Html<String> {
    let requested = params.symbol.as_deref().unwrap_or("");
    let profile = state.reference.resolve(requested);
    let competitors = state.reference.competitors_for(&profile.symbol);

    tracing::info!(symbol = %profile.symbol, resolved = !profile.error, "company page");

    Html(render_company_page(&profile, competitors))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &desk_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
