mod app;
mod auth;
mod config;
mod error;
mod handlers;
mod influx;
mod line_protocol;
mod models;
mod state;

use relay_common::{bind_listener, init_tracing, shutdown_signal};

use crate::config::RelayConfig;
use crate::influx::InfluxWriter;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    let _guards = init_tracing("ingest-service");

    let config = RelayConfig::from_env();
    config.log_startup();

    let writer = InfluxWriter::new(&config.influx).expect("influx client");
    let port = config.port;
    let state = AppState::new(config, writer);

    let app = app::build_router(state);
    let listener = bind_listener(port).await;
    tracing::info!(port, "ingest relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("serve");
}
