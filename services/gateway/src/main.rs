use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, warn};

use oracle_gateway::state::AppState;
use oracle_gateway_core::{logging, GatewayConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = GatewayConfig::from_env();

    // Single-endpoint deployments refuse to serve half-configured.
    if GatewayConfig::downstream_required() {
        if let Err(err) = config.require_downstream() {
            error!("{err}");
            return Err(err.into());
        }
    }

    match &config.downstream_url {
        Some(url) => info!("forwarding events to downstream prover at {url}"),
        None => warn!("PRIVATE_ORACLE_URL not set; serving in local fallback mode"),
    }

    let port = config.port;
    let state = Arc::new(AppState::new(config)?);
    let app = oracle_gateway::build_router(state);

    let bind_addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("oracle gateway listening on {bind_addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
