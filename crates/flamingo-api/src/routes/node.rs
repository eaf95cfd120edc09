//! Node status endpoint

use axum::{extract::State, routing::get, Json, Router};

use crate::dto::NodeStatusResponse;
use crate::AppState;

/// Create node routes
pub fn router() -> Router<AppState> {
    Router::new().route("/status", get(get_status))
}

/// GET /node/status - Check the RPC node the engine reads reserves from
pub async fn get_status(State(state): State<AppState>) -> Json<NodeStatusResponse> {
    let client = state.node_client();
    let block_count = match client.block_count().await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::debug!(url = %client.config().url, "Node status check failed: {}", e);
            None
        }
    };

    Json(NodeStatusResponse {
        connected: block_count.is_some(),
        url: client.config().url.clone(),
        network: state.config().network.as_str().to_string(),
        block_count,
    })
}
