//! Swap API server: middleware stack, bind address and lifecycle

use std::future::Future;
use std::net::SocketAddr;

use axum::http::Method;
use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::routes::create_router;
use crate::AppState;

/// Swap routes behind request tracing and a browser CORS policy.
///
/// Wallet frontends call the API cross-origin, so any origin may read it,
/// but only the verbs the routes serve are allowed.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Loopback address the API listens on
pub fn api_addr(port: u16) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], port))
}

/// Serve the swap API on the configured port until `shutdown` resolves
pub async fn start_server<F>(state: AppState, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let network = state.registry().network();
    let addr = api_addr(state.config().api_port);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%network, %addr, "Swap API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!(%network, "Swap API stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use flamingo_core::{AppConfig, NodeConfig};
    use neo_rpc_client::NeoRpcClient;
    use tower::ServiceExt;

    use super::*;
    use crate::routes::test_support::{test_state, PoolReserves};

    #[test]
    fn test_api_addr_is_loopback() {
        let addr = api_addr(10340);
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 10340);
    }

    #[tokio::test]
    async fn test_preflight_allows_post_from_any_origin() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/swap/quote")
            .header(header::ORIGIN, "https://wallet.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = create_app(test_state()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
        assert!(methods.contains("GET"));
        assert!(methods.contains("POST"));
        assert!(!methods.contains("DELETE"));
    }

    #[tokio::test]
    async fn test_server_stops_on_shutdown_signal() {
        let config = AppConfig {
            node: NodeConfig {
                url: "http://127.0.0.1:1".to_string(),
            },
            api_port: 0,
            ..AppConfig::default()
        };
        let client = NeoRpcClient::new(config.node.clone()).unwrap();
        let state =
            AppState::with_invoker(config, client, Arc::new(PoolReserves::default())).unwrap();

        let result = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            start_server(state, async {}),
        )
        .await;

        assert!(matches!(result, Ok(Ok(()))));
    }
}
