//! Application state shared across API handlers

use std::sync::Arc;

use flamingo::{NetworkRegistry, PoolGraph, ReserveInvoker, SwapController};
use flamingo_core::{AppConfig, Error};
use neo_rpc_client::NeoRpcClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    node_client: NeoRpcClient,
    invoker: Arc<dyn ReserveInvoker>,
    registry: Arc<NetworkRegistry>,
    graph: Arc<PoolGraph>,
    session: SwapController<dyn ReserveInvoker>,
}

impl AppState {
    /// Create state for the configured network, reading reserves from the node
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        let node_client = NeoRpcClient::new(config.node.clone())?;
        let invoker: Arc<dyn ReserveInvoker> = Arc::new(node_client.clone());
        Self::with_invoker(config, node_client, invoker)
    }

    /// Create state with a custom reserve source
    pub fn with_invoker(
        config: AppConfig,
        node_client: NeoRpcClient,
        invoker: Arc<dyn ReserveInvoker>,
    ) -> Result<Self, Error> {
        let registry = Arc::new(NetworkRegistry::for_network(config.network)?);
        let graph = Arc::new(PoolGraph::build(&registry)?);
        let session = SwapController::new(
            Arc::clone(&invoker),
            Arc::clone(&registry),
            Arc::clone(&graph),
            &config.swap,
        );

        tracing::info!(
            network = %config.network,
            node = %config.node.url,
            tokens = registry.tokens().len(),
            pools = registry.pools().len(),
            "Swap engine state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                node_client,
                invoker,
                registry,
                graph,
                session,
            }),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn node_client(&self) -> &NeoRpcClient {
        &self.inner.node_client
    }

    pub fn invoker(&self) -> &dyn ReserveInvoker {
        self.inner.invoker.as_ref()
    }

    pub fn registry(&self) -> &NetworkRegistry {
        &self.inner.registry
    }

    pub fn graph(&self) -> &PoolGraph {
        &self.inner.graph
    }

    /// The shared swap session
    pub fn session(&self) -> &SwapController<dyn ReserveInvoker> {
        &self.inner.session
    }
}
