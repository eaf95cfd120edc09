//! Background block watcher
//!
//! Polls the Neo node for its block height and refreshes the shared swap
//! session whenever a new block arrives, so quotes track live reserves.

use std::time::Duration;

use flamingo::{ReserveInvoker, SwapController};
use flamingo_api::AppState;
use tokio::task::JoinHandle;

/// Tracks the last block height seen
#[derive(Debug, Default)]
pub struct BlockWatcher {
    last_height: Option<u64>,
}

impl BlockWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a polled height. Returns true when it is above every height seen so far.
    pub fn observe(&mut self, height: u64) -> bool {
        match self.last_height {
            Some(last) if height <= last => false,
            _ => {
                self.last_height = Some(height);
                true
            }
        }
    }

    /// Refresh the session's reserves if `height` is a new block
    pub async fn on_height(
        &mut self,
        height: u64,
        session: &SwapController<dyn ReserveInvoker>,
    ) -> bool {
        if !self.observe(height) {
            return false;
        }

        tracing::debug!(height, "New block, refreshing swap reserves");
        if let Err(e) = session.refresh_reserves().await {
            tracing::warn!(height, "Failed to refresh swap reserves: {}", e);
        }
        true
    }
}

/// Start the poll loop on the runtime
pub fn spawn(state: AppState, poll_secs: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut watcher = BlockWatcher::new();
        let interval = Duration::from_secs(poll_secs);
        tracing::info!(poll_secs, "Block watcher started");

        loop {
            match state.node_client().block_count().await {
                Ok(height) => {
                    watcher.on_height(height, state.session()).await;
                }
                Err(e) => {
                    tracing::warn!(url = %state.config().node.url, "Block height poll failed: {}", e);
                }
            }
            tokio::time::sleep(interval).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use flamingo::{NetworkRegistry, PoolGraph, ReservePair, ReserveQuery};
    use flamingo_core::{Network, ScriptHash, SwapConfig, SwapError};

    use super::*;

    /// Constant reserves that count how often they are read
    #[derive(Default)]
    struct CountingInvoker {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ReserveInvoker for CountingInvoker {
        async fn get_reserves(
            &self,
            _router: &ScriptHash,
            queries: &[ReserveQuery],
        ) -> Result<Vec<ReservePair>, SwapError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(queries
                .iter()
                .map(|_| ReservePair {
                    reserve_token_to_receive: "8200000000000".to_string(),
                    reserve_token_to_use: "500000000000000".to_string(),
                })
                .collect())
        }
    }

    #[test]
    fn test_observe_only_advances() {
        let mut watcher = BlockWatcher::new();
        assert!(watcher.observe(100));
        assert!(!watcher.observe(100));
        assert!(!watcher.observe(99));
        assert!(watcher.observe(101));
        assert!(!watcher.observe(100));
    }

    #[tokio::test]
    async fn test_new_block_refreshes_session() {
        let registry = Arc::new(NetworkRegistry::for_network(Network::Mainnet).unwrap());
        let graph = Arc::new(PoolGraph::build(&registry).unwrap());
        let invoker = Arc::new(CountingInvoker::default());
        let dyn_invoker: Arc<dyn ReserveInvoker> = invoker.clone();
        let session = SwapController::new(dyn_invoker, registry, graph, &SwapConfig::default());

        session.set_token_to_use(Some("FLM")).await.unwrap();
        session.set_token_to_receive(Some("GAS")).await.unwrap();
        let before = invoker.calls.load(Ordering::SeqCst);

        let mut watcher = BlockWatcher::new();
        assert!(watcher.on_height(500, &session).await);
        assert!(!watcher.on_height(500, &session).await);
        assert!(watcher.on_height(501, &session).await);

        assert_eq!(invoker.calls.load(Ordering::SeqCst), before + 2);
        assert_eq!(session.state().await.route.len(), 1);
    }
}
