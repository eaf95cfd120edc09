//! neo-rpc-client: Neo N3 JSON-RPC client
//!
//! Provides read-only contract invocation against a Neo node, including
//! batching several `invokefunction` calls into a single HTTP round trip.

pub mod rpc;
pub mod stack;

use std::sync::Arc;

use flamingo_core::{ContractInvocation, NodeConfig, NodeError};
use serde::de::DeserializeOwned;

pub use rpc::{order_batch_responses, RpcErrorObject, RpcRequest, RpcResponse};
pub use stack::{InvokeResult, StackItem, VM_STATE_HALT};

/// Default timeout for node RPC calls (30 seconds).
/// Long enough for slow nodes, short enough to avoid perpetual spinners.
const NODE_REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Result type for node client operations
pub type Result<T> = std::result::Result<T, NodeError>;

/// Neo N3 RPC client
#[derive(Clone)]
pub struct NeoRpcClient {
    http: Arc<reqwest::Client>,
    config: NodeConfig,
}

impl NeoRpcClient {
    /// Create a new client. No request is sent until the first call.
    pub fn new(config: NodeConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("flamingo-swap")
            .build()
            .map_err(|e| NodeError::Unreachable {
                url: format!("{}: {}", config.url, e),
            })?;

        Ok(Self {
            http: Arc::new(http),
            config,
        })
    }

    /// Get the current node configuration
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Get current block count (chain height + 1)
    pub async fn block_count(&self) -> Result<u64> {
        self.call("getblockcount", serde_json::json!([])).await
    }

    /// Check if node is online
    pub async fn is_online(&self) -> bool {
        self.block_count().await.is_ok()
    }

    /// Test-invoke a single contract operation
    pub async fn invoke_function(&self, invocation: &ContractInvocation) -> Result<InvokeResult> {
        self.call("invokefunction", invoke_params(invocation)?).await
    }

    /// Test-invoke several operations in one batched request.
    ///
    /// Results are returned in the same order as `invocations`.
    pub async fn invoke_functions(
        &self,
        invocations: &[ContractInvocation],
    ) -> Result<Vec<InvokeResult>> {
        if invocations.is_empty() {
            return Ok(Vec::new());
        }

        let requests = invocations
            .iter()
            .enumerate()
            .map(|(id, inv)| Ok(RpcRequest::new(id as u64, "invokefunction", invoke_params(inv)?)))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            url = %self.config.url,
            count = requests.len(),
            "Sending batched invokefunction"
        );

        let responses: Vec<RpcResponse<InvokeResult>> = self.post(&requests).await?;
        order_batch_responses(responses, invocations.len())
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    async fn call<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: serde_json::Value,
    ) -> Result<T> {
        let request = RpcRequest::new(0, method, params);
        let response: RpcResponse<T> = self.post(&request).await?;
        response.into_result()
    }

    async fn post<B: serde::Serialize, T: DeserializeOwned>(&self, body: &B) -> Result<T> {
        let response = timed_request(self.http.post(&self.config.url).json(body).send()).await?;

        if !response.status().is_success() {
            return Err(NodeError::ApiError {
                message: format!("Node responded with HTTP {}", response.status()),
            });
        }

        timed_request(response.json::<T>()).await.map_err(|e| {
            tracing::warn!(url = %self.config.url, "Failed to decode RPC response: {}", e);
            NodeError::ParseError(e.to_string())
        })
    }
}

fn invoke_params(invocation: &ContractInvocation) -> Result<serde_json::Value> {
    let args = serde_json::to_value(&invocation.args)
        .map_err(|e| NodeError::ParseError(format!("Failed to encode args: {}", e)))?;
    Ok(serde_json::json!([
        invocation.script_hash.as_str(),
        invocation.operation,
        args
    ]))
}

/// Wrap a node call with a timeout. Converts both timeout and transport errors to NodeError.
async fn timed_request<T, E: std::fmt::Display>(
    fut: impl std::future::Future<Output = std::result::Result<T, E>>,
) -> Result<T> {
    tokio::time::timeout(NODE_REQUEST_TIMEOUT, fut)
        .await
        .map_err(|_| NodeError::ApiError {
            message: format!(
                "Node request timed out after {}s",
                NODE_REQUEST_TIMEOUT.as_secs()
            ),
        })?
        .map_err(|e| NodeError::ApiError {
            message: e.to_string(),
        })
}
