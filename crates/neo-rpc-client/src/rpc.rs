//! JSON-RPC 2.0 envelopes
//!
//! Request/response framing for single calls and batches.

use flamingo_core::NodeError;
use serde::{Deserialize, Serialize};

/// A JSON-RPC request
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'static str,
    pub params: serde_json::Value,
}

impl RpcRequest {
    pub fn new(id: u64, method: &'static str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

/// Error object returned by the node
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// A JSON-RPC response
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse<T> {
    #[serde(default)]
    pub id: Option<u64>,
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

impl<T> RpcResponse<T> {
    /// Unwrap the result, converting an RPC error object into `NodeError::Rpc`
    pub fn into_result(self) -> Result<T, NodeError> {
        if let Some(err) = self.error {
            return Err(NodeError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        self.result.ok_or_else(|| {
            NodeError::ParseError("Response carries neither result nor error".to_string())
        })
    }
}

/// Re-order batch responses to match request ids `0..expected`.
///
/// Nodes may answer a batch in any order, so ordering is restored by id.
pub fn order_batch_responses<T>(
    responses: Vec<RpcResponse<T>>,
    expected: usize,
) -> Result<Vec<T>, NodeError> {
    if responses.len() != expected {
        return Err(NodeError::ParseError(format!(
            "Batch returned {} responses for {} requests",
            responses.len(),
            expected
        )));
    }

    let mut slots: Vec<Option<T>> = (0..expected).map(|_| None).collect();
    for response in responses {
        let id = response
            .id
            .ok_or_else(|| NodeError::ParseError("Batch response without id".to_string()))?
            as usize;
        let slot = slots.get_mut(id).ok_or_else(|| {
            NodeError::ParseError(format!("Batch response id {} out of range", id))
        })?;
        if slot.is_some() {
            return Err(NodeError::ParseError(format!(
                "Duplicate batch response id {}",
                id
            )));
        }
        *slot = Some(response.into_result()?);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(id, slot)| {
            slot.ok_or_else(|| NodeError::ParseError(format!("Missing batch response id {}", id)))
        })
        .collect()
}
