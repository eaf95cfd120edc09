//! Data Transfer Objects for API requests and responses

use axum::{http::StatusCode, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use flamingo::{Quote, SwapAmount, SwapInvocationArgs, SwapRoute, SwapShape, SwapState};
use flamingo_core::{ContractInvocationMulti, Network, SwapError, Token};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Node status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeStatusResponse {
    pub connected: bool,
    pub url: String,
    pub network: String,
    /// Chain height plus one, when the node answered
    pub block_count: Option<u64>,
}

/// Swappable tokens on the configured network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokensResponse {
    pub network: Network,
    pub tokens: Vec<Token>,
}

/// Token pair to route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    pub token_to_use: String,
    pub token_to_receive: String,
    /// Must match the server's network when set
    #[serde(default)]
    pub network: Option<Network>,
}

/// Route with live reserves. Empty when the pair is not swappable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    pub swappable: bool,
    /// Token symbols along the route, NEO legs included
    pub path: Vec<String>,
    pub route: Vec<SwapRoute>,
}

impl RouteResponse {
    pub fn new(route: Vec<SwapRoute>) -> Self {
        let path = flamingo::route_path(&route)
            .into_iter()
            .map(|token| token.symbol)
            .collect();
        Self {
            swappable: !route.is_empty(),
            path,
            route,
        }
    }
}

/// Quote request. Exactly one of the two amounts must be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub token_to_use: String,
    pub token_to_receive: String,
    #[serde(default)]
    pub amount_to_use: Option<String>,
    #[serde(default)]
    pub amount_to_receive: Option<String>,
    /// Fraction; the configured default applies when absent
    #[serde(default)]
    pub slippage: Option<Decimal>,
    #[serde(default)]
    pub network: Option<Network>,
}

impl QuoteRequest {
    /// The fixed side of the trade
    pub fn amount(&self) -> Result<SwapAmount, SwapError> {
        let set = |value: &Option<String>| {
            value
                .as_ref()
                .filter(|v| !v.trim().is_empty())
                .cloned()
        };
        match (set(&self.amount_to_use), set(&self.amount_to_receive)) {
            (Some(amount), None) => Ok(SwapAmount::ToUse(amount)),
            (None, Some(amount)) => Ok(SwapAmount::ToReceive(amount)),
            (None, None) => Err(SwapError::MissingParameter {
                name: "amount_to_use",
            }),
            (Some(_), Some(_)) => Err(SwapError::InvalidAmount {
                message: "set either amount_to_use or amount_to_receive, not both".to_string(),
            }),
        }
    }

    pub fn route_request(&self) -> RouteRequest {
        RouteRequest {
            token_to_use: self.token_to_use.clone(),
            token_to_receive: self.token_to_receive.clone(),
            network: self.network,
        }
    }
}

/// Route and quote. `quote` is absent when the pair is not swappable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub route: RouteResponse,
    pub slippage: Decimal,
    pub quote: Option<Quote>,
}

/// Quote request plus the signer and an optional deadline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationRequest {
    #[serde(flatten)]
    pub quote: QuoteRequest,
    pub address: String,
    /// Milliseconds since the Unix epoch; defaults to now plus the configured minutes
    #[serde(default)]
    pub deadline: Option<String>,
}

/// Priced swap and the bundle to sign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationResponse {
    pub shape: SwapShape,
    pub quote: Quote,
    pub args: SwapInvocationArgs,
    pub invocation: ContractInvocationMulti,
}

/// Partial update of the shared session.
///
/// Absent fields are left alone; an empty string clears a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionUpdateRequest {
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub token_to_use: Option<String>,
    #[serde(default)]
    pub token_to_receive: Option<String>,
    #[serde(default)]
    pub amount_to_use: Option<String>,
    #[serde(default)]
    pub amount_to_receive: Option<String>,
    #[serde(default)]
    pub slippage: Option<Decimal>,
    #[serde(default)]
    pub deadline_minutes: Option<u64>,
}

/// Bundle built from the shared session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInvocationResponse {
    pub shape: SwapShape,
    pub args: SwapInvocationArgs,
    pub invocation: ContractInvocationMulti,
}

/// Session snapshot
pub type SessionResponse = SwapState;

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }
}

impl From<&SwapError> for ApiError {
    fn from(err: &SwapError) -> Self {
        Self::new(err.error_code(), err.to_string())
    }
}

/// Handler result carrying the error body and status
pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

/// Map an engine error to its HTTP status and body
pub fn swap_error(err: SwapError) -> (StatusCode, Json<ApiError>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        tracing::warn!(code = err.error_code(), "Swap request failed: {}", err);
    }
    (status, Json(ApiError::from(&err)))
}
