//! Error types for the Flamingo swap engine

use thiserror::Error;

/// Core errors that can occur in the swap engine
#[derive(Debug, Error)]
pub enum Error {
    #[error("Node error: {0}")]
    Node(#[from] NodeError),

    #[error("Swap error: {0}")]
    Swap(#[from] SwapError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// RPC node connection and query errors
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("Node unreachable at {url}")]
    Unreachable { url: String },

    #[error("Node returned error: {message}")]
    ApiError { message: String },

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Swap engine errors
#[derive(Debug, Error)]
pub enum SwapError {
    #[error("Swap not available on {network}")]
    NetworkNotSupported { network: String },

    #[error("Unknown token: {symbol}")]
    UnknownToken { symbol: String },

    #[error("Unknown pool: {symbol}")]
    UnknownPool { symbol: String },

    #[error("Invalid registry data: {reason}")]
    InvalidRegistry { reason: String },

    #[error("Invalid reserves response: {reason}")]
    InvalidReserves { reason: String },

    #[error("Required parameter is not set: {name}")]
    MissingParameter { name: &'static str },

    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    #[error("Insufficient liquidity: requested {requested}, pool holds {available}")]
    InsufficientLiquidity { requested: String, available: String },

    #[error("Reserve query failed: {0}")]
    Node(#[from] NodeError),
}

/// Result type alias for swap engine operations
pub type Result<T> = std::result::Result<T, Error>;

impl SwapError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NetworkNotSupported { .. } => "network_not_supported",
            Self::UnknownToken { .. } => "unknown_token",
            Self::UnknownPool { .. } => "unknown_pool",
            Self::InvalidRegistry { .. } => "invalid_registry",
            Self::InvalidReserves { .. } => "invalid_reserves",
            Self::MissingParameter { .. } => "missing_parameter",
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::InsufficientLiquidity { .. } => "insufficient_liquidity",
            Self::Node(_) => "node_error",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount { .. } | Self::MissingParameter { .. } => 400,
            Self::UnknownToken { .. } | Self::UnknownPool { .. } => 404,
            Self::NetworkNotSupported { .. } | Self::InsufficientLiquidity { .. } => 422,
            Self::InvalidRegistry { .. } => 500,
            Self::InvalidReserves { .. } => 502,
            Self::Node(_) => 503,
        }
    }
}
