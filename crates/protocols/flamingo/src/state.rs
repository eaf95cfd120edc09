//! Flamingo State Types
//!
//! Route, amount and quote structures shared by the router, pricing engine
//! and invocation builder.

use flamingo_core::Token;
use serde::{Deserialize, Serialize};

/// One directed edge of a token path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteHop {
    pub token_to_use: Token,
    pub token_to_receive: Token,
}

/// A route hop with the pool reserves backing it.
///
/// Reserves are base-unit integers as decimal strings. The synthetic
/// NEO/bNEO hop carries `"0"` on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRoute {
    pub token_to_use: Token,
    pub reserve_token_to_use: String,
    pub token_to_receive: Token,
    pub reserve_token_to_receive: String,
}

impl SwapRoute {
    /// Hop with zero reserves, used for the NEO/bNEO leg
    pub fn synthetic(hop: &RouteHop) -> Self {
        Self {
            token_to_use: hop.token_to_use.clone(),
            reserve_token_to_use: "0".to_string(),
            token_to_receive: hop.token_to_receive.clone(),
            reserve_token_to_receive: "0".to_string(),
        }
    }

    pub fn hop(&self) -> RouteHop {
        RouteHop {
            token_to_use: self.token_to_use.clone(),
            token_to_receive: self.token_to_receive.clone(),
        }
    }
}

/// The side of the trade the user fixed, in display units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "amount", rename_all = "snake_case")]
pub enum SwapAmount {
    ToUse(String),
    ToReceive(String),
}

impl SwapAmount {
    pub fn value(&self) -> &str {
        match self {
            Self::ToUse(v) | Self::ToReceive(v) => v,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value().trim().is_empty()
    }
}

/// Priced swap details, all amounts in display units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub amount_to_use_to_display: String,
    pub amount_to_receive_to_display: String,
    pub liquidity_provider_fee: String,
    pub price_impact: Option<String>,
    pub price_inverse: Option<String>,
    pub minimum_received: Option<String>,
    pub maximum_selling: Option<String>,
}
