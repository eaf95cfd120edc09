//! Flamingo Finance Swap Protocol Implementation
//!
//! This crate implements routing, pricing and invocation building for the
//! Flamingo AMM on Neo N3, including the NEO/bNEO wrap and unwrap legs.

pub mod calculator;
pub mod constants;
pub mod fetch;
pub mod graph;
pub mod invocation;
pub mod pricing;
pub mod registry;
pub mod router;
pub mod session;
pub mod state;

// Re-exports
pub use calculator::{calculate_input, calculate_output, format_units, parse_units};
pub use constants::{fees, operations, pools, script_hashes, symbols};
pub use fetch::{
    calculate_best_route, fetch_swap_route, parse_reserves, reserves_invocation, ReserveInvoker,
    ReservePair, ReserveQuery,
};
pub use graph::PoolGraph;
pub use invocation::{build_swap_invocation, SwapInvocationArgs, SwapInvocationKind, SwapShape};
pub use pricing::{calculate_swap_details, PricingInput};
pub use registry::{route_path, NetworkRegistry, SwapScriptHashes};
pub use router::{find_route, shortest_path};
pub use session::{recompute, AmountSide, SwapController, SwapState};
pub use state::{Quote, RouteHop, SwapAmount, SwapRoute};
