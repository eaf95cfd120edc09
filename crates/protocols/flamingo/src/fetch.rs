//! Reserve Fetching
//!
//! Reads pool reserves from the Flamingo router and turns a hop list into a
//! priced [`SwapRoute`].

use async_trait::async_trait;
use flamingo_core::{ContractArg, ContractInvocation, ScriptHash, SwapError};
use neo_rpc_client::{InvokeResult, NeoRpcClient};

use crate::constants::operations;
use crate::graph::PoolGraph;
use crate::registry::NetworkRegistry;
use crate::router::find_route;
use crate::state::{RouteHop, SwapRoute};

/// One `getReserves` lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveQuery {
    pub token_to_receive: ScriptHash,
    pub token_to_use: ScriptHash,
}

/// Reserves returned for a [`ReserveQuery`], base units as decimal strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservePair {
    pub reserve_token_to_receive: String,
    pub reserve_token_to_use: String,
}

/// Source of pool reserves.
///
/// Results must come back in query order.
#[async_trait]
pub trait ReserveInvoker: Send + Sync {
    async fn get_reserves(
        &self,
        router: &ScriptHash,
        queries: &[ReserveQuery],
    ) -> Result<Vec<ReservePair>, SwapError>;
}

#[async_trait]
impl ReserveInvoker for NeoRpcClient {
    async fn get_reserves(
        &self,
        router: &ScriptHash,
        queries: &[ReserveQuery],
    ) -> Result<Vec<ReservePair>, SwapError> {
        let invocations: Vec<ContractInvocation> = queries
            .iter()
            .map(|query| reserves_invocation(router, query))
            .collect();

        let results = self.invoke_functions(&invocations).await?;
        results.iter().map(parse_reserves).collect()
    }
}

/// `getReserves(token_to_receive, token_to_use)` on the router
pub fn reserves_invocation(router: &ScriptHash, query: &ReserveQuery) -> ContractInvocation {
    ContractInvocation {
        script_hash: router.clone(),
        operation: operations::GET_RESERVES.to_string(),
        args: vec![
            ContractArg::hash160(query.token_to_receive.as_str()),
            ContractArg::hash160(query.token_to_use.as_str()),
        ],
    }
}

/// Read `Array[Integer, Integer]` from a halted invocation.
///
/// Element 0 is the reserve of the token to receive, element 1 the reserve
/// of the token to use.
pub fn parse_reserves(result: &InvokeResult) -> Result<ReservePair, SwapError> {
    let invalid = |reason: String| SwapError::InvalidReserves { reason };

    if !result.is_halt() {
        return Err(invalid(format!(
            "VM state {} ({})",
            result.state,
            result.exception.as_deref().unwrap_or("no exception")
        )));
    }

    let [item] = result.stack.as_slice() else {
        return Err(invalid(format!(
            "expected one stack item, got {}",
            result.stack.len()
        )));
    };

    let values = item
        .as_array()
        .ok_or_else(|| invalid(format!("expected Array, got {}", item.item_type)))?;

    match values.as_slice() {
        [receive, use_] => {
            let reserve_token_to_receive = receive
                .as_integer()
                .ok_or_else(|| invalid("reserve 0 is not an Integer".to_string()))?;
            let reserve_token_to_use = use_
                .as_integer()
                .ok_or_else(|| invalid("reserve 1 is not an Integer".to_string()))?;
            Ok(ReservePair {
                reserve_token_to_receive,
                reserve_token_to_use,
            })
        }
        other => Err(invalid(format!("expected 2 reserves, got {}", other.len()))),
    }
}

/// Attach reserves to every hop.
///
/// NEO hops are not known to the router and get `"0"` on both sides. When
/// no other hop remains, nothing is sent to the invoker.
pub async fn fetch_swap_route<I: ReserveInvoker + ?Sized>(
    invoker: &I,
    registry: &NetworkRegistry,
    hops: &[RouteHop],
) -> Result<Vec<SwapRoute>, SwapError> {
    let queries: Vec<ReserveQuery> = hops
        .iter()
        .filter(|hop| !registry.touches_neo(&hop.token_to_use, &hop.token_to_receive))
        .map(|hop| ReserveQuery {
            token_to_receive: hop.token_to_receive.hash.clone(),
            token_to_use: hop.token_to_use.hash.clone(),
        })
        .collect();

    let reserves = if queries.is_empty() {
        Vec::new()
    } else {
        invoker
            .get_reserves(&registry.script_hashes().router, &queries)
            .await?
    };

    if reserves.len() != queries.len() {
        return Err(SwapError::InvalidReserves {
            reason: format!(
                "expected {} reserve pairs, got {}",
                queries.len(),
                reserves.len()
            ),
        });
    }

    let mut reserves = reserves.into_iter();
    let mut route = Vec::with_capacity(hops.len());
    for hop in hops {
        if registry.touches_neo(&hop.token_to_use, &hop.token_to_receive) {
            route.push(SwapRoute::synthetic(hop));
            continue;
        }
        let pair = reserves.next().ok_or_else(|| SwapError::InvalidReserves {
            reason: "reserve list ended early".to_string(),
        })?;
        route.push(SwapRoute {
            token_to_use: hop.token_to_use.clone(),
            reserve_token_to_use: pair.reserve_token_to_use,
            token_to_receive: hop.token_to_receive.clone(),
            reserve_token_to_receive: pair.reserve_token_to_receive,
        });
    }

    tracing::debug!(hops = hops.len(), queried = queries.len(), "Fetched swap route");

    Ok(route)
}

/// Find the shortest route between two symbols and price it with live reserves
pub async fn calculate_best_route<I: ReserveInvoker + ?Sized>(
    invoker: &I,
    registry: &NetworkRegistry,
    graph: &PoolGraph,
    use_symbol: &str,
    receive_symbol: &str,
) -> Result<Vec<SwapRoute>, SwapError> {
    let hops = find_route(registry, graph, use_symbol, receive_symbol)?;
    if hops.is_empty() {
        return Ok(Vec::new());
    }
    fetch_swap_route(invoker, registry, &hops).await
}
