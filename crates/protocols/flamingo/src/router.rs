//! Route Finder
//!
//! Breadth-first search over the pool graph. Routes are optimal in hop
//! count, not in price.

use std::collections::{HashMap, HashSet, VecDeque};

use flamingo_core::SwapError;

use crate::graph::PoolGraph;
use crate::registry::NetworkRegistry;
use crate::state::RouteHop;

/// Shortest symbol path from `source` to `destination`.
///
/// Returns an empty path when the tokens are equal or not connected.
pub fn shortest_path(graph: &PoolGraph, source: &str, destination: &str) -> Vec<String> {
    if source == destination || !graph.contains(source) || !graph.contains(destination) {
        return Vec::new();
    }

    let mut visited: HashSet<&str> = HashSet::from([source]);
    let mut previous: HashMap<&str, &str> = HashMap::new();
    let mut queue: VecDeque<&str> = VecDeque::from([source]);
    let mut found = false;

    'search: while let Some(current) = queue.pop_front() {
        for next in graph.neighbours(current) {
            let next = next.as_str();
            if !visited.insert(next) {
                continue;
            }
            previous.insert(next, current);
            if next == destination {
                found = true;
                break 'search;
            }
            queue.push_back(next);
        }
    }

    if !found {
        return Vec::new();
    }

    let mut path = vec![destination.to_string()];
    let mut cursor = destination;
    while let Some(&prev) = previous.get(cursor) {
        path.push(prev.to_string());
        cursor = prev;
    }
    path.reverse();
    path
}

/// Resolve symbols and find the hop list between two tokens.
///
/// Unknown symbols are an error. Unreachable pairs yield an empty route.
pub fn find_route(
    registry: &NetworkRegistry,
    graph: &PoolGraph,
    use_symbol: &str,
    receive_symbol: &str,
) -> Result<Vec<RouteHop>, SwapError> {
    registry.token(use_symbol)?;
    registry.token(receive_symbol)?;

    let path = shortest_path(graph, use_symbol, receive_symbol);
    let tokens = path
        .iter()
        .map(|symbol| registry.token(symbol).cloned())
        .collect::<Result<Vec<_>, _>>()?;

    let hops: Vec<RouteHop> = tokens
        .windows(2)
        .map(|pair| RouteHop {
            token_to_use: pair[0].clone(),
            token_to_receive: pair[1].clone(),
        })
        .collect();

    tracing::debug!(
        from = use_symbol,
        to = receive_symbol,
        hops = hops.len(),
        "Route search finished"
    );

    Ok(hops)
}
