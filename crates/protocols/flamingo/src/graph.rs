//! Pool Graph
//!
//! Undirected token adjacency derived from the pool list. Neighbour order
//! follows registry order so route discovery is deterministic.

use std::collections::HashMap;

use flamingo_core::{Pool, SwapError, Token};

use crate::constants::symbols;
use crate::registry::NetworkRegistry;

/// Token symbol to ordered, deduplicated neighbour symbols
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolGraph {
    order: Vec<String>,
    adjacency: HashMap<String, Vec<String>>,
}

impl PoolGraph {
    /// Build the graph for a registry
    pub fn build(registry: &NetworkRegistry) -> Result<Self, SwapError> {
        Self::from_parts(registry.tokens(), registry.pools())
    }

    /// Build the graph from raw token and pool lists.
    ///
    /// Every token starts with no neighbours. NEO is then linked only to
    /// bNEO, and bNEO gains NEO as its last neighbour.
    pub fn from_parts(tokens: &[Token], pools: &[Pool]) -> Result<Self, SwapError> {
        let mut graph = Self::default();
        for token in tokens {
            if !graph.adjacency.contains_key(&token.symbol) {
                graph.order.push(token.symbol.clone());
                graph.adjacency.insert(token.symbol.clone(), Vec::new());
            }
        }

        for pool in pools {
            let [a, b] = &pool.tokens;
            graph.link(&a.symbol, &b.symbol)?;
            graph.link(&b.symbol, &a.symbol)?;
        }

        if graph.adjacency.contains_key(symbols::NEO) && graph.adjacency.contains_key(symbols::BNEO)
        {
            graph
                .adjacency
                .insert(symbols::NEO.to_string(), vec![symbols::BNEO.to_string()]);
            graph.link(symbols::BNEO, symbols::NEO)?;
        }

        tracing::debug!(
            tokens = graph.order.len(),
            pools = pools.len(),
            "Built pool graph"
        );

        Ok(graph)
    }

    /// Neighbours of a token, empty for unknown symbols
    pub fn neighbours(&self, symbol: &str) -> &[String] {
        self.adjacency
            .get(symbol)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.adjacency.contains_key(symbol)
    }

    /// Every symbol in the graph, in registry order
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn link(&mut self, from: &str, to: &str) -> Result<(), SwapError> {
        if !self.adjacency.contains_key(to) {
            return Err(SwapError::UnknownToken {
                symbol: to.to_string(),
            });
        }
        let neighbours = self
            .adjacency
            .get_mut(from)
            .ok_or_else(|| SwapError::UnknownToken {
                symbol: from.to_string(),
            })?;
        if !neighbours.iter().any(|n| n == to) {
            neighbours.push(to.to_string());
        }
        Ok(())
    }
}
