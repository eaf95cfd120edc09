//! Token Registry
//!
//! Read-only per-network token, pool and contract data, plus the NEO/bNEO
//! normalization helpers the router, pricing engine and invocation builder
//! share. The router contract only trades bNEO, so NEO is swapped for bNEO
//! before any contract-facing work.

use flamingo_core::{Network, Pool, ScriptHash, SwapError, Token};
use serde::{Deserialize, Serialize};

use crate::constants::{
    script_hashes, symbols, PoolSpec, TokenSpec, MAINNET_POOLS, MAINNET_TOKENS, TESTNET_POOLS,
    TESTNET_TOKENS,
};
use crate::state::SwapRoute;

/// Flamingo contract hashes for one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapScriptHashes {
    pub router: ScriptHash,
    pub factory: ScriptHash,
    pub pair_whitelist: ScriptHash,
}

/// Static swap data for one network
#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    network: Network,
    tokens: Vec<Token>,
    pools: Vec<Pool>,
    script_hashes: SwapScriptHashes,
    neo: Token,
    bneo: Token,
    gas: Token,
}

impl NetworkRegistry {
    /// Build the registry for a network from the bundled tables
    pub fn for_network(network: Network) -> Result<Self, SwapError> {
        let (tokens, pools, router) = match network {
            Network::Mainnet => (MAINNET_TOKENS, MAINNET_POOLS, script_hashes::MAINNET_ROUTER),
            Network::Testnet => (TESTNET_TOKENS, TESTNET_POOLS, script_hashes::TESTNET_ROUTER),
        };

        let script_hashes = SwapScriptHashes {
            router: parse_hash(router)?,
            factory: parse_hash(script_hashes::FACTORY)?,
            pair_whitelist: parse_hash(script_hashes::PAIR_WHITELIST)?,
        };

        Self::from_specs(network, tokens, pools, script_hashes)
    }

    /// Build a registry from explicit token and pool tables
    pub fn from_specs(
        network: Network,
        token_specs: &[TokenSpec],
        pool_specs: &[PoolSpec],
        script_hashes: SwapScriptHashes,
    ) -> Result<Self, SwapError> {
        let mut tokens: Vec<Token> = Vec::with_capacity(token_specs.len());
        for &(symbol, name, decimals, hash) in token_specs {
            if tokens.iter().any(|t| t.symbol == symbol) {
                return Err(SwapError::InvalidRegistry {
                    reason: format!("Duplicate token symbol {}", symbol),
                });
            }
            tokens.push(Token {
                symbol: symbol.to_string(),
                name: name.to_string(),
                decimals,
                hash: parse_hash(hash)?,
            });
        }

        let find = |symbol: &str| -> Result<Token, SwapError> {
            tokens
                .iter()
                .find(|t| t.symbol == symbol)
                .cloned()
                .ok_or_else(|| SwapError::UnknownToken {
                    symbol: symbol.to_string(),
                })
        };

        let pools = pool_specs
            .iter()
            .map(|&(symbol, decimals, hash, token_a, token_b)| {
                Ok(Pool {
                    symbol: symbol.to_string(),
                    decimals,
                    hash: parse_hash(hash)?,
                    tokens: [find(token_a)?, find(token_b)?],
                })
            })
            .collect::<Result<Vec<_>, SwapError>>()?;

        let neo = find(symbols::NEO)?;
        let bneo = find(symbols::BNEO)?;
        let gas = find(symbols::GAS)?;

        tracing::debug!(
            network = %network,
            tokens = tokens.len(),
            pools = pools.len(),
            "Loaded Flamingo registry"
        );

        Ok(Self {
            network,
            tokens,
            pools,
            script_hashes,
            neo,
            bneo,
            gas,
        })
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Tokens in registry order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Pools in registry order
    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    pub fn script_hashes(&self) -> &SwapScriptHashes {
        &self.script_hashes
    }

    pub fn token(&self, symbol: &str) -> Result<&Token, SwapError> {
        self.tokens
            .iter()
            .find(|t| t.symbol == symbol)
            .ok_or_else(|| SwapError::UnknownToken {
                symbol: symbol.to_string(),
            })
    }

    pub fn token_by_hash(&self, hash: &ScriptHash) -> Option<&Token> {
        self.tokens.iter().find(|t| &t.hash == hash)
    }

    pub fn pool(&self, symbol: &str) -> Result<&Pool, SwapError> {
        self.pools
            .iter()
            .find(|p| p.symbol == symbol)
            .ok_or_else(|| SwapError::UnknownPool {
                symbol: symbol.to_string(),
            })
    }

    pub fn neo(&self) -> &Token {
        &self.neo
    }

    pub fn bneo(&self) -> &Token {
        &self.bneo
    }

    pub fn gas(&self) -> &Token {
        &self.gas
    }

    pub fn is_neo(&self, token: &Token) -> bool {
        token.hash == self.neo.hash
    }

    pub fn is_bneo(&self, token: &Token) -> bool {
        token.hash == self.bneo.hash
    }

    // -----------------------------------------------------------------------
    // NEO normalization
    // -----------------------------------------------------------------------

    /// NEO becomes bNEO, every other token is returned as is
    pub fn override_token(&self, token: &Token) -> Token {
        if self.is_neo(token) {
            self.bneo.clone()
        } else {
            token.clone()
        }
    }

    /// Drop every hop that touches NEO
    pub fn override_route(&self, route: &[SwapRoute]) -> Vec<SwapRoute> {
        route
            .iter()
            .filter(|hop| !self.touches_neo(&hop.token_to_use, &hop.token_to_receive))
            .cloned()
            .collect()
    }

    /// Replace NEO with bNEO in a token path, then deduplicate
    pub fn override_route_path(&self, path: &[Token]) -> Vec<Token> {
        dedup_tokens(path.iter().map(|t| self.override_token(t)))
    }

    pub fn touches_neo(&self, a: &Token, b: &Token) -> bool {
        self.is_neo(a) || self.is_neo(b)
    }
}

/// Flatten priced hops into the token path they traverse
pub fn route_path(route: &[SwapRoute]) -> Vec<Token> {
    dedup_tokens(
        route
            .iter()
            .flat_map(|hop| [hop.token_to_use.clone(), hop.token_to_receive.clone()]),
    )
}

fn dedup_tokens(tokens: impl IntoIterator<Item = Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::new();
    for token in tokens {
        if !out.iter().any(|t| t.hash == token.hash) {
            out.push(token);
        }
    }
    out
}

fn parse_hash(hash: &str) -> Result<ScriptHash, SwapError> {
    ScriptHash::parse(hash).map_err(|reason| SwapError::InvalidRegistry { reason })
}
