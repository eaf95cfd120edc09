//! Core type definitions for the Flamingo swap engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Contract script hash (20 bytes, hex-encoded, `0x`-prefixed, lowercase)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScriptHash(String);

impl ScriptHash {
    /// Parse a script hash, accepting it with or without the `0x` prefix.
    pub fn parse(hash: &str) -> Result<Self, String> {
        let body = hash
            .strip_prefix("0x")
            .or_else(|| hash.strip_prefix("0X"))
            .unwrap_or(hash);
        let bytes = hex::decode(body).map_err(|e| format!("Invalid script hash {}: {}", hash, e))?;
        if bytes.len() != 20 {
            return Err(format!(
                "Invalid script hash {}: expected 20 bytes, got {}",
                hash,
                bytes.len()
            ));
        }
        Ok(Self(format!("0x{}", body.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ScriptHash {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ScriptHash> for String {
    fn from(hash: ScriptHash) -> Self {
        hash.0
    }
}

impl fmt::Display for ScriptHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Neo N3 address (Base58, starts with 'N')
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Network type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            other => Err(format!("Unknown network: {}", other)),
        }
    }
}

/// Token metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub symbol: String,
    pub name: String,
    pub decimals: u32,
    pub hash: ScriptHash,
}

/// A liquidity pair holding exactly two tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub symbol: String,
    pub decimals: u32,
    pub hash: ScriptHash,
    pub tokens: [Token; 2],
}

// ---------------------------------------------------------------------------
// Contract invocation wire types
// ---------------------------------------------------------------------------

/// Neo contract parameter in `{"type", "value"}` form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ContractArg {
    Hash160(String),
    /// Decimal string, arbitrary precision
    Integer(String),
    Array(Vec<ContractArg>),
    Any(Option<String>),
}

impl ContractArg {
    pub fn hash160(value: impl Into<String>) -> Self {
        Self::Hash160(value.into())
    }

    pub fn integer(value: impl ToString) -> Self {
        Self::Integer(value.to_string())
    }

    pub fn null() -> Self {
        Self::Any(None)
    }
}

/// A single contract call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractInvocation {
    pub script_hash: ScriptHash,
    pub operation: String,
    pub args: Vec<ContractArg>,
}

/// Witness scope flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WitnessScope {
    None,
    CalledByEntry,
    CustomContracts,
    CustomGroups,
    Global,
}

impl From<WitnessScope> for u8 {
    fn from(scope: WitnessScope) -> Self {
        match scope {
            WitnessScope::None => 0x00,
            WitnessScope::CalledByEntry => 0x01,
            WitnessScope::CustomContracts => 0x10,
            WitnessScope::CustomGroups => 0x20,
            WitnessScope::Global => 0x80,
        }
    }
}

impl TryFrom<u8> for WitnessScope {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::None),
            0x01 => Ok(Self::CalledByEntry),
            0x10 => Ok(Self::CustomContracts),
            0x20 => Ok(Self::CustomGroups),
            0x80 => Ok(Self::Global),
            other => Err(format!("Unsupported witness scope: {:#04x}", other)),
        }
    }
}

/// Signer authorization record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signer {
    pub scopes: WitnessScope,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_contracts: Vec<ScriptHash>,
}

/// Ordered contract calls plus the signers that authorize them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInvocationMulti {
    pub invocations: Vec<ContractInvocation>,
    pub signers: Vec<Signer>,
}
