//! Swap Invocation Builder
//!
//! Builds the contract calls and signer for a quoted swap. A route that
//! starts or ends at NEO gains a wrap (NEO to bNEO) or unwrap (bNEO to NEO)
//! transfer around the router call.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use flamingo_core::{
    Address, ContractArg, ContractInvocation, ContractInvocationMulti, ScriptHash, Signer,
    SwapError, Token, WitnessScope,
};

use crate::calculator::{parse_units, pow10};
use crate::constants::{operations, pools, unwrap};
use crate::registry::NetworkRegistry;

/// Which side of the trade is fixed, with its slippage bound
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SwapInvocationKind {
    ToUse {
        amount_to_use: String,
        minimum_received: String,
    },
    ToReceive {
        amount_to_receive: String,
        maximum_selling: String,
    },
}

/// Input for [`build_swap_invocation`]. Amounts are display units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapInvocationArgs {
    pub address: Address,
    pub route_path: Vec<Token>,
    /// Milliseconds since the Unix epoch
    pub deadline: String,
    pub kind: SwapInvocationKind,
}

/// Shape of the bundle a route path produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapShape {
    SwapThenUnwrap,
    PureWrap,
    PureUnwrap,
    WrapThenSwap,
    Plain,
}

impl SwapShape {
    pub fn classify(registry: &NetworkRegistry, path: &[Token]) -> Self {
        let (Some(first), Some(last)) = (path.first(), path.last()) else {
            return Self::Plain;
        };
        if path.len() >= 3 && registry.is_neo(last) {
            Self::SwapThenUnwrap
        } else if path.len() == 2 && registry.is_neo(first) && registry.is_bneo(last) {
            Self::PureWrap
        } else if path.len() == 2 && registry.is_bneo(first) && registry.is_neo(last) {
            Self::PureUnwrap
        } else if path.len() >= 3 && registry.is_neo(first) {
            Self::WrapThenSwap
        } else {
            Self::Plain
        }
    }
}

/// Build the invocations and the single `CustomContracts` signer for a swap
pub fn build_swap_invocation(
    registry: &NetworkRegistry,
    args: &SwapInvocationArgs,
) -> Result<ContractInvocationMulti, SwapError> {
    validate(args)?;

    let path = &args.route_path;
    let shape = SwapShape::classify(registry, path);
    let bneo = registry.bneo();

    let mut invocations = Vec::new();
    let mut allowed = AllowedContracts::default();

    allowed.extend_amm(registry, path);

    match shape {
        SwapShape::Plain => {
            invocations.push(amm_invocation(registry, args)?);
        }
        SwapShape::WrapThenSwap => {
            let neo_amount = match &args.kind {
                SwapInvocationKind::ToUse { amount_to_use, .. } => {
                    whole_units(amount_to_use, bneo.decimals)?
                }
                SwapInvocationKind::ToReceive { maximum_selling, .. } => {
                    ceil_whole_units(maximum_selling, bneo.decimals)?
                }
            };
            invocations.push(transfer_invocation(registry, &registry.neo().hash, &args.address, &neo_amount));
            invocations.push(amm_invocation(registry, args)?);
            allowed.extend_transfer(registry, &registry.neo().hash)?;
        }
        SwapShape::SwapThenUnwrap => {
            let received = match &args.kind {
                SwapInvocationKind::ToUse { minimum_received, .. } => minimum_received,
                SwapInvocationKind::ToReceive { amount_to_receive, .. } => amount_to_receive,
            };
            let gas_amount = unwrap_amount(received, bneo.decimals)?;
            invocations.push(amm_invocation(registry, args)?);
            invocations.push(transfer_invocation(registry, &registry.gas().hash, &args.address, &gas_amount));
            allowed.extend_transfer(registry, &registry.gas().hash)?;
        }
        SwapShape::PureWrap => {
            let neo_amount = match &args.kind {
                SwapInvocationKind::ToUse { amount_to_use, .. } => {
                    whole_units(amount_to_use, bneo.decimals)?
                }
                SwapInvocationKind::ToReceive { amount_to_receive, .. } => {
                    ceil_whole_units(amount_to_receive, bneo.decimals)?
                }
            };
            invocations.push(transfer_invocation(registry, &registry.neo().hash, &args.address, &neo_amount));
            allowed.extend_transfer(registry, &registry.neo().hash)?;
        }
        SwapShape::PureUnwrap => {
            let bneo_amount = match &args.kind {
                SwapInvocationKind::ToUse { amount_to_use, .. } => amount_to_use,
                SwapInvocationKind::ToReceive { amount_to_receive, .. } => amount_to_receive,
            };
            let gas_amount = unwrap_amount(bneo_amount, bneo.decimals)?;
            invocations.push(transfer_invocation(registry, &registry.gas().hash, &args.address, &gas_amount));
            allowed.extend_transfer(registry, &registry.gas().hash)?;
        }
    }

    tracing::debug!(
        shape = ?shape,
        invocations = invocations.len(),
        allowed_contracts = allowed.0.len(),
        "Built swap invocation"
    );

    Ok(ContractInvocationMulti {
        invocations,
        signers: vec![Signer {
            scopes: WitnessScope::CustomContracts,
            allowed_contracts: allowed.0,
        }],
    })
}

fn validate(args: &SwapInvocationArgs) -> Result<(), SwapError> {
    let missing = |name| Err(SwapError::MissingParameter { name });

    if args.address.as_str().trim().is_empty() {
        return missing("address");
    }
    if args.route_path.len() < 2 {
        return missing("route_path");
    }
    let deadline = args.deadline.trim();
    if deadline.is_empty() {
        return missing("deadline");
    }
    if deadline.parse::<u64>().is_err() {
        return Err(SwapError::InvalidAmount {
            message: format!("deadline '{}' is not a millisecond timestamp", deadline),
        });
    }
    let (amount, bound) = match &args.kind {
        SwapInvocationKind::ToUse {
            amount_to_use,
            minimum_received,
        } => (("amount_to_use", amount_to_use), ("minimum_received", minimum_received)),
        SwapInvocationKind::ToReceive {
            amount_to_receive,
            maximum_selling,
        } => (("amount_to_receive", amount_to_receive), ("maximum_selling", maximum_selling)),
    };
    for (name, value) in [amount, bound] {
        if value.trim().is_empty() {
            return missing(name);
        }
    }
    Ok(())
}

/// Router call over the NEO-free path
fn amm_invocation(
    registry: &NetworkRegistry,
    args: &SwapInvocationArgs,
) -> Result<ContractInvocation, SwapError> {
    let path = registry.override_route_path(&args.route_path);
    let (Some(use_token), Some(receive_token)) = (path.first(), path.last()) else {
        return Err(SwapError::MissingParameter { name: "route_path" });
    };

    let (operation, primary, bound) = match &args.kind {
        SwapInvocationKind::ToUse {
            amount_to_use,
            minimum_received,
        } => (
            operations::SWAP_TOKEN_IN_FOR_TOKEN_OUT,
            parse_units(amount_to_use, use_token.decimals)?,
            parse_units(minimum_received, receive_token.decimals)?,
        ),
        SwapInvocationKind::ToReceive {
            amount_to_receive,
            maximum_selling,
        } => (
            operations::SWAP_TOKEN_OUT_FOR_TOKEN_IN,
            parse_units(amount_to_receive, receive_token.decimals)?,
            parse_units(maximum_selling, use_token.decimals)?,
        ),
    };

    Ok(ContractInvocation {
        script_hash: registry.script_hashes().router.clone(),
        operation: operation.to_string(),
        args: vec![
            ContractArg::hash160(args.address.as_str()),
            ContractArg::integer(primary),
            ContractArg::integer(bound),
            ContractArg::Array(
                path.iter()
                    .map(|token| ContractArg::hash160(token.hash.as_str()))
                    .collect(),
            ),
            ContractArg::integer(args.deadline.trim()),
        ],
    })
}

/// `transfer(sender, bNEO, amount, null)` on NEO (wrap) or GAS (unwrap)
fn transfer_invocation(
    registry: &NetworkRegistry,
    contract: &ScriptHash,
    sender: &Address,
    amount: &BigUint,
) -> ContractInvocation {
    ContractInvocation {
        script_hash: contract.clone(),
        operation: operations::TRANSFER.to_string(),
        args: vec![
            ContractArg::hash160(sender.as_str()),
            ContractArg::hash160(registry.bneo().hash.as_str()),
            ContractArg::integer(amount),
            ContractArg::null(),
        ],
    }
}

/// GAS the bNEO contract charges to burn `bneo` back into NEO
fn unwrap_amount(bneo: &str, decimals: u32) -> Result<BigUint, SwapError> {
    let base = parse_units(bneo, decimals)?;
    Ok(base * unwrap::GAS_PER_NEO_NUM / unwrap::GAS_PER_NEO_DENOM)
}

/// Whole NEO units for a display amount. NEO is indivisible, so a fraction is rejected.
fn whole_units(display: &str, decimals: u32) -> Result<BigUint, SwapError> {
    let base = parse_units(display, decimals)?;
    let unit = pow10(decimals);
    if !(&base % &unit).is_zero() {
        return Err(SwapError::InvalidAmount {
            message: format!("NEO amount {} must be a whole number", display.trim()),
        });
    }
    Ok(base / unit)
}

/// Smallest whole number of units covering a display amount
fn ceil_whole_units(display: &str, decimals: u32) -> Result<BigUint, SwapError> {
    let base = parse_units(display, decimals)?;
    let unit = pow10(decimals);
    let whole = &base / &unit;
    if (base % unit).is_zero() {
        Ok(whole)
    } else {
        Ok(whole + 1u32)
    }
}

/// Ordered, duplicate-free allow-list
#[derive(Debug, Default)]
struct AllowedContracts(Vec<ScriptHash>);

impl AllowedContracts {
    fn push(&mut self, hash: &ScriptHash) {
        if !self.0.contains(hash) {
            self.0.push(hash.clone());
        }
    }

    fn extend_amm(&mut self, registry: &NetworkRegistry, path: &[Token]) {
        let hashes = registry.script_hashes();
        self.push(&hashes.router);
        self.push(&hashes.factory);
        self.push(&hashes.pair_whitelist);
        for token in path {
            self.push(&token.hash);
        }
    }

    fn extend_transfer(
        &mut self,
        registry: &NetworkRegistry,
        contract: &ScriptHash,
    ) -> Result<(), SwapError> {
        self.push(contract);
        self.push(&registry.pool(pools::BNEO_GAS)?.hash);
        self.push(&registry.bneo().hash);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flamingo_core::Network;

    const SENDER: &str = "NNLi44dJNXtDNSBkofB48aTVYtb1zZrNEs";
    const DEADLINE: &str = "1700000600000";

    fn registry() -> NetworkRegistry {
        NetworkRegistry::for_network(Network::Mainnet).unwrap()
    }

    fn path(reg: &NetworkRegistry, symbols: &[&str]) -> Vec<Token> {
        symbols.iter().map(|s| reg.token(s).unwrap().clone()).collect()
    }

    fn to_use(reg: &NetworkRegistry, symbols: &[&str], amount: &str, min: &str) -> SwapInvocationArgs {
        SwapInvocationArgs {
            address: Address::new(SENDER),
            route_path: path(reg, symbols),
            deadline: DEADLINE.to_string(),
            kind: SwapInvocationKind::ToUse {
                amount_to_use: amount.to_string(),
                minimum_received: min.to_string(),
            },
        }
    }

    fn to_receive(reg: &NetworkRegistry, symbols: &[&str], amount: &str, max: &str) -> SwapInvocationArgs {
        SwapInvocationArgs {
            address: Address::new(SENDER),
            route_path: path(reg, symbols),
            deadline: DEADLINE.to_string(),
            kind: SwapInvocationKind::ToReceive {
                amount_to_receive: amount.to_string(),
                maximum_selling: max.to_string(),
            },
        }
    }

    fn hashes(reg: &NetworkRegistry, names: &[&str]) -> Vec<ScriptHash> {
        let sh = reg.script_hashes();
        names
            .iter()
            .map(|name| match *name {
                "router" => sh.router.clone(),
                "factory" => sh.factory.clone(),
                "whitelist" => sh.pair_whitelist.clone(),
                "bneo_gas_pool" => reg.pool(pools::BNEO_GAS).unwrap().hash.clone(),
                symbol => reg.token(symbol).unwrap().hash.clone(),
            })
            .collect()
    }

    fn path_arg(reg: &NetworkRegistry, symbols: &[&str]) -> ContractArg {
        ContractArg::Array(
            symbols
                .iter()
                .map(|s| ContractArg::hash160(reg.token(s).unwrap().hash.as_str()))
                .collect(),
        )
    }

    #[test]
    fn test_plain_swap_to_use() {
        let reg = registry();
        let bundle =
            build_swap_invocation(&reg, &to_use(&reg, &["FLM", "GAS"], "1", "0.01638157")).unwrap();

        assert_eq!(bundle.invocations.len(), 1);
        let amm = &bundle.invocations[0];
        assert_eq!(amm.script_hash, reg.script_hashes().router);
        assert_eq!(amm.operation, "swapTokenInForTokenOut");
        assert_eq!(
            amm.args,
            vec![
                ContractArg::hash160(SENDER),
                ContractArg::integer("100000000"),
                ContractArg::integer("1638157"),
                path_arg(&reg, &["FLM", "GAS"]),
                ContractArg::integer(DEADLINE),
            ]
        );

        assert_eq!(bundle.signers.len(), 1);
        assert_eq!(bundle.signers[0].scopes, WitnessScope::CustomContracts);
        assert_eq!(
            bundle.signers[0].allowed_contracts,
            hashes(&reg, &["router", "factory", "whitelist", "FLM", "GAS"])
        );
    }

    #[test]
    fn test_plain_swap_to_receive() {
        let reg = registry();
        let bundle =
            build_swap_invocation(&reg, &to_receive(&reg, &["GAS", "FLM"], "1", "61.0444685")).unwrap();

        let amm = &bundle.invocations[0];
        assert_eq!(amm.operation, "swapTokenOutForTokenIn");
        assert_eq!(amm.args[1], ContractArg::integer("100000000"));
        assert_eq!(amm.args[2], ContractArg::integer("6104446850"));
        assert_eq!(amm.args[3], path_arg(&reg, &["GAS", "FLM"]));
    }

    #[test]
    fn test_wrap_then_swap() {
        let reg = registry();
        let bundle = build_swap_invocation(
            &reg,
            &to_use(&reg, &["NEO", "bNEO", "GAS"], "2", "5.98684835"),
        )
        .unwrap();

        assert_eq!(bundle.invocations.len(), 2);
        let wrap = &bundle.invocations[0];
        assert_eq!(wrap.script_hash, reg.neo().hash);
        assert_eq!(wrap.operation, "transfer");
        assert_eq!(
            wrap.args,
            vec![
                ContractArg::hash160(SENDER),
                ContractArg::hash160(reg.bneo().hash.as_str()),
                ContractArg::integer("2"),
                ContractArg::null(),
            ]
        );

        let amm = &bundle.invocations[1];
        assert_eq!(amm.args[1], ContractArg::integer("200000000"));
        assert_eq!(amm.args[2], ContractArg::integer("598684835"));
        assert_eq!(amm.args[3], path_arg(&reg, &["bNEO", "GAS"]));

        assert_eq!(
            bundle.signers[0].allowed_contracts,
            hashes(&reg, &["router", "factory", "whitelist", "NEO", "bNEO", "GAS", "bneo_gas_pool"])
        );
    }

    #[test]
    fn test_wrap_then_swap_rejects_fractional_neo() {
        let reg = registry();
        let err = build_swap_invocation(
            &reg,
            &to_use(&reg, &["NEO", "bNEO", "GAS"], "2.5", "7.4"),
        )
        .unwrap_err();
        assert!(matches!(err, SwapError::InvalidAmount { .. }));
    }

    #[test]
    fn test_wrap_then_swap_to_receive_rounds_neo_up() {
        let reg = registry();
        let bundle = build_swap_invocation(
            &reg,
            &to_receive(&reg, &["NEO", "bNEO", "GAS"], "5", "1.67"),
        )
        .unwrap();
        assert_eq!(bundle.invocations[0].args[2], ContractArg::integer("2"));
        assert_eq!(bundle.invocations[1].args[2], ContractArg::integer("167000000"));
    }

    #[test]
    fn test_swap_then_unwrap() {
        let reg = registry();
        let bundle = build_swap_invocation(
            &reg,
            &to_receive(&reg, &["GAS", "bNEO", "NEO"], "1", "3.04188283"),
        )
        .unwrap();

        assert_eq!(bundle.invocations.len(), 2);
        let amm = &bundle.invocations[0];
        assert_eq!(amm.operation, "swapTokenOutForTokenIn");
        assert_eq!(amm.args[1], ContractArg::integer("100000000"));
        assert_eq!(amm.args[2], ContractArg::integer("304188283"));
        assert_eq!(amm.args[3], path_arg(&reg, &["GAS", "bNEO"]));

        let unwrap = &bundle.invocations[1];
        assert_eq!(unwrap.script_hash, reg.gas().hash);
        assert_eq!(unwrap.args[1], ContractArg::hash160(reg.bneo().hash.as_str()));
        assert_eq!(unwrap.args[2], ContractArg::integer("100000"));

        assert_eq!(
            bundle.signers[0].allowed_contracts,
            hashes(&reg, &["router", "factory", "whitelist", "GAS", "bNEO", "NEO", "bneo_gas_pool"])
        );
    }

    #[test]
    fn test_swap_then_unwrap_to_use_uses_minimum() {
        let reg = registry();
        let bundle = build_swap_invocation(
            &reg,
            &to_use(&reg, &["GAS", "bNEO", "NEO"], "3", "0.98765432"),
        )
        .unwrap();
        assert_eq!(bundle.invocations[1].args[2], ContractArg::integer("98765"));
    }

    #[test]
    fn test_pure_unwrap() {
        let reg = registry();
        let bundle =
            build_swap_invocation(&reg, &to_receive(&reg, &["bNEO", "NEO"], "1", "1")).unwrap();

        assert_eq!(bundle.invocations.len(), 1);
        let unwrap = &bundle.invocations[0];
        assert_eq!(unwrap.script_hash, reg.gas().hash);
        assert_eq!(unwrap.args[2], ContractArg::integer("100000"));
        assert_eq!(
            bundle.signers[0].allowed_contracts,
            hashes(&reg, &["router", "factory", "whitelist", "bNEO", "NEO", "GAS", "bneo_gas_pool"])
        );
    }

    #[test]
    fn test_pure_wrap() {
        let reg = registry();
        let bundle =
            build_swap_invocation(&reg, &to_use(&reg, &["NEO", "bNEO"], "4", "4")).unwrap();

        assert_eq!(bundle.invocations.len(), 1);
        assert_eq!(bundle.invocations[0].script_hash, reg.neo().hash);
        assert_eq!(bundle.invocations[0].args[2], ContractArg::integer("4"));
        assert_eq!(
            bundle.signers[0].allowed_contracts,
            hashes(&reg, &["router", "factory", "whitelist", "NEO", "bNEO", "bneo_gas_pool"])
        );

        let bundle =
            build_swap_invocation(&reg, &to_receive(&reg, &["NEO", "bNEO"], "2.5", "3")).unwrap();
        assert_eq!(bundle.invocations[0].args[2], ContractArg::integer("3"));

        assert!(matches!(
            build_swap_invocation(&reg, &to_use(&reg, &["NEO", "bNEO"], "1.5", "1.5")),
            Err(SwapError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_plain_multi_hop_swap() {
        let reg = registry();
        let bundle = build_swap_invocation(
            &reg,
            &to_use(&reg, &["FLM", "bNEO", "fUSDT"], "100", "12.5"),
        )
        .unwrap();

        assert_eq!(bundle.invocations.len(), 1);
        let amm = &bundle.invocations[0];
        assert_eq!(amm.script_hash, reg.script_hashes().router);
        assert_eq!(amm.operation, "swapTokenInForTokenOut");
        assert_eq!(amm.args[1], ContractArg::integer("10000000000"));
        assert_eq!(
            amm.args[2],
            ContractArg::integer(parse_units("12.5", reg.token("fUSDT").unwrap().decimals).unwrap())
        );
        assert_eq!(amm.args[3], path_arg(&reg, &["FLM", "bNEO", "fUSDT"]));
        assert_eq!(amm.args[4], ContractArg::integer(DEADLINE));
        assert_eq!(
            bundle.signers[0].allowed_contracts,
            hashes(&reg, &["router", "factory", "whitelist", "FLM", "bNEO", "fUSDT"])
        );
    }

    #[test]
    fn test_non_numeric_deadline_rejected() {
        let reg = registry();
        let mut args = to_use(&reg, &["FLM", "GAS"], "1", "0.5");
        args.deadline = "tomorrow".to_string();
        assert!(matches!(
            build_swap_invocation(&reg, &args),
            Err(SwapError::InvalidAmount { .. })
        ));

        args.deadline = " 1700000600000 ".to_string();
        let bundle = build_swap_invocation(&reg, &args).unwrap();
        assert_eq!(bundle.invocations[0].args[4], ContractArg::integer(DEADLINE));
    }

    #[test]
    fn test_missing_parameters() {
        let reg = registry();

        let mut args = to_use(&reg, &["FLM", "GAS"], "1", "0.5");
        args.address = Address::new("");
        assert!(matches!(
            build_swap_invocation(&reg, &args),
            Err(SwapError::MissingParameter { name: "address" })
        ));

        let args = to_use(&reg, &["FLM"], "1", "0.5");
        assert!(matches!(
            build_swap_invocation(&reg, &args),
            Err(SwapError::MissingParameter { name: "route_path" })
        ));

        let args = to_use(&reg, &["FLM", "GAS"], "1", " ");
        assert!(matches!(
            build_swap_invocation(&reg, &args),
            Err(SwapError::MissingParameter { name: "minimum_received" })
        ));

        let args = to_receive(&reg, &["FLM", "GAS"], "", "1");
        assert!(matches!(
            build_swap_invocation(&reg, &args),
            Err(SwapError::MissingParameter { name: "amount_to_receive" })
        ));
    }

    #[test]
    fn test_signer_serializes_as_custom_contracts() {
        let reg = registry();
        let bundle =
            build_swap_invocation(&reg, &to_use(&reg, &["FLM", "GAS"], "1", "0.01")).unwrap();
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["signers"][0]["scopes"], 16);
        assert_eq!(json["invocations"][0]["scriptHash"], reg.script_hashes().router.as_str());
        assert_eq!(json["invocations"][0]["args"][4]["type"], "Integer");
    }
}
