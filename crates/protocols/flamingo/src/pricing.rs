//! Pricing Engine
//!
//! Turns a fetched route and a user amount into a display-ready quote.
//! Pure: no I/O, no clock, same input always yields the same quote.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use rust_decimal::Decimal;

use flamingo_core::{SwapError, Token};

use crate::calculator::{
    apply_max_slippage, apply_min_slippage, calculate_input, calculate_output, format_units,
    parse_units, pow10, ratio_to_decimal, slippage_parts, to_fixed,
};
use crate::constants::fees::{
    FEE_DENOM, FEE_NUM, LP_FEE_DISPLAY_DECIMALS, PRICE_IMPACT_DISPLAY_DECIMALS,
};
use crate::registry::NetworkRegistry;
use crate::state::{Quote, SwapAmount, SwapRoute};

/// Everything needed to price one trade
#[derive(Debug, Clone, Copy)]
pub struct PricingInput<'a> {
    pub route: &'a [SwapRoute],
    pub token_to_use: &'a Token,
    pub token_to_receive: &'a Token,
    /// Fraction, `0.005` is half a percent
    pub slippage: Decimal,
    pub amount: &'a SwapAmount,
}

/// Parsed reserves of one hop, in base units
#[derive(Debug, Clone, PartialEq, Eq)]
struct HopReserves {
    reserve_in: BigUint,
    reserve_out: BigUint,
}

impl HopReserves {
    fn parse(hop: &SwapRoute) -> Result<Self, SwapError> {
        let parse = |value: &str, token: &Token| {
            value
                .parse::<BigUint>()
                .map_err(|_| SwapError::InvalidReserves {
                    reason: format!("reserve '{}' of {} is not an integer", value, token.symbol),
                })
        };
        Ok(Self {
            reserve_in: parse(&hop.reserve_token_to_use, &hop.token_to_use)?,
            reserve_out: parse(&hop.reserve_token_to_receive, &hop.token_to_receive)?,
        })
    }
}

/// Price a trade along `input.route`.
///
/// NEO is priced as bNEO and NEO hops are skipped. With no hop left (a pure
/// wrap or unwrap) the trade is 1:1 in base units.
pub fn calculate_swap_details(
    registry: &NetworkRegistry,
    input: PricingInput<'_>,
) -> Result<Quote, SwapError> {
    slippage_parts(input.slippage)?;

    let use_token = registry.override_token(input.token_to_use);
    let receive_token = registry.override_token(input.token_to_receive);
    let hops = registry
        .override_route(input.route)
        .iter()
        .map(HopReserves::parse)
        .collect::<Result<Vec<_>, _>>()?;

    let (amount_in, amount_out) = match input.amount {
        SwapAmount::ToUse(value) => {
            let amount_in = parse_units(value, use_token.decimals)?;
            let amount_out = hops.iter().fold(amount_in.clone(), |acc, hop| {
                calculate_output(&acc, &hop.reserve_in, &hop.reserve_out)
            });
            (amount_in, amount_out)
        }
        SwapAmount::ToReceive(value) => {
            let amount_out = parse_units(value, receive_token.decimals)?;
            let amount_in = hops.iter().rev().try_fold(amount_out.clone(), |acc, hop| {
                calculate_input(&acc, &hop.reserve_in, &hop.reserve_out)
            })?;
            (amount_in, amount_out)
        }
    };

    let (minimum_received, maximum_selling) = match input.amount {
        SwapAmount::ToUse(_) => (
            Some(format_units(
                &apply_min_slippage(&amount_out, input.slippage)?,
                receive_token.decimals,
            )),
            None,
        ),
        SwapAmount::ToReceive(_) => (
            None,
            Some(format_units(
                &apply_max_slippage(&amount_in, input.slippage)?,
                use_token.decimals,
            )),
        ),
    };

    let quote = Quote {
        amount_to_use_to_display: format_units(&amount_in, use_token.decimals),
        amount_to_receive_to_display: format_units(&amount_out, receive_token.decimals),
        liquidity_provider_fee: liquidity_provider_fee(&amount_in, hops.len(), &use_token)?,
        price_impact: price_impact(&hops, &amount_in, &amount_out),
        price_inverse: price_inverse(&amount_in, &amount_out, &use_token, &receive_token),
        minimum_received,
        maximum_selling,
    };

    tracing::debug!(
        from = %use_token.symbol,
        to = %receive_token.symbol,
        hops = hops.len(),
        amount_in = %quote.amount_to_use_to_display,
        amount_out = %quote.amount_to_receive_to_display,
        "Priced swap"
    );

    Ok(quote)
}

/// `in * (1 - 0.997^n)` in use-token display units, four decimals
fn liquidity_provider_fee(
    amount_in: &BigUint,
    hop_count: usize,
    use_token: &Token,
) -> Result<String, SwapError> {
    let n = hop_count as u32;
    let kept = BigUint::from(FEE_NUM).pow(n);
    let whole = BigUint::from(FEE_DENOM).pow(n);
    let num = BigInt::from(amount_in * (&whole - kept));
    // shifted by the use token's own decimals, so 6- and 18-decimal tokens report in their units
    let den = BigInt::from(whole * pow10(use_token.decimals));
    let fee = ratio_to_decimal(&num, &den).ok_or_else(|| SwapError::InvalidAmount {
        message: format!("fee for {} is out of range", amount_in),
    })?;
    Ok(to_fixed(fee, LP_FEE_DISPLAY_DECIMALS))
}

/// `((price - mid) / price - fee / in) * 100` with `price = in / out` and
/// `mid = Π reserve_in / reserve_out`.
///
/// Reduces to `0.997^n - Π reserve_in * out / (Π reserve_out * in)`.
fn price_impact(hops: &[HopReserves], amount_in: &BigUint, amount_out: &BigUint) -> Option<String> {
    if amount_in.is_zero()
        || amount_out.is_zero()
        || hops.iter().any(|hop| hop.reserve_out.is_zero())
    {
        return None;
    }

    let n = hops.len() as u32;
    let (product_in, product_out) = hops.iter().fold(
        (BigUint::one(), BigUint::one()),
        |(acc_in, acc_out), hop| (acc_in * &hop.reserve_in, acc_out * &hop.reserve_out),
    );
    let kept = BigUint::from(FEE_NUM).pow(n);
    let whole = BigUint::from(FEE_DENOM).pow(n);

    let base = BigInt::from(&product_out * amount_in);
    let num = &base * BigInt::from(kept) - BigInt::from(product_in * amount_out * &whole);
    let den = base * BigInt::from(whole);

    let impact = ratio_to_decimal(&(num * 100), &den)?;
    Some(to_fixed(impact, PRICE_IMPACT_DISPLAY_DECIMALS))
}

/// Units of the token to receive per unit of the token to use
fn price_inverse(
    amount_in: &BigUint,
    amount_out: &BigUint,
    use_token: &Token,
    receive_token: &Token,
) -> Option<String> {
    if amount_in.is_zero() {
        return None;
    }
    let num = BigInt::from(amount_out * pow10(use_token.decimals));
    let den = BigInt::from(amount_in * pow10(receive_token.decimals));
    ratio_to_decimal(&num, &den).map(|ratio| ratio.normalize().to_string())
}
