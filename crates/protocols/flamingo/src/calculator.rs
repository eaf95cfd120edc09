//! Flamingo Calculator
//!
//! Constant product swap math on base-unit integers, plus conversion
//! between display strings and base units.

use num_bigint::{BigInt, BigUint};
use num_traits::{ToPrimitive, Zero};
use rust_decimal::{Decimal, RoundingStrategy};

use flamingo_core::SwapError;

use crate::constants::fees::{FEE_DENOM, FEE_NUM};

/// Largest scale tried when turning a ratio into a `Decimal`
const MAX_RATIO_SCALE: u32 = 18;

/// Output of one hop for a given input
///
/// Formula: output = (input * 997 * reserve_out) / (reserve_in * 1000 + input * 997)
pub fn calculate_output(input: &BigUint, reserve_in: &BigUint, reserve_out: &BigUint) -> BigUint {
    let input_with_fee = input * FEE_NUM;
    let denominator = reserve_in * FEE_DENOM + &input_with_fee;
    if denominator.is_zero() {
        return BigUint::zero();
    }
    input_with_fee * reserve_out / denominator
}

/// Input one hop needs to produce `output` (rounded up by one unit)
///
/// Formula: input = (reserve_in * output * 1000) / ((reserve_out - output) * 997) + 1
pub fn calculate_input(
    output: &BigUint,
    reserve_in: &BigUint,
    reserve_out: &BigUint,
) -> Result<BigUint, SwapError> {
    let numerator = reserve_in * output;
    if numerator.is_zero() {
        return Ok(BigUint::from(1u32));
    }
    if output >= reserve_out {
        return Err(SwapError::InsufficientLiquidity {
            requested: output.to_string(),
            available: reserve_out.to_string(),
        });
    }
    let denominator = (reserve_out - output) * FEE_NUM;
    Ok(numerator * FEE_DENOM / denominator + 1u32)
}

/// Parse a display amount into base units, dropping digits beyond `decimals`
pub fn parse_units(display: &str, decimals: u32) -> Result<BigUint, SwapError> {
    let trimmed = display.trim();
    let invalid = || SwapError::InvalidAmount {
        message: format!("'{}' is not a valid amount", display),
    };

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let fraction: String = fraction
        .chars()
        .chain(std::iter::repeat('0'))
        .take(decimals as usize)
        .collect();
    let digits = format!("{}{}", whole, fraction);
    if digits.is_empty() {
        return Ok(BigUint::zero());
    }
    digits.parse::<BigUint>().map_err(|_| invalid())
}

/// Render base units as a display amount without trailing zeros
pub fn format_units(value: &BigUint, decimals: u32) -> String {
    let digits = value.to_str_radix(10);
    if decimals == 0 {
        return digits;
    }

    let decimals = decimals as usize;
    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals + 1 - digits.len()), digits)
    } else {
        digits
    };
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

/// `10^exp` as a big integer
pub fn pow10(exp: u32) -> BigUint {
    BigUint::from(10u32).pow(exp)
}

/// Split a slippage fraction into `(m, 10^k)` with slippage = m / 10^k
pub fn slippage_parts(slippage: Decimal) -> Result<(BigUint, BigUint), SwapError> {
    if (slippage.is_sign_negative() && !slippage.is_zero()) || slippage >= Decimal::ONE {
        return Err(SwapError::InvalidAmount {
            message: format!("slippage {} must be within [0, 1)", slippage),
        });
    }
    let normalized = slippage.normalize();
    let mantissa = normalized.mantissa().unsigned_abs();
    Ok((BigUint::from(mantissa), pow10(normalized.scale())))
}

/// Lower bound for a received amount: `floor(out * (1 - s))`
pub fn apply_min_slippage(output: &BigUint, slippage: Decimal) -> Result<BigUint, SwapError> {
    let (m, denom) = slippage_parts(slippage)?;
    Ok(output * (&denom - m) / denom)
}

/// Upper bound for a sold amount: `floor(in * (1 + s))`
pub fn apply_max_slippage(input: &BigUint, slippage: Decimal) -> Result<BigUint, SwapError> {
    let (m, denom) = slippage_parts(slippage)?;
    Ok(input * (&denom + m) / denom)
}

/// Exact ratio as a `Decimal`, truncated to the widest scale (up to 18) that fits.
///
/// Returns `None` when `den` is zero or the integer part overflows.
pub fn ratio_to_decimal(num: &BigInt, den: &BigInt) -> Option<Decimal> {
    if den.is_zero() {
        return None;
    }
    (0..=MAX_RATIO_SCALE).rev().find_map(|scale| {
        let scaled = num * BigInt::from(pow10(scale)) / den;
        let mantissa = scaled.to_i128()?;
        Decimal::try_from_i128_with_scale(mantissa, scale).ok()
    })
}

/// Round half away from zero to exactly `dp` decimals, never showing `-0`
pub fn to_fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(dp);
    rounded.to_string()
}
