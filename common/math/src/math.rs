use alloy_primitives::U256;
use common_constants::{BPS, WAD};
use common_errors::{LendingError, Result};

/// Rounding direction for `mul_div`. Callers pick the direction explicitly
/// at every site: `Floor` wherever value leaves the protocol or a live
/// balance is computed, `Ceil` where the protocol collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Floor,
    Ceil,
}

pub fn wad() -> U256 {
    U256::from(WAD)
}

pub fn bps() -> U256 {
    U256::from(BPS)
}

pub fn pow10(decimals: u8) -> U256 {
    U256::from(10u64).pow(U256::from(decimals))
}

/// Computes `a * b / denominator` in 256-bit space with an explicit
/// rounding direction. Fails closed on overflow of the intermediate
/// product and on a zero denominator; nothing is ever clamped.
pub fn mul_div(a: U256, b: U256, denominator: U256, rounding: Rounding) -> Result<U256> {
    if denominator.is_zero() {
        return Err(LendingError::DivisionByZero);
    }
    let product = a
        .checked_mul(b)
        .ok_or(LendingError::ArithmeticOverflow)?;
    let quotient = product / denominator;
    match rounding {
        Rounding::Floor => Ok(quotient),
        Rounding::Ceil => {
            if (product % denominator).is_zero() {
                Ok(quotient)
            } else {
                quotient
                    .checked_add(U256::from(1u8))
                    .ok_or(LendingError::ArithmeticOverflow)
            }
        }
    }
}

/// `a * b / WAD` with explicit rounding.
pub fn mul_wad(a: U256, b: U256, rounding: Rounding) -> Result<U256> {
    mul_div(a, b, wad(), rounding)
}

/// `a * WAD / b` with explicit rounding.
pub fn div_wad(a: U256, b: U256, rounding: Rounding) -> Result<U256> {
    mul_div(a, wad(), b, rounding)
}

/// Applies a basis-point fraction: `a * fraction_bps / 10_000`.
pub fn mul_bps(a: U256, fraction_bps: U256, rounding: Rounding) -> Result<U256> {
    mul_div(a, fraction_bps, bps(), rounding)
}

/// Scales a basis-point quantity up to WAD precision.
pub fn bps_to_wad(value_bps: U256) -> Result<U256> {
    mul_div(value_bps, wad(), bps(), Rounding::Floor)
}

pub fn checked_add(a: U256, b: U256) -> Result<U256> {
    a.checked_add(b).ok_or(LendingError::ArithmeticOverflow)
}

pub fn checked_sub(a: U256, b: U256) -> Result<U256> {
    a.checked_sub(b).ok_or(LendingError::ArithmeticUnderflow)
}

pub fn checked_mul(a: U256, b: U256) -> Result<U256> {
    a.checked_mul(b).ok_or(LendingError::ArithmeticOverflow)
}
