//! Utilization-driven interest mechanics: the linear rate model, the
//! per-interval growth factors and the market accrual step every public
//! operation runs first.

use alloy_primitives::U256;
use common_constants::{BPS, MAX_BORROW_RATE_BPS, SECONDS_PER_YEAR};
use common_errors::Result;
use common_math::{
    bps_to_wad, checked_add, checked_mul, checked_sub, mul_bps, mul_div, mul_wad, wad,
    Rounding,
};
use common_structs::{AssetConfig, MarketState, Timestamp};

/// Per-second rates derived from one utilization sample, WAD-scaled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatePair {
    pub borrow_rate_per_second: U256,
    pub supply_rate_per_second: U256,
}

/// Fraction of supplied funds currently borrowed, WAD-scaled. Zero when
/// nothing is supplied.
pub fn utilization_wad(total_borrowed: U256, total_supplied: U256) -> Result<U256> {
    if total_supplied.is_zero() {
        return Ok(U256::ZERO);
    }
    mul_div(total_borrowed, wad(), total_supplied, Rounding::Floor)
}

/// Annualized borrow rate: `base + multiplier * utilization`, capped at the
/// hard ceiling so pathological utilization cannot run the index away.
pub fn annual_borrow_rate_wad(config: &AssetConfig, utilization: U256) -> Result<U256> {
    let base = bps_to_wad(U256::from(config.base_rate_bps))?;
    let slope = mul_wad(
        bps_to_wad(U256::from(config.rate_multiplier_bps))?,
        utilization,
        Rounding::Floor,
    )?;
    let annual = checked_add(base, slope)?;
    let ceiling = bps_to_wad(U256::from(MAX_BORROW_RATE_BPS))?;
    Ok(annual.min(ceiling))
}

/// Converts the annual rate to per-second and derives the supply side:
/// `supply_rate = borrow_rate * utilization * (1 - reserve_factor)`.
pub fn rates_per_second(config: &AssetConfig, utilization: U256) -> Result<RatePair> {
    let annual = annual_borrow_rate_wad(config, utilization)?;
    let borrow_rate_per_second = annual / U256::from(SECONDS_PER_YEAR);

    let gross = mul_wad(borrow_rate_per_second, utilization, Rounding::Floor)?;
    let supply_rate_per_second = mul_bps(
        gross,
        U256::from(BPS - config.reserve_factor_bps),
        Rounding::Floor,
    )?;

    Ok(RatePair {
        borrow_rate_per_second,
        supply_rate_per_second,
    })
}

/// Linear growth factor over one interval: `1 + rate * elapsed`, WAD.
/// Intervals compound multiplicatively across accruals, so long idle
/// periods never under-accrue relative to frequent updates of the same
/// total span at the same rate.
pub fn growth_factor_wad(rate_per_second: U256, elapsed: u64) -> Result<U256> {
    let increase = checked_mul(rate_per_second, U256::from(elapsed))?;
    checked_add(wad(), increase)
}

/// Advances a market to `now`: one no-op when already current, otherwise a
/// single multiplicative index step plus the interest split between
/// suppliers and protocol reserves. Mandatory first step of every public
/// operation that reads or mutates balances.
pub fn accrue(config: &AssetConfig, state: &mut MarketState, now: Timestamp) -> Result<()> {
    // Idempotent at the same instant; the serialized request stream never
    // carries timestamps backwards.
    if now <= state.last_accrual_timestamp {
        return Ok(());
    }
    let elapsed = now - state.last_accrual_timestamp;

    let utilization = utilization_wad(state.total_borrowed, state.total_supplied)?;
    let rates = rates_per_second(config, utilization)?;
    let borrow_factor = growth_factor_wad(rates.borrow_rate_per_second, elapsed)?;
    let supply_factor = growth_factor_wad(rates.supply_rate_per_second, elapsed)?;

    let new_borrow_index = mul_wad(state.borrow_index, borrow_factor, Rounding::Floor)?;
    let new_supply_index = mul_wad(state.supply_index, supply_factor, Rounding::Floor)?;

    // Interest the live borrow total accrued over this interval, split
    // into the supplier share and the protocol fee.
    let interest = mul_wad(
        state.total_borrowed,
        checked_sub(borrow_factor, wad())?,
        Rounding::Floor,
    )?;
    let protocol_fee = mul_bps(
        interest,
        U256::from(config.reserve_factor_bps),
        Rounding::Floor,
    )?;
    let supplier_share = checked_sub(interest, protocol_fee)?;

    state.total_borrowed = checked_add(state.total_borrowed, interest)?;
    state.total_supplied = checked_add(state.total_supplied, supplier_share)?;
    state.reserves = checked_add(state.reserves, protocol_fee)?;
    state.borrow_index = new_borrow_index;
    state.supply_index = new_supply_index;
    state.last_accrual_timestamp = now;
    Ok(())
}

/// Accrual projection for read-only views: same arithmetic, caller keeps
/// the stored state untouched.
pub fn simulate_accrued(
    config: &AssetConfig,
    state: &MarketState,
    now: Timestamp,
) -> Result<MarketState> {
    let mut projected = state.clone();
    accrue(config, &mut projected, now)?;
    Ok(projected)
}
