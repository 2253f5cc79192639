/// Fixed-point unit for indexes, prices, rates and common-unit values.
pub const WAD: u128 = 1_000_000_000_000_000_000;
pub const WAD_DECIMALS: u8 = 18;

/// Basis points, 10_000 = 100%. Risk parameters and health factors use it.
pub const BPS: u128 = 10_000;

pub const SECONDS_PER_YEAR: u64 = 31_556_926;

/// Hard ceiling on the annual borrow rate, 1000% APR. Bounds pathological
/// utilization inputs before the per-second conversion.
pub const MAX_BORROW_RATE_BPS: u128 = 100_000;

/// An account is healthy while its health factor stays at or above 100%.
pub const MIN_HEALTH_FACTOR_BPS: u128 = 10_000;

/// Share of a borrower's live debt a single liquidation may cover.
pub const DEFAULT_CLOSE_FACTOR_BPS: u128 = 5_000;

/// Oracle prices older than this are rejected at the point of use.
pub const DEFAULT_MAX_PRICE_AGE_SECS: u64 = 300;

/// Upper bound accepted for asset decimal configuration.
pub const MAX_ASSET_DECIMALS: u8 = 30;
