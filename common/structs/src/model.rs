use core::fmt;

use alloy_primitives::U256;
use common_constants::{
    BPS, DEFAULT_CLOSE_FACTOR_BPS, DEFAULT_MAX_PRICE_AGE_SECS, MAX_ASSET_DECIMALS,
    MAX_BORROW_RATE_BPS, WAD,
};
use common_errors::{LendingError, Result};
use common_math::{mul_div, Rounding};
use serde::{Deserialize, Serialize};

pub type Timestamp = u64;

/// Fixed-width asset ticker. Unknown identifiers are rejected at the
/// registry boundary, not deep inside the ledger logic.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AssetId([u8; 12]);

impl AssetId {
    pub fn from_ticker(ticker: &[u8]) -> Self {
        let mut id = [0u8; 12];
        let len = ticker.len().min(12);
        id[..len].copy_from_slice(&ticker[..len]);
        AssetId(id)
    }

    pub fn as_bytes(&self) -> &[u8] {
        let end = self.0.iter().position(|b| *b == 0).unwrap_or(12);
        &self.0[..end]
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.as_bytes() {
            write!(f, "{}", *b as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({self})")
    }
}

/// Opaque account identifier.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AccountId(pub [u8; 32]);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0[..8] {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({self})")
    }
}

/// Global protocol parameters, tunable by the administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    pub max_price_age_secs: u64,
    pub close_factor_bps: u128,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        ProtocolConfig {
            max_price_age_secs: DEFAULT_MAX_PRICE_AGE_SECS,
            close_factor_bps: DEFAULT_CLOSE_FACTOR_BPS,
        }
    }
}

impl ProtocolConfig {
    pub fn validate(&self) -> Result<()> {
        if self.close_factor_bps > BPS || self.max_price_age_secs == 0 {
            return Err(LendingError::InvalidAssetConfig);
        }
        Ok(())
    }
}

/// Flat per-asset configuration, provided once by the administrator and
/// mutated only through the admin surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    pub decimals: u8,
    pub is_active: bool,
    pub is_borrow_enabled: bool,
    pub is_collateral_enabled: bool,
    pub liquidation_threshold_bps: u128,
    pub liquidation_bonus_bps: u128,
    pub reserve_factor_bps: u128,
    pub base_rate_bps: u128,
    pub rate_multiplier_bps: u128,
    pub flash_loan_fee_bps: u128,
    pub supply_cap: Option<U256>,
    pub borrow_cap: Option<U256>,
}

impl AssetConfig {
    pub fn validate(&self) -> Result<()> {
        let bps_bounded = self.liquidation_threshold_bps <= BPS
            && self.liquidation_bonus_bps <= BPS
            && self.reserve_factor_bps <= BPS
            && self.flash_loan_fee_bps <= BPS;
        let rates_bounded = self.base_rate_bps <= MAX_BORROW_RATE_BPS
            && self.rate_multiplier_bps <= MAX_BORROW_RATE_BPS;
        if !bps_bounded || !rates_bounded || self.decimals > MAX_ASSET_DECIMALS {
            return Err(LendingError::InvalidAssetConfig);
        }
        Ok(())
    }

    pub fn can_supply(&self) -> bool {
        self.is_active && self.is_collateral_enabled
    }

    pub fn can_borrow(&self) -> bool {
        self.is_active && self.is_borrow_enabled
    }
}

/// Global accrual state of one market. Indexes start at one WAD and never
/// decrease; totals are live amounts grown at every accrual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketState {
    pub total_supplied: U256,
    pub total_borrowed: U256,
    pub reserves: U256,
    pub supply_index: U256,
    pub borrow_index: U256,
    pub last_accrual_timestamp: Timestamp,
}

impl MarketState {
    pub fn new(genesis: Timestamp) -> Self {
        MarketState {
            total_supplied: U256::ZERO,
            total_borrowed: U256::ZERO,
            reserves: U256::ZERO,
            supply_index: U256::from(WAD),
            borrow_index: U256::from(WAD),
            last_accrual_timestamp: genesis,
        }
    }
}

/// One listed asset: its configuration plus accrual state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    pub config: AssetConfig,
    pub state: MarketState,
}

/// Per-(account, asset) principal with the index snapshots taken when the
/// principal was last touched. The live balance replays index growth since
/// the snapshot; a position with zero principal on both sides is dormant
/// and has no effect on any computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub principal_supplied: U256,
    pub supply_index_snapshot: U256,
    pub principal_borrowed: U256,
    pub borrow_index_snapshot: U256,
    pub last_update_timestamp: Timestamp,
}

impl Position {
    pub fn new() -> Self {
        Position {
            principal_supplied: U256::ZERO,
            supply_index_snapshot: U256::ZERO,
            principal_borrowed: U256::ZERO,
            borrow_index_snapshot: U256::ZERO,
            last_update_timestamp: 0,
        }
    }

    pub fn is_dormant(&self) -> bool {
        self.principal_supplied.is_zero() && self.principal_borrowed.is_zero()
    }

    /// Live supplied balance at the given market index.
    pub fn current_supplied(&self, supply_index: U256) -> Result<U256> {
        if self.principal_supplied.is_zero() || self.supply_index_snapshot.is_zero() {
            return Ok(U256::ZERO);
        }
        mul_div(
            self.principal_supplied,
            supply_index,
            self.supply_index_snapshot,
            Rounding::Floor,
        )
    }

    /// Live borrowed balance at the given market index.
    pub fn current_borrowed(&self, borrow_index: U256) -> Result<U256> {
        if self.principal_borrowed.is_zero() || self.borrow_index_snapshot.is_zero() {
            return Ok(U256::ZERO);
        }
        mul_div(
            self.principal_borrowed,
            borrow_index,
            self.borrow_index_snapshot,
            Rounding::Floor,
        )
    }

    /// Folds accrued interest into both principals and re-bases the
    /// snapshots to the market's current indexes. Must run before any
    /// principal delta so growth is applied exactly once per interval.
    pub fn sync(
        &mut self,
        supply_index: U256,
        borrow_index: U256,
        now: Timestamp,
    ) -> Result<()> {
        self.principal_supplied = self.current_supplied(supply_index)?;
        self.supply_index_snapshot = supply_index;
        self.principal_borrowed = self.current_borrowed(borrow_index)?;
        self.borrow_index_snapshot = borrow_index;
        self.last_update_timestamp = now;
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

/// Oracle price sample: WAD price of one whole token in the common value
/// unit, plus the sample timestamp for staleness checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFeed {
    pub price: U256,
    pub as_of: Timestamp,
}

/// Read-only projection of one market with accrual simulated to `now`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketView {
    pub asset: AssetId,
    pub total_supplied: U256,
    pub total_borrowed: U256,
    pub reserves: U256,
    pub supply_index: U256,
    pub borrow_index: U256,
    pub utilization: U256,
    pub borrow_rate_per_second: U256,
    pub supply_rate_per_second: U256,
    pub last_accrual_timestamp: Timestamp,
}

/// One account's live balances in a single asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAssetView {
    pub asset: AssetId,
    pub supplied: U256,
    pub borrowed: U256,
}

/// Aggregate account projection used by clients: per-asset balances plus
/// the valuation the health engine would see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    pub positions: Vec<AccountAssetView>,
    pub collateral_value: U256,
    pub weighted_collateral_value: U256,
    pub debt_value: U256,
    pub health_factor_bps: U256,
}
