//! Administrative surface: asset listing and parameter updates. Config
//! changes never rewrite already-accrued index values; anything touching
//! the rate model accrues with the old parameters first, so new rates
//! only apply forward.

use alloy_primitives::U256;
use common_errors::{LendingError, Result};
use common_math::checked_sub;
use common_structs::{AccountId, AssetConfig, AssetId, Market, MarketState, Timestamp};

use crate::{custody::TokenCustody, events, oracle::PriceOracle, LendingController};

impl<O: PriceOracle, C: TokenCustody> LendingController<O, C> {
    /// Lists a new asset. Indices start at one WAD, totals at zero.
    /// Assets are never delisted afterwards, only deactivated.
    pub fn add_asset(&mut self, asset: AssetId, config: AssetConfig, now: Timestamp) -> Result<()> {
        config.validate()?;
        if self.markets.contains_key(&asset) {
            return Err(LendingError::AssetAlreadyListed);
        }
        self.markets.insert(
            asset,
            Market {
                config,
                state: MarketState::new(now),
            },
        );
        events::asset_added(asset);
        Ok(())
    }

    /// Flips the feature flags. Disabling an asset blocks new deposits,
    /// borrows and flash loans; withdraw and repay stay open.
    pub fn update_asset_flags(
        &mut self,
        asset: AssetId,
        is_active: bool,
        is_borrow_enabled: bool,
        is_collateral_enabled: bool,
    ) -> Result<()> {
        let market = self.market_mut(asset)?;
        market.config.is_active = is_active;
        market.config.is_borrow_enabled = is_borrow_enabled;
        market.config.is_collateral_enabled = is_collateral_enabled;
        Ok(())
    }

    /// Swaps the rate-model coefficients, accruing with the outgoing
    /// parameters first.
    pub fn set_rate_model(
        &mut self,
        asset: AssetId,
        base_rate_bps: u128,
        rate_multiplier_bps: u128,
        reserve_factor_bps: u128,
        now: Timestamp,
    ) -> Result<()> {
        self.accrue_market(asset, now)?;
        let market = self.market_mut(asset)?;
        let mut updated = market.config.clone();
        updated.base_rate_bps = base_rate_bps;
        updated.rate_multiplier_bps = rate_multiplier_bps;
        updated.reserve_factor_bps = reserve_factor_bps;
        updated.validate()?;
        market.config = updated;
        Ok(())
    }

    pub fn set_asset_caps(
        &mut self,
        asset: AssetId,
        supply_cap: Option<U256>,
        borrow_cap: Option<U256>,
    ) -> Result<()> {
        let market = self.market_mut(asset)?;
        market.config.supply_cap = supply_cap;
        market.config.borrow_cap = borrow_cap;
        Ok(())
    }

    /// Pays accumulated protocol reserves out to `to`, silently capped at
    /// what has actually accrued. Returns the amount paid.
    pub fn collect_reserves(
        &mut self,
        asset: AssetId,
        to: &AccountId,
        amount: U256,
        now: Timestamp,
    ) -> Result<U256> {
        self.accrue_market(asset, now)?;
        let market = self.market_mut(asset)?;
        let payout = amount.min(market.state.reserves);
        if payout.is_zero() {
            return Ok(U256::ZERO);
        }
        market.state.reserves = checked_sub(market.state.reserves, payout)?;

        if let Err(err) = self.custody.credit(to, asset, payout) {
            if let Ok(market) = self.market_mut(asset) {
                market.state.reserves = market.state.reserves.saturating_add(payout);
            }
            return Err(err);
        }

        events::reserves_collected(asset, payout);
        Ok(payout)
    }
}
