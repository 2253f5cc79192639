use alloy_primitives::U256;
use common_errors::{LendingError, Result};
use common_math::checked_add;
use common_structs::{AccountId, AssetId, Timestamp};

use crate::{custody::TokenCustody, events, oracle::PriceOracle, LendingController};

impl<O: PriceOracle, C: TokenCustody> LendingController<O, C> {
    /// Supplies `amount` of `asset` as collateral for `caller`.
    ///
    /// Requires an active, collateral-enabled asset and supply-cap
    /// headroom. No health check: adding collateral can only improve the
    /// account. The custody debit runs last; if the caller cannot fund the
    /// transfer, the ledger mutation is rolled back.
    pub fn deposit(
        &mut self,
        caller: &AccountId,
        asset: AssetId,
        amount: U256,
        now: Timestamp,
    ) -> Result<()> {
        if amount.is_zero() {
            return Err(LendingError::InvalidAmount);
        }
        let config = &self.market(asset)?.config;
        if !config.is_active {
            return Err(LendingError::InvalidAsset);
        }
        if !config.is_collateral_enabled {
            return Err(LendingError::OperationDisabled);
        }

        let snapshot = self.sync_for_update(caller, asset, now)?;
        let (market, position) = self.market_and_position_mut(caller, asset)?;

        // Cap check against the post-accrual live total, so accrued
        // supplier interest counts toward the cap like everywhere else.
        let new_total = checked_add(market.state.total_supplied, amount)?;
        if let Some(cap) = market.config.supply_cap {
            if new_total > cap {
                return Err(LendingError::SupplyCapReached);
            }
        }

        position.principal_supplied = checked_add(position.principal_supplied, amount)?;
        market.state.total_supplied = new_total;

        if let Err(err) = self.custody.debit(caller, asset, amount) {
            self.restore(snapshot);
            return Err(err);
        }

        events::position_update("deposit", caller, asset, amount);
        Ok(())
    }
}
