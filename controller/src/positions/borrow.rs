use alloy_primitives::U256;
use common_errors::{LendingError, Result};
use common_math::checked_add;
use common_structs::{AccountId, AssetId, Timestamp};

use crate::{custody::TokenCustody, events, oracle::PriceOracle, LendingController};

impl<O: PriceOracle, C: TokenCustody> LendingController<O, C> {
    /// Borrows `amount` of `asset` against the caller's collateral.
    ///
    /// Requires an active, borrow-enabled asset, protocol liquidity for
    /// the payout and borrow-cap headroom. The health gate runs on the
    /// post-state with the new debt in place; on failure the tentative
    /// mutation is rolled back and `InsufficientCollateral` is returned.
    pub fn borrow(
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
        if !config.is_borrow_enabled {
            return Err(LendingError::OperationDisabled);
        }
        if self.custody.available_liquidity(asset)? < amount {
            return Err(LendingError::InsufficientLiquidity);
        }

        let snapshot = self.sync_for_update(caller, asset, now)?;
        let (market, position) = self.market_and_position_mut(caller, asset)?;

        let new_total = checked_add(market.state.total_borrowed, amount)?;
        if let Some(cap) = market.config.borrow_cap {
            if new_total > cap {
                return Err(LendingError::BorrowCapReached);
            }
        }

        position.principal_borrowed = checked_add(position.principal_borrowed, amount)?;
        market.state.total_borrowed = new_total;

        if let Err(err) = self.require_healthy(caller, now) {
            self.restore(snapshot);
            return Err(err);
        }

        if let Err(err) = self.custody.credit(caller, asset, amount) {
            self.restore(snapshot);
            return Err(err);
        }

        events::position_update("borrow", caller, asset, amount);
        Ok(())
    }
}
