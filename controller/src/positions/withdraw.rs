use alloy_primitives::U256;
use common_errors::{LendingError, Result};
use common_math::checked_sub;
use common_structs::{AccountId, AssetId, Timestamp};

use crate::{custody::TokenCustody, events, oracle::PriceOracle, LendingController};

impl<O: PriceOracle, C: TokenCustody> LendingController<O, C> {
    /// Withdraws `amount` of previously supplied `asset` back to `caller`.
    ///
    /// Allowed on deactivated assets; only new deposits are gated on the
    /// flags. The health gate runs on the post-state, after the tentative
    /// subtraction, because a withdrawal can only make health worse. An
    /// account with no debt skips the gate entirely, so suppliers are
    /// never locked out by an unrelated stale price.
    pub fn withdraw(
        &mut self,
        caller: &AccountId,
        asset: AssetId,
        amount: U256,
        now: Timestamp,
    ) -> Result<()> {
        if amount.is_zero() {
            return Err(LendingError::InvalidAmount);
        }
        self.market(asset)?;

        let snapshot = self.sync_for_update(caller, asset, now)?;
        let (market, position) = self.market_and_position_mut(caller, asset)?;

        // Post-sync the principal is the live balance.
        if position.principal_supplied < amount {
            return Err(LendingError::InsufficientBalance);
        }
        position.principal_supplied = checked_sub(position.principal_supplied, amount)?;
        // Per-position floors can lag the live total by a wei of dust
        // after many accruals; clamp rather than fail the withdrawal.
        market.state.total_supplied = market.state.total_supplied.saturating_sub(amount);

        if self.has_debt(caller) {
            if let Err(err) = self.require_healthy(caller, now) {
                self.restore(snapshot);
                return Err(err);
            }
        }

        if let Err(err) = self.custody.credit(caller, asset, amount) {
            self.restore(snapshot);
            return Err(err);
        }

        events::position_update("withdraw", caller, asset, amount);
        Ok(())
    }
}
