use alloy_primitives::U256;
use common_errors::{LendingError, Result};
use common_math::checked_sub;
use common_structs::{AccountId, AssetId, Timestamp};

use crate::{custody::TokenCustody, events, oracle::PriceOracle, LendingController};

impl<O: PriceOracle, C: TokenCustody> LendingController<O, C> {
    /// Repays up to `amount` of the caller's debt in `asset` and returns
    /// the amount actually applied.
    ///
    /// Overpayment is capped at the live debt rather than rejected;
    /// paying too much is a benign mistake, and only the capped amount is
    /// debited from the caller. Allowed on deactivated assets. No health
    /// check: repaying can only improve the account.
    pub fn repay(
        &mut self,
        caller: &AccountId,
        asset: AssetId,
        amount: U256,
        now: Timestamp,
    ) -> Result<U256> {
        if amount.is_zero() {
            return Err(LendingError::InvalidAmount);
        }
        self.market(asset)?;

        let snapshot = self.sync_for_update(caller, asset, now)?;
        let (market, position) = self.market_and_position_mut(caller, asset)?;

        let payment = amount.min(position.principal_borrowed);
        if payment.is_zero() {
            return Ok(U256::ZERO);
        }

        position.principal_borrowed = checked_sub(position.principal_borrowed, payment)?;
        // Same dust tolerance as withdrawals: the summed per-position
        // floors may exceed the live total by a wei.
        market.state.total_borrowed = market.state.total_borrowed.saturating_sub(payment);

        if let Err(err) = self.custody.debit(caller, asset, payment) {
            self.restore(snapshot);
            return Err(err);
        }

        events::position_update("repay", caller, asset, payment);
        Ok(payment)
    }
}
