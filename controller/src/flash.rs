//! Uncollateralized same-call borrowing guarded by an atomic repayment
//! check. The callback window is explicit in the types: the receiver gets
//! the custody handle and nothing else, so it cannot re-enter the
//! ledger; the controller stays exclusively borrowed for the whole
//! operation.

use alloy_primitives::U256;
use common_errors::{LendingError, Result};
use common_math::{checked_add, mul_bps, Rounding};
use common_structs::{AccountId, AssetId, Timestamp};

use crate::{custody::TokenCustody, events, oracle::PriceOracle, LendingController};

/// Flash-loan receiver contract. `on_flash_loan` runs after the loan has
/// been credited; it must push `amount + fee` back into protocol custody
/// before returning. Any error it reports, or any repayment shortfall
/// observed after it returns, fails the whole operation.
pub trait FlashLoanReceiver<C: TokenCustody> {
    fn on_flash_loan(
        &mut self,
        custody: &mut C,
        asset: AssetId,
        amount: U256,
        fee: U256,
        payload: &[u8],
    ) -> Result<()>;
}

impl<O: PriceOracle, C: TokenCustody> LendingController<O, C> {
    /// Lends `amount` of `asset` to `receiver` for the duration of its
    /// callback and requires it back with the asset's flash fee.
    ///
    /// Effects are ordered per the reentrancy design: the payout happens
    /// before the callback, the repayment check strictly after it returns.
    /// On a failed repayment the payout is clawed back so custody ends at
    /// its pre-loan balance, and the fee never reaches reserves.
    pub fn flash_loan<R: FlashLoanReceiver<C>>(
        &mut self,
        receiver_account: &AccountId,
        receiver: &mut R,
        asset: AssetId,
        amount: U256,
        payload: &[u8],
        now: Timestamp,
    ) -> Result<()> {
        if amount.is_zero() {
            return Err(LendingError::InvalidAmount);
        }
        let config = &self.market(asset)?.config;
        if !config.is_active {
            return Err(LendingError::InvalidAsset);
        }
        // The protocol collects; the fee rounds up.
        let fee = mul_bps(
            amount,
            U256::from(config.flash_loan_fee_bps),
            Rounding::Ceil,
        )?;

        self.accrue_market(asset, now)?;

        let pre_balance = self.custody.available_liquidity(asset)?;
        if pre_balance < amount {
            return Err(LendingError::InsufficientLiquidity);
        }
        self.custody.credit(receiver_account, asset, amount)?;

        let outcome = receiver.on_flash_loan(&mut self.custody, asset, amount, fee, payload);

        let post_balance = self.custody.available_liquidity(asset)?;
        let required = checked_add(pre_balance, fee)?;
        if outcome.is_err() || post_balance < required {
            let shortfall = pre_balance.saturating_sub(post_balance);
            if !shortfall.is_zero() {
                self.custody.debit(receiver_account, asset, shortfall)?;
            }
            return Err(LendingError::FlashLoanNotRepaid);
        }

        let market = self.market_mut(asset)?;
        market.state.reserves = checked_add(market.state.reserves, fee)?;
        events::market_update(asset, &market.state);
        events::flash_loan(receiver_account, asset, amount, fee);
        Ok(())
    }
}
