//! Read-only projections. Views simulate accrual to `now` instead of
//! mutating the stored market state, so clients and tests can inspect
//! live numbers without advancing the ledger.

use alloy_primitives::U256;
use common_errors::Result;
use common_rates::{rates_per_second, simulate_accrued, utilization_wad};
use common_structs::{
    AccountAssetView, AccountId, AccountView, AssetId, MarketView, Timestamp,
};

use crate::{custody::TokenCustody, oracle::PriceOracle, LendingController};

impl<O: PriceOracle, C: TokenCustody> LendingController<O, C> {
    /// One market with accrual simulated to `now`: live totals, indices,
    /// utilization and the current per-second rates.
    pub fn market_view(&self, asset: AssetId, now: Timestamp) -> Result<MarketView> {
        let market = self.market(asset)?;
        let projected = simulate_accrued(&market.config, &market.state, now)?;
        let utilization = utilization_wad(projected.total_borrowed, projected.total_supplied)?;
        let rates = rates_per_second(&market.config, utilization)?;
        Ok(MarketView {
            asset,
            total_supplied: projected.total_supplied,
            total_borrowed: projected.total_borrowed,
            reserves: projected.reserves,
            supply_index: projected.supply_index,
            borrow_index: projected.borrow_index,
            utilization,
            borrow_rate_per_second: rates.borrow_rate_per_second,
            supply_rate_per_second: rates.supply_rate_per_second,
            last_accrual_timestamp: projected.last_accrual_timestamp,
        })
    }

    /// The account's live supplied balance in one asset at `now`.
    pub fn current_supplied(
        &self,
        account: &AccountId,
        asset: AssetId,
        now: Timestamp,
    ) -> Result<U256> {
        let market = self.market(asset)?;
        match self.position(account, asset) {
            Some(position) => {
                let projected = simulate_accrued(&market.config, &market.state, now)?;
                position.current_supplied(projected.supply_index)
            }
            None => Ok(U256::ZERO),
        }
    }

    /// The account's live borrowed balance in one asset at `now`.
    pub fn current_borrowed(
        &self,
        account: &AccountId,
        asset: AssetId,
        now: Timestamp,
    ) -> Result<U256> {
        let market = self.market(asset)?;
        match self.position(account, asset) {
            Some(position) => {
                let projected = simulate_accrued(&market.config, &market.state, now)?;
                position.current_borrowed(projected.borrow_index)
            }
            None => Ok(U256::ZERO),
        }
    }

    /// The account's health factor at `now`, in basis points. `U256::MAX`
    /// for a debt-free account.
    pub fn health_factor_bps(&self, account: &AccountId, now: Timestamp) -> Result<U256> {
        Ok(self.account_health(account, now)?.health_factor_bps)
    }

    /// Aggregate account projection: every non-dormant per-asset balance
    /// plus the valuation the health engine would see at `now`.
    pub fn account_view(&self, account: &AccountId, now: Timestamp) -> Result<AccountView> {
        let mut positions = Vec::new();
        if let Some(assets) = self.positions_of(account) {
            for (asset, position) in assets {
                if position.is_dormant() {
                    continue;
                }
                let market = self.market(*asset)?;
                let projected = simulate_accrued(&market.config, &market.state, now)?;
                let supplied = position.current_supplied(projected.supply_index)?;
                let borrowed = position.current_borrowed(projected.borrow_index)?;
                if supplied.is_zero() && borrowed.is_zero() {
                    continue;
                }
                positions.push(AccountAssetView {
                    asset: *asset,
                    supplied,
                    borrowed,
                });
            }
        }
        let health = self.account_health(account, now)?;
        Ok(AccountView {
            positions,
            collateral_value: health.collateral_value,
            weighted_collateral_value: health.weighted_collateral_value,
            debt_value: health.debt_value,
            health_factor_bps: health.health_factor_bps,
        })
    }
}
