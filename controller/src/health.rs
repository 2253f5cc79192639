//! Account-level valuation: aggregates collateral and debt across every
//! asset an account touches into one common-unit view and the health
//! factor that gates mutating operations.

use alloy_primitives::U256;
use common_constants::MIN_HEALTH_FACTOR_BPS;
use common_errors::{LendingError, Result};
use common_math::{bps, checked_add, mul_bps, mul_div, pow10, Rounding};
use common_rates::simulate_accrued;
use common_structs::{AccountId, Timestamp};

use crate::{custody::TokenCustody, oracle::PriceOracle, LendingController};

/// Aggregate valuation of one account, all values WAD in the common unit.
/// Collateral is weighted per asset by its liquidation threshold; debt is
/// not weighted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountHealth {
    pub collateral_value: U256,
    pub weighted_collateral_value: U256,
    pub debt_value: U256,
    pub health_factor_bps: U256,
}

impl AccountHealth {
    pub fn is_healthy(&self) -> bool {
        self.health_factor_bps >= U256::from(MIN_HEALTH_FACTOR_BPS)
    }
}

impl<O: PriceOracle, C: TokenCustody> LendingController<O, C> {
    /// Values the account at `now` with accrual simulated per market and
    /// every price staleness-checked at this point of use. A debt-free
    /// account reads as maximally healthy.
    pub fn account_health(&self, account: &AccountId, now: Timestamp) -> Result<AccountHealth> {
        let mut collateral_value = U256::ZERO;
        let mut weighted_collateral_value = U256::ZERO;
        let mut debt_value = U256::ZERO;

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

                let price = self.checked_price(*asset, now)?;
                let unit = pow10(market.config.decimals);
                if !supplied.is_zero() {
                    let value = mul_div(supplied, price, unit, Rounding::Floor)?;
                    collateral_value = checked_add(collateral_value, value)?;
                    let weighted = mul_bps(
                        value,
                        U256::from(market.config.liquidation_threshold_bps),
                        Rounding::Floor,
                    )?;
                    weighted_collateral_value = checked_add(weighted_collateral_value, weighted)?;
                }
                if !borrowed.is_zero() {
                    let value = mul_div(borrowed, price, unit, Rounding::Floor)?;
                    debt_value = checked_add(debt_value, value)?;
                }
            }
        }

        let health_factor_bps = if debt_value.is_zero() {
            U256::MAX
        } else {
            mul_div(weighted_collateral_value, bps(), debt_value, Rounding::Floor)?
        };

        Ok(AccountHealth {
            collateral_value,
            weighted_collateral_value,
            debt_value,
            health_factor_bps,
        })
    }

    /// Post-state gate for borrow and withdraw: the acting account must be
    /// at or above the minimum health factor once the tentative mutation
    /// is in place.
    pub(crate) fn require_healthy(&self, account: &AccountId, now: Timestamp) -> Result<()> {
        if self.account_health(account, now)?.is_healthy() {
            Ok(())
        } else {
            Err(LendingError::InsufficientCollateral)
        }
    }
}
