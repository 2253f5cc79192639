use alloy_primitives::U256;
use common_constants::{BPS, MIN_HEALTH_FACTOR_BPS};
use common_errors::{LendingError, Result};
use common_math::{checked_sub, mul_bps, mul_div, pow10, Rounding};
use common_structs::{AccountId, AssetId, Timestamp};

use crate::{custody::TokenCustody, events, oracle::PriceOracle, LendingController};

/// What a liquidation actually moved, after the close-factor and
/// available-collateral caps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidationOutcome {
    pub debt_covered: U256,
    pub collateral_seized: U256,
}

impl<O: PriceOracle, C: TokenCustody> LendingController<O, C> {
    /// Liquidates an underwater borrower: the liquidator repays up to the
    /// close-factor share of the borrower's live debt in `debt_asset` and
    /// seizes collateral in `collateral_asset` worth the covered debt plus
    /// the asset's liquidation bonus.
    ///
    /// The single operation allowed to proceed while the borrower's health
    /// factor is below the minimum, and required to stop when it is not
    /// (`UserIsHealthy`). Seizure never exceeds the borrower's live
    /// collateral; when the bonus-inflated claim would, the seizure is
    /// capped and the covered debt reduced proportionally.
    pub fn liquidate(
        &mut self,
        liquidator: &AccountId,
        borrower: &AccountId,
        debt_asset: AssetId,
        collateral_asset: AssetId,
        debt_to_cover: U256,
        now: Timestamp,
    ) -> Result<LiquidationOutcome> {
        if debt_to_cover.is_zero() {
            return Err(LendingError::InvalidAmount);
        }
        self.market(debt_asset)?;
        self.market(collateral_asset)?;

        self.accrue_market(debt_asset, now)?;
        self.accrue_market(collateral_asset, now)?;

        let health = self.account_health(borrower, now)?;
        if health.health_factor_bps >= U256::from(MIN_HEALTH_FACTOR_BPS) {
            return Err(LendingError::UserIsHealthy);
        }

        let debt_snapshot = self.sync_for_update(borrower, debt_asset, now)?;
        let collateral_snapshot = self.sync_for_update(borrower, collateral_asset, now)?;

        // Post-sync principals are the live balances.
        let live_debt = self
            .position(borrower, debt_asset)
            .map(|p| p.principal_borrowed)
            .unwrap_or(U256::ZERO);
        let live_collateral = self
            .position(borrower, collateral_asset)
            .map(|p| p.principal_supplied)
            .unwrap_or(U256::ZERO);
        if live_debt.is_zero() || live_collateral.is_zero() {
            return Err(LendingError::InsufficientBalance);
        }

        let max_cover = mul_bps(
            live_debt,
            U256::from(self.protocol_config().close_factor_bps),
            Rounding::Floor,
        )?;
        let mut debt_covered = debt_to_cover.min(max_cover);

        let debt_price = self.checked_price(debt_asset, now)?;
        let collateral_price = self.checked_price(collateral_asset, now)?;
        let debt_unit = pow10(self.market(debt_asset)?.config.decimals);
        let collateral_unit = pow10(self.market(collateral_asset)?.config.decimals);
        let bonus_bps = self.market(collateral_asset)?.config.liquidation_bonus_bps;

        // Covered debt valued in the common unit, grossed up by the bonus,
        // then converted into collateral units at the collateral price.
        let debt_value = mul_div(debt_covered, debt_price, debt_unit, Rounding::Floor)?;
        let claim_value = mul_bps(debt_value, U256::from(BPS + bonus_bps), Rounding::Floor)?;
        let mut seized = mul_div(claim_value, collateral_unit, collateral_price, Rounding::Floor)?;

        if seized > live_collateral {
            debt_covered = mul_div(debt_covered, live_collateral, seized, Rounding::Floor)?;
            seized = live_collateral;
        }
        if debt_covered.is_zero() || seized.is_zero() {
            return Err(LendingError::InsufficientBalance);
        }

        {
            let (market, position) = self.market_and_position_mut(borrower, debt_asset)?;
            position.principal_borrowed = checked_sub(position.principal_borrowed, debt_covered)?;
            market.state.total_borrowed = market.state.total_borrowed.saturating_sub(debt_covered);
        }
        {
            let (market, position) = self.market_and_position_mut(borrower, collateral_asset)?;
            position.principal_supplied = checked_sub(position.principal_supplied, seized)?;
            market.state.total_supplied = market.state.total_supplied.saturating_sub(seized);
        }

        if let Err(err) = self.custody.debit(liquidator, debt_asset, debt_covered) {
            self.restore(collateral_snapshot);
            self.restore(debt_snapshot);
            return Err(err);
        }
        if let Err(err) = self.custody.credit(liquidator, collateral_asset, seized) {
            self.restore(collateral_snapshot);
            self.restore(debt_snapshot);
            // Hand the repayment back before surfacing the failure.
            self.custody.credit(liquidator, debt_asset, debt_covered)?;
            return Err(err);
        }

        events::liquidation(
            liquidator,
            borrower,
            debt_asset,
            collateral_asset,
            debt_covered,
            seized,
        );
        Ok(LiquidationOutcome {
            debt_covered,
            collateral_seized: seized,
        })
    }
}
