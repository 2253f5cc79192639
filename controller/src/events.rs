//! Structured operation events, one per state transition the outside
//! world cares about.

use alloy_primitives::U256;
use common_structs::{AccountId, AssetId, MarketState};

pub(crate) fn market_update(asset: AssetId, state: &MarketState) {
    tracing::debug!(
        target: "lending",
        %asset,
        supply_index = %state.supply_index,
        borrow_index = %state.borrow_index,
        total_supplied = %state.total_supplied,
        total_borrowed = %state.total_borrowed,
        reserves = %state.reserves,
        "market update"
    );
}

pub(crate) fn position_update(
    op: &'static str,
    account: &AccountId,
    asset: AssetId,
    amount: U256,
) {
    tracing::info!(target: "lending", op, %account, %asset, %amount, "position update");
}

pub(crate) fn liquidation(
    liquidator: &AccountId,
    borrower: &AccountId,
    debt_asset: AssetId,
    collateral_asset: AssetId,
    debt_covered: U256,
    collateral_seized: U256,
) {
    tracing::info!(
        target: "lending",
        %liquidator,
        %borrower,
        %debt_asset,
        %collateral_asset,
        %debt_covered,
        %collateral_seized,
        "liquidation"
    );
}

pub(crate) fn flash_loan(account: &AccountId, asset: AssetId, amount: U256, fee: U256) {
    tracing::info!(target: "lending", %account, %asset, %amount, %fee, "flash loan");
}

pub(crate) fn asset_added(asset: AssetId) {
    tracing::info!(target: "lending", %asset, "asset added");
}

pub(crate) fn reserves_collected(asset: AssetId, amount: U256) {
    tracing::info!(target: "lending", %asset, %amount, "reserves collected");
}
