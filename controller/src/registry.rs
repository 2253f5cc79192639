//! Market and position access helpers shared by every operation, plus the
//! per-operation rollback snapshot.

use std::collections::BTreeMap;

use common_errors::{LendingError, Result};
use common_structs::{AccountId, AssetId, Market, MarketState, Position, Timestamp};

use crate::{custody::TokenCustody, events, oracle::PriceOracle, LendingController};

/// Copy of the state one operation may touch for a single (account, asset)
/// pair, taken after accrual and before any principal delta. Restoring it
/// undoes the operation without undoing the accrual, which is a pure
/// time-advancement any operation would have performed identically.
pub(crate) struct OpSnapshot {
    asset: AssetId,
    account: AccountId,
    market: MarketState,
    position: Position,
}

impl<O: PriceOracle, C: TokenCustody> LendingController<O, C> {
    pub(crate) fn market(&self, asset: AssetId) -> Result<&Market> {
        self.markets.get(&asset).ok_or(LendingError::InvalidAsset)
    }

    pub(crate) fn market_mut(&mut self, asset: AssetId) -> Result<&mut Market> {
        self.markets
            .get_mut(&asset)
            .ok_or(LendingError::InvalidAsset)
    }

    /// Advances the market to `now`. Mandatory first step of every public
    /// operation; a second call at the same timestamp is a no-op.
    pub(crate) fn accrue_market(&mut self, asset: AssetId, now: Timestamp) -> Result<()> {
        let market = self.market_mut(asset)?;
        common_rates::accrue(&market.config, &mut market.state, now)?;
        events::market_update(asset, &market.state);
        Ok(())
    }

    /// Mutable access to one market together with the caller's (lazily
    /// created) position in it. The two live in disjoint maps, so both
    /// borrows can be handed out at once.
    pub(crate) fn market_and_position_mut(
        &mut self,
        account: &AccountId,
        asset: AssetId,
    ) -> Result<(&mut Market, &mut Position)> {
        let market = self
            .markets
            .get_mut(&asset)
            .ok_or(LendingError::InvalidAsset)?;
        let position = self
            .positions
            .entry(*account)
            .or_default()
            .entry(asset)
            .or_default();
        Ok((market, position))
    }

    /// Accrues the market, folds accrued interest into the caller's
    /// position and returns the rollback snapshot of both.
    pub(crate) fn sync_for_update(
        &mut self,
        account: &AccountId,
        asset: AssetId,
        now: Timestamp,
    ) -> Result<OpSnapshot> {
        self.accrue_market(asset, now)?;
        let (market, position) = self.market_and_position_mut(account, asset)?;
        position.sync(market.state.supply_index, market.state.borrow_index, now)?;
        Ok(OpSnapshot {
            asset,
            account: *account,
            market: market.state.clone(),
            position: position.clone(),
        })
    }

    /// Restores a snapshot taken by `sync_for_update`. The records are
    /// known to exist; a missing entry means the snapshot is being replayed
    /// against the wrong controller and is left untouched.
    pub(crate) fn restore(&mut self, snapshot: OpSnapshot) {
        if let Some(market) = self.markets.get_mut(&snapshot.asset) {
            market.state = snapshot.market;
        }
        if let Some(position) = self
            .positions
            .get_mut(&snapshot.account)
            .and_then(|assets| assets.get_mut(&snapshot.asset))
        {
            *position = snapshot.position;
        }
    }

    pub(crate) fn position(&self, account: &AccountId, asset: AssetId) -> Option<&Position> {
        self.positions
            .get(account)
            .and_then(|assets| assets.get(&asset))
    }

    /// Every position the account has ever touched, dormant ones included.
    pub(crate) fn positions_of(
        &self,
        account: &AccountId,
    ) -> Option<&BTreeMap<AssetId, Position>> {
        self.positions.get(account)
    }

    /// Whether the account carries any live debt. Principal stays nonzero
    /// exactly while the live borrowed balance is nonzero, so no index
    /// replay is needed here.
    pub(crate) fn has_debt(&self, account: &AccountId) -> bool {
        self.positions
            .get(account)
            .map(|assets| {
                assets
                    .values()
                    .any(|position| !position.principal_borrowed.is_zero())
            })
            .unwrap_or(false)
    }
}
