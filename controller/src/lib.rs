//! Collateralized lending ledger core.
//!
//! One owned state object orchestrates asset markets, per-account
//! positions and the health engine behind a single mutation gateway:
//! every mutating operation takes `&mut self`, so the borrow checker
//! serializes execution exactly like the single-writer platform the
//! ledger models. External collaborators (the price oracle, the token
//! custody layer and the flash-loan receiver) are trait seams, and the
//! core calls them only after its own invariants hold.
//!
//! Every public operation starts by accruing interest on the touched
//! market(s); skipping accrual anywhere would reopen the stale-index
//! attack surface, so it is a mandatory first step rather than a
//! background job.

pub mod config;
pub mod custody;
mod events;
pub mod flash;
pub mod health;
pub mod oracle;
pub mod positions;
mod registry;
pub mod views;

use std::collections::BTreeMap;

pub use common_errors::{LendingError, Result};
pub use common_structs::{
    AccountAssetView, AccountId, AccountView, AssetConfig, AssetId, Market, MarketState,
    MarketView, Position, PriceFeed, ProtocolConfig, Timestamp,
};
pub use custody::TokenCustody;
pub use flash::FlashLoanReceiver;
pub use health::AccountHealth;
pub use oracle::PriceOracle;
pub use positions::liquidation::LiquidationOutcome;

/// The lending core. Owns every `Market` and `Position` record
/// exclusively; no external component mutates them directly.
pub struct LendingController<O, C> {
    config: ProtocolConfig,
    markets: BTreeMap<AssetId, Market>,
    positions: BTreeMap<AccountId, BTreeMap<AssetId, Position>>,
    oracle: O,
    custody: C,
}

impl<O: PriceOracle, C: TokenCustody> LendingController<O, C> {
    pub fn new(config: ProtocolConfig, oracle: O, custody: C) -> Result<Self> {
        config.validate()?;
        Ok(LendingController {
            config,
            markets: BTreeMap::new(),
            positions: BTreeMap::new(),
            oracle,
            custody,
        })
    }

    pub fn protocol_config(&self) -> &ProtocolConfig {
        &self.config
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn custody(&self) -> &C {
        &self.custody
    }
}
