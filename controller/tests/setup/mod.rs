//! Shared world builder for the controller integration tests: an
//! in-memory price oracle and token custody behind shared handles, plus
//! two listed assets with easy round numbers.

// Each test binary uses its own subset of the helpers.
#![allow(dead_code)]

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use alloy_primitives::U256;
use common_constants::WAD;
use controller::{
    AccountId, AssetConfig, AssetId, LendingController, LendingError, PriceFeed, PriceOracle,
    ProtocolConfig, Result, Timestamp, TokenCustody,
};

pub const GENESIS: Timestamp = 1_000;

pub fn egld() -> AssetId {
    AssetId::from_ticker(b"WEGLD")
}

pub fn usdc() -> AssetId {
    AssetId::from_ticker(b"USDC")
}

pub fn account(n: u8) -> AccountId {
    AccountId([n; 32])
}

/// Amount in WEGLD native units (18 decimals).
pub fn egld_units(n: u128) -> U256 {
    U256::from(n) * U256::from(WAD)
}

/// Amount in USDC native units (6 decimals).
pub fn usdc_units(n: u128) -> U256 {
    U256::from(n) * U256::from(1_000_000u64)
}

/// WAD-scaled common-unit value.
pub fn wad(n: u128) -> U256 {
    U256::from(n) * U256::from(WAD)
}

pub fn assert_close(actual: U256, expected: U256, tolerance: U256) {
    let diff = if actual > expected {
        actual - expected
    } else {
        expected - actual
    };
    assert!(
        diff <= tolerance,
        "expected {expected} within {tolerance}, got {actual}"
    );
}

#[derive(Clone, Default)]
pub struct MockOracle {
    feeds: Rc<RefCell<BTreeMap<AssetId, PriceFeed>>>,
}

impl MockOracle {
    pub fn set_price(&self, asset: AssetId, price: U256, as_of: Timestamp) {
        self.feeds
            .borrow_mut()
            .insert(asset, PriceFeed { price, as_of });
    }

    /// Re-stamps every feed at `now` without moving prices. Tests that
    /// advance time call this to stay inside the staleness window.
    pub fn refresh(&self, now: Timestamp) {
        for feed in self.feeds.borrow_mut().values_mut() {
            feed.as_of = now;
        }
    }
}

impl PriceOracle for MockOracle {
    fn get_price(&self, asset: AssetId) -> Result<PriceFeed> {
        self.feeds
            .borrow()
            .get(&asset)
            .copied()
            .ok_or(LendingError::InvalidAsset)
    }
}

#[derive(Default)]
struct CustodyBook {
    protocol: BTreeMap<AssetId, U256>,
    wallets: BTreeMap<(AccountId, AssetId), U256>,
}

/// Wallets plus the protocol-held pot, shared so tests keep a handle to
/// the same book the controller mutates.
#[derive(Clone, Default)]
pub struct MockCustody {
    book: Rc<RefCell<CustodyBook>>,
}

impl MockCustody {
    pub fn fund_wallet(&self, account: &AccountId, asset: AssetId, amount: U256) {
        let mut book = self.book.borrow_mut();
        *book.wallets.entry((*account, asset)).or_default() += amount;
    }

    pub fn wallet_balance(&self, account: &AccountId, asset: AssetId) -> U256 {
        self.book
            .borrow()
            .wallets
            .get(&(*account, asset))
            .copied()
            .unwrap_or_default()
    }

    pub fn protocol_balance(&self, asset: AssetId) -> U256 {
        self.book
            .borrow()
            .protocol
            .get(&asset)
            .copied()
            .unwrap_or_default()
    }
}

impl TokenCustody for MockCustody {
    fn debit(&mut self, account: &AccountId, asset: AssetId, amount: U256) -> Result<()> {
        let mut book = self.book.borrow_mut();
        let wallet = book.wallets.entry((*account, asset)).or_default();
        if *wallet < amount {
            return Err(LendingError::CustodyFailure("wallet balance too low".into()));
        }
        *wallet -= amount;
        *book.protocol.entry(asset).or_default() += amount;
        Ok(())
    }

    fn credit(&mut self, account: &AccountId, asset: AssetId, amount: U256) -> Result<()> {
        let mut book = self.book.borrow_mut();
        let held = book.protocol.entry(asset).or_default();
        if *held < amount {
            return Err(LendingError::CustodyFailure(
                "protocol balance too low".into(),
            ));
        }
        *held -= amount;
        *book.wallets.entry((*account, asset)).or_default() += amount;
        Ok(())
    }

    fn available_liquidity(&self, asset: AssetId) -> Result<U256> {
        Ok(self.protocol_balance(asset))
    }
}

/// WEGLD: 18 decimals, $40, 80% threshold, 10% liquidation bonus.
pub fn egld_config() -> AssetConfig {
    AssetConfig {
        decimals: 18,
        is_active: true,
        is_borrow_enabled: true,
        is_collateral_enabled: true,
        liquidation_threshold_bps: 8_000,
        liquidation_bonus_bps: 1_000,
        reserve_factor_bps: 1_000,
        base_rate_bps: 200,
        rate_multiplier_bps: 2_000,
        flash_loan_fee_bps: 9,
        supply_cap: None,
        borrow_cap: None,
    }
}

/// USDC: 6 decimals, $1, 90% threshold, 5% liquidation bonus.
pub fn usdc_config() -> AssetConfig {
    AssetConfig {
        decimals: 6,
        is_active: true,
        is_borrow_enabled: true,
        is_collateral_enabled: true,
        liquidation_threshold_bps: 9_000,
        liquidation_bonus_bps: 500,
        reserve_factor_bps: 1_000,
        base_rate_bps: 200,
        rate_multiplier_bps: 2_000,
        flash_loan_fee_bps: 9,
        supply_cap: None,
        borrow_cap: None,
    }
}

pub struct World {
    pub controller: LendingController<MockOracle, MockCustody>,
    pub oracle: MockOracle,
    pub custody: MockCustody,
}

impl World {
    pub fn new() -> Self {
        let oracle = MockOracle::default();
        let custody = MockCustody::default();
        oracle.set_price(egld(), wad(40), GENESIS);
        oracle.set_price(usdc(), wad(1), GENESIS);

        let mut controller = LendingController::new(
            ProtocolConfig::default(),
            oracle.clone(),
            custody.clone(),
        )
        .expect("default protocol config is valid");
        controller
            .add_asset(egld(), egld_config(), GENESIS)
            .expect("list WEGLD");
        controller
            .add_asset(usdc(), usdc_config(), GENESIS)
            .expect("list USDC");

        World {
            controller,
            oracle,
            custody,
        }
    }

    /// Funds the wallet and deposits in one step.
    pub fn seed_deposit(
        &mut self,
        account: &AccountId,
        asset: AssetId,
        amount: U256,
        now: Timestamp,
    ) {
        self.custody.fund_wallet(account, asset, amount);
        self.controller
            .deposit(account, asset, amount, now)
            .expect("seed deposit");
    }
}
