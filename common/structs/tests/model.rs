use alloy_primitives::U256;
use common_constants::WAD;
use common_structs::{AssetConfig, AssetId, Position};

fn test_config() -> AssetConfig {
    AssetConfig {
        decimals: 18,
        is_active: true,
        is_borrow_enabled: false,
        is_collateral_enabled: true,
        liquidation_threshold_bps: 8_000,
        liquidation_bonus_bps: 500,
        reserve_factor_bps: 1_000,
        base_rate_bps: 200,
        rate_multiplier_bps: 2_000,
        flash_loan_fee_bps: 9,
        supply_cap: None,
        borrow_cap: None,
    }
}

#[test]
fn asset_config_flags_behavior() {
    let cfg = test_config();
    assert!(cfg.can_supply());
    assert!(!cfg.can_borrow());

    let mut inactive = cfg.clone();
    inactive.is_active = false;
    assert!(!inactive.can_supply());
    assert!(!inactive.can_borrow());
}

#[test]
fn asset_config_rejects_out_of_range_bps() {
    let mut cfg = test_config();
    cfg.liquidation_threshold_bps = 10_001;
    assert!(cfg.validate().is_err());

    let mut cfg = test_config();
    cfg.decimals = 40;
    assert!(cfg.validate().is_err());

    assert!(test_config().validate().is_ok());
}

#[test]
fn asset_id_ticker_round_trip() {
    let id = AssetId::from_ticker(b"WEGLD");
    assert_eq!(id.as_bytes(), b"WEGLD");
    assert_eq!(format!("{id}"), "WEGLD");
}

#[test]
fn fresh_position_is_dormant_and_reads_zero() {
    let pos = Position::new();
    assert!(pos.is_dormant());
    assert_eq!(pos.current_supplied(U256::from(WAD)).unwrap(), U256::ZERO);
    assert_eq!(pos.current_borrowed(U256::from(WAD)).unwrap(), U256::ZERO);
}

#[test]
fn sync_folds_index_growth_into_principal_once() {
    let mut pos = Position::new();
    pos.sync(U256::from(WAD), U256::from(WAD), 0).unwrap();
    pos.principal_supplied = U256::from(1_000u64);

    // Index grows 10%: live balance follows, principal re-bases on sync.
    let grown = U256::from(WAD) * U256::from(11u8) / U256::from(10u8);
    assert_eq!(
        pos.current_supplied(grown).unwrap(),
        U256::from(1_100u64)
    );

    pos.sync(grown, U256::from(WAD), 5).unwrap();
    assert_eq!(pos.principal_supplied, U256::from(1_100u64));
    assert_eq!(pos.supply_index_snapshot, grown);

    // A second sync at the same index must not grow the balance again.
    pos.sync(grown, U256::from(WAD), 6).unwrap();
    assert_eq!(pos.principal_supplied, U256::from(1_100u64));
}
