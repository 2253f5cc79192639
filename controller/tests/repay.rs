mod setup;

use alloy_primitives::U256;
use controller::LendingError;
use setup::*;

fn world_with_debt() -> (World, controller::AccountId) {
    let mut world = World::new();
    let borrower = account(2);
    world.seed_deposit(&account(1), usdc(), usdc_units(10_000), GENESIS);
    world.seed_deposit(&borrower, egld(), egld_units(100), GENESIS);
    world
        .controller
        .borrow(&borrower, usdc(), usdc_units(1_000), GENESIS)
        .unwrap();
    (world, borrower)
}

#[test]
fn partial_repay_reduces_the_debt() {
    let (mut world, borrower) = world_with_debt();

    let applied = world
        .controller
        .repay(&borrower, usdc(), usdc_units(400), GENESIS)
        .unwrap();
    assert_eq!(applied, usdc_units(400));
    assert_eq!(
        world
            .controller
            .current_borrowed(&borrower, usdc(), GENESIS)
            .unwrap(),
        usdc_units(600)
    );
    // 1000 borrowed out, 400 back in.
    assert_eq!(
        world.custody.wallet_balance(&borrower, usdc()),
        usdc_units(600)
    );
}

#[test]
fn overpayment_is_capped_at_the_live_debt() {
    let (mut world, borrower) = world_with_debt();
    world
        .custody
        .fund_wallet(&borrower, usdc(), usdc_units(5_000));

    let applied = world
        .controller
        .repay(&borrower, usdc(), usdc_units(5_000), GENESIS)
        .unwrap();
    assert_eq!(applied, usdc_units(1_000));
    assert_eq!(
        world
            .controller
            .current_borrowed(&borrower, usdc(), GENESIS)
            .unwrap(),
        U256::ZERO
    );
    // Only the capped amount was debited: 1000 loan + 5000 top-up - 1000.
    assert_eq!(
        world.custody.wallet_balance(&borrower, usdc()),
        usdc_units(5_000)
    );
}

#[test]
fn repaying_with_no_debt_applies_nothing() {
    let mut world = World::new();
    let idler = account(7);
    world.custody.fund_wallet(&idler, usdc(), usdc_units(100));

    let applied = world
        .controller
        .repay(&idler, usdc(), usdc_units(100), GENESIS)
        .unwrap();
    assert_eq!(applied, U256::ZERO);
    assert_eq!(
        world.custody.wallet_balance(&idler, usdc()),
        usdc_units(100)
    );
}

#[test]
fn repay_of_zero_is_rejected() {
    let (mut world, borrower) = world_with_debt();
    let err = world
        .controller
        .repay(&borrower, usdc(), U256::ZERO, GENESIS)
        .unwrap_err();
    assert_eq!(err, LendingError::InvalidAmount);
}

#[test]
fn repay_covers_accrued_interest() {
    let (mut world, borrower) = world_with_debt();

    // Utilization 10% ⇒ 4% APR on the 1000 borrowed.
    let later = GENESIS + 31_556_926;
    world.oracle.refresh(later);
    world
        .custody
        .fund_wallet(&borrower, usdc(), usdc_units(2_000));

    let applied = world
        .controller
        .repay(&borrower, usdc(), usdc_units(2_000), later)
        .unwrap();
    assert_close(applied, usdc_units(1_040), U256::from(10_000u64));
    assert_eq!(
        world
            .controller
            .current_borrowed(&borrower, usdc(), later)
            .unwrap(),
        U256::ZERO
    );
}

#[test]
fn failed_custody_debit_rolls_the_repayment_back() {
    let (mut world, borrower) = world_with_debt();
    // Drain the borrower's wallet so the debit cannot be funded.
    let drained = world.custody.wallet_balance(&borrower, usdc());
    world
        .controller
        .deposit(&borrower, usdc(), drained, GENESIS)
        .unwrap();

    let err = world
        .controller
        .repay(&borrower, usdc(), usdc_units(400), GENESIS)
        .unwrap_err();
    assert!(matches!(err, LendingError::CustodyFailure(_)));
    assert_eq!(
        world
            .controller
            .current_borrowed(&borrower, usdc(), GENESIS)
            .unwrap(),
        usdc_units(1_000)
    );
}

#[test]
fn repay_works_on_a_deactivated_asset() {
    let (mut world, borrower) = world_with_debt();
    world
        .controller
        .update_asset_flags(usdc(), false, false, false)
        .unwrap();

    let applied = world
        .controller
        .repay(&borrower, usdc(), usdc_units(1_000), GENESIS)
        .unwrap();
    assert_eq!(applied, usdc_units(1_000));
}
