use alloy_primitives::U256;
use common_errors::Result;
use common_structs::{AccountId, AssetId};

/// External token custody collaborator. Actual value transfer lives
/// outside the ledger: `debit` pulls funds from a user into protocol
/// custody, `credit` pays out of it, and `available_liquidity` reports
/// the protocol-held balance of one asset.
///
/// The core invokes custody only after its internal state is validated
/// and updated; when a custody call fails, the calling operation rolls
/// its internal mutation back so accounting and external balances never
/// diverge.
pub trait TokenCustody {
    fn debit(&mut self, account: &AccountId, asset: AssetId, amount: U256) -> Result<()>;

    fn credit(&mut self, account: &AccountId, asset: AssetId, amount: U256) -> Result<()>;

    fn available_liquidity(&self, asset: AssetId) -> Result<U256>;
}
