use alloy_primitives::U256;
use common_errors::{LendingError, Result};
use common_structs::{AssetId, PriceFeed, Timestamp};

use crate::{custody::TokenCustody, LendingController};

/// External price source collaborator. Returns the WAD price of one whole
/// token in the common value unit together with the sample timestamp; the
/// core decides freshness, the oracle only reports what it has.
pub trait PriceOracle {
    fn get_price(&self, asset: AssetId) -> Result<PriceFeed>;
}

impl<O: PriceOracle, C: TokenCustody> LendingController<O, C> {
    /// Fetches a price and enforces the staleness window at the point of
    /// use. Staleness evolves with time, so the check runs on every read
    /// (health computation, liquidation pricing) rather than once per
    /// operation batch. Fails closed with `PriceStale`.
    pub(crate) fn checked_price(&self, asset: AssetId, now: Timestamp) -> Result<U256> {
        let feed = self.oracle().get_price(asset)?;
        if now.saturating_sub(feed.as_of) > self.protocol_config().max_price_age_secs {
            return Err(LendingError::PriceStale);
        }
        Ok(feed.price)
    }
}
