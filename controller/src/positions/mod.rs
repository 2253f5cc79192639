//! The mutating ledger operations, one module per user-facing entry
//! point. Every operation follows the same shape: validate the request,
//! accrue the touched market(s), sync the position, apply the principal
//! delta, gate on post-state health where the operation can worsen it,
//! and only then call out to token custody, rolling the internal
//! mutation back if the external transfer fails.

pub mod borrow;
pub mod liquidation;
pub mod repay;
pub mod supply;
pub mod withdraw;
