use thiserror::Error;

/// Failure taxonomy for the lending core. Every operation aborts with one
/// of these and leaves no partial state behind; callers decide whether to
/// retry with different inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LendingError {
    #[error("unknown or inactive asset")]
    InvalidAsset,

    #[error("operation disabled for this asset")]
    OperationDisabled,

    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("amount exceeds live position balance")]
    InsufficientBalance,

    #[error("insufficient protocol liquidity")]
    InsufficientLiquidity,

    #[error("health factor would fall below the minimum")]
    InsufficientCollateral,

    #[error("account is not liquidatable")]
    UserIsHealthy,

    #[error("oracle price is older than the allowed window")]
    PriceStale,

    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    #[error("arithmetic underflow")]
    ArithmeticUnderflow,

    #[error("division by zero")]
    DivisionByZero,

    #[error("flash loan was not repaid with its fee")]
    FlashLoanNotRepaid,

    #[error("supply cap reached")]
    SupplyCapReached,

    #[error("borrow cap reached")]
    BorrowCapReached,

    #[error("asset already listed")]
    AssetAlreadyListed,

    #[error("invalid asset configuration")]
    InvalidAssetConfig,

    #[error("custody transfer failed: {0}")]
    CustodyFailure(String),
}

pub type Result<T> = core::result::Result<T, LendingError>;
