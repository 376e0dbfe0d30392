use anchor_lang::prelude::*;

#[error_code]
pub enum MarketError {
    #[msg("Unauthorized admin action")]
    Unauthorized,
    #[msg("Caller is not the configured oracle gateway")]
    UnauthorizedOracle,
    #[msg("Protocol is paused")]
    ProtocolPaused,
    #[msg("Initial liquidity must be positive")]
    EmptyLiquidity,
    #[msg("Liquidity parameter must be positive")]
    InvalidLiquidityParam,
    #[msg("Closing time must be in the future")]
    InvalidClosingTime,
    #[msg("Resolution time must not precede closing time")]
    InvalidResolutionTime,
    #[msg("Resolution prompt is empty")]
    EmptyPrompt,
    #[msg("Resolution prompt exceeds maximum length")]
    PromptTooLong,
    #[msg("Title exceeds maximum length")]
    TitleTooLong,
    #[msg("Amount must be positive")]
    ZeroAmount,
    #[msg("Trading window is closed")]
    TradingClosed,
    #[msg("Pool is already resolved")]
    AlreadyResolved,
    #[msg("Address is blocked from trading this pool")]
    TraderBlocked,
    #[msg("Insufficient share balance")]
    InsufficientBalance,
    #[msg("Trade too small to price")]
    TradeTooSmall,
    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded,
    #[msg("Pool collateral cannot cover this payout")]
    InsufficientCollateral,
    #[msg("Resolution time has not been reached")]
    ResolutionTooEarly,
    #[msg("A resolution request is already in flight")]
    ResolutionInFlight,
    #[msg("Prior request does not belong to this pool")]
    PriorRequestMismatch,
    #[msg("Pool is not resolved")]
    NotResolved,
    #[msg("Nothing to withdraw")]
    NothingToWithdraw,
    #[msg("No fees accrued")]
    NoFeesAccrued,
    #[msg("Trade fee exceeds maximum")]
    FeeTooHigh,
    #[msg("Referral share exceeds 100%")]
    InvalidReferralShare,
    #[msg("Fallback resolution is disabled")]
    FallbackDisabled,
    #[msg("Fallback grace period has not elapsed")]
    FallbackTooEarly,
    #[msg("Resolution must be YES, NO or INCONCLUSIVE")]
    InvalidResolution,
    #[msg("Unrecognised oracle outcome code")]
    UnknownOutcome,
    #[msg("Position does not belong to this pool")]
    PositionMismatch,
    #[msg("Math operation overflow")]
    MathOverflow,
}
