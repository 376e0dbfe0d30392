use anchor_lang::prelude::*;

#[error_code]
pub enum GatewayError {
    #[msg("Only the gateway admin may perform this action")]
    Unauthorized,
    #[msg("Caller is not the authorised market")]
    UnauthorizedMarket,
    #[msg("Signer is not the trusted responding node")]
    UnauthorizedNode,
    #[msg("Resolution prompt is empty")]
    EmptyPrompt,
    #[msg("Resolution prompt exceeds maximum length")]
    PromptTooLong,
    #[msg("Attached callback value is below the configured minimum")]
    InsufficientCallbackValue,
    #[msg("Session credit exhausted, restart the session")]
    SessionExhausted,
    #[msg("Gateway holds no fee tokens to fund a session")]
    EmptySessionFunds,
    #[msg("Request has already been answered")]
    AlreadyAnswered,
    #[msg("Request has no recorded outcome to deliver")]
    NotFulfilled,
    #[msg("Outcome was already delivered")]
    AlreadyDelivered,
    #[msg("Callback program does not match the request")]
    CallbackMismatch,
    #[msg("Callback target accounts missing")]
    MissingCallbackAccounts,
    #[msg("Math operation overflow")]
    MathOverflow,
}
