//! # LMSR Prediction Market
//!
//! Binary YES/NO prediction pools on Solana, priced by a Logarithmic Market
//! Scoring Rule and settled by an inference oracle.
//!
//! ## How it works
//! - A creator opens a pool with collateral and receives YES and NO shares.
//! - Traders buy and sell shares against the LMSR book; a basis-point fee is
//!   split between an optional referrer and the protocol reserve.
//! - After the resolution time, the pool's prompt is sent to the oracle
//!   gateway, which later calls `on_pool_resolve` with the outcome.
//! - Holders withdraw their pro-rata share of the pool's collateral.

use anchor_lang::prelude::*;

pub mod amm;
pub mod constants;
pub mod errors;
pub mod instructions;
pub mod state;

pub use amm::*;
pub use instructions::*;
pub use state::*;

declare_id!("967kdnvtTVxABGXH44HAwjjF8XcjYiYmEB1A7cBz2DtD");

#[program]
pub mod lmsr_market {
    use super::*;

    /// Initialize the protocol with global configuration
    pub fn initialize(ctx: Context<Initialize>, params: MarketParams) -> Result<()> {
        ctx.accounts.initialize(params, &ctx.bumps)
    }

    /// Update protocol settings (admin only)
    pub fn update_config(ctx: Context<UpdateConfig>, update: MarketConfigUpdate) -> Result<()> {
        ctx.accounts.update_config(update)
    }

    /// Open a fee account for `holder`
    pub fn open_fee_account(ctx: Context<OpenFeeAccount>, holder: Pubkey) -> Result<()> {
        ctx.accounts.open_fee_account(holder, &ctx.bumps)
    }

    /// Create a new pool funded by the caller
    pub fn create_bet(ctx: Context<CreateBet>, params: CreateBetParams) -> Result<u64> {
        ctx.accounts.create_bet(params, &ctx.bumps)
    }

    pub fn buy_yes(
        ctx: Context<Trade>,
        _pool_id: u64,
        amount: u64,
        max_total_cost: u64,
    ) -> Result<TradeQuote> {
        ctx.accounts.buy(Side::Yes, amount, max_total_cost, &ctx.bumps)
    }

    pub fn buy_no(
        ctx: Context<Trade>,
        _pool_id: u64,
        amount: u64,
        max_total_cost: u64,
    ) -> Result<TradeQuote> {
        ctx.accounts.buy(Side::No, amount, max_total_cost, &ctx.bumps)
    }

    pub fn sell_yes(
        ctx: Context<Trade>,
        _pool_id: u64,
        amount: u64,
        min_refund: u64,
    ) -> Result<TradeQuote> {
        ctx.accounts.sell(Side::Yes, amount, min_refund, &ctx.bumps)
    }

    pub fn sell_no(
        ctx: Context<Trade>,
        _pool_id: u64,
        amount: u64,
        min_refund: u64,
    ) -> Result<TradeQuote> {
        ctx.accounts.sell(Side::No, amount, min_refund, &ctx.bumps)
    }

    /// Price a buy without executing it
    pub fn quote_buy(
        ctx: Context<QuoteTrade>,
        _pool_id: u64,
        side: Side,
        amount: u64,
    ) -> Result<TradeQuote> {
        ctx.accounts.quote_buy(side, amount)
    }

    /// Price a sell without executing it
    pub fn quote_sell(
        ctx: Context<QuoteTrade>,
        _pool_id: u64,
        side: Side,
        amount: u64,
    ) -> Result<TradeQuote> {
        ctx.accounts.quote_sell(side, amount)
    }

    /// Request settlement from the oracle gateway
    pub fn resolve(ctx: Context<Resolve>, _pool_id: u64) -> Result<u64> {
        ctx.accounts.resolve()
    }

    /// Oracle callback (gateway authority only)
    pub fn on_pool_resolve(ctx: Context<OnPoolResolve>, _pool_id: u64, outcome: u8) -> Result<()> {
        ctx.accounts.on_pool_resolve(outcome)
    }

    /// Settle a pool the oracle never answered (admin only)
    pub fn force_resolve(
        ctx: Context<ForceResolve>,
        _pool_id: u64,
        resolution: Resolution,
    ) -> Result<()> {
        ctx.accounts.force_resolve(resolution)
    }

    /// Current payout owed to a position
    pub fn withdrawable_amount(ctx: Context<WithdrawableAmount>) -> Result<u64> {
        ctx.accounts.withdrawable_amount()
    }

    /// Claim a payout after resolution
    pub fn withdraw(ctx: Context<Withdraw>, _pool_id: u64) -> Result<u64> {
        ctx.accounts.withdraw()
    }

    /// Claim accrued trade fees
    pub fn withdraw_fees(ctx: Context<WithdrawFees>) -> Result<u64> {
        ctx.accounts.withdraw_fees()
    }
}
