//! Read-only views, answered through return data

use anchor_lang::prelude::*;

use crate::amm::Side;
use crate::errors::MarketError;
use crate::state::{Config, Pool, Position, TradeQuote};

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct QuoteTrade<'info> {
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [Pool::SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,
}

impl<'info> QuoteTrade<'info> {
    pub fn quote_buy(&self, side: Side, amount: u64) -> Result<TradeQuote> {
        self.pool
            .quote_buy(side, amount, self.config.share_scale, self.config.fee_schedule())
    }

    pub fn quote_sell(&self, side: Side, amount: u64) -> Result<TradeQuote> {
        self.pool
            .quote_sell(side, amount, self.config.share_scale, self.config.fee_schedule())
    }
}

#[derive(Accounts)]
pub struct WithdrawableAmount<'info> {
    pub pool: Account<'info, Pool>,

    #[account(constraint = position.pool_id == pool.id @ MarketError::PositionMismatch)]
    pub position: Account<'info, Position>,
}

impl<'info> WithdrawableAmount<'info> {
    pub fn withdrawable_amount(&self) -> Result<u64> {
        self.pool.payout_for(&self.position)
    }
}
