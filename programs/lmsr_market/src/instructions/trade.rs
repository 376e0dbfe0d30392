//! Share Trading
//!
//! Buys and sells YES/NO shares against the pool's LMSR book. Pool and
//! position state is settled first; the token transfer is the last step.
//!
//! ```text
//!   buy:  trader ──(gross + fee)──▶ vault     pool.collateral += gross
//!   sell: vault ──(gross − fee)──▶ trader     pool.collateral −= gross
//! ```
//!
//! Fees stay in the vault and are credited to the referrer's and the
//! reserve's fee accounts.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::amm::Side;
use crate::errors::MarketError;
use crate::instructions::transfer::{collect, pay_out};
use crate::state::{Config, FeeAccount, FeeSplit, Pool, Position, TradeQuote, TradeReceipt};

/// Event emitted for every buy and sell
#[event]
pub struct TradeExecuted {
    pub pool_id: u64,
    pub trader: Pubkey,
    pub side: Side,
    pub is_buy: bool,
    pub shares: u64,
    pub gross: u64,
    pub fee: u64,
    pub referrer: Option<Pubkey>,
    pub referrer_fee: u64,
    pub reserve_fee: u64,
    pub settled: u64,
    pub yes_price_bps: u64,
}

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Trade<'info> {
    #[account(mut)]
    pub trader: Signer<'info>,

    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        seeds = [Pool::SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(
        init_if_needed,
        payer = trader,
        space = 8 + Position::INIT_SPACE,
        seeds = [Position::SEED, pool_id.to_le_bytes().as_ref(), trader.key().as_ref()],
        bump,
    )]
    pub position: Box<Account<'info, Position>>,

    /// Referrer's fee account. Must stay declared before `reserve_fees`:
    /// when both are the same account, the later write-back wins.
    #[account(mut)]
    pub referrer_fees: Option<Account<'info, FeeAccount>>,

    #[account(
        mut,
        seeds = [FeeAccount::SEED, config.fee_reserve.as_ref()],
        bump = reserve_fees.bump,
    )]
    pub reserve_fees: Box<Account<'info, FeeAccount>>,

    #[account(address = config.collateral_mint)]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        token::mint = collateral_mint,
        token::authority = trader,
    )]
    pub trader_collateral: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = config,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> Trade<'info> {
    /// Buy `amount` shares of `side`, paying at most `max_total_cost`
    pub fn buy(
        &mut self,
        side: Side,
        amount: u64,
        max_total_cost: u64,
        bumps: &TradeBumps,
    ) -> Result<TradeQuote> {
        self.config.ensure_active()?;
        self.open_position(bumps);

        let clock = Clock::get()?;
        let scale = self.config.share_scale;
        let schedule = self.config.fee_schedule();
        let referrer_valid = self.has_valid_referrer();

        let receipt = self.pool.buy(
            &mut self.position,
            side,
            amount,
            clock.unix_timestamp,
            scale,
            schedule,
            referrer_valid,
        )?;
        require!(
            receipt.quote.settled <= max_total_cost,
            MarketError::SlippageExceeded
        );
        self.credit_fees(receipt.fees)?;

        collect(
            &self.token_program,
            &self.collateral_mint,
            &self.trader_collateral,
            &self.vault,
            &self.trader,
            receipt.quote.settled,
        )?;

        self.emit_trade(&receipt, true);
        msg!(
            "Bought {} {:?} in pool {} for {}",
            amount,
            side,
            self.pool.id,
            receipt.quote.settled
        );

        Ok(receipt.quote)
    }

    /// Sell `amount` shares of `side`, receiving at least `min_refund`
    pub fn sell(
        &mut self,
        side: Side,
        amount: u64,
        min_refund: u64,
        bumps: &TradeBumps,
    ) -> Result<TradeQuote> {
        self.config.ensure_active()?;
        self.open_position(bumps);

        let clock = Clock::get()?;
        let scale = self.config.share_scale;
        let schedule = self.config.fee_schedule();
        let referrer_valid = self.has_valid_referrer();

        let receipt = self.pool.sell(
            &mut self.position,
            side,
            amount,
            clock.unix_timestamp,
            scale,
            schedule,
            referrer_valid,
        )?;
        require!(
            receipt.quote.settled >= min_refund,
            MarketError::SlippageExceeded
        );
        self.credit_fees(receipt.fees)?;

        if receipt.quote.settled > 0 {
            pay_out(
                &self.token_program,
                &self.collateral_mint,
                &self.vault,
                &self.trader_collateral,
                &self.config,
                receipt.quote.settled,
            )?;
        }

        self.emit_trade(&receipt, false);
        msg!(
            "Sold {} {:?} in pool {} for {}",
            amount,
            side,
            self.pool.id,
            receipt.quote.settled
        );

        Ok(receipt.quote)
    }

    /// Fills in a position created by `init_if_needed`
    fn open_position(&mut self, bumps: &TradeBumps) {
        if self.position.holder == Pubkey::default() {
            self.position.set_inner(Position {
                pool_id: self.pool.id,
                holder: self.trader.key(),
                bump: bumps.position,
                ..Default::default()
            });
        }
    }

    fn has_valid_referrer(&self) -> bool {
        self.referrer_fees
            .as_ref()
            .is_some_and(|fees| self.config.is_valid_referrer(&fees.holder))
    }

    fn credit_fees(&mut self, split: FeeSplit) -> Result<()> {
        if split.referrer > 0 {
            if let Some(referrer_fees) = self.referrer_fees.as_mut() {
                referrer_fees.credit(split.referrer)?;
            }
        }
        self.reserve_fees.credit(split.reserve)
    }

    fn emit_trade(&self, receipt: &TradeReceipt, is_buy: bool) {
        emit!(TradeExecuted {
            pool_id: self.pool.id,
            trader: self.trader.key(),
            side: receipt.quote.side,
            is_buy,
            shares: receipt.quote.shares,
            gross: receipt.quote.gross,
            fee: receipt.quote.fee,
            referrer: self.referrer_fees.as_ref().map(|fees| fees.holder),
            referrer_fee: receipt.fees.referrer,
            reserve_fee: receipt.fees.reserve,
            settled: receipt.quote.settled,
            yes_price_bps: receipt.quote.yes_price_bps,
        });
    }
}
