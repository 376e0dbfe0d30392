//! Pool Creation
//!
//! Anyone may open a pool. The creator funds it with the initial liquidity
//! and receives that liquidity plus a 2% bonus as YES and NO shares, but is
//! blocked from trading the pool they seeded.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::instructions::transfer::collect;
use crate::state::{Config, CreateBetParams, Pool, Position};

/// Event emitted when a pool is created
#[event]
pub struct PoolCreated {
    pub pool_id: u64,
    pub creator: Pubkey,
    pub title: String,
    pub initial_liquidity: u64,
    pub shares_per_side: u64,
    pub liquidity_param: u64,
    pub closing_time: i64,
    pub resolution_time: i64,
}

#[derive(Accounts)]
pub struct CreateBet<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        mut,
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        init,
        payer = creator,
        space = 8 + Pool::INIT_SPACE,
        seeds = [Pool::SEED, config.pool_count.to_le_bytes().as_ref()],
        bump,
    )]
    pub pool: Box<Account<'info, Pool>>,

    /// Creator's shares in the new pool
    #[account(
        init,
        payer = creator,
        space = 8 + Position::INIT_SPACE,
        seeds = [
            Position::SEED,
            config.pool_count.to_le_bytes().as_ref(),
            creator.key().as_ref(),
        ],
        bump,
    )]
    pub creator_position: Box<Account<'info, Position>>,

    #[account(address = config.collateral_mint)]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        token::mint = collateral_mint,
        token::authority = creator,
    )]
    pub creator_collateral: InterfaceAccount<'info, TokenAccount>,

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

impl<'info> CreateBet<'info> {
    pub fn create_bet(&mut self, params: CreateBetParams, bumps: &CreateBetBumps) -> Result<u64> {
        self.config.ensure_active()?;

        let clock = Clock::get()?;
        let pool_id = self.config.next_pool_id()?;
        let creator = self.creator.key();

        self.creator_position.set_inner(Position {
            pool_id,
            holder: creator,
            bump: bumps.creator_position,
            ..Default::default()
        });

        let per_side = self.pool.initialize(
            pool_id,
            creator,
            &params,
            &mut self.creator_position,
            self.config.share_scale,
            clock.unix_timestamp,
            bumps.pool,
        )?;

        collect(
            &self.token_program,
            &self.collateral_mint,
            &self.creator_collateral,
            &self.vault,
            &self.creator,
            params.initial_liquidity,
        )?;

        emit!(PoolCreated {
            pool_id,
            creator,
            title: params.title,
            initial_liquidity: params.initial_liquidity,
            shares_per_side: per_side,
            liquidity_param: params.liquidity_param,
            closing_time: params.closing_time,
            resolution_time: params.resolution_time,
        });

        msg!("Pool {} created by {}", pool_id, creator);

        Ok(pool_id)
    }
}
