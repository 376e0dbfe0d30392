//! Settlement Payouts
//!
//! After resolution every holder withdraws their pro-rata share of the pool's
//! collateral. Balances are retired before the vault transfer.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::instructions::transfer::pay_out;
use crate::state::{Config, Pool, Position};

/// Event emitted when a holder is paid out
#[event]
pub struct FundsWithdrawn {
    pub pool_id: u64,
    pub holder: Pubkey,
    pub amount: u64,
}

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Withdraw<'info> {
    pub holder: Signer<'info>,

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
        mut,
        seeds = [Position::SEED, pool_id.to_le_bytes().as_ref(), holder.key().as_ref()],
        bump = position.bump,
    )]
    pub position: Box<Account<'info, Position>>,

    #[account(address = config.collateral_mint)]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        token::mint = collateral_mint,
        token::authority = holder,
    )]
    pub holder_collateral: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = config,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

impl<'info> Withdraw<'info> {
    pub fn withdraw(&mut self) -> Result<u64> {
        let scale = self.config.share_scale;
        let amount = self.pool.withdraw(&mut self.position, scale)?;

        pay_out(
            &self.token_program,
            &self.collateral_mint,
            &self.vault,
            &self.holder_collateral,
            &self.config,
            amount,
        )?;

        emit!(FundsWithdrawn {
            pool_id: self.pool.id,
            holder: self.holder.key(),
            amount,
        });

        msg!("Withdrew {} from pool {}", amount, self.pool.id);

        Ok(amount)
    }
}
