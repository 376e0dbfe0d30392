use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::instructions::transfer::pay_out;
use crate::state::{Config, FeeAccount};

/// Event emitted when accrued fees are paid out
#[event]
pub struct FeesWithdrawn {
    pub holder: Pubkey,
    pub amount: u64,
}

#[derive(Accounts)]
pub struct WithdrawFees<'info> {
    pub holder: Signer<'info>,

    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        seeds = [FeeAccount::SEED, holder.key().as_ref()],
        bump = fee_account.bump,
    )]
    pub fee_account: Account<'info, FeeAccount>,

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

impl<'info> WithdrawFees<'info> {
    pub fn withdraw_fees(&mut self) -> Result<u64> {
        let amount = self.fee_account.take()?;

        pay_out(
            &self.token_program,
            &self.collateral_mint,
            &self.vault,
            &self.holder_collateral,
            &self.config,
            amount,
        )?;

        emit!(FeesWithdrawn {
            holder: self.holder.key(),
            amount,
        });

        msg!("Fees withdrawn: {}", amount);

        Ok(amount)
    }
}
