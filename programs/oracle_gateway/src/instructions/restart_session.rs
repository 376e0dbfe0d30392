//! Session Funding
//!
//! Sessions are never refilled automatically. Once the credit runs out every
//! request is rejected until the admin tops up the fee vault and restarts.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::errors::GatewayError;
use crate::state::{GatewayConfig, AUTHORITY_SEED};

/// Event emitted when a new session is opened
#[event]
pub struct SessionRestarted {
    pub session_id: u64,
    pub funded: u64,
    pub fee_collector: Pubkey,
}

#[derive(Accounts)]
pub struct RestartSession<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [GatewayConfig::SEED],
        bump = config.bump,
        constraint = config.admin == admin.key() @ GatewayError::Unauthorized,
    )]
    pub config: Account<'info, GatewayConfig>,

    /// CHECK: data-less PDA, signs the vault transfer
    #[account(seeds = [AUTHORITY_SEED], bump = config.authority_bump)]
    pub authority: UncheckedAccount<'info>,

    #[account(address = config.fee_mint)]
    pub fee_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = fee_mint,
        associated_token::authority = authority,
    )]
    pub fee_vault: InterfaceAccount<'info, TokenAccount>,

    /// Provider's fee-collection account
    #[account(mut, address = config.fee_collector)]
    pub fee_collector: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> RestartSession<'info> {
    /// Forwards the whole vault balance to the provider and opens a new session
    pub fn restart_session(&mut self) -> Result<u64> {
        let funded = self.fee_vault.amount;
        let session_id = self.config.open_session(funded)?;

        let authority_seeds = &[AUTHORITY_SEED, &[self.config.authority_bump]];
        let signer_seeds = &[&authority_seeds[..]];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.fee_vault.to_account_info(),
                    mint: self.fee_mint.to_account_info(),
                    to: self.fee_collector.to_account_info(),
                    authority: self.authority.to_account_info(),
                },
                signer_seeds,
            ),
            funded,
            self.fee_mint.decimals,
        )?;

        emit!(SessionRestarted {
            session_id,
            funded,
            fee_collector: self.fee_collector.key(),
        });

        msg!("Session {} opened with {} fee units", session_id, funded);

        Ok(session_id)
    }
}
