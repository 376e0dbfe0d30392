//! Gateway Initialization
//!
//! Creates the gateway configuration and the fee vault that accumulates
//! provider fee tokens between sessions.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::state::{GatewayConfig, AUTHORITY_SEED};

/// Initial gateway settings
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct GatewayParams {
    /// Market PDA allowed to submit requests
    pub market_authority: Pubkey,
    /// Trusted responding node
    pub node: Pubkey,
    /// Provider's fee-collection token account
    pub fee_collector: Pubkey,
    pub base_fee: u64,
    pub per_byte_fee: u64,
    pub min_callback_lamports: u64,
}

#[derive(Accounts)]
pub struct InitializeGateway<'info> {
    /// Gateway administrator (becomes the admin)
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = 8 + GatewayConfig::INIT_SPACE,
        seeds = [GatewayConfig::SEED],
        bump,
    )]
    pub config: Account<'info, GatewayConfig>,

    /// CHECK: data-less PDA, only used as a signer
    #[account(seeds = [AUTHORITY_SEED], bump)]
    pub authority: UncheckedAccount<'info>,

    /// Token the provider charges fees in
    pub fee_mint: InterfaceAccount<'info, Mint>,

    /// Vault that funds future sessions
    #[account(
        init,
        payer = admin,
        associated_token::mint = fee_mint,
        associated_token::authority = authority,
    )]
    pub fee_vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> InitializeGateway<'info> {
    pub fn initialize(&mut self, params: GatewayParams, bumps: &InitializeGatewayBumps) -> Result<()> {
        self.config.set_inner(GatewayConfig {
            admin: self.admin.key(),
            market_authority: params.market_authority,
            node: params.node,
            fee_mint: self.fee_mint.key(),
            fee_collector: params.fee_collector,
            base_fee: params.base_fee,
            per_byte_fee: params.per_byte_fee,
            min_callback_lamports: params.min_callback_lamports,
            session_id: 0,
            session_credit: 0,
            request_count: 0,
            bump: bumps.config,
            authority_bump: bumps.authority,
        });

        msg!("Gateway initialized!");
        msg!("Market authority: {}", params.market_authority);
        msg!("Node: {}", params.node);

        Ok(())
    }
}
