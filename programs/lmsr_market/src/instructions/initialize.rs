//! Protocol Initialization
//!
//! Sets up the global configuration and the collateral vault owned by the
//! config PDA. The collateral mint's decimals are read once here and fixed
//! for the life of the protocol.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};
use oracle_gateway::AUTHORITY_SEED;

use crate::amm::share_scale;
use crate::state::Config;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct MarketParams {
    pub fee_bps: u16,
    pub referral_bps: u16,
    /// Owner of the protocol's fee account
    pub fee_reserve: Pubkey,
    /// Oracle gateway program that settles pools
    pub oracle_gateway: Pubkey,
    pub callback_lamports: u64,
    pub fallback_grace_secs: i64,
}

/// Accounts required for protocol initialization
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Protocol administrator (becomes the admin)
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Global configuration account (created)
    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [Config::SEED],
        bump,
    )]
    pub config: Account<'info, Config>,

    /// Collateral token mint (e.g., USDC)
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    /// Vault holding the collateral of every pool
    #[account(
        init,
        payer = admin,
        associated_token::mint = collateral_mint,
        associated_token::authority = config,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn initialize(&mut self, params: MarketParams, bumps: &InitializeBumps) -> Result<()> {
        Config::validate_fees(params.fee_bps, params.referral_bps)?;

        let decimals = self.collateral_mint.decimals;
        let (gateway_authority, _) =
            Pubkey::find_program_address(&[AUTHORITY_SEED], &params.oracle_gateway);

        self.config.set_inner(Config {
            admin: self.admin.key(),
            collateral_mint: self.collateral_mint.key(),
            collateral_decimals: decimals,
            share_scale: share_scale(decimals)?,
            fee_bps: params.fee_bps,
            referral_bps: params.referral_bps,
            fee_reserve: params.fee_reserve,
            oracle_gateway: params.oracle_gateway,
            gateway_authority,
            callback_lamports: params.callback_lamports,
            fallback_grace_secs: params.fallback_grace_secs,
            pool_count: 0,
            paused: false,
            bump: bumps.config,
        });

        msg!("Protocol initialized!");
        msg!("Admin: {}", self.admin.key());
        msg!("Oracle gateway: {}", params.oracle_gateway);
        msg!("Fee: {} bps", params.fee_bps);

        Ok(())
    }
}
