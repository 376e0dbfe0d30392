use anchor_lang::prelude::*;

use crate::errors::MarketError;
use crate::state::Config;

/// Event emitted when the admin changes protocol settings
#[event]
pub struct ConfigUpdated {
    pub admin: Pubkey,
    pub fee_bps: u16,
    pub referral_bps: u16,
    pub paused: bool,
}

/// Fields left as `None` keep their current value
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct MarketConfigUpdate {
    pub admin: Option<Pubkey>,
    pub fee_bps: Option<u16>,
    pub referral_bps: Option<u16>,
    pub fee_reserve: Option<Pubkey>,
    pub callback_lamports: Option<u64>,
    pub fallback_grace_secs: Option<i64>,
    pub paused: Option<bool>,
}

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [Config::SEED],
        bump = config.bump,
        constraint = config.admin == admin.key() @ MarketError::Unauthorized,
    )]
    pub config: Account<'info, Config>,
}

impl<'info> UpdateConfig<'info> {
    pub fn update_config(&mut self, update: MarketConfigUpdate) -> Result<()> {
        let config = &mut self.config;

        Config::validate_fees(
            update.fee_bps.unwrap_or(config.fee_bps),
            update.referral_bps.unwrap_or(config.referral_bps),
        )?;

        if let Some(admin) = update.admin {
            config.admin = admin;
        }
        if let Some(fee_bps) = update.fee_bps {
            config.fee_bps = fee_bps;
        }
        if let Some(referral_bps) = update.referral_bps {
            config.referral_bps = referral_bps;
        }
        if let Some(fee_reserve) = update.fee_reserve {
            config.fee_reserve = fee_reserve;
        }
        if let Some(callback_lamports) = update.callback_lamports {
            config.callback_lamports = callback_lamports;
        }
        if let Some(fallback_grace_secs) = update.fallback_grace_secs {
            config.fallback_grace_secs = fallback_grace_secs;
        }
        if let Some(paused) = update.paused {
            config.paused = paused;
        }

        emit!(ConfigUpdated {
            admin: config.admin,
            fee_bps: config.fee_bps,
            referral_bps: config.referral_bps,
            paused: config.paused,
        });

        msg!("Config updated");

        Ok(())
    }
}
