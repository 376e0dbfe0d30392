use anchor_lang::prelude::*;

use crate::errors::GatewayError;
use crate::state::GatewayConfig;

/// Event emitted when the admin changes gateway settings
#[event]
pub struct GatewayConfigUpdated {
    pub market_authority: Pubkey,
    pub node: Pubkey,
    pub base_fee: u64,
    pub per_byte_fee: u64,
    pub min_callback_lamports: u64,
}

/// Fields left as `None` keep their current value
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct GatewayConfigUpdate {
    pub market_authority: Option<Pubkey>,
    pub node: Option<Pubkey>,
    pub fee_collector: Option<Pubkey>,
    pub base_fee: Option<u64>,
    pub per_byte_fee: Option<u64>,
    pub min_callback_lamports: Option<u64>,
}

#[derive(Accounts)]
pub struct UpdateGatewayConfig<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [GatewayConfig::SEED],
        bump = config.bump,
        constraint = config.admin == admin.key() @ GatewayError::Unauthorized,
    )]
    pub config: Account<'info, GatewayConfig>,
}

impl<'info> UpdateGatewayConfig<'info> {
    pub fn update_config(&mut self, update: GatewayConfigUpdate) -> Result<()> {
        let config = &mut self.config;

        if let Some(market_authority) = update.market_authority {
            config.market_authority = market_authority;
        }
        if let Some(node) = update.node {
            config.node = node;
        }
        if let Some(fee_collector) = update.fee_collector {
            config.fee_collector = fee_collector;
        }
        if let Some(base_fee) = update.base_fee {
            config.base_fee = base_fee;
        }
        if let Some(per_byte_fee) = update.per_byte_fee {
            config.per_byte_fee = per_byte_fee;
        }
        if let Some(min_callback_lamports) = update.min_callback_lamports {
            config.min_callback_lamports = min_callback_lamports;
        }

        emit!(GatewayConfigUpdated {
            market_authority: config.market_authority,
            node: config.node,
            base_fee: config.base_fee,
            per_byte_fee: config.per_byte_fee,
            min_callback_lamports: config.min_callback_lamports,
        });

        msg!("Gateway config updated");

        Ok(())
    }
}
