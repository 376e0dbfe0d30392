//! Fallback Resolution
//!
//! If the oracle never answers, the admin may settle a pool once
//! `resolution_time + fallback_grace_secs` has passed.

use anchor_lang::prelude::*;

use crate::errors::MarketError;
use crate::instructions::PoolResolved;
use crate::state::{Config, Pool, Resolution};

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct ForceResolve<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
        constraint = config.admin == admin.key() @ MarketError::Unauthorized,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [Pool::SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,
}

impl<'info> ForceResolve<'info> {
    pub fn force_resolve(&mut self, resolution: Resolution) -> Result<()> {
        let clock = Clock::get()?;
        self.pool.force_resolve(
            resolution,
            clock.unix_timestamp,
            self.config.fallback_grace_secs,
        )?;

        emit!(PoolResolved {
            pool_id: self.pool.id,
            resolution,
            collateral: self.pool.collateral,
            by_oracle: false,
        });

        msg!("Pool {} force-resolved: {:?}", self.pool.id, resolution);

        Ok(())
    }
}
