//! Oracle Callback
//!
//! The single entry point through which the gateway settles a pool. It is
//! signed by the gateway's authority PDA and performs no external calls.

use anchor_lang::prelude::*;
use oracle_gateway::Outcome;

use crate::errors::MarketError;
use crate::state::{Config, Pool, Resolution};

/// Event emitted when a pool's outcome is fixed
#[event]
pub struct PoolResolved {
    pub pool_id: u64,
    pub resolution: Resolution,
    pub collateral: u64,
    /// False when the admin fallback settled the pool
    pub by_oracle: bool,
}

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct OnPoolResolve<'info> {
    #[account(address = config.gateway_authority @ MarketError::UnauthorizedOracle)]
    pub gateway_authority: Signer<'info>,

    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [Pool::SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,
}

impl<'info> OnPoolResolve<'info> {
    pub fn on_pool_resolve(&mut self, outcome_code: u8) -> Result<()> {
        let outcome = Outcome::from_code(outcome_code).ok_or(MarketError::UnknownOutcome)?;

        match self.pool.apply_oracle_outcome(outcome)? {
            Some(resolution) => {
                emit!(PoolResolved {
                    pool_id: self.pool.id,
                    resolution,
                    collateral: self.pool.collateral,
                    by_oracle: true,
                });
                msg!("Pool {} resolved: {:?}", self.pool.id, resolution);
            }
            None => msg!("Pool {} left unresolved", self.pool.id),
        }

        Ok(())
    }
}
