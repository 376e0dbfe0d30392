//! Resolution Request
//!
//! Once a pool's resolution time has passed, anyone may ask the oracle
//! gateway to settle it. The request is submitted by CPI, signed by the config
//! PDA, and names this program's `on_pool_resolve` as the callback.
//!
//! A pool with a request in flight only accepts a new one after the gateway
//! has recorded that request as failed; the failed request account must be
//! passed as `prior_request`.

use anchor_lang::prelude::*;
use anchor_lang::Discriminator;
use oracle_gateway::{
    cpi::accounts::SubmitRequest, program::OracleGateway, GatewayConfig, Request,
};

use crate::errors::MarketError;
use crate::instruction::OnPoolResolve;
use crate::program::LmsrMarket;
use crate::state::{Config, Pool};

/// Event emitted when a pool starts waiting for the oracle
#[event]
pub struct ResolutionRequested {
    pub pool_id: u64,
    pub request_id: u64,
    pub requested_by: Pubkey,
}

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Resolve<'info> {
    /// Pays the request rent and the callback value
    #[account(mut)]
    pub caller: Signer<'info>,

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

    /// The pool's pending request, required only to retry after a failure
    pub prior_request: Option<Account<'info, Request>>,

    #[account(
        mut,
        seeds = [GatewayConfig::SEED],
        bump = gateway_config.bump,
        seeds::program = oracle_gateway_program.key(),
    )]
    pub gateway_config: Box<Account<'info, GatewayConfig>>,

    /// CHECK: created by the gateway at ["request", gateway_config.request_count]
    #[account(mut)]
    pub request: UncheckedAccount<'info>,

    /// CHECK: validated by the gateway against its trusted node
    #[account(mut)]
    pub node: UncheckedAccount<'info>,

    #[account(address = config.oracle_gateway @ MarketError::UnauthorizedOracle)]
    pub oracle_gateway_program: Program<'info, OracleGateway>,

    pub market_program: Program<'info, LmsrMarket>,

    pub system_program: Program<'info, System>,
}

impl<'info> Resolve<'info> {
    pub fn resolve(&mut self) -> Result<u64> {
        let clock = Clock::get()?;
        self.pool
            .ensure_resolvable(clock.unix_timestamp, self.prior_request.as_deref())?;

        let config_seeds = &[Config::SEED, &[self.config.bump]];
        let signer_seeds = &[&config_seeds[..]];

        let request_id = oracle_gateway::cpi::submit_request(
            CpiContext::new_with_signer(
                self.oracle_gateway_program.to_account_info(),
                SubmitRequest {
                    market_authority: self.config.to_account_info(),
                    payer: self.caller.to_account_info(),
                    config: self.gateway_config.to_account_info(),
                    request: self.request.to_account_info(),
                    node: self.node.to_account_info(),
                    callback_program: self.market_program.to_account_info(),
                    system_program: self.system_program.to_account_info(),
                },
                signer_seeds,
            ),
            self.pool.id,
            self.pool.resolution_prompt.clone(),
            OnPoolResolve::DISCRIMINATOR,
            self.config.callback_lamports,
        )?
        .get();

        self.pool.mark_awaiting(request_id);

        emit!(ResolutionRequested {
            pool_id: self.pool.id,
            request_id,
            requested_by: self.caller.key(),
        });

        msg!("Pool {} awaiting oracle request {}", self.pool.id, request_id);

        Ok(request_id)
    }
}
