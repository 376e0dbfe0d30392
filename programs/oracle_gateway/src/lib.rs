//! # Oracle Gateway
//!
//! Settles prediction pools with an external inference provider.
//!
//! ## How it works
//! - The gateway holds a prepaid session with the provider and charges each
//!   request against it.
//! - The market submits a prompt together with the program and selector to
//!   call back.
//! - A single trusted node answers each request once, with a response or an
//!   error. Responses are classified into `True`, `False` or `Inconclusive`.
//! - Fulfilled outcomes are delivered to the market in a separate step that
//!   can be retried without touching the recorded answer.

use anchor_lang::prelude::*;

pub mod errors;
pub mod instructions;
pub mod outcome;
pub mod state;

pub use instructions::*;
pub use outcome::classify_response;
pub use state::*;

declare_id!("DBSv6pBeVb6mex97KQkgcbfVosXPuGUEBigvcviFskiN");

#[program]
pub mod oracle_gateway {
    use super::*;

    /// Initialize the gateway with its node, fees and authorised market
    pub fn initialize(ctx: Context<InitializeGateway>, params: GatewayParams) -> Result<()> {
        ctx.accounts.initialize(params, &ctx.bumps)
    }

    /// Update gateway settings (admin only)
    pub fn update_config(
        ctx: Context<UpdateGatewayConfig>,
        update: GatewayConfigUpdate,
    ) -> Result<()> {
        ctx.accounts.update_config(update)
    }

    /// Forward the fee vault to the provider and open a new session
    pub fn restart_session(ctx: Context<RestartSession>) -> Result<u64> {
        ctx.accounts.restart_session()
    }

    /// Submit a resolution prompt (authorised market only)
    pub fn submit_request(
        ctx: Context<SubmitRequest>,
        pool_id: u64,
        prompt: String,
        callback_selector: [u8; 8],
        callback_lamports: u64,
    ) -> Result<u64> {
        ctx.accounts.submit_request(
            pool_id,
            prompt,
            callback_selector,
            callback_lamports,
            &ctx.bumps,
        )
    }

    /// Record the node's response to a request
    pub fn fulfill_request(
        ctx: Context<AnswerRequest>,
        _request_id: u64,
        response: String,
    ) -> Result<Outcome> {
        ctx.accounts.fulfill(response)
    }

    /// Record that the node could not answer a request
    pub fn fail_request(ctx: Context<AnswerRequest>, _request_id: u64, error: String) -> Result<()> {
        ctx.accounts.fail(error)
    }

    /// Invoke the recorded callback with a fulfilled outcome
    pub fn deliver_outcome<'info>(
        ctx: Context<'_, '_, 'info, 'info, DeliverOutcome<'info>>,
        request_id: u64,
    ) -> Result<()> {
        instructions::deliver_outcome(ctx, request_id)
    }
}
