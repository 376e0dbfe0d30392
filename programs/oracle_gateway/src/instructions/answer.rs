//! Node Answers
//!
//! The trusted node answers each request exactly once, either with a response
//! or with an error. Answers are only recorded here; handing the outcome to
//! the market is a separate step (`deliver_outcome`), so a market that rejects
//! the callback can never roll back what the node reported.

use anchor_lang::prelude::*;

use crate::errors::GatewayError;
use crate::state::{GatewayConfig, Outcome, Request};

/// Event emitted when the node answers with a response
#[event]
pub struct RequestFulfilled {
    pub request_id: u64,
    pub pool_id: u64,
    pub outcome: Outcome,
    pub response: String,
}

/// Event emitted when the node reports a failure
#[event]
pub struct RequestFailed {
    pub request_id: u64,
    pub pool_id: u64,
    pub error: String,
}

#[derive(Accounts)]
#[instruction(request_id: u64)]
pub struct AnswerRequest<'info> {
    #[account(constraint = node.key() == config.node @ GatewayError::UnauthorizedNode)]
    pub node: Signer<'info>,

    #[account(
        seeds = [GatewayConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, GatewayConfig>,

    #[account(
        mut,
        seeds = [Request::SEED, request_id.to_le_bytes().as_ref()],
        bump = request.bump,
    )]
    pub request: Account<'info, Request>,
}

impl<'info> AnswerRequest<'info> {
    pub fn fulfill(&mut self, response: String) -> Result<Outcome> {
        let clock = Clock::get()?;
        let outcome = self.request.record_response(&response, clock.unix_timestamp)?;

        emit!(RequestFulfilled {
            request_id: self.request.id,
            pool_id: self.request.pool_id,
            outcome,
            response: self.request.response.clone(),
        });

        msg!("Request {} fulfilled: {:?}", self.request.id, outcome);

        Ok(outcome)
    }

    pub fn fail(&mut self, error: String) -> Result<()> {
        let clock = Clock::get()?;
        self.request.record_failure(&error, clock.unix_timestamp)?;

        emit!(RequestFailed {
            request_id: self.request.id,
            pool_id: self.request.pool_id,
            error: self.request.error.clone(),
        });

        msg!("Request {} failed", self.request.id);

        Ok(())
    }
}
