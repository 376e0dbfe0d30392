//! Request Submission
//!
//! Called by the market (through CPI, signed by its config PDA) when a pool is
//! ready to be settled. The request is charged against the active session and
//! recorded as pending; the node picks it up from the `RequestSubmitted` event
//! or by scanning pending request accounts.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::errors::GatewayError;
use crate::state::{GatewayConfig, Outcome, Request, RequestStatus, MAX_PROMPT_LEN};

/// Event emitted when a request is accepted
#[event]
pub struct RequestSubmitted {
    pub request_id: u64,
    pub pool_id: u64,
    pub session_id: u64,
    pub node: Pubkey,
    pub fee: u64,
    pub prompt: String,
}

#[derive(Accounts)]
pub struct SubmitRequest<'info> {
    /// Market config PDA, signs the CPI
    #[account(
        constraint = market_authority.key() == config.market_authority @ GatewayError::UnauthorizedMarket,
    )]
    pub market_authority: Signer<'info>,

    /// Pays for the request account and the callback value
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [GatewayConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, GatewayConfig>,

    #[account(
        init,
        payer = payer,
        space = 8 + Request::INIT_SPACE,
        seeds = [Request::SEED, config.request_count.to_le_bytes().as_ref()],
        bump,
    )]
    pub request: Account<'info, Request>,

    /// CHECK: trusted node, receives the callback value
    #[account(mut, address = config.node @ GatewayError::UnauthorizedNode)]
    pub node: UncheckedAccount<'info>,

    /// CHECK: program invoked when the outcome is delivered
    #[account(executable)]
    pub callback_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> SubmitRequest<'info> {
    pub fn submit_request(
        &mut self,
        pool_id: u64,
        prompt: String,
        callback_selector: [u8; 8],
        callback_lamports: u64,
        bumps: &SubmitRequestBumps,
    ) -> Result<u64> {
        require!(!prompt.trim().is_empty(), GatewayError::EmptyPrompt);
        require!(prompt.len() <= MAX_PROMPT_LEN, GatewayError::PromptTooLong);
        require!(
            callback_lamports >= self.config.min_callback_lamports,
            GatewayError::InsufficientCallbackValue
        );

        let clock = Clock::get()?;
        let fee = self.config.charge_session(prompt.len())?;
        let request_id = self.config.next_request_id()?;
        let session_id = self.config.session_id;

        self.request.set_inner(Request {
            id: request_id,
            pool_id,
            session_id,
            requester: self.market_authority.key(),
            callback_program: self.callback_program.key(),
            callback_selector,
            prompt: prompt.clone(),
            status: RequestStatus::Pending,
            outcome: Outcome::Unknown,
            response: String::new(),
            error: String::new(),
            delivered: false,
            submitted_at: clock.unix_timestamp,
            answered_at: 0,
            bump: bumps.request,
        });

        if callback_lamports > 0 {
            system_program::transfer(
                CpiContext::new(
                    self.system_program.to_account_info(),
                    Transfer {
                        from: self.payer.to_account_info(),
                        to: self.node.to_account_info(),
                    },
                ),
                callback_lamports,
            )?;
        }

        emit!(RequestSubmitted {
            request_id,
            pool_id,
            session_id,
            node: self.node.key(),
            fee,
            prompt,
        });

        msg!("Request {} submitted for pool {}", request_id, pool_id);

        Ok(request_id)
    }
}
