//! Resolution Requests
//!
//! One account per submitted request, keyed by request id. The account is the
//! pending-request table entry: it maps the request to its pool, remembers
//! which program and selector to call back, and guards the answer so it can be
//! applied exactly once.
//!
//! ```text
//!   Pending ──fulfill──▶ Fulfilled ──deliver──▶ Fulfilled + delivered
//!      │
//!      └─────fail─────▶ Failed   (outcome stays Unknown, never delivered)
//! ```

use anchor_lang::prelude::*;

use crate::errors::GatewayError;
use crate::outcome::classify_response;

pub const MAX_PROMPT_LEN: usize = 512;
pub const MAX_RESPONSE_LEN: usize = 256;
pub const MAX_ERROR_LEN: usize = 256;

/// Lifecycle of a request
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum RequestStatus {
    /// Submitted, waiting for the node
    #[default]
    Pending,
    /// Node answered with a response
    Fulfilled,
    /// Node reported an error
    Failed,
}

/// Typed answer to a resolution prompt
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum Outcome {
    #[default]
    Unknown,
    True,
    False,
    Inconclusive,
}

impl Outcome {
    /// Wire code passed to the callback program
    pub fn code(self) -> u8 {
        match self {
            Outcome::Unknown => 0,
            Outcome::True => 1,
            Outcome::False => 2,
            Outcome::Inconclusive => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Outcome::Unknown),
            1 => Some(Outcome::True),
            2 => Some(Outcome::False),
            3 => Some(Outcome::Inconclusive),
            _ => None,
        }
    }
}

/// A resolution request
///
/// Seeds: ["request", request_id.to_le_bytes()]
#[account]
#[derive(InitSpace, Debug, Default)]
pub struct Request {
    pub id: u64,

    /// Pool this request settles
    pub pool_id: u64,

    /// Session the fee was drawn from
    pub session_id: u64,

    /// Authority that submitted the request
    pub requester: Pubkey,

    /// Program invoked on delivery
    pub callback_program: Pubkey,

    /// 8-byte instruction selector invoked on delivery
    pub callback_selector: [u8; 8],

    #[max_len(512)]
    pub prompt: String,

    pub status: RequestStatus,

    pub outcome: Outcome,

    /// Raw response text, truncated to `MAX_RESPONSE_LEN`
    #[max_len(256)]
    pub response: String,

    /// Failure reason, truncated to `MAX_ERROR_LEN`
    #[max_len(256)]
    pub error: String,

    /// Whether the outcome reached the callback program
    pub delivered: bool,

    pub submitted_at: i64,
    pub answered_at: i64,

    pub bump: u8,
}

impl Request {
    pub const SEED: &'static [u8] = b"request";

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    pub fn is_failed(&self) -> bool {
        self.status == RequestStatus::Failed
    }

    /// Records a successful answer; the full text is classified before truncation
    pub fn record_response(&mut self, raw: &str, now: i64) -> Result<Outcome> {
        require!(self.is_pending(), GatewayError::AlreadyAnswered);

        let outcome = classify_response(raw);
        self.response = truncate(raw, MAX_RESPONSE_LEN);
        self.outcome = outcome;
        self.status = RequestStatus::Fulfilled;
        self.answered_at = now;
        Ok(outcome)
    }

    /// Records a provider failure; the outcome stays `Unknown`
    pub fn record_failure(&mut self, error: &str, now: i64) -> Result<()> {
        require!(self.is_pending(), GatewayError::AlreadyAnswered);

        self.error = truncate(error, MAX_ERROR_LEN);
        self.status = RequestStatus::Failed;
        self.answered_at = now;
        Ok(())
    }

    /// Marks the outcome as delivered and returns it
    pub fn take_for_delivery(&mut self) -> Result<Outcome> {
        require!(
            self.status == RequestStatus::Fulfilled,
            GatewayError::NotFulfilled
        );
        require!(!self.delivered, GatewayError::AlreadyDelivered);

        self.delivered = true;
        Ok(self.outcome)
    }

    /// Instruction data for the callback: selector, pool id, outcome code
    pub fn callback_data(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(8 + 8 + 1);
        data.extend_from_slice(&self.callback_selector);
        data.extend_from_slice(&self.pool_id.to_le_bytes());
        data.push(self.outcome.code());
        data
    }
}

/// Cuts `text` to at most `max` bytes on a char boundary
fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}
