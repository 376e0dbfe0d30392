//! Gateway Configuration and Session Accounting
//!
//! The gateway keeps a prepaid "session" with the inference provider. Funding
//! happens off the request path: fee tokens accumulate in the gateway vault and
//! `restart_session` forwards all of them to the provider, opening a new session
//! whose credit is drawn down by every submitted request.

use anchor_lang::prelude::*;

use crate::errors::GatewayError;

/// Seed of the data-less PDA that signs fee transfers and market callbacks
pub const AUTHORITY_SEED: &[u8] = b"authority";

/// Global gateway configuration (singleton PDA)
///
/// Seeds: ["gateway_config"]
#[account]
#[derive(InitSpace, Debug, Default)]
pub struct GatewayConfig {
    /// Administrator allowed to reconfigure and fund sessions
    pub admin: Pubkey,

    /// Signer authorised to submit requests (the market's config PDA)
    pub market_authority: Pubkey,

    /// The only node allowed to answer requests
    pub node: Pubkey,

    /// Fee token used to pay the provider
    pub fee_mint: Pubkey,

    /// Provider's fee-collection token account
    pub fee_collector: Pubkey,

    /// Flat fee charged per request, in fee-token units
    pub base_fee: u64,

    /// Additional fee per prompt byte
    pub per_byte_fee: u64,

    /// Lamports a requester must attach to cover the answer transaction
    pub min_callback_lamports: u64,

    /// Active session, 0 before the first funding
    pub session_id: u64,

    /// Credit left in the active session
    pub session_credit: u64,

    /// Total requests submitted (used as incrementing ID)
    pub request_count: u64,

    pub bump: u8,
    pub authority_bump: u8,
}

impl GatewayConfig {
    pub const SEED: &'static [u8] = b"gateway_config";

    /// Provider fee for a prompt of `prompt_len` bytes
    pub fn request_fee(&self, prompt_len: usize) -> Result<u64> {
        self.per_byte_fee
            .checked_mul(prompt_len as u64)
            .and_then(|bytes| bytes.checked_add(self.base_fee))
            .ok_or_else(|| error!(GatewayError::MathOverflow))
    }

    /// Draws the request fee from the active session
    pub fn charge_session(&mut self, prompt_len: usize) -> Result<u64> {
        let fee = self.request_fee(prompt_len)?;
        require!(self.session_id > 0, GatewayError::SessionExhausted);
        self.session_credit = self
            .session_credit
            .checked_sub(fee)
            .ok_or_else(|| error!(GatewayError::SessionExhausted))?;
        Ok(fee)
    }

    /// Replaces the active session with a new one funded by `funded`
    pub fn open_session(&mut self, funded: u64) -> Result<u64> {
        require!(funded > 0, GatewayError::EmptySessionFunds);
        self.session_id = self
            .session_id
            .checked_add(1)
            .ok_or_else(|| error!(GatewayError::MathOverflow))?;
        self.session_credit = funded;
        Ok(self.session_id)
    }

    /// Returns the id for the next request and advances the counter
    pub fn next_request_id(&mut self) -> Result<u64> {
        let id = self.request_count;
        self.request_count = id
            .checked_add(1)
            .ok_or_else(|| error!(GatewayError::MathOverflow))?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GatewayConfig {
        GatewayConfig {
            base_fee: 1_000,
            per_byte_fee: 10,
            ..Default::default()
        }
    }

    #[test]
    fn test_request_fee_scales_with_prompt() {
        let config = config();
        assert_eq!(config.request_fee(0).unwrap(), 1_000);
        assert_eq!(config.request_fee(64).unwrap(), 1_640);
    }

    #[test]
    fn test_no_session_rejects_requests() {
        let mut config = config();
        assert!(config.charge_session(10).is_err());
    }

    #[test]
    fn test_session_is_drawn_down_then_exhausted() {
        let mut config = config();
        assert_eq!(config.open_session(2_500).unwrap(), 1);

        assert_eq!(config.charge_session(10).unwrap(), 1_100);
        assert_eq!(config.session_credit, 1_400);
        assert_eq!(config.charge_session(10).unwrap(), 1_100);
        assert_eq!(config.session_credit, 300);

        // no automatic refill
        assert!(config.charge_session(10).is_err());
        assert_eq!(config.session_credit, 300);
    }

    #[test]
    fn test_restart_replaces_session() {
        let mut config = config();
        config.open_session(5_000).unwrap();
        config.charge_session(0).unwrap();

        assert!(config.open_session(0).is_err());
        assert_eq!(config.session_id, 1);

        assert_eq!(config.open_session(7_000).unwrap(), 2);
        assert_eq!(config.session_credit, 7_000);
    }

    #[test]
    fn test_request_ids_are_sequential() {
        let mut config = config();
        assert_eq!(config.next_request_id().unwrap(), 0);
        assert_eq!(config.next_request_id().unwrap(), 1);
        assert_eq!(config.request_count, 2);
    }
}
