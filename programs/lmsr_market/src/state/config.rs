//! Global Protocol Configuration
//!
//! This account stores protocol-wide settings that apply to all pools: the
//! collateral token and its scaling into engine precision, the trade fee
//! schedule, and the oracle gateway trusted to settle pools.

use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, MAX_FEE_BPS};
use crate::errors::MarketError;
use crate::state::FeeSchedule;

/// Global configuration account (singleton PDA)
///
/// Seeds: ["market_config"]
///
/// The config PDA also owns the collateral vault and signs requests sent to
/// the oracle gateway.
#[account]
#[derive(InitSpace, Debug, Default)]
pub struct Config {
    /// Protocol administrator with special privileges
    pub admin: Pubkey,

    /// Collateral token mint (e.g., USDC)
    pub collateral_mint: Pubkey,

    /// Decimals of the collateral mint, read once at initialization
    pub collateral_decimals: u8,

    /// `10^(18 - collateral_decimals)`: token units → engine precision
    pub share_scale: u64,

    /// Trade fee in basis points (100 = 1%, max 1000 = 10%)
    pub fee_bps: u16,

    /// Share of each fee routed to a valid referrer, in basis points of the fee
    pub referral_bps: u16,

    /// Address whose fee account receives the protocol's share of fees
    pub fee_reserve: Pubkey,

    /// Oracle gateway program
    pub oracle_gateway: Pubkey,

    /// Gateway PDA that signs outcome callbacks
    pub gateway_authority: Pubkey,

    /// Lamports forwarded to the gateway node with every resolution request
    pub callback_lamports: u64,

    /// Seconds after `resolution_time` before the admin may force a resolution
    /// (0 disables the fallback)
    pub fallback_grace_secs: i64,

    /// Total pools created (used as incrementing ID)
    pub pool_count: u64,

    /// Whether the protocol is paused
    pub paused: bool,

    /// PDA bump seed
    pub bump: u8,
}

impl Config {
    pub const SEED: &'static [u8] = b"market_config";

    pub fn validate_fees(fee_bps: u16, referral_bps: u16) -> Result<()> {
        require!(fee_bps <= MAX_FEE_BPS, MarketError::FeeTooHigh);
        require!(
            referral_bps as u64 <= BPS_DENOMINATOR,
            MarketError::InvalidReferralShare
        );
        Ok(())
    }

    pub fn fee_schedule(&self) -> FeeSchedule {
        FeeSchedule {
            fee_bps: self.fee_bps,
            referral_bps: self.referral_bps,
        }
    }

    /// A referrer earns a share unless it is unset or the reserve itself
    pub fn is_valid_referrer(&self, referrer: &Pubkey) -> bool {
        *referrer != Pubkey::default() && *referrer != self.fee_reserve
    }

    pub fn ensure_active(&self) -> Result<()> {
        require!(!self.paused, MarketError::ProtocolPaused);
        Ok(())
    }

    /// Returns the id for the next pool and advances the counter
    pub fn next_pool_id(&mut self) -> Result<u64> {
        let id = self.pool_count;
        self.pool_count = id.checked_add(1).ok_or(MarketError::MathOverflow)?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_bounds() {
        assert!(Config::validate_fees(0, 0).is_ok());
        assert!(Config::validate_fees(MAX_FEE_BPS, 10_000).is_ok());
        assert!(Config::validate_fees(MAX_FEE_BPS + 1, 0).is_err());
        assert!(Config::validate_fees(100, 10_001).is_err());
    }

    #[test]
    fn test_referrer_validity() {
        let config = Config {
            fee_reserve: Pubkey::new_unique(),
            ..Default::default()
        };
        assert!(config.is_valid_referrer(&Pubkey::new_unique()));
        assert!(!config.is_valid_referrer(&Pubkey::default()));
        assert!(!config.is_valid_referrer(&config.fee_reserve));
    }

    #[test]
    fn test_paused_protocol_rejects() {
        let mut config = Config::default();
        assert!(config.ensure_active().is_ok());
        config.paused = true;
        assert!(config.ensure_active().is_err());
    }

    #[test]
    fn test_pool_ids_are_sequential() {
        let mut config = Config::default();
        assert_eq!(config.next_pool_id().unwrap(), 0);
        assert_eq!(config.next_pool_id().unwrap(), 1);
        assert_eq!(config.pool_count, 2);
    }
}
