//! Fee ledger
//!
//! One `FeeAccount` per address, shared across every pool. Trades credit the
//! ledger; the collateral itself stays in the vault until `withdraw_fees`.

use anchor_lang::prelude::*;

use crate::amm::{mul_div, Rounding};
use crate::constants::BPS_DENOMINATOR;
use crate::errors::MarketError;

/// Accrued, withdrawable fees of one address
///
/// Seeds: ["fees", holder]
#[account]
#[derive(InitSpace, Debug, Default)]
pub struct FeeAccount {
    pub holder: Pubkey,
    pub amount: u64,
    pub bump: u8,
}

impl FeeAccount {
    pub const SEED: &'static [u8] = b"fees";

    pub fn credit(&mut self, amount: u64) -> Result<()> {
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(MarketError::MathOverflow)?;
        Ok(())
    }

    /// Zeroes the balance and returns what was owed
    pub fn take(&mut self) -> Result<u64> {
        require!(self.amount > 0, MarketError::NoFeesAccrued);
        Ok(std::mem::take(&mut self.amount))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSchedule {
    pub fee_bps: u16,
    pub referral_bps: u16,
}

impl FeeSchedule {
    /// Fee charged on `amount`, rounded up
    pub fn fee_on(&self, amount: u64) -> Result<u64> {
        bps_of(amount, self.fee_bps, Rounding::Up)
    }

    /// Splits `fee` between the referrer (when valid) and the reserve
    pub fn split(&self, fee: u64, referrer_valid: bool) -> Result<FeeSplit> {
        let referrer = if referrer_valid {
            bps_of(fee, self.referral_bps, Rounding::Down)?
        } else {
            0
        };
        Ok(FeeSplit {
            referrer,
            reserve: fee - referrer,
        })
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeSplit {
    pub referrer: u64,
    pub reserve: u64,
}

fn bps_of(amount: u64, bps: u16, rounding: Rounding) -> Result<u64> {
    let value = mul_div(amount as u128, bps as u128, BPS_DENOMINATOR as u128, rounding)?;
    u64::try_from(value).map_err(|_| error!(MarketError::MathOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEDULE: FeeSchedule = FeeSchedule {
        fee_bps: 100,
        referral_bps: 2_500,
    };

    #[test]
    fn test_fee_rounds_up() {
        assert_eq!(SCHEDULE.fee_on(10_000).unwrap(), 100);
        assert_eq!(SCHEDULE.fee_on(10_001).unwrap(), 101);
        assert_eq!(SCHEDULE.fee_on(1).unwrap(), 1);
        assert_eq!(SCHEDULE.fee_on(0).unwrap(), 0);
    }

    #[test]
    fn test_split_sums_to_fee() {
        for fee in [0u64, 1, 3, 99, 101, 12_345, u64::MAX / 2] {
            for valid in [true, false] {
                let split = SCHEDULE.split(fee, valid).unwrap();
                assert_eq!(split.referrer + split.reserve, fee);
                if !valid {
                    assert_eq!(split.referrer, 0);
                }
            }
        }
        assert_eq!(SCHEDULE.split(400, true).unwrap().referrer, 100);
    }

    #[test]
    fn test_take_zeroes_balance() {
        let mut account = FeeAccount::default();
        assert!(account.take().is_err());

        account.credit(7).unwrap();
        account.credit(5).unwrap();
        assert_eq!(account.take().unwrap(), 12);
        assert_eq!(account.amount, 0);
        assert!(account.take().is_err());
    }
}
