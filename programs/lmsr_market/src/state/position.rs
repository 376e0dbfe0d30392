use anchor_lang::prelude::*;

use crate::amm::Side;
use crate::errors::MarketError;

/// A holder's YES/NO balances in one pool
///
/// Seeds: ["position", pool_id.to_le_bytes(), holder]
#[account]
#[derive(InitSpace, Debug, Default)]
pub struct Position {
    pub pool_id: u64,
    pub holder: Pubkey,
    pub yes: u64,
    pub no: u64,

    /// Set for the pool creator, who may not trade their seeded shares
    pub blocked: bool,

    pub bump: u8,
}

impl Position {
    pub const SEED: &'static [u8] = b"position";

    pub fn balance(&self, side: Side) -> u64 {
        match side {
            Side::Yes => self.yes,
            Side::No => self.no,
        }
    }

    pub fn credit(&mut self, side: Side, amount: u64) -> Result<()> {
        let balance = self
            .balance(side)
            .checked_add(amount)
            .ok_or(MarketError::MathOverflow)?;
        self.set(side, balance);
        Ok(())
    }

    pub fn debit(&mut self, side: Side, amount: u64) -> Result<()> {
        let balance = self
            .balance(side)
            .checked_sub(amount)
            .ok_or(MarketError::InsufficientBalance)?;
        self.set(side, balance);
        Ok(())
    }

    fn set(&mut self, side: Side, value: u64) {
        match side {
            Side::Yes => self.yes = value,
            Side::No => self.no = value,
        }
    }
}
