pub const BPS_DENOMINATOR: u64 = 10_000;

/// Share bonus minted to a pool creator on top of their liquidity (2%)
pub const CREATOR_BONUS_BPS: u64 = 200;

/// Upper bound on the trade fee (10%)
pub const MAX_FEE_BPS: u16 = 1_000;

pub const MAX_TITLE_LEN: usize = 128;
pub const MAX_PROMPT_LEN: usize = 512;
