//! Instruction handlers for the prediction market protocol
//!
//! - `initialize` - Set up the protocol and collateral vault (admin only, once)
//! - `update_config` - Change fees, reserve or pause the protocol (admin only)
//! - `open_fee_account` - Open a fee ledger entry for an address
//! - `create_bet` - Create a new pool (permissionless)
//! - `trade` - Buy/sell YES and NO shares
//! - `quote` - Price a trade or a payout without changing state
//! - `resolve` - Ask the oracle gateway to settle a pool
//! - `on_pool_resolve` - Oracle callback that fixes the outcome (gateway only)
//! - `force_resolve` - Settle a pool the oracle never answered (admin only)
//! - `withdraw` - Claim a payout after resolution
//! - `withdraw_fees` - Claim accrued trade fees

pub mod create_bet;
pub mod force_resolve;
pub mod initialize;
pub mod on_pool_resolve;
pub mod open_fee_account;
pub mod quote;
pub mod resolve;
pub mod trade;
pub mod transfer;
pub mod update_config;
pub mod withdraw;
pub mod withdraw_fees;

pub use create_bet::*;
pub use force_resolve::*;
pub use initialize::*;
pub use on_pool_resolve::*;
pub use open_fee_account::*;
pub use quote::*;
pub use resolve::*;
pub use trade::*;
pub use update_config::*;
pub use withdraw::*;
pub use withdraw_fees::*;
