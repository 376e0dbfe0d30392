//! Instruction handlers for the oracle gateway
//!
//! - `initialize` - Set up the gateway (admin only, once)
//! - `update_config` - Change node, fees or the authorised market (admin only)
//! - `restart_session` - Fund a new provider session from the fee vault (admin only)
//! - `submit_request` - Queue a resolution prompt (market only)
//! - `answer` - Record the node's response or failure (node only)
//! - `deliver_outcome` - Hand a recorded outcome to the market (permissionless)

pub mod answer;
pub mod deliver_outcome;
pub mod initialize;
pub mod restart_session;
pub mod submit_request;
pub mod update_config;

pub use answer::*;
pub use deliver_outcome::*;
pub use initialize::*;
pub use restart_session::*;
pub use submit_request::*;
pub use update_config::*;
