pub mod config;
pub mod fee_account;
pub mod pool;
pub mod position;

pub use config::*;
pub use fee_account::*;
pub use pool::*;
pub use position::*;
