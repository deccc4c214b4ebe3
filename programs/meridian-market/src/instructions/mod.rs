pub mod initialize_market;
pub use initialize_market::*;

pub mod update_market_config;
pub use update_market_config::*;

pub mod borrow;
pub use borrow::*;

pub mod withdraw;
pub use withdraw::*;

pub mod refund_borrow;
pub use refund_borrow::*;

pub mod recover_positions;
pub use recover_positions::*;
