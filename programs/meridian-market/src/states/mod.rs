pub mod events;
pub use events::*;

pub mod market_config;
pub use market_config::*;

pub mod borrow_record;
pub use borrow_record::*;

pub mod custody_index;
pub use custody_index::*;
