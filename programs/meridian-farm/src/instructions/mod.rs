pub mod initialize_farm;
pub use initialize_farm::*;

pub mod manage_pools;
pub use manage_pools::*;

pub mod update_farm_config;
pub use update_farm_config::*;

pub mod update_pool;
pub use update_pool::*;

pub mod deposit;
pub use deposit::*;

pub mod withdraw;
pub use withdraw::*;

pub mod emergency_withdraw;
pub use emergency_withdraw::*;
