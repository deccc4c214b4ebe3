use anchor_lang::prelude::*;

pub const MARKET_CONFIG_SEED: &str = "market_config";

/// Market-wide parameters for new borrows.
///
/// `collateral_amount` and `lock_period` are read at borrow time and copied
/// into the borrow record; changing them never touches records that already
/// exist.
#[account]
#[derive(Default, Debug)]
pub struct MarketConfig {
    /// PDA bump for this account.
    pub bump: u8,
    /// Admin allowed to change parameters and recover custody.
    pub admin: Pubkey,
    /// Verified Metaplex collection mint the market accepts.
    pub position_collection: Pubkey,
    /// Mint of the fungible collateral token.
    pub collateral_mint: Pubkey,
    /// Vault holding escrowed collateral (owned by the market authority PDA).
    pub collateral_vault: Pubkey,
    /// Collateral required per position for new borrows.
    pub collateral_amount: u64,
    /// Lock duration in seconds applied to new borrows.
    pub lock_period: i64,
    /// Gates borrow; never gates withdraw or admin recovery.
    pub paused: bool,
}

impl MarketConfig {
    pub const LEN: usize = 8 + 1 + 32 * 4 + 8 + 8 + 1;
}
