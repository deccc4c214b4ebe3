use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Events: emitted for off-chain indexers/clients to track market state changes
// ──────────────────────────────────────────────────────────────────────────────
//

/// Emitted once when the market is initialized.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct MarketInitialized {
    pub admin: Pubkey,
    /// Collection mint the market accepts.
    pub position_collection: Pubkey,
    pub collateral_mint: Pubkey,
    pub collateral_vault: Pubkey,
    /// Collateral required per position.
    pub collateral_amount: u64,
    /// Lock duration in seconds.
    pub lock_period: i64,
}

/// Emitted whenever market parameters are modified.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct MarketConfigUpdated {
    pub admin: Pubkey,
    pub collateral_amount: u64,
    pub lock_period: i64,
    pub paused: bool,
}

/// Emitted when a position enters escrow against collateral.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PositionEscrowed {
    pub borrower: Pubkey,
    pub position_mint: Pubkey,
    /// Collateral pulled, as snapshotted in the record.
    pub collateral: u64,
    /// Unix time the position unlocks.
    pub lock_end: i64,
}

/// Emitted when a borrower reclaims a position after the lock.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct CollateralReleased {
    pub borrower: Pubkey,
    pub position_mint: Pubkey,
    /// Collateral refunded (the original snapshot).
    pub collateral: u64,
}

/// Emitted when the admin refunds an orphaned borrow record.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct BorrowRefunded {
    pub borrower: Pubkey,
    pub position_mint: Pubkey,
    pub collateral: u64,
}

/// Emitted when the admin pulls positions out of market custody.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PositionsRecovered {
    pub recipient: Pubkey,
    /// Positions moved in this call.
    pub count: u64,
}
