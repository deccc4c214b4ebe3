use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Events: emitted for off-chain indexers/clients to track farm state changes
// ──────────────────────────────────────────────────────────────────────────────
//

/// Emitted once when the farm is initialized.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct FarmInitialized {
    /// Farm admin pubkey (may later be updated).
    pub admin: Pubkey,
    /// Reward token mint.
    pub reward_mint: Pubkey,
    /// Treasury vault paying out rewards.
    pub reward_vault: Pubkey,
    /// Base emission per block.
    pub reward_per_block: u64,
    /// Block before which no emission accrues.
    pub start_block: u64,
}

/// Emitted when a pool is registered.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PoolAdded {
    pub pool_id: u64,
    /// Collection mint this pool accepts.
    pub position_collection: Pubkey,
    pub alloc_point: u64,
    /// Block the new pool starts accruing from.
    pub last_reward_block: u64,
}

/// Emitted when a pool's emission weight changes.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PoolWeightSet {
    pub pool_id: u64,
    pub old_alloc_point: u64,
    pub new_alloc_point: u64,
    /// Global weight sum after the change.
    pub total_alloc_point: u64,
}

/// Emitted whenever farm configuration is modified via `update_farm_config`.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct FarmConfigUpdated {
    /// Current admin (may be the same or newly set).
    pub admin: Pubkey,
    pub bonus_multiplier: u64,
    pub paused: bool,
}

/// Emitted when pending rewards are paid out of the treasury.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct RewardPaid {
    pub pool_id: u64,
    pub user: Pubkey,
    /// Reward base units transferred.
    pub amount: u64,
}

/// Emitted after positions enter farm custody.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PositionsDeposited {
    pub pool_id: u64,
    pub user: Pubkey,
    /// Positions moved in this call.
    pub count: u64,
    /// User's staked amount after the deposit.
    pub amount: u64,
}

/// Emitted after positions leave farm custody through the normal path.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PositionsWithdrawn {
    pub pool_id: u64,
    pub user: Pubkey,
    pub count: u64,
    /// User's staked amount after the withdrawal.
    pub amount: u64,
}

/// Emitted when a staker forfeits rewards through the emergency path.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct EmergencyWithdrawn {
    pub pool_id: u64,
    pub user: Pubkey,
    /// Positions returned with no payout.
    pub count: u64,
}
