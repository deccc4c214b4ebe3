use anchor_lang::prelude::*;

use crate::error::ErrorCode;

pub const FARM_CONFIG_SEED: &str = "farm_config";

/// Farm-wide configuration and emission parameters.
///
/// The reward vault referenced here is the farm treasury: a token account
/// owned by the farm authority PDA. Every reward payout is a PDA-signed
/// transfer out of it, so only farm instructions can move treasury funds.
#[account]
#[derive(Default, Debug)]
pub struct FarmConfig {
    /// PDA bump for this account.
    pub bump: u8,
    /// Admin allowed to run pool administration and config updates.
    pub admin: Pubkey,
    /// Mint of the reward token.
    pub reward_mint: Pubkey,
    /// Treasury vault paying out rewards (owned by the farm authority PDA).
    pub reward_vault: Pubkey,
    /// Base emission per block, in reward base units.
    pub reward_per_block: u64,
    /// Global multiplier applied to every block span not yet folded into a
    /// pool accumulator. Never applied retroactively to advanced spans.
    pub bonus_multiplier: u64,
    /// Block before which no emission accrues.
    pub start_block: u64,
    /// Sum of all pools' alloc points.
    pub total_alloc_point: u64,
    /// Number of pools added so far; also the next pool id.
    pub pool_count: u64,
    /// Gates deposit/withdraw. Emergency withdraw requires this to be set.
    pub paused: bool,
}

impl FarmConfig {
    pub const LEN: usize = 8 + 1 + 32 * 3 + 8 * 5 + 1;

    /// Emission multiplier for the block span `from..to`.
    pub fn block_multiplier(&self, from: u64, to: u64) -> Result<u128> {
        let span = to.checked_sub(from).ok_or(ErrorCode::MathOverflow)?;
        (span as u128)
            .checked_mul(self.bonus_multiplier as u128)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_multiplier_scales_span() {
        let config = FarmConfig {
            bonus_multiplier: 10_000_000,
            ..Default::default()
        };
        assert_eq!(
            config.block_multiplier(110, 200).unwrap(),
            10_000_000 * (200 - 110)
        );
    }

    #[test]
    fn block_multiplier_rejects_reversed_span() {
        let config = FarmConfig {
            bonus_multiplier: 1,
            ..Default::default()
        };
        assert!(config.block_multiplier(5, 4).is_err());
    }
}
