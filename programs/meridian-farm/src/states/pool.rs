use anchor_lang::prelude::*;
use spl_math::uint::U256;

use crate::error::ErrorCode;
use crate::states::{FarmConfig, UserStake};
use crate::ACC_PRECISION;

pub const POOL_SEED: &str = "pool";

/// One reward pool per position collection.
///
/// `acc_reward_per_share` is the cumulative reward per staked position,
/// scaled by [`ACC_PRECISION`]. It is stored as little-endian 64-bit limbs
/// because the scaled value does not fit in a u128. Both it and
/// `last_reward_block` only ever move forward.
#[account]
#[derive(Default, Debug)]
pub struct Pool {
    /// PDA bump for this account.
    pub bump: u8,
    /// Index of this pool; also its PDA seed.
    pub pool_id: u64,
    /// Verified Metaplex collection mint this pool accepts.
    pub position_collection: Pubkey,
    /// Weight of this pool in the global emission split.
    pub alloc_point: u64,
    /// Block at which the accumulator was last advanced.
    pub last_reward_block: u64,
    /// Scaled cumulative reward per staked position (U256 limbs).
    pub acc_reward_per_share: [u64; 4],
    /// Number of positions of this collection currently in farm custody.
    pub total_staked: u64,
}

impl Pool {
    pub const LEN: usize = 8 + 1 + 8 + 32 + 8 + 8 + 8 * 4 + 8;

    pub fn acc_reward_per_share(&self) -> U256 {
        U256(self.acc_reward_per_share)
    }

    fn set_acc_reward_per_share(&mut self, value: U256) {
        self.acc_reward_per_share = value.0;
    }

    /// The accumulator value an advance at `current_block` would produce,
    /// without mutating the pool. With zero staked supply (or a zero global
    /// weight) the accumulator is unchanged: that span's emission is never
    /// added to any per-share value.
    pub fn projected_acc_per_share(
        &self,
        config: &FarmConfig,
        current_block: u64,
    ) -> Result<U256> {
        if current_block <= self.last_reward_block
            || self.total_staked == 0
            || config.total_alloc_point == 0
        {
            return Ok(self.acc_reward_per_share());
        }
        let multiplier = config.block_multiplier(self.last_reward_block, current_block)?;
        let reward = U256::from(multiplier)
            .checked_mul(U256::from(config.reward_per_block))
            .ok_or(ErrorCode::MathOverflow)?
            .checked_mul(U256::from(self.alloc_point))
            .ok_or(ErrorCode::MathOverflow)?
            .checked_div(U256::from(config.total_alloc_point))
            .ok_or(ErrorCode::MathOverflow)?;
        let delta = reward
            .checked_mul(U256::from(ACC_PRECISION))
            .ok_or(ErrorCode::MathOverflow)?
            .checked_div(U256::from(self.total_staked))
            .ok_or(ErrorCode::MathOverflow)?;
        self.acc_reward_per_share()
            .checked_add(delta)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))
    }

    /// Advance the accumulator to `current_block`. Idempotent within a
    /// block. A zero-supply span only moves `last_reward_block` forward.
    pub fn advance(&mut self, config: &FarmConfig, current_block: u64) -> Result<()> {
        if current_block <= self.last_reward_block {
            return Ok(());
        }
        let acc = self.projected_acc_per_share(config, current_block)?;
        self.set_acc_reward_per_share(acc);
        self.last_reward_block = current_block;
        Ok(())
    }

    /// Total reward owed for `amount` positions at accumulator `acc`,
    /// before subtracting any settled baseline.
    pub fn accrued(amount: u64, acc: U256) -> Result<u128> {
        let value = U256::from(amount)
            .checked_mul(acc)
            .ok_or(ErrorCode::MathOverflow)?
            .checked_div(U256::from(ACC_PRECISION))
            .ok_or(ErrorCode::MathOverflow)?;
        if value > U256::from(u128::MAX) {
            return err!(ErrorCode::MathOverflow);
        }
        Ok(value.as_u128())
    }

    /// Reward the given stake could claim at `current_block`. Matches the
    /// amount a settle would pay if the accumulator were advanced in the
    /// same block.
    pub fn pending_reward(
        &self,
        config: &FarmConfig,
        user_stake: &UserStake,
        current_block: u64,
    ) -> Result<u64> {
        let acc = self.projected_acc_per_share(config, current_block)?;
        user_stake.pending(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config(reward_per_block: u64, bonus_multiplier: u64, total_alloc_point: u64) -> FarmConfig {
        FarmConfig {
            reward_per_block,
            bonus_multiplier,
            total_alloc_point,
            ..Default::default()
        }
    }

    fn pool(alloc_point: u64, last_reward_block: u64, total_staked: u64) -> Pool {
        Pool {
            alloc_point,
            last_reward_block,
            total_staked,
            ..Default::default()
        }
    }

    #[test]
    fn sole_pool_single_position_ten_blocks() {
        let config = config(5_000_000_000, 1, 200);
        let mut pool = pool(200, 100, 1);

        pool.advance(&config, 110).unwrap();

        let expected = U256::from(50_000_000_000u64) * U256::from(ACC_PRECISION);
        assert_eq!(pool.acc_reward_per_share(), expected);
        assert_eq!(pool.last_reward_block, 110);
    }

    #[test]
    fn advance_is_idempotent_within_a_block() {
        let config = config(1_000, 7, 100);
        let mut pool = pool(100, 50, 3);

        pool.advance(&config, 60).unwrap();
        let after_first = pool.acc_reward_per_share();
        pool.advance(&config, 60).unwrap();

        assert_eq!(pool.acc_reward_per_share(), after_first);
    }

    #[test]
    fn zero_supply_span_moves_block_without_emission() {
        let config = config(1_000, 1, 100);
        let mut pool = pool(100, 10, 0);

        pool.advance(&config, 42).unwrap();

        assert_eq!(pool.last_reward_block, 42);
        assert_eq!(pool.acc_reward_per_share(), U256::zero());
    }

    #[test]
    fn pending_matches_same_block_settle() {
        let config = config(3_333, 5, 400);
        let mut pool = pool(150, 0, 4);
        let mut user = UserStake::default();
        user.stake(Pubkey::new_unique()).unwrap();
        user.stake(Pubkey::new_unique()).unwrap();
        user.sync_debt(pool.acc_reward_per_share()).unwrap();

        let quoted = pool.pending_reward(&config, &user, 97).unwrap();
        pool.advance(&config, 97).unwrap();
        let paid = user.pending(pool.acc_reward_per_share()).unwrap();

        assert_eq!(quoted, paid);
    }

    #[test]
    fn equal_stakes_split_emission_equally() {
        let config = config(5_000_000_000, 1, 200);
        let mut pool = pool(200, 0, 2);
        let mut a = UserStake::default();
        let mut b = UserStake::default();
        a.stake(Pubkey::new_unique()).unwrap();
        b.stake(Pubkey::new_unique()).unwrap();
        a.sync_debt(pool.acc_reward_per_share()).unwrap();
        b.sync_debt(pool.acc_reward_per_share()).unwrap();

        pool.advance(&config, 9).unwrap();

        let emission = 9u64 * 5_000_000_000;
        let pending_a = a.pending(pool.acc_reward_per_share()).unwrap();
        let pending_b = b.pending(pool.acc_reward_per_share()).unwrap();
        assert_eq!(pending_a, emission / 2);
        assert_eq!(pending_a, pending_b);
    }

    #[test]
    fn accrued_rejects_values_beyond_u128() {
        let acc = U256::MAX / U256::from(2u8);
        assert!(Pool::accrued(u64::MAX, acc).is_err());
    }

    proptest! {
        #[test]
        fn accumulator_is_monotonic(
            reward_per_block in 0u64..=1_000_000_000_000,
            bonus_multiplier in 0u64..=10_000_000,
            alloc_point in 0u64..=10_000,
            extra_alloc in 0u64..=10_000,
            supply in 0u64..=10_000,
            spans in proptest::collection::vec(0u64..=100_000, 1..20),
        ) {
            let config = config(reward_per_block, bonus_multiplier, alloc_point + extra_alloc);
            let mut pool = pool(alloc_point, 0, supply);
            let mut block = 0u64;
            for span in spans {
                block += span;
                let before = pool.acc_reward_per_share();
                pool.advance(&config, block).unwrap();
                prop_assert!(pool.acc_reward_per_share() >= before);
                prop_assert_eq!(pool.last_reward_block, block);
            }
        }

        #[test]
        fn pending_never_exceeds_emission(
            reward_per_block in 1u64..=10_000_000_000,
            bonus_multiplier in 1u64..=10_000,
            amount_a in 1u64..=16,
            amount_b in 1u64..=16,
            spans in proptest::collection::vec(1u64..=10_000, 1..12),
        ) {
            let config = config(reward_per_block, bonus_multiplier, 200);
            let supply = amount_a + amount_b;
            let mut pool = pool(200, 0, supply);

            let mut a = UserStake { amount: amount_a, ..Default::default() };
            let mut b = UserStake { amount: amount_b, ..Default::default() };
            a.sync_debt(pool.acc_reward_per_share()).unwrap();
            b.sync_debt(pool.acc_reward_per_share()).unwrap();

            let mut block = 0u64;
            let mut emission = 0u128;
            for span in spans {
                block += span;
                emission += config.block_multiplier(pool.last_reward_block, block).unwrap()
                    * reward_per_block as u128;
                pool.advance(&config, block).unwrap();
            }

            let acc = pool.acc_reward_per_share();
            let total_pending = a.pending(acc).unwrap() as u128 + b.pending(acc).unwrap() as u128;
            prop_assert!(total_pending <= emission);
        }
    }
}
