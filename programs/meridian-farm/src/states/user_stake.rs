use anchor_lang::prelude::*;
use spl_math::uint::U256;

use crate::error::ErrorCode;
use crate::states::Pool;

pub const USER_STAKE_SEED: &str = "user_stake";

/// Upper bound on positions a single stake account can hold. Keeps the
/// account size fixed at initialization.
pub const MAX_POSITIONS_PER_STAKE: usize = 32;

/// Per-(pool, user) stake record.
///
/// Membership of `position_mints` is the record of ownership: a position is
/// returned only to the stake whose set contains it, regardless of who asks
/// while it sits in farm custody. `amount` always equals the set length.
#[account]
#[derive(Default, Debug)]
pub struct UserStake {
    /// PDA bump for this account.
    pub bump: u8,
    /// Staker this record belongs to.
    pub owner: Pubkey,
    /// Pool this record belongs to.
    pub pool_id: u64,
    /// Number of staked positions; equals `position_mints.len()`.
    pub amount: u64,
    /// Scaled reward baseline already settled for this stake.
    pub reward_debt: u128,
    /// Mints of the staked positions. Order carries no meaning.
    pub position_mints: Vec<Pubkey>,
}

impl UserStake {
    pub const LEN: usize = 8 + 1 + 32 + 8 + 8 + 16 + 4 + 32 * MAX_POSITIONS_PER_STAKE;

    pub fn contains(&self, mint: &Pubkey) -> bool {
        self.position_mints.iter().any(|m| m == mint)
    }

    /// Add a position to the staked set.
    pub fn stake(&mut self, mint: Pubkey) -> Result<()> {
        require!(!self.contains(&mint), ErrorCode::PositionAlreadyStaked);
        require!(
            self.position_mints.len() < MAX_POSITIONS_PER_STAKE,
            ErrorCode::StakeCapacityExceeded
        );
        self.position_mints.push(mint);
        self.amount = self.amount.checked_add(1).ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    /// Remove a position from the staked set. Fails if the caller never
    /// staked it, even when the farm physically holds the token.
    pub fn unstake(&mut self, mint: &Pubkey) -> Result<()> {
        let index = self
            .position_mints
            .iter()
            .position(|m| m == mint)
            .ok_or(ErrorCode::PositionNotStaked)?;
        self.position_mints.swap_remove(index);
        self.amount = self.amount.checked_sub(1).ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    /// Reward accrued beyond the settled baseline at accumulator `acc`.
    pub fn pending(&self, acc: U256) -> Result<u64> {
        let accrued = Pool::accrued(self.amount, acc)?;
        let pending = accrued
            .checked_sub(self.reward_debt)
            .ok_or(ErrorCode::MathOverflow)?;
        u64::try_from(pending).map_err(|_| error!(ErrorCode::MathOverflow))
    }

    /// Re-baseline the settled reward to the current accumulator.
    pub fn sync_debt(&mut self, acc: U256) -> Result<()> {
        self.reward_debt = Pool::accrued(self.amount, acc)?;
        Ok(())
    }

    /// Forfeit all bookkeeping. Used by the emergency path only.
    pub fn forfeit(&mut self) {
        self.amount = 0;
        self.reward_debt = 0;
        self.position_mints.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::FarmConfig;
    use crate::ACC_PRECISION;
    use rand::seq::SliceRandom;

    #[test]
    fn stake_tracks_membership_and_amount() {
        let mut stake = UserStake::default();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();

        stake.stake(a).unwrap();
        stake.stake(b).unwrap();

        assert_eq!(stake.amount, 2);
        assert!(stake.contains(&a) && stake.contains(&b));
        assert_eq!(stake.amount as usize, stake.position_mints.len());
    }

    #[test]
    fn duplicate_stake_is_rejected_without_mutation() {
        let mut stake = UserStake::default();
        let mint = Pubkey::new_unique();
        stake.stake(mint).unwrap();

        assert!(stake.stake(mint).is_err());
        assert_eq!(stake.amount, 1);
        assert_eq!(stake.position_mints.len(), 1);
    }

    #[test]
    fn unstake_requires_record_membership() {
        let mut stake = UserStake::default();
        stake.stake(Pubkey::new_unique()).unwrap();

        let foreign = Pubkey::new_unique();
        assert!(stake.unstake(&foreign).is_err());
        assert_eq!(stake.amount, 1);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut stake = UserStake::default();
        for _ in 0..MAX_POSITIONS_PER_STAKE {
            stake.stake(Pubkey::new_unique()).unwrap();
        }
        assert!(stake.stake(Pubkey::new_unique()).is_err());
    }

    #[test]
    fn removal_order_does_not_matter() {
        let mut stake = UserStake::default();
        let mut mints: Vec<Pubkey> = (0..10).map(|_| Pubkey::new_unique()).collect();
        for mint in &mints {
            stake.stake(*mint).unwrap();
        }

        mints.shuffle(&mut rand::rng());
        for mint in &mints {
            stake.unstake(mint).unwrap();
        }
        assert_eq!(stake.amount, 0);
        assert!(stake.position_mints.is_empty());
    }

    #[test]
    fn deposit_withdraw_round_trip_zeroes_bookkeeping() {
        let config = FarmConfig {
            reward_per_block: 1_000_000_000,
            bonus_multiplier: 10_000_000,
            total_alloc_point: 200,
            ..Default::default()
        };
        let mut pool = Pool {
            alloc_point: 200,
            total_staked: 0,
            ..Default::default()
        };
        let mut stake = UserStake::default();
        let mint = Pubkey::new_unique();

        // Deposit at block 0.
        pool.advance(&config, 0).unwrap();
        stake.stake(mint).unwrap();
        pool.total_staked += 1;
        stake.sync_debt(pool.acc_reward_per_share()).unwrap();

        // Withdraw everything at block 25: settle, then remove.
        pool.advance(&config, 25).unwrap();
        let pending = stake.pending(pool.acc_reward_per_share()).unwrap();
        stake.unstake(&mint).unwrap();
        pool.total_staked -= 1;
        stake.sync_debt(pool.acc_reward_per_share()).unwrap();

        assert_eq!(pending as u128, 25 * 10_000_000 * 1_000_000_000u128);
        assert_eq!(stake.amount, 0);
        assert_eq!(stake.reward_debt, 0);
        assert_eq!(
            stake.pending(pool.acc_reward_per_share()).unwrap(),
            0,
            "an emptied stake accrues nothing further"
        );
    }

    #[test]
    fn forfeit_drops_pending_rewards() {
        let mut stake = UserStake::default();
        stake.stake(Pubkey::new_unique()).unwrap();
        stake.reward_debt = 5;

        stake.forfeit();

        assert_eq!(stake.amount, 0);
        assert_eq!(stake.reward_debt, 0);
        assert!(stake.position_mints.is_empty());
    }

    #[test]
    fn settle_is_exact_against_scaled_accumulator() {
        // Two positions, accumulator advanced by 3.5 reward-per-share in
        // scaled units: pending floors to 7 exactly.
        let mut stake = UserStake::default();
        stake.stake(Pubkey::new_unique()).unwrap();
        stake.stake(Pubkey::new_unique()).unwrap();

        let acc = U256::from(ACC_PRECISION) * U256::from(7u8) / U256::from(2u8);
        assert_eq!(stake.pending(acc).unwrap(), 7);

        stake.sync_debt(acc).unwrap();
        assert_eq!(stake.pending(acc).unwrap(), 0);
    }
}
