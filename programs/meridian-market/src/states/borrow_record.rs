use anchor_lang::prelude::*;

use crate::error::ErrorCode;
use crate::states::MarketConfig;

pub const BORROW_RECORD_SEED: &str = "borrow_record";

/// One open borrow: a position escrowed against fungible collateral.
///
/// The account exists exactly while the market escrows `position_mint` for
/// `borrower`: it is created by `borrow` and closed when the collateral
/// leaves again (borrower withdraw or admin refund). `collateral` and
/// `lock_end` are snapshots taken at borrow time and immune to later
/// parameter changes.
#[account]
#[derive(Default, Debug)]
pub struct BorrowRecord {
    /// PDA bump for this account.
    pub bump: u8,
    /// User whose collateral backs this record.
    pub borrower: Pubkey,
    /// Escrowed position.
    pub position_mint: Pubkey,
    /// Collateral actually pulled at borrow time; the exact refund amount.
    pub collateral: u64,
    /// Unix time after which withdraw is permitted.
    pub lock_end: i64,
}

impl BorrowRecord {
    pub const LEN: usize = 8 + 1 + 32 + 32 + 8 + 8;

    /// Build the record for a borrow happening at `now` under the current
    /// market parameters.
    pub fn open(
        borrower: Pubkey,
        position_mint: Pubkey,
        config: &MarketConfig,
        now: i64,
        bump: u8,
    ) -> Result<Self> {
        Ok(Self {
            bump,
            borrower,
            position_mint,
            collateral: config.collateral_amount,
            lock_end: now
                .checked_add(config.lock_period)
                .ok_or(ErrorCode::MathOverflow)?,
        })
    }

    pub fn lock_elapsed(&self, now: i64) -> bool {
        now >= self.lock_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    fn config(collateral_amount: u64, lock_period: i64) -> MarketConfig {
        MarketConfig {
            collateral_amount,
            lock_period,
            ..Default::default()
        }
    }

    #[test]
    fn withdraw_is_gated_until_lock_end() {
        let config = config(1_000, 300);
        let borrowed_at = 1_700_000_000;
        let record = BorrowRecord::open(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            &config,
            borrowed_at,
            255,
        )
        .unwrap();

        assert_eq!(record.lock_end, borrowed_at + 300);
        assert!(!record.lock_elapsed(borrowed_at + 100));
        assert!(!record.lock_elapsed(borrowed_at + 299));
        assert!(record.lock_elapsed(borrowed_at + 300));
        assert!(record.lock_elapsed(borrowed_at + 301));
    }

    #[test]
    fn record_snapshots_survive_parameter_changes() {
        let mut config = config(1_000, 300);
        let record = BorrowRecord::open(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            &config,
            50,
            255,
        )
        .unwrap();

        config.collateral_amount = 1;
        config.lock_period = 1;
        let later = BorrowRecord::open(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            &config,
            60,
            255,
        )
        .unwrap();

        assert_eq!(record.collateral, 1_000);
        assert_eq!(record.lock_end, 350);
        assert_eq!(later.collateral, 1);
        assert_eq!(later.lock_end, 61);
    }

    #[test]
    fn open_rejects_lock_end_overflow() {
        let config = config(1, i64::MAX);
        assert!(
            BorrowRecord::open(Pubkey::new_unique(), Pubkey::new_unique(), &config, 1, 255)
                .is_err()
        );
    }

    quickcheck! {
        fn snapshot_is_immune_to_any_later_params(
            collateral: u64,
            lock_period: u32,
            now: u32,
            new_collateral: u64,
            new_lock_period: u32
        ) -> bool {
            let mut config = config(collateral, lock_period as i64);
            let record = BorrowRecord::open(
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                &config,
                now as i64,
                0,
            )
            .unwrap();

            config.collateral_amount = new_collateral;
            config.lock_period = new_lock_period as i64;

            record.collateral == collateral
                && record.lock_end == now as i64 + lock_period as i64
        }
    }
}
