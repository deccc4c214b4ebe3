use anchor_lang::prelude::*;

use crate::error::ErrorCode;

pub const CUSTODY_INDEX_SEED: &str = "custody_index";

/// Upper bound on positions the market can escrow at once. Keeps the index
/// account size fixed at initialization.
pub const MAX_CUSTODIED_POSITIONS: usize = 256;

/// On-chain enumeration of every position currently in market custody.
///
/// Kept in lockstep with escrow moves: borrow inserts, borrower withdraw
/// and admin recovery remove. Order carries no meaning.
#[account]
#[derive(Default, Debug)]
pub struct CustodyIndex {
    /// PDA bump for this account.
    pub bump: u8,
    /// Mints of every escrowed position.
    pub positions: Vec<Pubkey>,
}

impl CustodyIndex {
    pub const LEN: usize = 8 + 1 + 4 + 32 * MAX_CUSTODIED_POSITIONS;

    pub fn contains(&self, mint: &Pubkey) -> bool {
        self.positions.iter().any(|m| m == mint)
    }

    pub fn insert(&mut self, mint: Pubkey) -> Result<()> {
        require!(!self.contains(&mint), ErrorCode::PositionStillInCustody);
        require!(
            self.positions.len() < MAX_CUSTODIED_POSITIONS,
            ErrorCode::CustodyCapacityExceeded
        );
        self.positions.push(mint);
        Ok(())
    }

    pub fn remove(&mut self, mint: &Pubkey) -> Result<()> {
        let index = self
            .positions
            .iter()
            .position(|m| m == mint)
            .ok_or(ErrorCode::PositionNotInCustody)?;
        self.positions.swap_remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_escrow_membership() {
        let mut index = CustodyIndex::default();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();

        index.insert(a).unwrap();
        index.insert(b).unwrap();
        assert!(index.contains(&a) && index.contains(&b));

        index.remove(&a).unwrap();
        assert!(!index.contains(&a));
        assert!(index.contains(&b));
    }

    #[test]
    fn double_insert_and_missing_remove_are_rejected() {
        let mut index = CustodyIndex::default();
        let mint = Pubkey::new_unique();
        index.insert(mint).unwrap();

        assert!(index.insert(mint).is_err());
        assert!(index.remove(&Pubkey::new_unique()).is_err());
        assert_eq!(index.positions.len(), 1);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut index = CustodyIndex::default();
        for _ in 0..MAX_CUSTODIED_POSITIONS {
            index.insert(Pubkey::new_unique()).unwrap();
        }
        assert!(index.insert(Pubkey::new_unique()).is_err());
    }
}
