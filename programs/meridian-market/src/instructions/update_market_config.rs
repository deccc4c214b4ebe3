use anchor_lang::prelude::*;

use crate::error::ErrorCode;
use crate::states::{MarketConfig, MarketConfigUpdated, MARKET_CONFIG_SEED};

/// Accounts context for the `update_market_config` instruction.
#[derive(Accounts)]
pub struct UpdateMarketConfig<'info> {
    /// Authorized signer: the stored admin or the hardcoded program admin.
    #[account(
        constraint = (owner.key() == market_config.admin || owner.key() == crate::admin::id()) @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [MARKET_CONFIG_SEED.as_bytes()],
        bump = market_config.bump,
    )]
    pub market_config: Account<'info, MarketConfig>,
}

/// Updates selected market parameters. Each change applies only to borrow
/// records created afterwards; existing records keep their snapshots.
/// Pausing borrows around a parameter change remains an operational
/// convention, not an on-chain requirement.
///
/// # Param Mapping
/// - `0`: **Admin change** → new admin Pubkey passed via `remaining_accounts[0]`.
/// - `1`: **collateral_amount** → collateral required per position (u64).
/// - `2`: **lock_period** → lock duration in seconds (u64, bounded to i64).
/// - `3`: **paused** → nonzero pauses borrow, zero unpauses.
///
/// Any other `param` value returns `ErrorCode::InvalidParam`.
pub fn update_market_config(ctx: Context<UpdateMarketConfig>, param: u8, value: u64) -> Result<()> {
    let market_config = &mut ctx.accounts.market_config;
    match param {
        // Update admin (requires new admin key from remaining_accounts[0])
        0 => {
            let new_admin = *ctx
                .remaining_accounts
                .iter()
                .next()
                .ok_or(error!(ErrorCode::MissingRemainingAccount))?
                .key;
            require_keys_neq!(new_admin, Pubkey::default());
            market_config.admin = new_admin;
        }
        // Update per-position collateral for new borrows
        1 => {
            market_config.collateral_amount = value;
        }
        // Update lock period for new borrows
        2 => {
            market_config.lock_period =
                i64::try_from(value).map_err(|_| error!(ErrorCode::InvalidParam))?;
        }
        // Toggle pause gate
        3 => {
            market_config.paused = value != 0;
        }
        // Invalid parameter selector
        _ => return Err(error!(ErrorCode::InvalidParam)),
    }

    emit!(MarketConfigUpdated {
        admin: market_config.admin,
        collateral_amount: market_config.collateral_amount,
        lock_period: market_config.lock_period,
        paused: market_config.paused,
    });
    Ok(())
}
