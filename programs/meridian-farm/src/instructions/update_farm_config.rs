use anchor_lang::prelude::*;

use crate::error::ErrorCode;
use crate::states::{FarmConfig, FarmConfigUpdated, FARM_CONFIG_SEED};

/// Accounts context for the `update_farm_config` instruction.
#[derive(Accounts)]
pub struct UpdateFarmConfig<'info> {
    /// Authorized signer: the stored admin or the hardcoded program admin.
    #[account(
        constraint = (owner.key() == farm_config.admin || owner.key() == crate::admin::id()) @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [FARM_CONFIG_SEED.as_bytes()],
        bump = farm_config.bump,
    )]
    pub farm_config: Account<'info, FarmConfig>,
}

/// Updates selected fields of the farm configuration.
///
/// # Param Mapping
/// - `0`: **Admin change** → new admin Pubkey passed via `remaining_accounts[0]`.
/// - `1`: **bonus_multiplier** → applies only to block spans not yet folded
///   into a pool accumulator; pair with `mass_update_pools` to draw the
///   line at the current block.
/// - `2`: **paused** → nonzero pauses deposit/withdraw (and arms the
///   emergency path), zero unpauses.
///
/// Any other `param` value returns `ErrorCode::InvalidParam`.
pub fn update_farm_config(ctx: Context<UpdateFarmConfig>, param: u8, value: u64) -> Result<()> {
    let farm_config = &mut ctx.accounts.farm_config;
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
            farm_config.admin = new_admin;
        }
        // Update bonus multiplier
        1 => {
            farm_config.bonus_multiplier = value;
        }
        // Toggle pause gate
        2 => {
            farm_config.paused = value != 0;
        }
        // Invalid parameter selector
        _ => return Err(error!(ErrorCode::InvalidParam)),
    }

    emit!(FarmConfigUpdated {
        admin: farm_config.admin,
        bonus_multiplier: farm_config.bonus_multiplier,
        paused: farm_config.paused,
    });
    Ok(())
}
