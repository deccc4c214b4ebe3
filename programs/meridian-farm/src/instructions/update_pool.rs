use anchor_lang::prelude::*;

use crate::error::ErrorCode;
use crate::states::{FarmConfig, Pool, FARM_CONFIG_SEED, POOL_SEED};

/// Accounts context for `update_pool`.
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct UpdatePool<'info> {
    #[account(
        seeds = [FARM_CONFIG_SEED.as_bytes()],
        bump = farm_config.bump,
    )]
    pub farm_config: Account<'info, FarmConfig>,

    #[account(
        mut,
        seeds = [POOL_SEED.as_bytes(), pool_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,
}

/// Advance one pool's accumulator to the current block. Permissionless;
/// idempotent within a block.
pub fn update_pool(ctx: Context<UpdatePool>, _pool_id: u64) -> Result<()> {
    let current_block = Clock::get()?.slot;
    ctx.accounts
        .pool
        .advance(&ctx.accounts.farm_config, current_block)
}

/// Accounts context for `mass_update_pools`. Every pool account is passed
/// through `remaining_accounts`, writable, in ascending pool-id order.
#[derive(Accounts)]
pub struct MassUpdatePools<'info> {
    #[account(
        seeds = [FARM_CONFIG_SEED.as_bytes()],
        bump = farm_config.bump,
    )]
    pub farm_config: Account<'info, FarmConfig>,
}

/// Advance every pool's accumulator. The full pool list must be supplied;
/// pools are independent, so the ascending-order requirement only makes the
/// list easy to validate against `pool_count`.
pub fn mass_update_pools<'info>(
    ctx: Context<'_, '_, 'info, 'info, MassUpdatePools<'info>>,
) -> Result<()> {
    let farm_config = &ctx.accounts.farm_config;
    let current_block = Clock::get()?.slot;

    require!(
        ctx.remaining_accounts.len() as u64 == farm_config.pool_count,
        ErrorCode::InvalidPoolList
    );

    for (index, info) in ctx.remaining_accounts.iter().enumerate() {
        require!(info.is_writable, ErrorCode::InvalidPoolList);
        let mut pool: Account<Pool> = Account::try_from(info)?;
        require!(pool.pool_id == index as u64, ErrorCode::InvalidPoolList);
        pool.advance(farm_config, current_block)?;
        pool.exit(&crate::ID)?;
    }
    Ok(())
}
