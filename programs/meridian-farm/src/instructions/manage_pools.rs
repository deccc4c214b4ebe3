use anchor_lang::prelude::*;

use crate::error::ErrorCode;
use crate::states::{FarmConfig, Pool, PoolAdded, PoolWeightSet, FARM_CONFIG_SEED, POOL_SEED};

/// Accounts context for `add_pool`.
#[derive(Accounts)]
pub struct AddPool<'info> {
    /// Authorized signer: the stored admin or the hardcoded program admin.
    #[account(
        mut,
        constraint = (owner.key() == farm_config.admin || owner.key() == crate::admin::id()) @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [FARM_CONFIG_SEED.as_bytes()],
        bump = farm_config.bump,
    )]
    pub farm_config: Account<'info, FarmConfig>,

    /// New pool account, derived from the next pool id.
    #[account(
        init,
        seeds = [POOL_SEED.as_bytes(), farm_config.pool_count.to_le_bytes().as_ref()],
        bump,
        payer = owner,
        space = Pool::LEN
    )]
    pub pool: Account<'info, Pool>,

    pub system_program: Program<'info, System>,
}

/// Register a pool for `position_collection` with weight `alloc_point`.
///
/// The pool starts accruing at the current block, or at the farm's
/// `start_block` if that lies in the future. Registering the same
/// collection twice splits stakers of that collection across pools; the
/// admin is expected not to.
pub fn add_pool(ctx: Context<AddPool>, alloc_point: u64, position_collection: Pubkey) -> Result<()> {
    let farm_config = &mut ctx.accounts.farm_config;
    let pool = &mut ctx.accounts.pool;
    let current_block = Clock::get()?.slot;

    pool.bump = ctx.bumps.pool;
    pool.pool_id = farm_config.pool_count;
    pool.position_collection = position_collection;
    pool.alloc_point = alloc_point;
    pool.last_reward_block = current_block.max(farm_config.start_block);
    pool.acc_reward_per_share = [0; 4];
    pool.total_staked = 0;

    farm_config.total_alloc_point = farm_config
        .total_alloc_point
        .checked_add(alloc_point)
        .ok_or(ErrorCode::MathOverflow)?;
    farm_config.pool_count = farm_config
        .pool_count
        .checked_add(1)
        .ok_or(ErrorCode::MathOverflow)?;

    emit!(PoolAdded {
        pool_id: pool.pool_id,
        position_collection,
        alloc_point,
        last_reward_block: pool.last_reward_block,
    });
    Ok(())
}

/// Accounts context for `set_pool`.
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct SetPool<'info> {
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

    #[account(
        mut,
        seeds = [POOL_SEED.as_bytes(), pool_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,
}

/// Change a pool's emission weight.
///
/// The pool's accumulator is advanced under the old weights first, so the
/// change never reprices a span this pool has already earned. Other pools
/// price their whole un-advanced span at the new `total_alloc_point`;
/// operators wanting an exact cutover run `mass_update_pools` in the same
/// transaction, first.
pub fn set_pool(ctx: Context<SetPool>, pool_id: u64, alloc_point: u64) -> Result<()> {
    let farm_config = &mut ctx.accounts.farm_config;
    let pool = &mut ctx.accounts.pool;
    let current_block = Clock::get()?.slot;

    pool.advance(farm_config, current_block)?;

    let old_alloc_point = pool.alloc_point;
    farm_config.total_alloc_point = farm_config
        .total_alloc_point
        .checked_sub(old_alloc_point)
        .ok_or(ErrorCode::MathOverflow)?
        .checked_add(alloc_point)
        .ok_or(ErrorCode::MathOverflow)?;
    pool.alloc_point = alloc_point;

    emit!(PoolWeightSet {
        pool_id,
        old_alloc_point,
        new_alloc_point: alloc_point,
        total_alloc_point: farm_config.total_alloc_point,
    });
    Ok(())
}
