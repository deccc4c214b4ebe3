use anchor_lang::prelude::*;

declare_id!("2QhPTUAFiL4B6jTtdTHSv6aNBFshgZbiB4tL5LHJxwDj");

pub mod admin {
    use anchor_lang::prelude::declare_id;
    declare_id!("GLobUFZ4LYjoSakJeHcrPwTp5iUSH5ESnoepvQE1hURD");
}

pub const AUTH_SEED: &str = "farm_authority";
pub const REWARD_VAULT_SEED: &str = "reward_vault";

/// Fixed-point scale applied to `acc_reward_per_share`. Rewards are tracked
/// as integer reward-per-position values multiplied by this constant, so
/// floor division only discards sub-unit dust.
pub const ACC_PRECISION: u128 = 1_000_000_000_000_000_000_000_000_000_000;

pub mod error;
pub mod instructions;
pub mod states;
pub mod utils;

use instructions::*;

#[cfg(not(feature = "no-entrypoint"))]
solana_security_txt::security_txt! {
    name: "Meridian Farm",
    project_url: "https://github.com/meridian-protocol/meridian",
    contacts: "email:security@meridian-protocol.io",
    policy: "https://github.com/meridian-protocol/meridian/blob/main/SECURITY.md",
    preferred_languages: "en"
}

#[program]
pub mod meridian_farm {

    use super::*;

    pub fn initialize_farm(
        ctx: Context<InitializeFarm>,
        admin: Pubkey,
        reward_per_block: u64,
        start_block: u64,
    ) -> Result<()> {
        instructions::initialize_farm(ctx, admin, reward_per_block, start_block)
    }

    pub fn add_pool(
        ctx: Context<AddPool>,
        alloc_point: u64,
        position_collection: Pubkey,
    ) -> Result<()> {
        instructions::add_pool(ctx, alloc_point, position_collection)
    }

    pub fn set_pool(ctx: Context<SetPool>, pool_id: u64, alloc_point: u64) -> Result<()> {
        instructions::set_pool(ctx, pool_id, alloc_point)
    }

    pub fn update_farm_config(ctx: Context<UpdateFarmConfig>, param: u8, value: u64) -> Result<()> {
        instructions::update_farm_config(ctx, param, value)
    }

    pub fn update_pool(ctx: Context<UpdatePool>, pool_id: u64) -> Result<()> {
        instructions::update_pool(ctx, pool_id)
    }

    pub fn mass_update_pools<'info>(
        ctx: Context<'_, '_, 'info, 'info, MassUpdatePools<'info>>,
    ) -> Result<()> {
        instructions::mass_update_pools(ctx)
    }

    pub fn deposit<'info>(
        ctx: Context<'_, '_, 'info, 'info, Deposit<'info>>,
        pool_id: u64,
        count: u8,
    ) -> Result<()> {
        instructions::deposit(ctx, pool_id, count)
    }

    pub fn withdraw<'info>(
        ctx: Context<'_, '_, 'info, 'info, Withdraw<'info>>,
        pool_id: u64,
        count: u8,
    ) -> Result<()> {
        instructions::withdraw(ctx, pool_id, count)
    }

    pub fn emergency_withdraw<'info>(
        ctx: Context<'_, '_, 'info, 'info, EmergencyWithdraw<'info>>,
        pool_id: u64,
        count: u8,
    ) -> Result<()> {
        instructions::emergency_withdraw(ctx, pool_id, count)
    }
}
