use anchor_lang::prelude::*;
use anchor_spl::associated_token::{self, AssociatedToken, Create};
use anchor_spl::token_interface::{Mint, TokenInterface};

use crate::error::ErrorCode;
use crate::states::{
    EmergencyWithdrawn, FarmConfig, Pool, UserStake, FARM_CONFIG_SEED, POOL_SEED, USER_STAKE_SEED,
};
use crate::utils::transfer_from_vault_to_user;
use crate::AUTH_SEED;

/// Accounts per position in `remaining_accounts`:
/// `[position_mint, vault_position_token, owner_position_token]`.
pub const EMERGENCY_ACCOUNTS_PER_POSITION: usize = 3;

/// Accounts for the forfeiture path. Available to any staker while the farm
/// is paused; no reward accounts are involved because nothing is paid.
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct EmergencyWithdraw<'info> {
    /// Staker reclaiming positions and forfeiting accrued rewards.
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Farm configuration; this path only opens while paused.
    #[account(
        seeds = [FARM_CONFIG_SEED.as_bytes()],
        bump = farm_config.bump,
        constraint = farm_config.paused @ ErrorCode::FarmNotPaused,
    )]
    pub farm_config: Account<'info, FarmConfig>,

    #[account(
        mut,
        seeds = [POOL_SEED.as_bytes(), pool_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    /// Caller's stake record for this pool.
    #[account(
        mut,
        seeds = [
            USER_STAKE_SEED.as_bytes(),
            pool_id.to_le_bytes().as_ref(),
            owner.key().as_ref()
        ],
        bump = user_stake.bump,
    )]
    pub user_stake: Account<'info, UserStake>,

    /// Farm authority PDA; signs escrow releases.
    ///
    /// CHECK: PDA derivation is enforced by seeds; used as a signing PDA.
    #[account(
        seeds = [AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    /// SPL token program interface.
    pub token_program: Interface<'info, TokenInterface>,

    /// Associated Token Program (return ATA creation).
    pub associated_token_program: Program<'info, AssociatedToken>,

    /// System Program (rent for ATA creation).
    pub system_program: Program<'info, System>,
}

/// Return the caller's entire staked set without settling rewards. Accrued
/// emission is forfeited: `amount` and `reward_debt` are zeroed and no
/// treasury transfer happens. The full set must be listed so the zeroed
/// bookkeeping cannot orphan custody.
pub fn emergency_withdraw<'info>(
    ctx: Context<'_, '_, 'info, 'info, EmergencyWithdraw<'info>>,
    pool_id: u64,
    count: u8,
) -> Result<()> {
    require!(
        ctx.remaining_accounts.len() == count as usize * EMERGENCY_ACCOUNTS_PER_POSITION,
        ErrorCode::MissingRemainingAccount
    );
    require!(
        count as u64 == ctx.accounts.user_stake.amount && count > 0,
        ErrorCode::PartialEmergencyWithdraw
    );

    let owner_key = ctx.accounts.owner.key();
    let authority_key = ctx.accounts.authority.key();
    let token_program_key = ctx.accounts.token_program.key();

    // --- 1) Validate the batch and commit bookkeeping before any CPI ---
    for group in ctx
        .remaining_accounts
        .chunks_exact(EMERGENCY_ACCOUNTS_PER_POSITION)
    {
        let position_mint = InterfaceAccount::<Mint>::try_from(&group[0])?;
        let mint_key = position_mint.key();

        let expected_vault = associated_token::get_associated_token_address_with_program_id(
            &authority_key,
            &mint_key,
            &token_program_key,
        );
        require_keys_eq!(group[1].key(), expected_vault, ErrorCode::InvalidPositionAccount);

        let expected_destination = associated_token::get_associated_token_address_with_program_id(
            &owner_key,
            &mint_key,
            &token_program_key,
        );
        require_keys_eq!(
            group[2].key(),
            expected_destination,
            ErrorCode::InvalidPositionAccount
        );

        ctx.accounts.user_stake.unstake(&mint_key)?;
        ctx.accounts.pool.total_staked = ctx
            .accounts
            .pool
            .total_staked
            .checked_sub(1)
            .ok_or(ErrorCode::MathOverflow)?;
    }

    // The duplicate-free batch above must have drained the set.
    require!(
        ctx.accounts.user_stake.amount == 0,
        ErrorCode::PartialEmergencyWithdraw
    );
    ctx.accounts.user_stake.forfeit();

    // --- 2) Return custody ---
    for group in ctx
        .remaining_accounts
        .chunks_exact(EMERGENCY_ACCOUNTS_PER_POSITION)
    {
        associated_token::create_idempotent(CpiContext::new(
            ctx.accounts.associated_token_program.to_account_info(),
            Create {
                payer: ctx.accounts.owner.to_account_info(),
                associated_token: group[2].clone(),
                authority: ctx.accounts.owner.to_account_info(),
                mint: group[0].clone(),
                system_program: ctx.accounts.system_program.to_account_info(),
                token_program: ctx.accounts.token_program.to_account_info(),
            },
        ))?;
        transfer_from_vault_to_user(
            ctx.accounts.authority.to_account_info(),
            group[1].clone(),
            group[2].clone(),
            group[0].clone(),
            ctx.accounts.token_program.to_account_info(),
            1,
            0,
            &[&[AUTH_SEED.as_bytes(), &[ctx.bumps.authority]]],
        )?;
    }

    emit!(EmergencyWithdrawn {
        pool_id,
        user: owner_key,
        count: count as u64,
    });
    Ok(())
}
