use anchor_lang::prelude::*;
use anchor_spl::associated_token::{self, AssociatedToken, Create};
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::error::ErrorCode;
use crate::states::{
    FarmConfig, Pool, PositionsWithdrawn, RewardPaid, UserStake, FARM_CONFIG_SEED, POOL_SEED,
    USER_STAKE_SEED,
};
use crate::utils::transfer_from_vault_to_user;
use crate::AUTH_SEED;

/// Accounts per position in `remaining_accounts`:
/// `[position_mint, vault_position_token, owner_position_token]`.
pub const WITHDRAW_ACCOUNTS_PER_POSITION: usize = 3;

/// Accounts required for unstaking positions from a pool.
///
/// The stake record, not physical custody, decides who may withdraw: each
/// listed mint must be in the caller's staked set. A zero-position call is
/// the claim-only path.
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Withdraw<'info> {
    /// Staker receiving positions and settled rewards.
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Farm configuration; withdrawals are gated on the pause flag.
    #[account(
        seeds = [FARM_CONFIG_SEED.as_bytes()],
        bump = farm_config.bump,
        constraint = !farm_config.paused @ ErrorCode::FarmPaused,
    )]
    pub farm_config: Account<'info, FarmConfig>,

    /// Pool the positions leave.
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

    /// Farm authority PDA; signs escrow releases and payouts.
    ///
    /// CHECK: PDA derivation is enforced by seeds; used as a signing PDA.
    #[account(
        seeds = [AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    /// Reward token mint.
    #[account(address = farm_config.reward_mint)]
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Treasury vault paying pending rewards.
    #[account(mut, address = farm_config.reward_vault)]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Staker's reward ATA; created if missing so settlement can pay out.
    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = reward_mint,
        associated_token::authority = owner,
        associated_token::token_program = token_program,
    )]
    pub owner_reward_token: Box<InterfaceAccount<'info, TokenAccount>>,

    /// SPL token program interface.
    pub token_program: Interface<'info, TokenInterface>,

    /// Associated Token Program (return/reward ATA creation).
    pub associated_token_program: Program<'info, AssociatedToken>,

    /// System Program (rent for ATA creation).
    pub system_program: Program<'info, System>,
}

/// Unstake `count` positions listed in `remaining_accounts`, settling
/// pending rewards first. `count == 0` claims without unstaking.
pub fn withdraw<'info>(
    ctx: Context<'_, '_, 'info, 'info, Withdraw<'info>>,
    pool_id: u64,
    count: u8,
) -> Result<()> {
    require!(
        ctx.remaining_accounts.len() == count as usize * WITHDRAW_ACCOUNTS_PER_POSITION,
        ErrorCode::MissingRemainingAccount
    );
    let current_block = Clock::get()?.slot;

    // --- 1) Advance the accumulator before reading any reward state ---
    {
        let farm_config = &ctx.accounts.farm_config;
        let pool = &mut ctx.accounts.pool;
        pool.advance(farm_config, current_block)?;
    }
    let acc = ctx.accounts.pool.acc_reward_per_share();

    // --- 2) Settle pending reward against the pre-withdraw stake ---
    let pending = if ctx.accounts.user_stake.amount > 0 {
        ctx.accounts.user_stake.pending(acc)?
    } else {
        0
    };

    // --- 3) Validate the batch and commit bookkeeping before any CPI ---
    let owner_key = ctx.accounts.owner.key();
    let authority_key = ctx.accounts.authority.key();
    let token_program_key = ctx.accounts.token_program.key();

    for group in ctx
        .remaining_accounts
        .chunks_exact(WITHDRAW_ACCOUNTS_PER_POSITION)
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

        // Record-level ownership check: rejects callers who never staked
        // this position, regardless of farm custody.
        ctx.accounts.user_stake.unstake(&mint_key)?;
        ctx.accounts.pool.total_staked = ctx
            .accounts
            .pool
            .total_staked
            .checked_sub(1)
            .ok_or(ErrorCode::MathOverflow)?;
    }

    // --- 4) Re-baseline reward debt against the post-withdraw stake ---
    ctx.accounts.user_stake.sync_debt(acc)?;

    // --- 5) Pay the settled reward out of the treasury ---
    if pending > 0 {
        transfer_from_vault_to_user(
            ctx.accounts.authority.to_account_info(),
            ctx.accounts.reward_vault.to_account_info(),
            ctx.accounts.owner_reward_token.to_account_info(),
            ctx.accounts.reward_mint.to_account_info(),
            ctx.accounts.token_program.to_account_info(),
            pending,
            ctx.accounts.reward_mint.decimals,
            &[&[AUTH_SEED.as_bytes(), &[ctx.bumps.authority]]],
        )?;
        emit!(RewardPaid {
            pool_id,
            user: owner_key,
            amount: pending,
        });
    }

    // --- 6) Return each position from farm custody ---
    for group in ctx
        .remaining_accounts
        .chunks_exact(WITHDRAW_ACCOUNTS_PER_POSITION)
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

    emit!(PositionsWithdrawn {
        pool_id,
        user: owner_key,
        count: count as u64,
        amount: ctx.accounts.user_stake.amount,
    });
    Ok(())
}
