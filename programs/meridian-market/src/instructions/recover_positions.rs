use anchor_lang::prelude::*;
use anchor_spl::associated_token::{self, AssociatedToken, Create};
use anchor_spl::token_interface::{Mint, TokenInterface};

use crate::error::ErrorCode;
use crate::states::{
    CustodyIndex, MarketConfig, PositionsRecovered, CUSTODY_INDEX_SEED, MARKET_CONFIG_SEED,
};
use crate::utils::transfer_from_vault_to_user;
use crate::AUTH_SEED;

/// Accounts per position in `remaining_accounts`:
/// `[position_mint, vault_position_token, owner_position_token]`.
pub const RECOVER_ACCOUNTS_PER_POSITION: usize = 3;

/// Accounts for the admin custody override.
#[derive(Accounts)]
pub struct RecoverPositions<'info> {
    /// Authorized signer: the stored admin or the hardcoded program admin.
    #[account(
        mut,
        constraint = (owner.key() == market_config.admin || owner.key() == crate::admin::id()) @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    #[account(
        seeds = [MARKET_CONFIG_SEED.as_bytes()],
        bump = market_config.bump,
    )]
    pub market_config: Account<'info, MarketConfig>,

    /// Enumeration of escrowed positions.
    #[account(
        mut,
        seeds = [CUSTODY_INDEX_SEED.as_bytes()],
        bump = custody_index.bump,
    )]
    pub custody_index: Account<'info, CustodyIndex>,

    /// Market authority PDA; signs escrow releases.
    ///
    /// CHECK: PDA derivation is enforced by seeds; used as a signing PDA.
    #[account(
        seeds = [AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    /// SPL token program interface.
    pub token_program: Interface<'info, TokenInterface>,

    /// Associated Token Program (recipient ATA creation).
    pub associated_token_program: Program<'info, AssociatedToken>,

    /// System Program (rent for ATA creation).
    pub system_program: Program<'info, System>,
}

/// Pull `count` escrowed positions out of market custody to the admin,
/// unconditionally. Borrow records are deliberately left alone: an affected
/// borrower's `withdraw` fails on the emptied escrow, and the admin settles
/// the stranded collateral through `refund_borrow`.
pub fn recover_positions<'info>(
    ctx: Context<'_, '_, 'info, 'info, RecoverPositions<'info>>,
    count: u8,
) -> Result<()> {
    require!(
        count > 0
            && ctx.remaining_accounts.len() == count as usize * RECOVER_ACCOUNTS_PER_POSITION,
        ErrorCode::MissingRemainingAccount
    );

    let owner_key = ctx.accounts.owner.key();
    let authority_key = ctx.accounts.authority.key();
    let token_program_key = ctx.accounts.token_program.key();

    // --- 1) Validate the batch and commit index removals before any CPI ---
    for group in ctx
        .remaining_accounts
        .chunks_exact(RECOVER_ACCOUNTS_PER_POSITION)
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

        ctx.accounts.custody_index.remove(&mint_key)?;
    }

    // --- 2) Move custody to the admin ---
    for group in ctx
        .remaining_accounts
        .chunks_exact(RECOVER_ACCOUNTS_PER_POSITION)
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

    emit!(PositionsRecovered {
        recipient: owner_key,
        count: count as u64,
    });
    Ok(())
}
