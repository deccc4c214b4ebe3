use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::error::ErrorCode;
use crate::states::{
    BorrowRecord, CollateralReleased, CustodyIndex, MarketConfig, BORROW_RECORD_SEED,
    CUSTODY_INDEX_SEED, MARKET_CONFIG_SEED,
};
use crate::utils::transfer_from_vault_to_user;
use crate::AUTH_SEED;

/// Accounts required for reclaiming one escrowed position after its lock.
#[derive(Accounts)]
pub struct WithdrawPosition<'info> {
    /// Borrower reclaiming the position; receives the record rent back.
    #[account(mut)]
    pub borrower: Signer<'info>,

    /// Market configuration. Withdraw is never pause-gated: collateral can
    /// always come home once the lock elapses.
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

    /// Market authority PDA; signs vault releases.
    ///
    /// CHECK: PDA derivation is enforced by seeds; used as a signing PDA.
    #[account(
        seeds = [AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    /// Collateral token mint.
    #[account(address = market_config.collateral_mint)]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Vault refunding the collateral.
    #[account(mut, address = market_config.collateral_vault)]
    pub collateral_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Borrower's collateral ATA; created if it was closed since borrowing.
    #[account(
        init_if_needed,
        payer = borrower,
        associated_token::mint = collateral_mint,
        associated_token::authority = borrower,
        associated_token::token_program = token_program,
    )]
    pub borrower_collateral_token: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Mint of the escrowed position.
    pub position_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Escrow ATA; must still hold the token. Admin recovery empties it, in
    /// which case this withdraw fails and `refund_borrow` settles the record.
    #[account(
        mut,
        associated_token::mint = position_mint,
        associated_token::authority = authority,
        associated_token::token_program = token_program,
        constraint = vault_position_token.amount == 1 @ ErrorCode::PositionNotInCustody,
    )]
    pub vault_position_token: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Borrower's position ATA; created if missing.
    #[account(
        init_if_needed,
        payer = borrower,
        associated_token::mint = position_mint,
        associated_token::authority = borrower,
        associated_token::token_program = token_program,
    )]
    pub borrower_position_token: Box<InterfaceAccount<'info, TokenAccount>>,

    /// The caller's record for this position. Seeds bind it to the caller:
    /// whoever did not borrow this position has no record to present.
    #[account(
        mut,
        close = borrower,
        seeds = [
            BORROW_RECORD_SEED.as_bytes(),
            borrower.key().as_ref(),
            position_mint.key().as_ref()
        ],
        bump = borrow_record.bump,
    )]
    pub borrow_record: Account<'info, BorrowRecord>,

    /// SPL token program interface.
    pub token_program: Interface<'info, TokenInterface>,

    /// Associated Token Program (refund/return ATA creation).
    pub associated_token_program: Program<'info, AssociatedToken>,

    /// System Program (rent for ATA creation).
    pub system_program: Program<'info, System>,
}

/// Refund the recorded collateral snapshot and return the position once
/// `lock_end` has passed. The record is closed; its existence ends with the
/// escrow.
pub fn withdraw(ctx: Context<WithdrawPosition>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let record = &ctx.accounts.borrow_record;
    require!(record.lock_elapsed(now), ErrorCode::LockNotElapsed);

    let mint_key = ctx.accounts.position_mint.key();
    let collateral = record.collateral;

    // --- 1) Commit index removal before any custody CPI ---
    ctx.accounts.custody_index.remove(&mint_key)?;

    // --- 2) Refund the snapshot, then return the position ---
    let signer_seeds: &[&[&[u8]]] = &[&[AUTH_SEED.as_bytes(), &[ctx.bumps.authority]]];
    transfer_from_vault_to_user(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.collateral_vault.to_account_info(),
        ctx.accounts.borrower_collateral_token.to_account_info(),
        ctx.accounts.collateral_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        collateral,
        ctx.accounts.collateral_mint.decimals,
        signer_seeds,
    )?;
    transfer_from_vault_to_user(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.vault_position_token.to_account_info(),
        ctx.accounts.borrower_position_token.to_account_info(),
        ctx.accounts.position_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        1,
        0,
        signer_seeds,
    )?;

    emit!(CollateralReleased {
        borrower: ctx.accounts.borrower.key(),
        position_mint: mint_key,
        collateral,
    });
    Ok(())
}
