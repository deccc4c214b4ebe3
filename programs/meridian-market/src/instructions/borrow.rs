use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::error::ErrorCode;
use crate::states::{
    BorrowRecord, CustodyIndex, MarketConfig, PositionEscrowed, BORROW_RECORD_SEED,
    CUSTODY_INDEX_SEED, MARKET_CONFIG_SEED,
};
use crate::utils::{assert_collection_member, transfer_from_user_to_vault};
use crate::AUTH_SEED;

/// Accounts required for escrowing one position against collateral.
///
/// A multi-position borrow is several of these instructions composed in one
/// transaction; any failing leg aborts them all.
#[derive(Accounts)]
pub struct Borrow<'info> {
    /// User posting collateral and escrowing the position.
    #[account(mut)]
    pub borrower: Signer<'info>,

    /// Market configuration; borrows are gated on the pause flag.
    #[account(
        seeds = [MARKET_CONFIG_SEED.as_bytes()],
        bump = market_config.bump,
        constraint = !market_config.paused @ ErrorCode::MarketPaused,
    )]
    pub market_config: Account<'info, MarketConfig>,

    /// Enumeration of escrowed positions.
    #[account(
        mut,
        seeds = [CUSTODY_INDEX_SEED.as_bytes()],
        bump = custody_index.bump,
    )]
    pub custody_index: Account<'info, CustodyIndex>,

    /// Market authority PDA; owns every market vault.
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

    /// Vault receiving the collateral.
    #[account(mut, address = market_config.collateral_vault)]
    pub collateral_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Borrower's collateral ATA; must cover `collateral_amount`.
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = borrower,
        associated_token::token_program = token_program,
    )]
    pub borrower_collateral_token: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Mint of the position entering escrow.
    #[account(
        constraint = (position_mint.decimals == 0 && position_mint.supply == 1) @ ErrorCode::InvalidPositionMint
    )]
    pub position_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Metaplex metadata for `position_mint`.
    ///
    /// CHECK: validated in the handler against the metadata PDA derivation
    /// and the market's verified collection.
    pub position_metadata: UncheckedAccount<'info>,

    /// Borrower's position ATA; must hold the token.
    #[account(
        mut,
        associated_token::mint = position_mint,
        associated_token::authority = borrower,
        associated_token::token_program = token_program,
        constraint = borrower_position_token.amount == 1 @ ErrorCode::PositionNotHeld,
    )]
    pub borrower_position_token: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Escrow ATA for the position (created on first use).
    #[account(
        init_if_needed,
        payer = borrower,
        associated_token::mint = position_mint,
        associated_token::authority = authority,
        associated_token::token_program = token_program,
    )]
    pub vault_position_token: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Borrow record; its existence is the escrow claim. Rejects a second
    /// borrow of the same position by the same borrower outright.
    #[account(
        init,
        seeds = [
            BORROW_RECORD_SEED.as_bytes(),
            borrower.key().as_ref(),
            position_mint.key().as_ref()
        ],
        bump,
        payer = borrower,
        space = BorrowRecord::LEN
    )]
    pub borrow_record: Account<'info, BorrowRecord>,

    /// SPL token program interface.
    pub token_program: Interface<'info, TokenInterface>,

    /// Associated Token Program (escrow ATA creation).
    pub associated_token_program: Program<'info, AssociatedToken>,

    /// System Program (rent for account creation).
    pub system_program: Program<'info, System>,
}

/// Escrow one position against the current `collateral_amount`, locking it
/// until `now + lock_period`. Both parameters are snapshotted into the
/// record; later changes never reprice it.
pub fn borrow(ctx: Context<Borrow>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let mint_key = ctx.accounts.position_mint.key();

    assert_collection_member(
        &ctx.accounts.position_metadata,
        &mint_key,
        &ctx.accounts.market_config.position_collection,
    )?;

    // --- 1) Commit record and index before any custody CPI ---
    let record = BorrowRecord::open(
        ctx.accounts.borrower.key(),
        mint_key,
        &ctx.accounts.market_config,
        now,
        ctx.bumps.borrow_record,
    )?;
    let collateral = record.collateral;
    let lock_end = record.lock_end;
    ctx.accounts.borrow_record.set_inner(record);
    ctx.accounts.custody_index.insert(mint_key)?;

    // --- 2) Pull collateral, then the position, into escrow ---
    transfer_from_user_to_vault(
        ctx.accounts.borrower.to_account_info(),
        ctx.accounts.borrower_collateral_token.to_account_info(),
        ctx.accounts.collateral_vault.to_account_info(),
        ctx.accounts.collateral_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        collateral,
        ctx.accounts.collateral_mint.decimals,
    )?;
    transfer_from_user_to_vault(
        ctx.accounts.borrower.to_account_info(),
        ctx.accounts.borrower_position_token.to_account_info(),
        ctx.accounts.vault_position_token.to_account_info(),
        ctx.accounts.position_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        1,
        0,
    )?;

    emit!(PositionEscrowed {
        borrower: ctx.accounts.borrower.key(),
        position_mint: mint_key,
        collateral,
        lock_end,
    });
    Ok(())
}
