use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::error::ErrorCode;
use crate::states::{
    BorrowRecord, BorrowRefunded, MarketConfig, BORROW_RECORD_SEED, MARKET_CONFIG_SEED,
};
use crate::utils::transfer_from_vault_to_user;
use crate::AUTH_SEED;

/// Accounts for settling a borrow record whose position was pulled out of
/// escrow by admin recovery. The borrower gets the recorded collateral and
/// the record rent back; the record ceases to exist.
#[derive(Accounts)]
pub struct RefundBorrow<'info> {
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

    /// Market authority PDA; signs the refund.
    ///
    /// CHECK: PDA derivation is enforced by seeds; used as a signing PDA.
    #[account(
        seeds = [AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    /// Borrower owed the refund.
    ///
    /// CHECK: bound to the record via its address; receives rent on close.
    #[account(mut, address = borrow_record.borrower)]
    pub borrower: UncheckedAccount<'info>,

    /// Collateral token mint.
    #[account(address = market_config.collateral_mint)]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Vault refunding the collateral.
    #[account(mut, address = market_config.collateral_vault)]
    pub collateral_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Borrower's collateral ATA; created if missing, paid by the admin.
    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = collateral_mint,
        associated_token::authority = borrower,
        associated_token::token_program = token_program,
    )]
    pub borrower_collateral_token: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Mint of the recorded position.
    #[account(address = borrow_record.position_mint)]
    pub position_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Escrow ATA; must be empty. A record whose position is still escrowed
    /// belongs to the borrower's own withdraw path, not this one.
    #[account(
        associated_token::mint = position_mint,
        associated_token::authority = authority,
        associated_token::token_program = token_program,
        constraint = vault_position_token.amount == 0 @ ErrorCode::PositionStillInCustody,
    )]
    pub vault_position_token: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Record being settled.
    #[account(
        mut,
        close = borrower,
        seeds = [
            BORROW_RECORD_SEED.as_bytes(),
            borrow_record.borrower.as_ref(),
            borrow_record.position_mint.as_ref()
        ],
        bump = borrow_record.bump,
    )]
    pub borrow_record: Account<'info, BorrowRecord>,

    /// SPL token program interface.
    pub token_program: Interface<'info, TokenInterface>,

    /// Associated Token Program (refund ATA creation).
    pub associated_token_program: Program<'info, AssociatedToken>,

    /// System Program (rent for ATA creation).
    pub system_program: Program<'info, System>,
}

/// Refund the recorded collateral snapshot for a record orphaned by
/// `recover_positions`, and close the record.
pub fn refund_borrow(ctx: Context<RefundBorrow>) -> Result<()> {
    let record = &ctx.accounts.borrow_record;
    let collateral = record.collateral;
    let position_mint = record.position_mint;
    let borrower = record.borrower;

    transfer_from_vault_to_user(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.collateral_vault.to_account_info(),
        ctx.accounts.borrower_collateral_token.to_account_info(),
        ctx.accounts.collateral_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        collateral,
        ctx.accounts.collateral_mint.decimals,
        &[&[AUTH_SEED.as_bytes(), &[ctx.bumps.authority]]],
    )?;

    emit!(BorrowRefunded {
        borrower,
        position_mint,
        collateral,
    });
    Ok(())
}
