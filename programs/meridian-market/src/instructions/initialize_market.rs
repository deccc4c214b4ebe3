use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use std::ops::DerefMut;

use crate::error::ErrorCode;
use crate::states::{
    CustodyIndex, MarketConfig, MarketInitialized, CUSTODY_INDEX_SEED, MARKET_CONFIG_SEED,
};
use crate::{AUTH_SEED, COLLATERAL_VAULT_SEED};

/// Accounts context for `initialize_market`.
///
/// Creates the market configuration, the custody index, and the collateral
/// vault. The vault is owned by the market authority PDA, so refunds can
/// only be signed from inside this program.
#[derive(Accounts)]
pub struct InitializeMarket<'info> {
    /// Deployer (must match the program-level admin id).
    #[account(
        mut,
        address = crate::admin::id() @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    /// Market authority PDA; token authority of every market vault.
    ///
    /// CHECK: PDA derivation enforced by seeds; used only as an authority key.
    #[account(
        seeds = [AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    /// Market configuration account.
    #[account(
        init,
        seeds = [MARKET_CONFIG_SEED.as_bytes()],
        bump,
        payer = owner,
        space = MarketConfig::LEN
    )]
    pub market_config: Account<'info, MarketConfig>,

    /// Enumeration of escrowed positions.
    #[account(
        init,
        seeds = [CUSTODY_INDEX_SEED.as_bytes()],
        bump,
        payer = owner,
        space = CustodyIndex::LEN
    )]
    pub custody_index: Account<'info, CustodyIndex>,

    /// Mint of the fungible collateral token.
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Vault holding escrowed collateral.
    #[account(
        init,
        seeds = [COLLATERAL_VAULT_SEED.as_bytes()],
        bump,
        payer = owner,
        token::mint = collateral_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub collateral_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program interface (required for vault creation).
    pub token_program: Interface<'info, TokenInterface>,

    /// Solana System Program.
    pub system_program: Program<'info, System>,
}

/// Write market configuration and create the collateral vault.
pub fn initialize_market(
    ctx: Context<InitializeMarket>,
    admin: Pubkey,
    position_collection: Pubkey,
    collateral_amount: u64,
    lock_period: i64,
) -> Result<()> {
    require!(lock_period >= 0, ErrorCode::InvalidParam);

    let market_config = ctx.accounts.market_config.deref_mut();
    market_config.bump = ctx.bumps.market_config;
    market_config.admin = admin;
    market_config.position_collection = position_collection;
    market_config.collateral_mint = ctx.accounts.collateral_mint.key();
    market_config.collateral_vault = ctx.accounts.collateral_vault.key();
    market_config.collateral_amount = collateral_amount;
    market_config.lock_period = lock_period;
    market_config.paused = false;

    ctx.accounts.custody_index.bump = ctx.bumps.custody_index;
    msg!("Market config initialized");

    emit!(MarketInitialized {
        admin,
        position_collection,
        collateral_mint: ctx.accounts.collateral_mint.key(),
        collateral_vault: ctx.accounts.collateral_vault.key(),
        collateral_amount,
        lock_period,
    });
    Ok(())
}
