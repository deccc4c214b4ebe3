use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use std::ops::DerefMut;

use crate::error::ErrorCode;
use crate::states::{FarmConfig, FarmInitialized, FARM_CONFIG_SEED};
use crate::{AUTH_SEED, REWARD_VAULT_SEED};

/// Accounts context for `initialize_farm`.
///
/// Creates the farm configuration and the treasury vault. The vault is a
/// token account owned by the farm authority PDA, so reward payouts can only
/// be signed from inside this program.
#[derive(Accounts)]
pub struct InitializeFarm<'info> {
    /// Deployer (must match the program-level admin id).
    #[account(
        mut,
        address = crate::admin::id() @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    /// Farm authority PDA; token authority of the treasury vault.
    ///
    /// CHECK: PDA derivation enforced by seeds; used only as an authority key.
    #[account(
        seeds = [AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    /// Farm configuration account holding emission parameters.
    #[account(
        init,
        seeds = [FARM_CONFIG_SEED.as_bytes()],
        bump,
        payer = owner,
        space = FarmConfig::LEN
    )]
    pub farm_config: Account<'info, FarmConfig>,

    /// Mint of the reward token paid out by the treasury.
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Treasury vault. Anyone may fund it with plain token transfers;
    /// only the farm can pay out of it.
    #[account(
        init,
        seeds = [REWARD_VAULT_SEED.as_bytes()],
        bump,
        payer = owner,
        token::mint = reward_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program interface (required for vault creation).
    pub token_program: Interface<'info, TokenInterface>,

    /// Solana System Program.
    pub system_program: Program<'info, System>,
}

/// Write farm configuration and create the treasury vault.
///
/// `start_block` gates emission: pools added before it begin accruing at
/// `start_block` rather than at their creation block.
pub fn initialize_farm(
    ctx: Context<InitializeFarm>,
    admin: Pubkey,
    reward_per_block: u64,
    start_block: u64,
) -> Result<()> {
    let farm_config = ctx.accounts.farm_config.deref_mut();
    farm_config.bump = ctx.bumps.farm_config;
    farm_config.admin = admin;
    farm_config.reward_mint = ctx.accounts.reward_mint.key();
    farm_config.reward_vault = ctx.accounts.reward_vault.key();
    farm_config.reward_per_block = reward_per_block;
    farm_config.bonus_multiplier = 1;
    farm_config.start_block = start_block;
    farm_config.total_alloc_point = 0;
    farm_config.pool_count = 0;
    farm_config.paused = false;
    msg!("Farm config initialized");

    emit!(FarmInitialized {
        admin,
        reward_mint: ctx.accounts.reward_mint.key(),
        reward_vault: ctx.accounts.reward_vault.key(),
        reward_per_block,
        start_block,
    });
    Ok(())
}
