use anchor_lang::prelude::*;

declare_id!("8irkkZfoDijjTwfJkv57vCjgKTWhaf7bFPusGpWjUGCB");

pub mod admin {
    use anchor_lang::prelude::declare_id;
    declare_id!("HwdyU56gyKaGoLmUfoqkEKKR7iVLnSpaLHZMf5Zm2MFc");
}

pub const AUTH_SEED: &str = "market_authority";
pub const COLLATERAL_VAULT_SEED: &str = "collateral_vault";

pub mod error;
pub mod instructions;
pub mod states;
pub mod utils;

use instructions::*;

#[cfg(not(feature = "no-entrypoint"))]
solana_security_txt::security_txt! {
    name: "Meridian Market",
    project_url: "https://github.com/meridian-protocol/meridian",
    contacts: "email:security@meridian-protocol.io",
    policy: "https://github.com/meridian-protocol/meridian/blob/main/SECURITY.md",
    preferred_languages: "en"
}

#[program]
pub mod meridian_market {

    use super::*;

    pub fn initialize_market(
        ctx: Context<InitializeMarket>,
        admin: Pubkey,
        position_collection: Pubkey,
        collateral_amount: u64,
        lock_period: i64,
    ) -> Result<()> {
        instructions::initialize_market(
            ctx,
            admin,
            position_collection,
            collateral_amount,
            lock_period,
        )
    }

    pub fn update_market_config(
        ctx: Context<UpdateMarketConfig>,
        param: u8,
        value: u64,
    ) -> Result<()> {
        instructions::update_market_config(ctx, param, value)
    }

    pub fn borrow(ctx: Context<Borrow>) -> Result<()> {
        instructions::borrow(ctx)
    }

    pub fn withdraw(ctx: Context<WithdrawPosition>) -> Result<()> {
        instructions::withdraw(ctx)
    }

    pub fn refund_borrow(ctx: Context<RefundBorrow>) -> Result<()> {
        instructions::refund_borrow(ctx)
    }

    pub fn recover_positions<'info>(
        ctx: Context<'_, '_, 'info, 'info, RecoverPositions<'info>>,
        count: u8,
    ) -> Result<()> {
        instructions::recover_positions(ctx, count)
    }
}
