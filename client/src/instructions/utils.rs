use anchor_lang::AccountDeserialize;
use anyhow::Result;
use meridian_farm::states::{FARM_CONFIG_SEED, POOL_SEED, USER_STAKE_SEED};
use meridian_market::states::{BORROW_RECORD_SEED, CUSTODY_INDEX_SEED, MARKET_CONFIG_SEED};
use solana_sdk::{account::Account, pubkey, pubkey::Pubkey};

/// Metaplex Token Metadata program.
pub const METADATA_PROGRAM_ID: Pubkey = pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

pub fn deserialize_anchor_account<T: AccountDeserialize>(account: &Account) -> Result<T> {
    let mut data: &[u8] = &account.data;
    T::try_deserialize(&mut data).map_err(Into::into)
}

pub fn get_farm_authority_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[meridian_farm::AUTH_SEED.as_bytes()], program_id).0
}

pub fn get_farm_config_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[FARM_CONFIG_SEED.as_bytes()], program_id).0
}

pub fn get_reward_vault_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[meridian_farm::REWARD_VAULT_SEED.as_bytes()], program_id).0
}

pub fn get_pool_address(program_id: &Pubkey, pool_id: u64) -> Pubkey {
    Pubkey::find_program_address(
        &[POOL_SEED.as_bytes(), pool_id.to_le_bytes().as_ref()],
        program_id,
    )
    .0
}

pub fn get_user_stake_address(program_id: &Pubkey, pool_id: u64, user: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[
            USER_STAKE_SEED.as_bytes(),
            pool_id.to_le_bytes().as_ref(),
            user.as_ref(),
        ],
        program_id,
    )
    .0
}

pub fn get_market_authority_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[meridian_market::AUTH_SEED.as_bytes()], program_id).0
}

pub fn get_market_config_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[MARKET_CONFIG_SEED.as_bytes()], program_id).0
}

pub fn get_custody_index_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[CUSTODY_INDEX_SEED.as_bytes()], program_id).0
}

pub fn get_collateral_vault_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[meridian_market::COLLATERAL_VAULT_SEED.as_bytes()],
        program_id,
    )
    .0
}

pub fn get_borrow_record_address(
    program_id: &Pubkey,
    borrower: &Pubkey,
    position_mint: &Pubkey,
) -> Pubkey {
    Pubkey::find_program_address(
        &[
            BORROW_RECORD_SEED.as_bytes(),
            borrower.as_ref(),
            position_mint.as_ref(),
        ],
        program_id,
    )
    .0
}

pub fn get_metadata_address(position_mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[
            b"metadata",
            METADATA_PROGRAM_ID.as_ref(),
            position_mint.as_ref(),
        ],
        &METADATA_PROGRAM_ID,
    )
    .0
}
