use anchor_client::{Client, Cluster};
use anchor_lang::prelude::AccountMeta;
use anyhow::Result;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_program};
use spl_associated_token_account::get_associated_token_address;
use std::rc::Rc;

use meridian_farm::accounts as farm_accounts;
use meridian_farm::instruction as farm_instruction;
use meridian_farm::states::FarmConfig;

use crate::instructions::utils::{
    get_farm_authority_address, get_farm_config_address, get_metadata_address, get_pool_address,
    get_reward_vault_address, get_user_stake_address,
};
use crate::{read_keypair_file, ClientConfig};

pub fn initialize_farm_instr(
    config: &ClientConfig,
    admin: Pubkey,
    reward_mint: Pubkey,
    reward_per_block: u64,
    start_block: u64,
) -> Result<Vec<Instruction>> {
    let deployer = read_keypair_file(&config.admin_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(deployer));
    let program = client.program(config.farm_program)?;

    let instructions = program
        .request()
        .accounts(farm_accounts::InitializeFarm {
            owner: program.payer(),
            authority: get_farm_authority_address(&program.id()),
            farm_config: get_farm_config_address(&program.id()),
            reward_mint,
            reward_vault: get_reward_vault_address(&program.id()),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(farm_instruction::InitializeFarm {
            admin,
            reward_per_block,
            start_block,
        })
        .instructions()?;
    Ok(instructions)
}

pub fn add_pool_instr(
    config: &ClientConfig,
    alloc_point: u64,
    position_collection: Pubkey,
    pool_id: u64,
) -> Result<Vec<Instruction>> {
    let admin = read_keypair_file(&config.admin_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(admin));
    let program = client.program(config.farm_program)?;

    let instructions = program
        .request()
        .accounts(farm_accounts::AddPool {
            owner: program.payer(),
            farm_config: get_farm_config_address(&program.id()),
            pool: get_pool_address(&program.id(), pool_id),
            system_program: system_program::id(),
        })
        .args(farm_instruction::AddPool {
            alloc_point,
            position_collection,
        })
        .instructions()?;
    Ok(instructions)
}

pub fn set_pool_instr(
    config: &ClientConfig,
    pool_id: u64,
    alloc_point: u64,
) -> Result<Vec<Instruction>> {
    let admin = read_keypair_file(&config.admin_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(admin));
    let program = client.program(config.farm_program)?;

    let instructions = program
        .request()
        .accounts(farm_accounts::SetPool {
            owner: program.payer(),
            farm_config: get_farm_config_address(&program.id()),
            pool: get_pool_address(&program.id(), pool_id),
        })
        .args(farm_instruction::SetPool {
            pool_id,
            alloc_point,
        })
        .instructions()?;
    Ok(instructions)
}

pub fn update_farm_config_instr(
    config: &ClientConfig,
    param: u8,
    value: u64,
    new_admin: Option<Pubkey>,
) -> Result<Vec<Instruction>> {
    let admin = read_keypair_file(&config.admin_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(admin));
    let program = client.program(config.farm_program)?;

    let mut ixs = program
        .request()
        .accounts(farm_accounts::UpdateFarmConfig {
            owner: program.payer(),
            farm_config: get_farm_config_address(&program.id()),
        })
        .args(farm_instruction::UpdateFarmConfig { param, value })
        .instructions()?;

    if let Some(admin) = new_admin {
        ixs[0]
            .accounts
            .push(AccountMeta::new_readonly(admin, false));
    }

    Ok(ixs)
}

pub fn update_pool_instr(config: &ClientConfig, pool_id: u64) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.farm_program)?;

    let instructions = program
        .request()
        .accounts(farm_accounts::UpdatePool {
            farm_config: get_farm_config_address(&program.id()),
            pool: get_pool_address(&program.id(), pool_id),
        })
        .args(farm_instruction::UpdatePool { pool_id })
        .instructions()?;
    Ok(instructions)
}

/// Every pool, writable, in ascending id order.
pub fn mass_update_pools_instr(
    config: &ClientConfig,
    pool_count: u64,
) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.farm_program)?;

    let mut ixs = program
        .request()
        .accounts(farm_accounts::MassUpdatePools {
            farm_config: get_farm_config_address(&program.id()),
        })
        .args(farm_instruction::MassUpdatePools {})
        .instructions()?;

    for pool_id in 0..pool_count {
        ixs[0]
            .accounts
            .push(AccountMeta::new(get_pool_address(&program.id(), pool_id), false));
    }

    Ok(ixs)
}

/// A deposit with an empty mint list is the claim-only call.
pub fn deposit_instr(
    config: &ClientConfig,
    pool_id: u64,
    position_mints: &[Pubkey],
) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.farm_program)?;

    let farm_config: FarmConfig = program.account(get_farm_config_address(&program.id()))?;
    let authority = get_farm_authority_address(&program.id());

    let mut ixs = program
        .request()
        .accounts(farm_accounts::Deposit {
            owner: program.payer(),
            farm_config: get_farm_config_address(&program.id()),
            pool: get_pool_address(&program.id(), pool_id),
            user_stake: get_user_stake_address(&program.id(), pool_id, &program.payer()),
            authority,
            reward_mint: farm_config.reward_mint,
            reward_vault: farm_config.reward_vault,
            owner_reward_token: get_associated_token_address(
                &program.payer(),
                &farm_config.reward_mint,
            ),
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
            system_program: system_program::id(),
        })
        .args(farm_instruction::Deposit {
            pool_id,
            count: position_mints.len() as u8,
        })
        .instructions()?;

    for mint in position_mints {
        ixs[0].accounts.push(AccountMeta::new_readonly(*mint, false));
        ixs[0]
            .accounts
            .push(AccountMeta::new_readonly(get_metadata_address(mint), false));
        ixs[0].accounts.push(AccountMeta::new(
            get_associated_token_address(&program.payer(), mint),
            false,
        ));
        ixs[0].accounts.push(AccountMeta::new(
            get_associated_token_address(&authority, mint),
            false,
        ));
    }

    Ok(ixs)
}

/// A withdraw with an empty mint list is the claim-only call.
pub fn withdraw_instr(
    config: &ClientConfig,
    pool_id: u64,
    position_mints: &[Pubkey],
) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.farm_program)?;

    let farm_config: FarmConfig = program.account(get_farm_config_address(&program.id()))?;
    let authority = get_farm_authority_address(&program.id());

    let mut ixs = program
        .request()
        .accounts(farm_accounts::Withdraw {
            owner: program.payer(),
            farm_config: get_farm_config_address(&program.id()),
            pool: get_pool_address(&program.id(), pool_id),
            user_stake: get_user_stake_address(&program.id(), pool_id, &program.payer()),
            authority,
            reward_mint: farm_config.reward_mint,
            reward_vault: farm_config.reward_vault,
            owner_reward_token: get_associated_token_address(
                &program.payer(),
                &farm_config.reward_mint,
            ),
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
            system_program: system_program::id(),
        })
        .args(farm_instruction::Withdraw {
            pool_id,
            count: position_mints.len() as u8,
        })
        .instructions()?;

    for mint in position_mints {
        ixs[0].accounts.push(AccountMeta::new_readonly(*mint, false));
        ixs[0].accounts.push(AccountMeta::new(
            get_associated_token_address(&authority, mint),
            false,
        ));
        ixs[0].accounts.push(AccountMeta::new(
            get_associated_token_address(&program.payer(), mint),
            false,
        ));
    }

    Ok(ixs)
}

/// The full staked set must be listed; anything less is rejected on-chain.
pub fn emergency_withdraw_instr(
    config: &ClientConfig,
    pool_id: u64,
    position_mints: &[Pubkey],
) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.farm_program)?;

    let authority = get_farm_authority_address(&program.id());

    let mut ixs = program
        .request()
        .accounts(farm_accounts::EmergencyWithdraw {
            owner: program.payer(),
            farm_config: get_farm_config_address(&program.id()),
            pool: get_pool_address(&program.id(), pool_id),
            user_stake: get_user_stake_address(&program.id(), pool_id, &program.payer()),
            authority,
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
            system_program: system_program::id(),
        })
        .args(farm_instruction::EmergencyWithdraw {
            pool_id,
            count: position_mints.len() as u8,
        })
        .instructions()?;

    for mint in position_mints {
        ixs[0].accounts.push(AccountMeta::new_readonly(*mint, false));
        ixs[0].accounts.push(AccountMeta::new(
            get_associated_token_address(&authority, mint),
            false,
        ));
        ixs[0].accounts.push(AccountMeta::new(
            get_associated_token_address(&program.payer(), mint),
            false,
        ));
    }

    Ok(ixs)
}
