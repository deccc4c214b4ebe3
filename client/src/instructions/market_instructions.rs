use anchor_client::{Client, Cluster};
use anchor_lang::prelude::AccountMeta;
use anyhow::Result;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_program};
use spl_associated_token_account::get_associated_token_address;
use std::rc::Rc;

use meridian_market::accounts as market_accounts;
use meridian_market::instruction as market_instruction;
use meridian_market::states::MarketConfig;

use crate::instructions::utils::{
    get_borrow_record_address, get_collateral_vault_address, get_custody_index_address,
    get_market_authority_address, get_market_config_address, get_metadata_address,
};
use crate::{read_keypair_file, ClientConfig};

pub fn initialize_market_instr(
    config: &ClientConfig,
    admin: Pubkey,
    position_collection: Pubkey,
    collateral_mint: Pubkey,
    collateral_amount: u64,
    lock_period: i64,
) -> Result<Vec<Instruction>> {
    let deployer = read_keypair_file(&config.admin_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(deployer));
    let program = client.program(config.market_program)?;

    let instructions = program
        .request()
        .accounts(market_accounts::InitializeMarket {
            owner: program.payer(),
            authority: get_market_authority_address(&program.id()),
            market_config: get_market_config_address(&program.id()),
            custody_index: get_custody_index_address(&program.id()),
            collateral_mint,
            collateral_vault: get_collateral_vault_address(&program.id()),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(market_instruction::InitializeMarket {
            admin,
            position_collection,
            collateral_amount,
            lock_period,
        })
        .instructions()?;
    Ok(instructions)
}

pub fn update_market_config_instr(
    config: &ClientConfig,
    param: u8,
    value: u64,
    new_admin: Option<Pubkey>,
) -> Result<Vec<Instruction>> {
    let admin = read_keypair_file(&config.admin_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(admin));
    let program = client.program(config.market_program)?;

    let mut ixs = program
        .request()
        .accounts(market_accounts::UpdateMarketConfig {
            owner: program.payer(),
            market_config: get_market_config_address(&program.id()),
        })
        .args(market_instruction::UpdateMarketConfig { param, value })
        .instructions()?;

    if let Some(admin) = new_admin {
        ixs[0]
            .accounts
            .push(AccountMeta::new_readonly(admin, false));
    }

    Ok(ixs)
}

/// One instruction per position; compose several in one transaction for an
/// all-or-nothing multi-position borrow.
pub fn borrow_instr(config: &ClientConfig, position_mint: Pubkey) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.market_program)?;

    let market_config: MarketConfig = program.account(get_market_config_address(&program.id()))?;
    let authority = get_market_authority_address(&program.id());

    let instructions = program
        .request()
        .accounts(market_accounts::Borrow {
            borrower: program.payer(),
            market_config: get_market_config_address(&program.id()),
            custody_index: get_custody_index_address(&program.id()),
            authority,
            collateral_mint: market_config.collateral_mint,
            collateral_vault: market_config.collateral_vault,
            borrower_collateral_token: get_associated_token_address(
                &program.payer(),
                &market_config.collateral_mint,
            ),
            position_mint,
            position_metadata: get_metadata_address(&position_mint),
            borrower_position_token: get_associated_token_address(&program.payer(), &position_mint),
            vault_position_token: get_associated_token_address(&authority, &position_mint),
            borrow_record: get_borrow_record_address(
                &program.id(),
                &program.payer(),
                &position_mint,
            ),
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
            system_program: system_program::id(),
        })
        .args(market_instruction::Borrow {})
        .instructions()?;
    Ok(instructions)
}

pub fn withdraw_position_instr(
    config: &ClientConfig,
    position_mint: Pubkey,
) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.market_program)?;

    let market_config: MarketConfig = program.account(get_market_config_address(&program.id()))?;
    let authority = get_market_authority_address(&program.id());

    let instructions = program
        .request()
        .accounts(market_accounts::WithdrawPosition {
            borrower: program.payer(),
            market_config: get_market_config_address(&program.id()),
            custody_index: get_custody_index_address(&program.id()),
            authority,
            collateral_mint: market_config.collateral_mint,
            collateral_vault: market_config.collateral_vault,
            borrower_collateral_token: get_associated_token_address(
                &program.payer(),
                &market_config.collateral_mint,
            ),
            position_mint,
            vault_position_token: get_associated_token_address(&authority, &position_mint),
            borrower_position_token: get_associated_token_address(&program.payer(), &position_mint),
            borrow_record: get_borrow_record_address(
                &program.id(),
                &program.payer(),
                &position_mint,
            ),
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
            system_program: system_program::id(),
        })
        .args(market_instruction::Withdraw {})
        .instructions()?;
    Ok(instructions)
}

pub fn refund_borrow_instr(
    config: &ClientConfig,
    borrower: Pubkey,
    position_mint: Pubkey,
) -> Result<Vec<Instruction>> {
    let admin = read_keypair_file(&config.admin_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(admin));
    let program = client.program(config.market_program)?;

    let market_config: MarketConfig = program.account(get_market_config_address(&program.id()))?;
    let authority = get_market_authority_address(&program.id());

    let instructions = program
        .request()
        .accounts(market_accounts::RefundBorrow {
            owner: program.payer(),
            market_config: get_market_config_address(&program.id()),
            authority,
            borrower,
            collateral_mint: market_config.collateral_mint,
            collateral_vault: market_config.collateral_vault,
            borrower_collateral_token: get_associated_token_address(
                &borrower,
                &market_config.collateral_mint,
            ),
            position_mint,
            vault_position_token: get_associated_token_address(&authority, &position_mint),
            borrow_record: get_borrow_record_address(&program.id(), &borrower, &position_mint),
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
            system_program: system_program::id(),
        })
        .args(market_instruction::RefundBorrow {})
        .instructions()?;
    Ok(instructions)
}

pub fn recover_positions_instr(
    config: &ClientConfig,
    position_mints: &[Pubkey],
) -> Result<Vec<Instruction>> {
    let admin = read_keypair_file(&config.admin_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(admin));
    let program = client.program(config.market_program)?;

    let authority = get_market_authority_address(&program.id());

    let mut ixs = program
        .request()
        .accounts(market_accounts::RecoverPositions {
            owner: program.payer(),
            market_config: get_market_config_address(&program.id()),
            custody_index: get_custody_index_address(&program.id()),
            authority,
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
            system_program: system_program::id(),
        })
        .args(market_instruction::RecoverPositions {
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
