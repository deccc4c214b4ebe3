#![allow(dead_code)]
use anchor_client::{Client, Cluster};
use anyhow::{format_err, Result};
use clap::Parser;
use configparser::ini::Ini;
use solana_client::rpc_client::RpcClient;
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use std::rc::Rc;
use std::str::FromStr;

mod instructions;
use instructions::farm_instructions::*;
use instructions::market_instructions::*;
use instructions::rpc::*;
use instructions::utils::*;

use meridian_farm::states::{FarmConfig, Pool, UserStake};
use meridian_market::states::{BorrowRecord, CustodyIndex, MarketConfig};

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    http_url: String,
    ws_url: String,
    payer_path: String,
    admin_path: String,
    farm_program: Pubkey,
    market_program: Pubkey,
}

fn load_cfg(client_config: &String) -> Result<ClientConfig> {
    let mut config = Ini::new();
    let _map = config.load(client_config).unwrap();
    let http_url = config.get("Global", "http_url").unwrap();
    if http_url.is_empty() {
        panic!("http_url must not be empty");
    }
    let ws_url = config.get("Global", "ws_url").unwrap();
    if ws_url.is_empty() {
        panic!("ws_url must not be empty");
    }
    let payer_path = config.get("Global", "payer_path").unwrap();
    if payer_path.is_empty() {
        panic!("payer_path must not be empty");
    }
    let admin_path = config.get("Global", "admin_path").unwrap();
    if admin_path.is_empty() {
        panic!("admin_path must not be empty");
    }

    let farm_program_str = config.get("Global", "farm_program").unwrap();
    if farm_program_str.is_empty() {
        panic!("farm_program must not be empty");
    }
    let farm_program = Pubkey::from_str(&farm_program_str).unwrap();

    let market_program_str = config.get("Global", "market_program").unwrap();
    if market_program_str.is_empty() {
        panic!("market_program must not be empty");
    }
    let market_program = Pubkey::from_str(&market_program_str).unwrap();

    Ok(ClientConfig {
        http_url,
        ws_url,
        payer_path,
        admin_path,
        farm_program,
        market_program,
    })
}

fn read_keypair_file(s: &str) -> Result<Keypair> {
    solana_sdk::signature::read_keypair_file(s)
        .map_err(|_| format_err!("failed to read keypair from {}", s))
}

fn send_instructions(
    rpc_client: &RpcClient,
    instructions: Vec<Instruction>,
    signer: &Keypair,
) -> Result<()> {
    let signers = vec![signer];
    let recent_hash = rpc_client.get_latest_blockhash()?;
    let txn = Transaction::new_signed_with_payer(
        &instructions,
        Some(&signer.pubkey()),
        &signers,
        recent_hash,
    );
    let signature = send_txn(rpc_client, &txn, true)?;
    println!("{}", signature);
    Ok(())
}

#[derive(Debug, Parser)]
pub struct Opts {
    #[clap(subcommand)]
    pub command: MeridianCommands,
}

#[derive(Debug, Parser)]
pub enum MeridianCommands {
    InitFarm {
        #[arg(long)]
        admin: Pubkey,
        #[arg(long)]
        reward_mint: Pubkey,
        #[arg(long)]
        reward_per_block: u64,
        #[arg(long)]
        start_block: u64,
    },
    AddPool {
        #[arg(long)]
        alloc_point: u64,
        #[arg(long)]
        collection: Pubkey,
    },
    SetPool {
        #[arg(long)]
        pool_id: u64,
        #[arg(long)]
        alloc_point: u64,
    },
    UpdateFarmConfig {
        #[arg(long)]
        param: u8,
        #[arg(long)]
        value: u64,
        #[arg(long)]
        admin: Option<Pubkey>,
    },
    UpdatePool {
        #[arg(long)]
        pool_id: u64,
    },
    MassUpdatePools {},
    Deposit {
        #[arg(long)]
        pool_id: u64,
        /// Position mints to stake.
        mints: Vec<Pubkey>,
    },
    Withdraw {
        #[arg(long)]
        pool_id: u64,
        /// Position mints to unstake.
        mints: Vec<Pubkey>,
    },
    /// Settle pending rewards without moving positions.
    Claim {
        #[arg(long)]
        pool_id: u64,
    },
    /// Forfeit rewards and reclaim the whole staked set (paused farm only).
    EmergencyWithdraw {
        #[arg(long)]
        pool_id: u64,
    },
    Pending {
        #[arg(long)]
        pool_id: u64,
        #[arg(long)]
        user: Option<Pubkey>,
    },
    StakeInfo {
        #[arg(long)]
        pool_id: u64,
        #[arg(long)]
        user: Option<Pubkey>,
    },
    FarmInfo {},
    InitMarket {
        #[arg(long)]
        admin: Pubkey,
        #[arg(long)]
        collection: Pubkey,
        #[arg(long)]
        collateral_mint: Pubkey,
        #[arg(long)]
        collateral_amount: u64,
        #[arg(long)]
        lock_period: i64,
    },
    UpdateMarketConfig {
        #[arg(long)]
        param: u8,
        #[arg(long)]
        value: u64,
        #[arg(long)]
        admin: Option<Pubkey>,
    },
    Borrow {
        /// Position mints to escrow (one instruction each, one transaction).
        mints: Vec<Pubkey>,
    },
    WithdrawPosition {
        /// Escrowed position mints to reclaim after their locks.
        mints: Vec<Pubkey>,
    },
    RefundBorrow {
        #[arg(long)]
        borrower: Pubkey,
        #[arg(long)]
        mint: Pubkey,
    },
    RecoverPositions {
        mints: Vec<Pubkey>,
    },
    MarketNfts {},
    Borrows {
        #[arg(long)]
        borrower: Option<Pubkey>,
    },
}

fn main() -> Result<()> {
    let client_config = "client_config.ini";
    let cli_config = load_cfg(&client_config.to_string()).unwrap();
    // cluster params.
    let payer = read_keypair_file(&cli_config.payer_path)?;
    let admin = read_keypair_file(&cli_config.admin_path)?;
    // solana rpc client
    let rpc_client = RpcClient::new(cli_config.http_url.to_string());

    // anchor client.
    let anchor_config = cli_config.clone();
    let url = Cluster::Custom(anchor_config.http_url, anchor_config.ws_url);
    let wallet = read_keypair_file(&cli_config.payer_path)?;
    let anchor_client = Client::new(url, Rc::new(wallet));
    let farm_program = anchor_client.program(cli_config.farm_program)?;
    let market_program = anchor_client.program(cli_config.market_program)?;

    let opts = Opts::parse();
    match opts.command {
        MeridianCommands::InitFarm {
            admin: new_admin,
            reward_mint,
            reward_per_block,
            start_block,
        } => {
            let instructions = initialize_farm_instr(
                &cli_config,
                new_admin,
                reward_mint,
                reward_per_block,
                start_block,
            )?;
            send_instructions(&rpc_client, instructions, &admin)?;
        }
        MeridianCommands::AddPool {
            alloc_point,
            collection,
        } => {
            let farm_config: FarmConfig =
                farm_program.account(get_farm_config_address(&farm_program.id()))?;
            let instructions =
                add_pool_instr(&cli_config, alloc_point, collection, farm_config.pool_count)?;
            send_instructions(&rpc_client, instructions, &admin)?;
        }
        MeridianCommands::SetPool {
            pool_id,
            alloc_point,
        } => {
            let instructions = set_pool_instr(&cli_config, pool_id, alloc_point)?;
            send_instructions(&rpc_client, instructions, &admin)?;
        }
        MeridianCommands::UpdateFarmConfig {
            param,
            value,
            admin: new_admin,
        } => {
            let instructions = update_farm_config_instr(&cli_config, param, value, new_admin)?;
            send_instructions(&rpc_client, instructions, &admin)?;
        }
        MeridianCommands::UpdatePool { pool_id } => {
            let instructions = update_pool_instr(&cli_config, pool_id)?;
            send_instructions(&rpc_client, instructions, &payer)?;
        }
        MeridianCommands::MassUpdatePools {} => {
            let farm_config: FarmConfig =
                farm_program.account(get_farm_config_address(&farm_program.id()))?;
            let instructions = mass_update_pools_instr(&cli_config, farm_config.pool_count)?;
            send_instructions(&rpc_client, instructions, &payer)?;
        }
        MeridianCommands::Deposit { pool_id, mints } => {
            let instructions = deposit_instr(&cli_config, pool_id, &mints)?;
            send_instructions(&rpc_client, instructions, &payer)?;
        }
        MeridianCommands::Withdraw { pool_id, mints } => {
            let instructions = withdraw_instr(&cli_config, pool_id, &mints)?;
            send_instructions(&rpc_client, instructions, &payer)?;
        }
        MeridianCommands::Claim { pool_id } => {
            let instructions = withdraw_instr(&cli_config, pool_id, &[])?;
            send_instructions(&rpc_client, instructions, &payer)?;
        }
        MeridianCommands::EmergencyWithdraw { pool_id } => {
            let user_stake: UserStake = farm_program.account(get_user_stake_address(
                &farm_program.id(),
                pool_id,
                &payer.pubkey(),
            ))?;
            let instructions =
                emergency_withdraw_instr(&cli_config, pool_id, &user_stake.position_mints)?;
            send_instructions(&rpc_client, instructions, &payer)?;
        }
        MeridianCommands::Pending { pool_id, user } => {
            let user = user.unwrap_or(payer.pubkey());
            let farm_config: FarmConfig =
                farm_program.account(get_farm_config_address(&farm_program.id()))?;
            let pool: Pool = farm_program.account(get_pool_address(&farm_program.id(), pool_id))?;
            let user_stake: UserStake = farm_program.account(get_user_stake_address(
                &farm_program.id(),
                pool_id,
                &user,
            ))?;
            let current_block = rpc_client.get_slot()?;
            let pending = pool
                .pending_reward(&farm_config, &user_stake, current_block)
                .map_err(|e| format_err!("{}", e))?;
            println!("pending reward for {}: {}", user, pending);
        }
        MeridianCommands::StakeInfo { pool_id, user } => {
            let user = user.unwrap_or(payer.pubkey());
            let user_stake: UserStake = farm_program.account(get_user_stake_address(
                &farm_program.id(),
                pool_id,
                &user,
            ))?;
            println!(
                "owner: {}\namount: {}\nreward_debt: {}",
                user_stake.owner, user_stake.amount, user_stake.reward_debt
            );
            for mint in &user_stake.position_mints {
                println!("staked: {}", mint);
            }
        }
        MeridianCommands::FarmInfo {} => {
            let farm_config: FarmConfig =
                farm_program.account(get_farm_config_address(&farm_program.id()))?;
            println!(
                "admin: {}\nreward_per_block: {}\nbonus_multiplier: {}\ntotal_alloc_point: {}\npaused: {}",
                farm_config.admin,
                farm_config.reward_per_block,
                farm_config.bonus_multiplier,
                farm_config.total_alloc_point,
                farm_config.paused
            );
            for pool_id in 0..farm_config.pool_count {
                let pool: Pool =
                    farm_program.account(get_pool_address(&farm_program.id(), pool_id))?;
                println!(
                    "pool {}: collection {} alloc_point {} last_reward_block {} total_staked {}",
                    pool.pool_id,
                    pool.position_collection,
                    pool.alloc_point,
                    pool.last_reward_block,
                    pool.total_staked
                );
            }
        }
        MeridianCommands::InitMarket {
            admin: new_admin,
            collection,
            collateral_mint,
            collateral_amount,
            lock_period,
        } => {
            let instructions = initialize_market_instr(
                &cli_config,
                new_admin,
                collection,
                collateral_mint,
                collateral_amount,
                lock_period,
            )?;
            send_instructions(&rpc_client, instructions, &admin)?;
        }
        MeridianCommands::UpdateMarketConfig {
            param,
            value,
            admin: new_admin,
        } => {
            let instructions = update_market_config_instr(&cli_config, param, value, new_admin)?;
            send_instructions(&rpc_client, instructions, &admin)?;
        }
        MeridianCommands::Borrow { mints } => {
            let mut instructions = Vec::new();
            for mint in mints {
                instructions.extend(borrow_instr(&cli_config, mint)?);
            }
            send_instructions(&rpc_client, instructions, &payer)?;
        }
        MeridianCommands::WithdrawPosition { mints } => {
            let mut instructions = Vec::new();
            for mint in mints {
                instructions.extend(withdraw_position_instr(&cli_config, mint)?);
            }
            send_instructions(&rpc_client, instructions, &payer)?;
        }
        MeridianCommands::RefundBorrow { borrower, mint } => {
            let instructions = refund_borrow_instr(&cli_config, borrower, mint)?;
            send_instructions(&rpc_client, instructions, &admin)?;
        }
        MeridianCommands::RecoverPositions { mints } => {
            let instructions = recover_positions_instr(&cli_config, &mints)?;
            send_instructions(&rpc_client, instructions, &admin)?;
        }
        MeridianCommands::MarketNfts {} => {
            let custody_index: CustodyIndex =
                market_program.account(get_custody_index_address(&market_program.id()))?;
            println!("positions in market custody: {}", custody_index.positions.len());
            for mint in &custody_index.positions {
                println!("{}", mint);
            }
        }
        MeridianCommands::Borrows { borrower } => {
            let borrower = borrower.unwrap_or(payer.pubkey());
            // BorrowRecord layout: discriminator (8) + bump (1) + borrower.
            let filters = vec![RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
                9,
                borrower.as_ref(),
            ))];
            let records: Vec<(Pubkey, BorrowRecord)> = market_program.accounts(filters)?;
            let market_config: MarketConfig =
                market_program.account(get_market_config_address(&market_program.id()))?;
            println!(
                "current parameters: collateral {} lock_period {}",
                market_config.collateral_amount, market_config.lock_period
            );
            for (address, record) in records {
                println!(
                    "{}: position {} collateral {} lock_end {}",
                    address, record.position_mint, record.collateral, record.lock_end
                );
            }
        }
    }
    Ok(())
}
