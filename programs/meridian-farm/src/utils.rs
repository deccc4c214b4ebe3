use anchor_lang::prelude::*;
use anchor_spl::metadata::{Metadata, MetadataAccount};
use anchor_spl::token_interface::{self, TransferChecked};

use crate::error::ErrorCode;

/// Transfer tokens out of a program vault, signed by the authority PDA.
/// This is the only path that moves treasury funds.
#[allow(clippy::too_many_arguments)]
pub fn transfer_from_vault_to_user<'info>(
    authority: AccountInfo<'info>,
    from_vault: AccountInfo<'info>,
    to: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    amount: u64,
    mint_decimals: u8,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            token_program,
            TransferChecked {
                from: from_vault,
                mint,
                to,
                authority,
            },
            signer_seeds,
        ),
        amount,
        mint_decimals,
    )
}

/// Transfer tokens from a user-signed account into a program vault.
pub fn transfer_from_user_to_vault<'info>(
    signer: AccountInfo<'info>,
    from: AccountInfo<'info>,
    to_vault: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    amount: u64,
    mint_decimals: u8,
) -> Result<()> {
    token_interface::transfer_checked(
        CpiContext::new(
            token_program,
            TransferChecked {
                from,
                mint,
                to: to_vault,
                authority: signer,
            },
        ),
        amount,
        mint_decimals,
    )
}

/// Check that `metadata` is the Metaplex metadata PDA for `mint` and that it
/// carries a verified collection equal to `collection`.
pub fn assert_collection_member(
    metadata: &AccountInfo,
    mint: &Pubkey,
    collection: &Pubkey,
) -> Result<()> {
    let (expected, _) = Pubkey::find_program_address(
        &[b"metadata", Metadata::id().as_ref(), mint.as_ref()],
        &Metadata::id(),
    );
    require_keys_eq!(metadata.key(), expected, ErrorCode::InvalidMetadata);

    let metadata = MetadataAccount::try_deserialize(&mut &metadata.data.borrow()[..])?;
    require_keys_eq!(metadata.mint, *mint, ErrorCode::InvalidMetadata);

    let membership = metadata
        .collection
        .as_ref()
        .ok_or(ErrorCode::InvalidCollection)?;
    require!(membership.verified, ErrorCode::InvalidCollection);
    require_keys_eq!(membership.key, *collection, ErrorCode::InvalidCollection);
    Ok(())
}
