use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Caller is not the market admin")]
    InvalidOwner,

    #[msg("Market operations are paused")]
    MarketPaused,

    #[msg("Lock period has not elapsed")]
    LockNotElapsed,

    #[msg("Position is not in market custody")]
    PositionNotInCustody,

    #[msg("Position is still in market custody")]
    PositionStillInCustody,

    #[msg("Market custody index is full")]
    CustodyCapacityExceeded,

    #[msg("Position does not belong to the market's collection")]
    InvalidCollection,

    #[msg("Metadata account does not match the position mint")]
    InvalidMetadata,

    #[msg("Position mint must have zero decimals and unit supply")]
    InvalidPositionMint,

    #[msg("Caller does not hold the position token")]
    PositionNotHeld,

    #[msg("Token account does not match the expected derivation")]
    InvalidPositionAccount,

    #[msg("Missing remaining account")]
    MissingRemainingAccount,

    #[msg("Math operation overflowed or underflowed")]
    MathOverflow,

    #[msg("Invalid parameter provided")]
    InvalidParam,
}
