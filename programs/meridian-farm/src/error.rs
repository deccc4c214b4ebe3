use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Caller is not the farm admin")]
    InvalidOwner,

    #[msg("Farm operations are paused")]
    FarmPaused,

    #[msg("Farm is not paused")]
    FarmNotPaused,

    #[msg("Math operation overflowed or underflowed")]
    MathOverflow,

    #[msg("Position is already staked")]
    PositionAlreadyStaked,

    #[msg("Position is not part of the caller's stake")]
    PositionNotStaked,

    #[msg("Stake already holds the maximum number of positions")]
    StakeCapacityExceeded,

    #[msg("Position does not belong to the pool's collection")]
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

    #[msg("Pool accounts must be writable and passed in ascending pool-id order")]
    InvalidPoolList,

    #[msg("Emergency withdraw must list the caller's full staked set")]
    PartialEmergencyWithdraw,

    #[msg("Invalid parameter provided")]
    InvalidParam,
}
