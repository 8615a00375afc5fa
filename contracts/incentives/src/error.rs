use cosmwasm_std::{
    CheckedFromRatioError, CheckedMultiplyFractionError, Decimal, OverflowError, StdError,
};
use kestrel_types::{error::TypesError, incentives::RewardKind};
use kestrel_utils::error::ValidationError;
use mars_owner::OwnerError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    CheckedFromRatio(#[from] CheckedFromRatioError),

    #[error("{0}")]
    CheckedMultiplyFraction(#[from] CheckedMultiplyFractionError),

    #[error("{0}")]
    Owner(#[from] OwnerError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Types(#[from] TypesError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Hooks for {kind} rewards are already registered to {addr}")]
    HooksAlreadyRegistered {
        kind: RewardKind,
        addr: String,
    },

    #[error("No contract is registered to send {kind} hooks")]
    HooksNotRegistered {
        kind: RewardKind,
    },

    #[error("Invalid {kind} reward source {reward_source}: {reason}")]
    InvalidRewardSource {
        kind: RewardKind,
        reward_source: String,
        reason: String,
    },

    #[error(
        "Global reward index of {denom} in {reward_source} is {global}, below the claim's {claim}"
    )]
    NegativeRewardDelta {
        reward_source: String,
        denom: String,
        global: Decimal,
        claim: Decimal,
    },

    #[error("Cannot migrate from contract {contract} version {version}")]
    IncompatibleContract {
        contract: String,
        version: String,
    },

    #[error("Invalid genesis state: {reason}")]
    InvalidGenesis {
        reason: String,
    },
}
