use cosmwasm_std::StdError;
use kestrel_utils::error::ValidationError;
use thiserror::Error;

/// Errors raised while reading records returned by other contracts
#[derive(Error, Debug, PartialEq)]
pub enum TypesError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid pool record {pool_id}: {reason}")]
    InvalidPoolRecord {
        pool_id: String,
        reason: String,
    },

    #[error("Invalid share record of {depositor} in pool {pool_id}: {reason}")]
    InvalidShareRecord {
        depositor: String,
        pool_id: String,
        reason: String,
    },
}
