//! Read-only interface of the swap contract, the automated market maker whose liquidity
//! providers earn swap rewards.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin, Uint128};
use kestrel_utils::helpers::{pool_id, validate_pool_id};

use crate::error::TypesError;

/// Reserves and total shares of a pool
#[cw_serde]
pub struct PoolRecord {
    pub pool_id: String,
    pub reserves_a: Coin,
    pub reserves_b: Coin,
    pub total_shares: Uint128,
}

impl PoolRecord {
    pub fn validate(&self) -> Result<(), TypesError> {
        let invalid = |reason: &str| TypesError::InvalidPoolRecord {
            pool_id: self.pool_id.clone(),
            reason: reason.to_string(),
        };

        validate_pool_id(&self.pool_id).map_err(|err| invalid(&err.to_string()))?;
        if pool_id(&self.reserves_a.denom, &self.reserves_b.denom) != self.pool_id {
            return Err(invalid("reserve denoms do not match the pool id"));
        }
        if self.reserves_a.amount.is_zero() || self.reserves_b.amount.is_zero() {
            return Err(invalid("reserves must be positive"));
        }
        if self.total_shares.is_zero() {
            return Err(invalid("total shares must be positive"));
        }
        Ok(())
    }
}

/// Shares of a pool owned by one depositor
#[cw_serde]
pub struct ShareRecord {
    pub depositor: Addr,
    pub pool_id: String,
    pub shares_owned: Uint128,
}

impl ShareRecord {
    pub fn validate(&self) -> Result<(), TypesError> {
        let invalid = |reason: &str| TypesError::InvalidShareRecord {
            depositor: self.depositor.to_string(),
            pool_id: self.pool_id.clone(),
            reason: reason.to_string(),
        };

        validate_pool_id(&self.pool_id).map_err(|err| invalid(&err.to_string()))?;
        if self.shares_owned.is_zero() {
            return Err(invalid("shares owned must be positive"));
        }
        Ok(())
    }

    /// Checks the record against the pool it claims shares of.
    pub fn validate_against(&self, pool: &PoolRecord) -> Result<(), TypesError> {
        self.validate()?;
        if self.pool_id != pool.pool_id || self.shares_owned > pool.total_shares {
            return Err(TypesError::InvalidShareRecord {
                depositor: self.depositor.to_string(),
                pool_id: self.pool_id.clone(),
                reason: format!(
                    "owns more than the {} total shares of the pool",
                    pool.total_shares
                ),
            });
        }
        Ok(())
    }
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Option<PoolRecord>)]
    Pool {
        pool_id: String,
    },

    #[returns(Option<ShareRecord>)]
    DepositorShares {
        depositor: String,
        pool_id: String,
    },
}
