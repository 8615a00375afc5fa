//! Read-only interface of the staking hub, the contract holding delegations and validator
//! bonding status.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

#[cw_serde]
#[derive(Copy, Eq)]
pub enum BondStatus {
    Unbonded,
    Unbonding,
    Bonded,
}

#[cw_serde]
pub struct ValidatorResponse {
    pub operator: Addr,
    pub status: BondStatus,
    /// Tokens delegated to the validator, self delegation included
    pub tokens: Uint128,
}

impl ValidatorResponse {
    pub fn is_bonded(&self) -> bool {
        self.status == BondStatus::Bonded
    }
}

#[cw_serde]
pub struct DelegationResponse {
    pub delegator: Addr,
    pub validator: Addr,
    /// Bond denom tokens the delegation is worth
    pub amount: Uint128,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Option<ValidatorResponse>)]
    Validator {
        validator: String,
    },

    #[returns(Vec<DelegationResponse>)]
    DelegatorDelegations {
        delegator: String,
    },

    #[returns(Vec<DelegationResponse>)]
    ValidatorDelegations {
        validator: String,
    },

    /// Tokens delegated to bonded validators
    #[returns(Uint128)]
    TotalBonded {},
}
