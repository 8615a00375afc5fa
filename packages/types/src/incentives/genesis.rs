use std::collections::HashSet;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdError, StdResult};

use super::{claim::Claim, reward_index::MultiRewardIndexes};

/// Last time the global indexes of a source were advanced
#[cw_serde]
pub struct AccumulationTime {
    pub source: String,
    pub previous_accumulation_time: u64,
}

impl AccumulationTime {
    pub fn new(source: impl Into<String>, previous_accumulation_time: u64) -> Self {
        Self {
            source: source.into(),
            previous_accumulation_time,
        }
    }
}

/// Global accrual state of one kind of reward
#[cw_serde]
#[derive(Default)]
pub struct GenesisRewardState {
    pub accumulation_times: Vec<AccumulationTime>,
    pub multi_reward_indexes: MultiRewardIndexes,
}

impl GenesisRewardState {
    pub fn validate(&self) -> StdResult<()> {
        let mut sources = HashSet::new();
        for time in self.accumulation_times.iter() {
            if time.source.is_empty() {
                return Err(StdError::generic_err("accumulation time has an empty source"));
            }
            if !sources.insert(time.source.as_str()) {
                return Err(StdError::generic_err(format!(
                    "duplicate accumulation time for source {}",
                    time.source
                )));
            }
        }
        self.multi_reward_indexes.validate()
    }
}

/// Full state of the incentives contract, as imported on instantiation and exported by query
#[cw_serde]
#[derive(Default)]
pub struct GenesisState {
    pub delegator: GenesisRewardState,
    pub swap: GenesisRewardState,
    pub delegator_claims: Vec<Claim>,
    pub swap_claims: Vec<Claim>,
}

impl GenesisState {
    pub fn validate(&self) -> StdResult<()> {
        self.delegator.validate()?;
        self.swap.validate()?;
        validate_claims(&self.delegator_claims)?;
        validate_claims(&self.swap_claims)
    }
}

fn validate_claims(claims: &[Claim]) -> StdResult<()> {
    let mut owners = HashSet::new();
    for claim in claims.iter() {
        if !owners.insert(claim.owner.as_str()) {
            return Err(StdError::generic_err(format!("duplicate claim for owner {}", claim.owner)));
        }
        claim.validate()?;
    }
    Ok(())
}
