use std::collections::{BTreeMap, HashMap};

use cosmwasm_std::{to_json_binary, Addr, Binary, ContractResult, QuerierResult, Uint128};
use kestrel_types::staking::{BondStatus, DelegationResponse, QueryMsg, ValidatorResponse};

/// Delegations and validator statuses of a mocked staking hub. A validator's tokens are the sum
/// of the delegations to it.
#[derive(Default)]
pub struct StakingQuerier {
    pub validators: HashMap<String, BondStatus>,
    /// (delegator, validator) -> delegated tokens
    pub delegations: BTreeMap<(String, String), Uint128>,
}

impl StakingQuerier {
    pub fn validator_tokens(&self, validator: &str) -> Uint128 {
        self.delegations
            .iter()
            .filter(|((_, val), _)| val == validator)
            .map(|(_, amount)| *amount)
            .sum()
    }

    pub fn total_bonded(&self) -> Uint128 {
        self.delegations
            .iter()
            .filter(|((_, val), _)| self.validators.get(val) == Some(&BondStatus::Bonded))
            .map(|(_, amount)| *amount)
            .sum()
    }

    fn delegations_where(
        &self,
        predicate: impl Fn(&str, &str) -> bool,
    ) -> Vec<DelegationResponse> {
        self.delegations
            .iter()
            .filter(|((delegator, validator), _)| predicate(delegator.as_str(), validator.as_str()))
            .map(|((delegator, validator), amount)| DelegationResponse {
                delegator: Addr::unchecked(delegator),
                validator: Addr::unchecked(validator),
                amount: *amount,
            })
            .collect()
    }

    pub fn handle_query(&self, query: QueryMsg) -> QuerierResult {
        let ret: ContractResult<Binary> = match query {
            QueryMsg::Validator {
                validator,
            } => {
                let response = self.validators.get(&validator).map(|status| ValidatorResponse {
                    operator: Addr::unchecked(&validator),
                    status: *status,
                    tokens: self.validator_tokens(&validator),
                });
                to_json_binary(&response).into()
            }
            QueryMsg::DelegatorDelegations {
                delegator,
            } => to_json_binary(&self.delegations_where(|del, _| del == delegator)).into(),
            QueryMsg::ValidatorDelegations {
                validator,
            } => to_json_binary(&self.delegations_where(|_, val| val == validator)).into(),
            QueryMsg::TotalBonded {} => to_json_binary(&self.total_bonded()).into(),
        };
        Ok(ret).into()
    }
}
