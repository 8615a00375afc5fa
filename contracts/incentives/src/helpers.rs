use cosmwasm_std::{Addr, Event, QuerierWrapper, Uint128};
use kestrel_types::incentives::{Config, RewardIndexes, RewardKind};

use crate::{
    accumulator::accumulate_rewards,
    delegator::{self, WeightAdjustment},
    state::{load_reward_periods, MaybeMutStorage},
    swap, ContractError,
};

/// Returns the contract registered to send hooks of `kind`, which must be `sender`.
pub fn assert_hook_sender(
    config: &Config,
    kind: RewardKind,
    sender: &Addr,
) -> Result<Addr, ContractError> {
    let hook_source = registered_hook_source(config, kind)?;
    if hook_source != sender {
        return Err(ContractError::Unauthorized {});
    }
    Ok(hook_source.clone())
}

pub fn registered_hook_source(config: &Config, kind: RewardKind) -> Result<&Addr, ContractError> {
    config.hook_source(kind).ok_or(ContractError::HooksNotRegistered {
        kind,
    })
}

/// Total weight currently rewarded by `source`
pub fn query_total_weight(
    querier: &QuerierWrapper,
    config: &Config,
    kind: RewardKind,
    source: &str,
) -> Result<Uint128, ContractError> {
    let hook_source = registered_hook_source(config, kind)?;
    match kind {
        RewardKind::Delegator if source == config.bond_denom => {
            delegator::query_total_bonded(querier, hook_source, WeightAdjustment::None)
        }
        RewardKind::Delegator => Ok(Uint128::zero()),
        RewardKind::Swap => swap::query_pool_total_shares(querier, hook_source, source),
    }
}

/// Weight `owner` currently has in `source`
pub fn query_owner_weight(
    querier: &QuerierWrapper,
    config: &Config,
    kind: RewardKind,
    owner: &Addr,
    source: &str,
) -> Result<Uint128, ContractError> {
    let hook_source = registered_hook_source(config, kind)?;
    match kind {
        RewardKind::Delegator if source == config.bond_denom => {
            delegator::query_delegator_weight(querier, hook_source, owner, WeightAdjustment::None)
        }
        RewardKind::Delegator => Ok(Uint128::zero()),
        RewardKind::Swap => swap::query_depositor_shares(querier, hook_source, owner, source),
    }
}

/// Accumulates `source` up to `now` with its current total weight.
pub fn accumulate_source(
    storage: &mut MaybeMutStorage,
    querier: &QuerierWrapper,
    config: &Config,
    kind: RewardKind,
    source: &str,
    now: u64,
) -> Result<(RewardIndexes, Option<Event>), ContractError> {
    let total_weight = query_total_weight(querier, config, kind, source)?;
    let periods = load_reward_periods(storage.to_storage(), kind)?;
    accumulate_rewards(storage, kind, source, &periods, total_weight, now)
}
