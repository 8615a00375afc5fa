use cosmwasm_std::{Deps, Order, StdResult};
use cw_storage_plus::Bound;
use kestrel_types::incentives::{
    Claim, ConfigResponse, MultiRewardIndexes, Params, RewardIndexes, RewardKind,
};

use crate::state::{
    load_accrual_time, load_all_global_indexes, load_claim, load_global_indexes,
    load_reward_periods, CLAIMS, CONFIG, DEFAULT_LIMIT, MAX_LIMIT, OWNER,
};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let owner_state = OWNER.query(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: owner_state.owner,
        proposed_new_owner: owner_state.proposed,
        bond_denom: config.bond_denom,
        staking_hub: config.staking_hub.map(String::from),
        swap: config.swap.map(String::from),
    })
}

pub fn query_params(deps: Deps) -> StdResult<Params> {
    Ok(Params {
        delegator_reward_periods: load_reward_periods(deps.storage, RewardKind::Delegator)?,
        swap_reward_periods: load_reward_periods(deps.storage, RewardKind::Swap)?,
    })
}

/// Indexes as of the last accumulation. A source never accumulated has no indexes.
pub fn query_reward_indexes(
    deps: Deps,
    kind: RewardKind,
    source: String,
) -> StdResult<RewardIndexes> {
    Ok(load_global_indexes(deps.storage, kind, &source)?.unwrap_or_default())
}

pub fn query_all_reward_indexes(deps: Deps, kind: RewardKind) -> StdResult<MultiRewardIndexes> {
    load_all_global_indexes(deps.storage, kind)
}

pub fn query_accrual_time(deps: Deps, kind: RewardKind, source: String) -> StdResult<Option<u64>> {
    load_accrual_time(deps.storage, kind, &source)
}

pub fn query_claim(deps: Deps, kind: RewardKind, owner: String) -> StdResult<Option<Claim>> {
    let owner = deps.api.addr_validate(&owner)?;
    load_claim(deps.storage, kind, &owner)
}

pub fn query_claims(
    deps: Deps,
    kind: RewardKind,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Vec<Claim>> {
    let start_after = start_after.map(|addr| deps.api.addr_validate(&addr)).transpose()?;
    let start = start_after.as_ref().map(Bound::exclusive);
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;

    CLAIMS
        .prefix(kind.as_str())
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| Ok(item?.1))
        .collect()
}
