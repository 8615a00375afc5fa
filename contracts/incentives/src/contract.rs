#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response};
use kestrel_types::incentives::{
    Config, ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, RewardKind,
};
use kestrel_utils::helpers::validate_native_denom;
use mars_owner::OwnerInit::SetInitialOwner;
use strum::IntoEnumIterator;

use crate::{
    accumulator, claim, config, delegator, genesis, query,
    state::{CONFIG, OWNER, REWARD_PERIODS},
    swap, ContractError,
};

pub const CONTRACT_NAME: &str = "crates.io:kestrel-incentives";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// INIT

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    OWNER.initialize(
        deps.storage,
        deps.api,
        SetInitialOwner {
            owner: msg.owner,
        },
    )?;

    validate_native_denom(&msg.bond_denom)?;

    let config = Config {
        bond_denom: msg.bond_denom,
        staking_hub: msg.staking_hub.map(|addr| deps.api.addr_validate(&addr)).transpose()?,
        swap: msg.swap.map(|addr| deps.api.addr_validate(&addr)).transpose()?,
    };

    for kind in RewardKind::iter() {
        let periods = msg.params.reward_periods(kind);
        config::validate_periods(&config, kind, periods)?;
        REWARD_PERIODS.save(deps.storage, kind.as_str(), &periods.to_vec())?;
    }

    CONFIG.save(deps.storage, &config)?;

    if let Some(genesis) = msg.genesis {
        genesis::import_genesis(deps.storage, deps.api, &genesis)?;
    }

    Ok(Response::default())
}

// EXECUTE

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::StakingHook(hook) => delegator::execute_staking_hook(deps, env, info, hook),
        ExecuteMsg::SwapHook(hook) => swap::execute_swap_hook(deps, env, info, hook),
        ExecuteMsg::AccumulateRewards {
            kind,
        } => accumulator::execute_accumulate_rewards(deps, env, kind),
        ExecuteMsg::ClaimRewards {
            kind,
            denoms,
        } => claim::execute_claim_rewards(deps, env, info, kind, denoms),
        ExecuteMsg::UpdateRewardPeriods {
            kind,
            periods,
        } => config::execute_update_reward_periods(deps, env, info, kind, periods),
        ExecuteMsg::RegisterHooks {
            kind,
            addr,
        } => config::execute_register_hooks(deps, info, kind, addr),
        ExecuteMsg::ClearHooks {
            kind,
        } => config::execute_clear_hooks(deps, info, kind),
        ExecuteMsg::UpdateOwner(update) => config::update_owner(deps, info, update),
    }
}

// QUERY

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    let res = match msg {
        QueryMsg::Config {} => to_json_binary(&query::query_config(deps)?),
        QueryMsg::Params {} => to_json_binary(&query::query_params(deps)?),
        QueryMsg::RewardIndexes {
            kind,
            source,
        } => to_json_binary(&query::query_reward_indexes(deps, kind, source)?),
        QueryMsg::AllRewardIndexes {
            kind,
        } => to_json_binary(&query::query_all_reward_indexes(deps, kind)?),
        QueryMsg::AccrualTime {
            kind,
            source,
        } => to_json_binary(&query::query_accrual_time(deps, kind, source)?),
        QueryMsg::Claim {
            kind,
            owner,
        } => to_json_binary(&query::query_claim(deps, kind, owner)?),
        QueryMsg::Claims {
            kind,
            start_after,
            limit,
        } => to_json_binary(&query::query_claims(deps, kind, start_after, limit)?),
        QueryMsg::Rewards {
            kind,
            owner,
        } => to_json_binary(&claim::query_rewards(deps, env, kind, owner)?),
        QueryMsg::ExportGenesis {} => to_json_binary(&genesis::query_export_genesis(deps)?),
    };
    res.map_err(Into::into)
}

// MIGRATION

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = cw2::get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::IncompatibleContract {
            contract: stored.contract,
            version: stored.version,
        });
    }

    cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
