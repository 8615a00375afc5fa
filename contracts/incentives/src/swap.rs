use cosmwasm_std::{Addr, DepsMut, Env, Event, MessageInfo, QuerierWrapper, Response, Uint128};
use kestrel_types::{
    incentives::{RewardKind, SwapHookMsg},
    swap::{PoolRecord, QueryMsg, ShareRecord},
};
use kestrel_utils::helpers::validate_pool_id;

use crate::{
    accumulator::accumulate_rewards,
    helpers::assert_hook_sender,
    state::{load_reward_periods, CONFIG},
    synchronizer::{join_source, synchronize_reward},
    ContractError,
};

/// The pool record held by the swap contract, rejected if malformed
pub fn query_pool(
    querier: &QuerierWrapper,
    swap: &Addr,
    pool_id: &str,
) -> Result<Option<PoolRecord>, ContractError> {
    let pool: Option<PoolRecord> = querier.query_wasm_smart(
        swap,
        &QueryMsg::Pool {
            pool_id: pool_id.to_string(),
        },
    )?;
    if let Some(pool) = &pool {
        pool.validate()?;
    }
    Ok(pool)
}

pub fn query_pool_total_shares(
    querier: &QuerierWrapper,
    swap: &Addr,
    pool_id: &str,
) -> Result<Uint128, ContractError> {
    Ok(query_pool(querier, swap, pool_id)?.map(|pool| pool.total_shares).unwrap_or_default())
}

pub fn query_depositor_shares(
    querier: &QuerierWrapper,
    swap: &Addr,
    depositor: &Addr,
    pool_id: &str,
) -> Result<Uint128, ContractError> {
    let shares: Option<ShareRecord> = querier.query_wasm_smart(
        swap,
        &QueryMsg::DepositorShares {
            depositor: depositor.to_string(),
            pool_id: pool_id.to_string(),
        },
    )?;
    let Some(shares) = shares else {
        return Ok(Uint128::zero());
    };

    match query_pool(querier, swap, pool_id)? {
        Some(pool) => shares.validate_against(&pool)?,
        None => shares.validate()?,
    }
    Ok(shares.shares_owned)
}

/// Handles a notification from the swap contract. The pool's indexes are brought up to date
/// before the depositor's claim is touched.
pub fn execute_swap_hook(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    hook: SwapHookMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let swap = assert_hook_sender(&config, RewardKind::Swap, &info.sender)?;

    let hook_event = Event::new("kestrel/incentives/hook")
        .add_attribute("kind", RewardKind::Swap.to_string())
        .add_attribute("hook", hook.name());

    let (SwapHookMsg::AfterPoolDepositCreated {
        depositor,
        pool_id,
        shares_owned,
    }
    | SwapHookMsg::BeforePoolDepositModified {
        depositor,
        pool_id,
        shares_owned,
    }) = &hook;

    let depositor = deps.api.addr_validate(depositor)?;
    validate_pool_id(pool_id)?;

    let pool = query_pool(&deps.querier, &swap, pool_id)?;
    let total_shares = pool.as_ref().map(|pool| pool.total_shares).unwrap_or_default();

    // A created deposit is already part of the pool total, but it did not earn the elapsed time
    let accrual_weight = match &hook {
        SwapHookMsg::AfterPoolDepositCreated {
            ..
        } => total_shares.checked_sub(*shares_owned)?,
        SwapHookMsg::BeforePoolDepositModified {
            ..
        } => total_shares,
    };

    let periods = load_reward_periods(deps.storage, RewardKind::Swap)?;
    let (global, accumulate_event) = accumulate_rewards(
        &mut deps.branch().storage.into(),
        RewardKind::Swap,
        pool_id,
        &periods,
        accrual_weight,
        env.block.time.seconds(),
    )?;

    let mut events = vec![];
    events.extend(accumulate_event);

    match hook {
        SwapHookMsg::AfterPoolDepositCreated {
            ..
        } => {
            // Whatever the depositor held before the deposit was created is settled with no
            // weight, then the pool is joined at the current indexes
            let event = synchronize_reward(
                deps.storage,
                RewardKind::Swap,
                &depositor,
                pool_id,
                &global,
                Uint128::zero(),
            )?;
            events.push(event);

            if !shares_owned.is_zero() {
                let event =
                    join_source(deps.storage, RewardKind::Swap, &depositor, pool_id, &global)?;
                events.push(event);
            }
        }
        SwapHookMsg::BeforePoolDepositModified {
            ..
        } => {
            let shares = ShareRecord {
                depositor: depositor.clone(),
                pool_id: pool_id.clone(),
                shares_owned: *shares_owned,
            };
            match &pool {
                Some(pool) => shares.validate_against(pool)?,
                None => shares.validate()?,
            }

            let event = synchronize_reward(
                deps.storage,
                RewardKind::Swap,
                &depositor,
                pool_id,
                &global,
                *shares_owned,
            )?;
            events.push(event);
        }
    }

    let hook_event = hook_event
        .add_attribute("depositor", depositor)
        .add_attribute("pool_id", pool_id)
        .add_attribute("shares_owned", shares_owned.to_string());

    Ok(Response::new().add_event(hook_event).add_events(events))
}
