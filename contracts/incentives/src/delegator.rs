use cosmwasm_std::{Addr, DepsMut, Env, Event, MessageInfo, QuerierWrapper, Response, Uint128};
use kestrel_types::{
    incentives::{RewardIndexes, RewardKind, StakingHookMsg},
    staking::{DelegationResponse, QueryMsg, ValidatorResponse},
};

use crate::{
    accumulator::accumulate_rewards,
    helpers::assert_hook_sender,
    state::{load_reward_periods, CONFIG},
    synchronizer::{join_source, synchronize_reward},
    ContractError,
};

/// How a validator whose bonding status just changed is counted. The staking hub reports the new
/// status, so the old one has to be forced around bonding transitions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightAdjustment<'a> {
    /// Use the status reported by the staking hub
    None,
    /// Count the validator as not bonded
    Exclude(&'a Addr),
    /// Count the validator as bonded
    Include(&'a Addr),
}

pub fn query_validator(
    querier: &QuerierWrapper,
    staking_hub: &Addr,
    validator: &Addr,
) -> Result<Option<ValidatorResponse>, ContractError> {
    Ok(querier.query_wasm_smart(
        staking_hub,
        &QueryMsg::Validator {
            validator: validator.to_string(),
        },
    )?)
}

fn is_bonded(
    querier: &QuerierWrapper,
    staking_hub: &Addr,
    validator: &Addr,
    adjustment: WeightAdjustment,
) -> Result<bool, ContractError> {
    match adjustment {
        WeightAdjustment::Exclude(v) if v == validator => Ok(false),
        WeightAdjustment::Include(v) if v == validator => Ok(true),
        _ => Ok(query_validator(querier, staking_hub, validator)?.is_some_and(|v| v.is_bonded())),
    }
}

/// Tokens delegated to bonded validators
pub fn query_total_bonded(
    querier: &QuerierWrapper,
    staking_hub: &Addr,
    adjustment: WeightAdjustment,
) -> Result<Uint128, ContractError> {
    let total: Uint128 = querier.query_wasm_smart(staking_hub, &QueryMsg::TotalBonded {})?;

    let (validator, include) = match adjustment {
        WeightAdjustment::None => return Ok(total),
        WeightAdjustment::Exclude(validator) => (validator, false),
        WeightAdjustment::Include(validator) => (validator, true),
    };

    let Some(response) = query_validator(querier, staking_hub, validator)? else {
        return Ok(total);
    };
    match (response.is_bonded(), include) {
        (true, false) => Ok(total.checked_sub(response.tokens)?),
        (false, true) => Ok(total.checked_add(response.tokens)?),
        _ => Ok(total),
    }
}

/// Tokens `delegator` has delegated to bonded validators
pub fn query_delegator_weight(
    querier: &QuerierWrapper,
    staking_hub: &Addr,
    delegator: &Addr,
    adjustment: WeightAdjustment,
) -> Result<Uint128, ContractError> {
    let delegations: Vec<DelegationResponse> = querier.query_wasm_smart(
        staking_hub,
        &QueryMsg::DelegatorDelegations {
            delegator: delegator.to_string(),
        },
    )?;

    let mut weight = Uint128::zero();
    for delegation in delegations {
        if is_bonded(querier, staking_hub, &delegation.validator, adjustment)? {
            weight = weight.checked_add(delegation.amount)?;
        }
    }
    Ok(weight)
}

fn query_validator_delegators(
    querier: &QuerierWrapper,
    staking_hub: &Addr,
    validator: &Addr,
) -> Result<Vec<Addr>, ContractError> {
    let delegations: Vec<DelegationResponse> = querier.query_wasm_smart(
        staking_hub,
        &QueryMsg::ValidatorDelegations {
            validator: validator.to_string(),
        },
    )?;
    Ok(delegations.into_iter().map(|delegation| delegation.delegator).collect())
}

/// Accumulates the bond denom source with the bonded total counted according to `adjustment`.
fn accumulate_bond_denom(
    deps: DepsMut,
    env: &Env,
    staking_hub: &Addr,
    bond_denom: &str,
    adjustment: WeightAdjustment,
    events: &mut Vec<Event>,
) -> Result<RewardIndexes, ContractError> {
    let total_weight = query_total_bonded(&deps.querier, staking_hub, adjustment)?;
    let periods = load_reward_periods(deps.storage, RewardKind::Delegator)?;
    let (global, event) = accumulate_rewards(
        &mut deps.storage.into(),
        RewardKind::Delegator,
        bond_denom,
        &periods,
        total_weight,
        env.block.time.seconds(),
    )?;
    events.extend(event);
    Ok(global)
}

/// Handles a notification from the staking hub. Every hook brings the bond denom indexes up to
/// date first, then settles the claims whose weight is about to change.
pub fn execute_staking_hook(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    hook: StakingHookMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let staking_hub = assert_hook_sender(&config, RewardKind::Delegator, &info.sender)?;
    let bond_denom = config.bond_denom.as_str();
    let querier = deps.querier;

    let hook_event = Event::new("kestrel/incentives/hook")
        .add_attribute("kind", RewardKind::Delegator.to_string())
        .add_attribute("hook", hook.name());

    let mut events = vec![];

    let hook_event = match hook {
        StakingHookMsg::BeforeDelegationCreated {
            delegator,
            validator,
        }
        | StakingHookMsg::BeforeDelegationModified {
            delegator,
            validator,
        } => {
            let delegator = deps.api.addr_validate(&delegator)?;
            let global = accumulate_bond_denom(
                deps.branch(),
                &env,
                &staking_hub,
                bond_denom,
                WeightAdjustment::None,
                &mut events,
            )?;

            let weight =
                query_delegator_weight(&querier, &staking_hub, &delegator, WeightAdjustment::None)?;
            let event = synchronize_reward(
                deps.storage,
                RewardKind::Delegator,
                &delegator,
                bond_denom,
                &global,
                weight,
            )?;
            events.push(event);

            hook_event.add_attribute("delegator", delegator).add_attribute("validator", validator)
        }

        StakingHookMsg::AfterDelegationModified {
            delegator,
            validator,
        } => {
            let delegator = deps.api.addr_validate(&delegator)?;
            let global = accumulate_bond_denom(
                deps.branch(),
                &env,
                &staking_hub,
                bond_denom,
                WeightAdjustment::None,
                &mut events,
            )?;

            let weight =
                query_delegator_weight(&querier, &staking_hub, &delegator, WeightAdjustment::None)?;
            let event = if weight.is_zero() {
                // Already settled by the before hook, so this only leaves the source
                synchronize_reward(
                    deps.storage,
                    RewardKind::Delegator,
                    &delegator,
                    bond_denom,
                    &global,
                    Uint128::zero(),
                )?
            } else {
                join_source(deps.storage, RewardKind::Delegator, &delegator, bond_denom, &global)?
            };
            events.push(event);

            hook_event.add_attribute("delegator", delegator).add_attribute("validator", validator)
        }

        StakingHookMsg::AfterValidatorBonded {
            validator,
        } => {
            let validator = deps.api.addr_validate(&validator)?;
            let excluded = WeightAdjustment::Exclude(&validator);
            let global = accumulate_bond_denom(
                deps.branch(),
                &env,
                &staking_hub,
                bond_denom,
                excluded,
                &mut events,
            )?;

            // Delegators earn from the validator's tokens from now on, never retroactively
            for delegator in query_validator_delegators(&querier, &staking_hub, &validator)? {
                let weight = query_delegator_weight(&querier, &staking_hub, &delegator, excluded)?;
                let event = synchronize_reward(
                    deps.storage,
                    RewardKind::Delegator,
                    &delegator,
                    bond_denom,
                    &global,
                    weight,
                )?;
                events.push(event);

                let included = WeightAdjustment::Include(&validator);
                let weight = query_delegator_weight(&querier, &staking_hub, &delegator, included)?;
                if !weight.is_zero() {
                    let event = join_source(
                        deps.storage,
                        RewardKind::Delegator,
                        &delegator,
                        bond_denom,
                        &global,
                    )?;
                    events.push(event);
                }
            }

            hook_event.add_attribute("validator", validator)
        }

        StakingHookMsg::AfterValidatorBeginUnbonding {
            validator,
        } => {
            let validator = deps.api.addr_validate(&validator)?;
            let included = WeightAdjustment::Include(&validator);
            let global = accumulate_bond_denom(
                deps.branch(),
                &env,
                &staking_hub,
                bond_denom,
                included,
                &mut events,
            )?;

            // Settle up to the moment the validator left the bonded set
            for delegator in query_validator_delegators(&querier, &staking_hub, &validator)? {
                let weight = query_delegator_weight(&querier, &staking_hub, &delegator, included)?;
                let event = synchronize_reward(
                    deps.storage,
                    RewardKind::Delegator,
                    &delegator,
                    bond_denom,
                    &global,
                    weight,
                )?;
                events.push(event);

                // Delegators left without bonded tokens leave the source
                let excluded = WeightAdjustment::Exclude(&validator);
                let remaining =
                    query_delegator_weight(&querier, &staking_hub, &delegator, excluded)?;
                if remaining.is_zero() {
                    let event = synchronize_reward(
                        deps.storage,
                        RewardKind::Delegator,
                        &delegator,
                        bond_denom,
                        &global,
                        Uint128::zero(),
                    )?;
                    events.push(event);
                }
            }

            hook_event.add_attribute("validator", validator)
        }

        StakingHookMsg::BeforeValidatorSlashed {
            validator,
            fraction,
        } => {
            let validator = deps.api.addr_validate(&validator)?;
            let global = accumulate_bond_denom(
                deps.branch(),
                &env,
                &staking_hub,
                bond_denom,
                WeightAdjustment::None,
                &mut events,
            )?;

            for delegator in query_validator_delegators(&querier, &staking_hub, &validator)? {
                let weight = query_delegator_weight(
                    &querier,
                    &staking_hub,
                    &delegator,
                    WeightAdjustment::None,
                )?;
                let event = synchronize_reward(
                    deps.storage,
                    RewardKind::Delegator,
                    &delegator,
                    bond_denom,
                    &global,
                    weight,
                )?;
                events.push(event);
            }

            hook_event
                .add_attribute("validator", validator)
                .add_attribute("fraction", fraction.to_string())
        }
    };

    Ok(Response::new().add_event(hook_event).add_events(events))
}
