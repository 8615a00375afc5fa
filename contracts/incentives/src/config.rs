use cosmwasm_std::{DepsMut, Env, Event, MessageInfo, Response};
use kestrel_types::incentives::{validate_reward_periods, Config, MultiRewardPeriod, RewardKind};
use kestrel_utils::helpers::validate_pool_id;
use mars_owner::OwnerUpdate;

use crate::{
    helpers::accumulate_source,
    state::{load_reward_periods, reward_sources, CONFIG, OWNER, REWARD_PERIODS},
    ContractError,
};

pub fn update_owner(
    deps: DepsMut,
    info: MessageInfo,
    update: OwnerUpdate,
) -> Result<Response, ContractError> {
    Ok(OWNER.update(deps, info, update)?)
}

/// Validates the periods of `kind`: delegator rewards are only paid to the bond denom, swap
/// rewards only to well formed pool ids.
pub fn validate_periods(
    config: &Config,
    kind: RewardKind,
    periods: &[MultiRewardPeriod],
) -> Result<(), ContractError> {
    validate_reward_periods(periods)?;

    for period in periods {
        match kind {
            RewardKind::Delegator if period.source != config.bond_denom => {
                return Err(ContractError::InvalidRewardSource {
                    kind,
                    reward_source: period.source.clone(),
                    reason: format!("delegator rewards are only paid to {}", config.bond_denom),
                });
            }
            RewardKind::Delegator => {}
            RewardKind::Swap => {
                validate_pool_id(&period.source).map_err(|err| {
                    ContractError::InvalidRewardSource {
                        kind,
                        reward_source: period.source.clone(),
                        reason: err.to_string(),
                    }
                })?;
            }
        }
    }

    Ok(())
}

/// Replaces the reward periods of `kind`. Sources of the old and new periods are accumulated up
/// to now under the old periods first, so the new rates only apply from now on.
pub fn execute_update_reward_periods(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    kind: RewardKind,
    periods: Vec<MultiRewardPeriod>,
) -> Result<Response, ContractError> {
    OWNER.assert_owner(deps.storage, &info.sender)?;

    let config = CONFIG.load(deps.storage)?;
    validate_periods(&config, kind, &periods)?;

    let mut response = Response::new();

    // Without a registered hook source the total weight is unknown
    if config.hook_source(kind).is_some() {
        let mut sources = reward_sources(&load_reward_periods(deps.storage, kind)?);
        for source in reward_sources(&periods) {
            if !sources.contains(&source) {
                sources.push(source);
            }
        }

        for source in sources {
            let querier = deps.querier;
            let (_, event) = accumulate_source(
                &mut deps.branch().storage.into(),
                &querier,
                &config,
                kind,
                &source,
                env.block.time.seconds(),
            )?;
            response = response.add_events(event);
        }
    }

    REWARD_PERIODS.save(deps.storage, kind.as_str(), &periods)?;

    Ok(response.add_event(
        Event::new("kestrel/incentives/update_reward_periods")
            .add_attribute("kind", kind.to_string())
            .add_attribute("periods", periods.len().to_string()),
    ))
}

pub fn execute_register_hooks(
    deps: DepsMut,
    info: MessageInfo,
    kind: RewardKind,
    addr: String,
) -> Result<Response, ContractError> {
    OWNER.assert_owner(deps.storage, &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    if let Some(registered) = config.hook_source(kind) {
        return Err(ContractError::HooksAlreadyRegistered {
            kind,
            addr: registered.to_string(),
        });
    }

    let addr = deps.api.addr_validate(&addr)?;
    config.set_hook_source(kind, Some(addr.clone()));
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_event(
        Event::new("kestrel/incentives/register_hooks")
            .add_attribute("kind", kind.to_string())
            .add_attribute("addr", addr),
    ))
}

pub fn execute_clear_hooks(
    deps: DepsMut,
    info: MessageInfo,
    kind: RewardKind,
) -> Result<Response, ContractError> {
    OWNER.assert_owner(deps.storage, &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    config.set_hook_source(kind, None);
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_event(
        Event::new("kestrel/incentives/clear_hooks").add_attribute("kind", kind.to_string()),
    ))
}
