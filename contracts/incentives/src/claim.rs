use cosmwasm_std::{BankMsg, Deps, DepsMut, Env, Event, MessageInfo, Response};
use kestrel_types::{
    incentives::{Claim, RewardKind},
    traits::Stringify,
};

use crate::{
    helpers::{accumulate_source, query_owner_weight},
    state::{load_claim, save_claim, MaybeMutStorage, CONFIG},
    synchronizer::{simulate_synchronization, synchronize_reward},
    ContractError,
};

/// Synchronizes every source of the sender's claim and sends them the rewards of `denoms`, or
/// all rewards if no denoms are given. Kinds without a registered hook source pay out what was
/// already credited.
pub fn execute_claim_rewards(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    kind: RewardKind,
    denoms: Option<Vec<String>>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let owner = info.sender;
    let now = env.block.time.seconds();

    let mut response = Response::new();
    let base_event = Event::new("kestrel/incentives/claim_rewards")
        .add_attribute("kind", kind.to_string())
        .add_attribute("owner", owner.to_string());

    let Some(claim) = load_claim(deps.storage, kind, &owner)? else {
        return Ok(response.add_event(base_event.add_attribute("claimed", "")));
    };

    // Without a hook source no weight can be read, so only credited rewards are paid
    let sources = match config.hook_source(kind) {
        Some(_) => claim.reward_indexes.sources(),
        None => vec![],
    };

    for source in sources {
        let querier = deps.querier;
        let (global, event) = accumulate_source(
            &mut deps.branch().storage.into(),
            &querier,
            &config,
            kind,
            &source,
            now,
        )?;
        let weight = query_owner_weight(&querier, &config, kind, &owner, &source)?;
        let sync_event = synchronize_reward(deps.storage, kind, &owner, &source, &global, weight)?;
        response = response.add_events(event).add_event(sync_event);
    }

    let mut claim = load_claim(deps.storage, kind, &owner)?.unwrap_or(claim);
    let claimed = claim.take_reward(denoms.as_deref());
    save_claim(deps.storage, kind, &claim)?;

    response = response
        .add_event(base_event.add_attribute("claimed", claimed.as_slice().to_string()));

    if !claimed.is_empty() {
        response = response.add_message(BankMsg::Send {
            to_address: owner.to_string(),
            amount: claimed,
        });
    }

    Ok(response)
}

/// The claim of `owner` as it would be after synchronizing every source at the current block
/// time. Nothing is persisted.
pub fn query_rewards(
    deps: Deps,
    env: Env,
    kind: RewardKind,
    owner: String,
) -> Result<Option<Claim>, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let owner = deps.api.addr_validate(&owner)?;

    let Some(mut claim) = load_claim(deps.storage, kind, &owner)? else {
        return Ok(None);
    };
    if config.hook_source(kind).is_none() {
        return Ok(Some(claim));
    }

    for source in claim.reward_indexes.sources() {
        let (global, _) = accumulate_source(
            &mut MaybeMutStorage::Immutable(deps.storage),
            &deps.querier,
            &config,
            kind,
            &source,
            env.block.time.seconds(),
        )?;
        let weight = query_owner_weight(&deps.querier, &config, kind, &owner, &source)?;
        claim = simulate_synchronization(&claim, &source, &global, weight)?;
    }

    Ok(Some(claim))
}
