use cosmwasm_std::{Addr, Coin, Event, Storage, Uint128};
use kestrel_types::{
    incentives::{Claim, RewardIndexes, RewardKind},
    traits::Stringify,
};

use crate::{
    state::{load_claim, save_claim},
    ContractError,
};

/// Rewards earned by `weight` units of weight while the global indexes moved from `claimed` to
/// `global`. Denoms missing from `claimed` started at zero. Amounts are rounded down.
pub fn compute_earned(
    source: &str,
    claimed: &RewardIndexes,
    global: &RewardIndexes,
    weight: Uint128,
) -> Result<Vec<Coin>, ContractError> {
    let mut earned = vec![];
    for index in global.iter() {
        let claimed_factor = claimed.get(&index.reward_denom).unwrap_or_default();
        if index.reward_factor < claimed_factor {
            return Err(ContractError::NegativeRewardDelta {
                reward_source: source.to_string(),
                denom: index.reward_denom.clone(),
                global: index.reward_factor,
                claim: claimed_factor,
            });
        }

        let amount = weight.checked_mul_floor(index.reward_factor - claimed_factor)?;
        if !amount.is_zero() {
            earned.push(Coin::new(amount.u128(), &index.reward_denom));
        }
    }
    Ok(earned)
}

/// Brings `claim` up to date with the global indexes of `source`, crediting what `weight` earned
/// since the last synchronization. `weight` must be the owner's weight before any pending change.
///
/// A claim without an entry for `source` joins it without earning anything. A claim whose weight
/// dropped to zero leaves the source. Returns the rewards credited.
pub fn synchronize_claim(
    claim: &mut Claim,
    source: &str,
    global: &RewardIndexes,
    weight: Uint128,
) -> Result<Vec<Coin>, ContractError> {
    let Some(claimed) = claim.reward_indexes.get(source) else {
        if !weight.is_zero() {
            claim.reward_indexes.set(source, global.clone());
        }
        return Ok(vec![]);
    };

    let earned = compute_earned(source, claimed, global, weight)?;
    claim.add_reward(&earned)?;

    if weight.is_zero() {
        claim.reward_indexes.remove(source);
    } else {
        claim.reward_indexes.set(source, global.clone());
    }

    Ok(earned)
}

/// The claim as it would be after synchronizing, leaving `claim` untouched.
pub fn simulate_synchronization(
    claim: &Claim,
    source: &str,
    global: &RewardIndexes,
    weight: Uint128,
) -> Result<Claim, ContractError> {
    let mut simulated = claim.clone();
    synchronize_claim(&mut simulated, source, global, weight)?;
    Ok(simulated)
}

/// Synchronizes the stored claim of `owner`. An owner without a claim gets one if `weight` is
/// not zero.
pub fn synchronize_reward(
    storage: &mut dyn Storage,
    kind: RewardKind,
    owner: &Addr,
    source: &str,
    global: &RewardIndexes,
    weight: Uint128,
) -> Result<Event, ContractError> {
    let claim = load_claim(storage, kind, owner)?;

    let earned = match claim {
        Some(mut claim) => {
            let earned = synchronize_claim(&mut claim, source, global, weight)?;
            save_claim(storage, kind, &claim)?;
            earned
        }
        None if !weight.is_zero() => {
            let mut claim = Claim::new(owner.clone());
            synchronize_claim(&mut claim, source, global, weight)?;
            save_claim(storage, kind, &claim)?;
            vec![]
        }
        None => vec![],
    };

    Ok(Event::new("kestrel/incentives/synchronize")
        .add_attribute("kind", kind.to_string())
        .add_attribute("owner", owner.to_string())
        .add_attribute("source", source)
        .add_attribute("weight", weight)
        .add_attribute("earned", earned.as_slice().to_string())
        .add_attribute("reward_indexes", global.to_string()))
}

/// Adds `source` to the claim of `owner` at the current global indexes, creating the claim if
/// needed. A claim already holding the source is left as is.
pub fn join_source(
    storage: &mut dyn Storage,
    kind: RewardKind,
    owner: &Addr,
    source: &str,
    global: &RewardIndexes,
) -> Result<Event, ContractError> {
    let mut claim = load_claim(storage, kind, owner)?.unwrap_or_else(|| Claim::new(owner.clone()));
    let joined = !claim.has_source(source);
    if joined {
        claim.reward_indexes.set(source, global.clone());
        save_claim(storage, kind, &claim)?;
    }

    Ok(Event::new("kestrel/incentives/join")
        .add_attribute("kind", kind.to_string())
        .add_attribute("owner", owner.to_string())
        .add_attribute("source", source)
        .add_attribute("joined", joined.to_string()))
}
