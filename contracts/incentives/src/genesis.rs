use cosmwasm_std::{Api, Deps, Order, StdResult, Storage};
use kestrel_types::incentives::{
    AccumulationTime, Claim, GenesisRewardState, GenesisState, RewardKind,
};

use crate::{
    state::{load_all_global_indexes, save_claim, ACCRUAL_TIMES, CLAIMS, GLOBAL_INDEXES},
    ContractError,
};

/// Writes the accrual state of `genesis` to storage.
pub fn import_genesis(
    storage: &mut dyn Storage,
    api: &dyn Api,
    genesis: &GenesisState,
) -> Result<(), ContractError> {
    genesis.validate().map_err(|err| ContractError::InvalidGenesis {
        reason: err.to_string(),
    })?;

    for (kind, state, claims) in [
        (RewardKind::Delegator, &genesis.delegator, &genesis.delegator_claims),
        (RewardKind::Swap, &genesis.swap, &genesis.swap_claims),
    ] {
        for time in state.accumulation_times.iter() {
            ACCRUAL_TIMES.save(
                storage,
                (kind.as_str(), time.source.as_str()),
                &time.previous_accumulation_time,
            )?;
        }

        for index in state.multi_reward_indexes.iter() {
            GLOBAL_INDEXES.save(
                storage,
                (kind.as_str(), index.source.as_str()),
                &index.reward_indexes,
            )?;
        }

        for claim in claims {
            api.addr_validate(claim.owner.as_str())?;
            save_claim(storage, kind, claim)?;
        }
    }

    Ok(())
}

fn export_reward_state(storage: &dyn Storage, kind: RewardKind) -> StdResult<GenesisRewardState> {
    let accumulation_times = ACCRUAL_TIMES
        .prefix(kind.as_str())
        .range(storage, None, None, Order::Ascending)
        .map(|item| {
            let (source, time) = item?;
            Ok(AccumulationTime::new(source, time))
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(GenesisRewardState {
        accumulation_times,
        multi_reward_indexes: load_all_global_indexes(storage, kind)?,
    })
}

fn export_claims(storage: &dyn Storage, kind: RewardKind) -> StdResult<Vec<Claim>> {
    CLAIMS
        .prefix(kind.as_str())
        .range(storage, None, None, Order::Ascending)
        .map(|item| Ok(item?.1))
        .collect()
}

/// Reads the whole accrual state, in the form accepted by `import_genesis`.
pub fn query_export_genesis(deps: Deps) -> StdResult<GenesisState> {
    Ok(GenesisState {
        delegator: export_reward_state(deps.storage, RewardKind::Delegator)?,
        swap: export_reward_state(deps.storage, RewardKind::Swap)?,
        delegator_claims: export_claims(deps.storage, RewardKind::Delegator)?,
        swap_claims: export_claims(deps.storage, RewardKind::Swap)?,
    })
}
