use cosmwasm_std::{Decimal, DepsMut, Env, Event, Response, Uint128};
use kestrel_types::{
    incentives::{MultiRewardPeriod, RewardIndexes, RewardKind},
    traits::Stringify,
};
use strum::IntoEnumIterator;

use crate::{
    helpers::accumulate_source,
    state::{
        load_reward_periods, reward_sources, MaybeMutStorage, ACCRUAL_TIMES, CONFIG, GLOBAL_INDEXES,
    },
    ContractError,
};

/// Global accrual state of one source: the cumulative reward per unit of weight of every reward
/// denom, and the last time it was advanced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Accumulator {
    pub previous_accumulation_time: Option<u64>,
    pub indexes: RewardIndexes,
}

impl Accumulator {
    pub fn new(previous_accumulation_time: Option<u64>, indexes: RewardIndexes) -> Self {
        Self {
            previous_accumulation_time,
            indexes,
        }
    }

    /// Advances the indexes to `now`, splitting the rewards emitted by `periods` since the
    /// previous accumulation between `total_weight` units of weight.
    ///
    /// The first accumulation only records `now` as the starting point. Nothing accrues while
    /// the total weight is zero, and time never moves backwards.
    pub fn accumulate(
        &mut self,
        periods: &[&MultiRewardPeriod],
        total_weight: Uint128,
        now: u64,
    ) -> Result<(), ContractError> {
        // Every denom paid by a period gets an entry, so that claims joining now snapshot it
        let indexes = std::mem::take(&mut self.indexes);
        self.indexes =
            indexes.zero_filled(periods.iter().flat_map(|period| period.reward_denoms()));

        let Some(previous) = self.previous_accumulation_time else {
            self.previous_accumulation_time = Some(now);
            return Ok(());
        };

        if now <= previous || total_weight.is_zero() {
            self.previous_accumulation_time = Some(previous.max(now));
            return Ok(());
        }

        for period in periods {
            let seconds = period.seconds_within(previous, now);
            if seconds == 0 {
                continue;
            }
            for rate in period.rewards_per_second.iter() {
                let increment = compute_index_increment(rate.amount, seconds, total_weight)?;
                let current = self.indexes.get(&rate.denom).unwrap_or_default();
                self.indexes.set(&rate.denom, current.checked_add(increment)?);
            }
        }

        self.previous_accumulation_time = Some(now);
        Ok(())
    }
}

/// Reward per unit of weight emitted over `seconds` at `rate` per second. The division truncates
/// so that the index multiplied by the total weight never exceeds what was emitted.
pub fn compute_index_increment(
    rate: Uint128,
    seconds: u64,
    total_weight: Uint128,
) -> Result<Decimal, ContractError> {
    let emitted = rate.checked_mul(Uint128::from(seconds))?;
    Ok(Decimal::checked_from_ratio(emitted, total_weight)?)
}

/// Advances the global indexes of `source` to `now` and returns them. The new state is only
/// saved if `storage` is mutable.
pub fn accumulate_rewards(
    storage: &mut MaybeMutStorage,
    kind: RewardKind,
    source: &str,
    periods: &[MultiRewardPeriod],
    total_weight: Uint128,
    now: u64,
) -> Result<(RewardIndexes, Option<Event>), ContractError> {
    let key = (kind.as_str(), source);
    let previous_accumulation_time = ACCRUAL_TIMES.may_load(storage.to_storage(), key)?;
    let indexes = GLOBAL_INDEXES.may_load(storage.to_storage(), key)?.unwrap_or_default();

    let source_periods =
        periods.iter().filter(|period| period.source == source).collect::<Vec<_>>();

    let mut accumulator = Accumulator::new(previous_accumulation_time, indexes);
    accumulator.accumulate(&source_periods, total_weight, now)?;

    let Accumulator {
        previous_accumulation_time,
        indexes,
    } = accumulator;

    if let MaybeMutStorage::Mutable(storage) = storage {
        ACCRUAL_TIMES.save(*storage, key, &previous_accumulation_time.unwrap_or(now))?;
        GLOBAL_INDEXES.save(*storage, key, &indexes)?;

        let event = Event::new("kestrel/incentives/accumulate")
            .add_attribute("kind", kind.to_string())
            .add_attribute("source", source)
            .add_attribute("total_weight", total_weight)
            .add_attribute("reward_indexes", indexes.to_string());
        return Ok((indexes, Some(event)));
    }

    Ok((indexes, None))
}

/// Accumulates every source with a reward period. Kinds without a registered hook source are
/// skipped.
pub fn execute_accumulate_rewards(
    mut deps: DepsMut,
    env: Env,
    kind: Option<RewardKind>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let kinds = match kind {
        Some(kind) => vec![kind],
        None => RewardKind::iter().collect(),
    };

    let mut response = Response::new();
    for kind in kinds {
        if config.hook_source(kind).is_none() {
            continue;
        }

        let periods = load_reward_periods(deps.storage, kind)?;
        for source in reward_sources(&periods) {
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

    Ok(response)
}
