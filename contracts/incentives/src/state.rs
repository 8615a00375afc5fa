use cosmwasm_std::{Addr, Order, StdResult, Storage};
use cw_storage_plus::{Item, Map};
use kestrel_types::incentives::{
    Claim, Config, MultiRewardIndexes, MultiRewardPeriod, RewardIndexes, RewardKind,
};
use mars_owner::Owner;

/// The owner of the contract
pub const OWNER: Owner = Owner::new("owner");

/// The configuration of the contract
pub const CONFIG: Item<Config> = Item::new("config");

/// Reward periods of every reward kind. The key is the reward kind.
pub const REWARD_PERIODS: Map<&str, Vec<MultiRewardPeriod>> = Map::new("reward_periods");

/// Global reward indexes. The key is (reward kind, source).
pub const GLOBAL_INDEXES: Map<(&str, &str), RewardIndexes> = Map::new("global_indexes");

/// Last time the global indexes of a source were accumulated. The key is (reward kind, source).
pub const ACCRUAL_TIMES: Map<(&str, &str), u64> = Map::new("accrual_times");

/// Claims of every owner. The key is (reward kind, owner address).
pub const CLAIMS: Map<(&str, &Addr), Claim> = Map::new("claims");

/// The default limit for pagination over claims
pub const DEFAULT_LIMIT: u32 = 10;

/// The maximum limit for pagination over claims
pub const MAX_LIMIT: u32 = 30;

/// A helper enum to represent a storage that can either be immutable or mutable. Accrual code
/// takes it so that it persists on execute and only simulates on query.
pub enum MaybeMutStorage<'a> {
    Immutable(&'a dyn Storage),
    Mutable(&'a mut dyn Storage),
}

impl<'a> From<&'a dyn Storage> for MaybeMutStorage<'a> {
    fn from(storage: &'a dyn Storage) -> Self {
        MaybeMutStorage::Immutable(storage)
    }
}

impl<'a> From<&'a mut dyn Storage> for MaybeMutStorage<'a> {
    fn from(storage: &'a mut dyn Storage) -> Self {
        MaybeMutStorage::Mutable(storage)
    }
}

impl MaybeMutStorage<'_> {
    pub fn to_storage(&self) -> &dyn Storage {
        match self {
            MaybeMutStorage::Immutable(storage) => *storage,
            MaybeMutStorage::Mutable(storage) => *storage,
        }
    }
}

pub fn load_reward_periods(
    storage: &dyn Storage,
    kind: RewardKind,
) -> StdResult<Vec<MultiRewardPeriod>> {
    Ok(REWARD_PERIODS.may_load(storage, kind.as_str())?.unwrap_or_default())
}

/// Sources with at least one reward period, in order of first appearance
pub fn reward_sources(periods: &[MultiRewardPeriod]) -> Vec<String> {
    let mut sources: Vec<String> = vec![];
    for period in periods {
        if !sources.contains(&period.source) {
            sources.push(period.source.clone());
        }
    }
    sources
}

pub fn load_global_indexes(
    storage: &dyn Storage,
    kind: RewardKind,
    source: &str,
) -> StdResult<Option<RewardIndexes>> {
    GLOBAL_INDEXES.may_load(storage, (kind.as_str(), source))
}

pub fn load_all_global_indexes(
    storage: &dyn Storage,
    kind: RewardKind,
) -> StdResult<MultiRewardIndexes> {
    let mut all = MultiRewardIndexes::default();
    for item in GLOBAL_INDEXES.prefix(kind.as_str()).range(storage, None, None, Order::Ascending) {
        let (source, indexes) = item?;
        all.set(&source, indexes);
    }
    Ok(all)
}

pub fn load_accrual_time(
    storage: &dyn Storage,
    kind: RewardKind,
    source: &str,
) -> StdResult<Option<u64>> {
    ACCRUAL_TIMES.may_load(storage, (kind.as_str(), source))
}

pub fn load_claim(
    storage: &dyn Storage,
    kind: RewardKind,
    owner: &Addr,
) -> StdResult<Option<Claim>> {
    CLAIMS.may_load(storage, (kind.as_str(), owner))
}

pub fn save_claim(storage: &mut dyn Storage, kind: RewardKind, claim: &Claim) -> StdResult<()> {
    CLAIMS.save(storage, (kind.as_str(), &claim.owner), claim)
}
