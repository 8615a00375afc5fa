use std::collections::HashSet;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Decimal, StdError, StdResult};

/// The cumulative reward paid out per unit of weight for one reward denom
#[cw_serde]
pub struct RewardIndex {
    /// Denom of the reward being paid out
    pub reward_denom: String,
    /// Total reward per unit of weight accrued since the source was first rewarded
    pub reward_factor: Decimal,
}

impl RewardIndex {
    pub fn new(reward_denom: impl Into<String>, reward_factor: Decimal) -> Self {
        Self {
            reward_denom: reward_denom.into(),
            reward_factor,
        }
    }
}

/// Reward indexes of a single source, one entry per reward denom.
///
/// Entries keep their insertion order so that the serialized form is identical on every node.
#[cw_serde]
#[derive(Default)]
pub struct RewardIndexes(Vec<RewardIndex>);

impl RewardIndexes {
    pub fn new(indexes: Vec<RewardIndex>) -> Self {
        RewardIndexes(indexes)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RewardIndex> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, reward_denom: &str) -> Option<Decimal> {
        self.0
            .iter()
            .find(|index| index.reward_denom == reward_denom)
            .map(|index| index.reward_factor)
    }

    /// Inserts or overwrites the factor of `reward_denom`. An existing entry keeps its position.
    pub fn set(&mut self, reward_denom: &str, reward_factor: Decimal) {
        match self.0.iter_mut().find(|index| index.reward_denom == reward_denom) {
            Some(index) => index.reward_factor = reward_factor,
            None => self.0.push(RewardIndex::new(reward_denom, reward_factor)),
        }
    }

    pub fn with(mut self, reward_denom: &str, reward_factor: Decimal) -> Self {
        self.set(reward_denom, reward_factor);
        self
    }

    /// Adds a zero factor for every denom in `reward_denoms` not tracked yet.
    pub fn zero_filled<'a>(mut self, reward_denoms: impl IntoIterator<Item = &'a str>) -> Self {
        for reward_denom in reward_denoms {
            if self.get(reward_denom).is_none() {
                self.0.push(RewardIndex::new(reward_denom, Decimal::zero()));
            }
        }
        self
    }

    /// Sums two sets of indexes denom by denom. Denoms missing on either side count as zero.
    pub fn add(&self, other: &RewardIndexes) -> StdResult<RewardIndexes> {
        let mut sum = self.clone();
        for index in other.iter() {
            let current = sum.get(&index.reward_denom).unwrap_or_default();
            sum.set(&index.reward_denom, current.checked_add(index.reward_factor)?);
        }
        Ok(sum)
    }

    pub fn mul(&self, multiplier: Decimal) -> StdResult<RewardIndexes> {
        self.0
            .iter()
            .map(|index| {
                let factor = index.reward_factor.checked_mul(multiplier)?;
                Ok(RewardIndex::new(&index.reward_denom, factor))
            })
            .collect::<StdResult<Vec<_>>>()
            .map(RewardIndexes)
    }

    pub fn validate(&self) -> StdResult<()> {
        let mut seen = HashSet::new();
        for index in self.iter() {
            if index.reward_denom.is_empty() {
                return Err(StdError::generic_err("reward index has an empty denom"));
            }
            if !seen.insert(index.reward_denom.as_str()) {
                return Err(StdError::generic_err(format!(
                    "duplicate reward denom in reward indexes: {}",
                    index.reward_denom
                )));
            }
        }
        Ok(())
    }
}

impl From<Vec<RewardIndex>> for RewardIndexes {
    fn from(indexes: Vec<RewardIndex>) -> Self {
        RewardIndexes(indexes)
    }
}

/// The reward indexes of one source, e.g. the bond denom or a pool id
#[cw_serde]
pub struct MultiRewardIndex {
    pub source: String,
    pub reward_indexes: RewardIndexes,
}

impl MultiRewardIndex {
    pub fn new(source: impl Into<String>, reward_indexes: RewardIndexes) -> Self {
        Self {
            source: source.into(),
            reward_indexes,
        }
    }
}

/// Reward indexes for several sources, one entry per source, in insertion order.
#[cw_serde]
#[derive(Default)]
pub struct MultiRewardIndexes(Vec<MultiRewardIndex>);

impl MultiRewardIndexes {
    pub fn new(indexes: Vec<MultiRewardIndex>) -> Self {
        MultiRewardIndexes(indexes)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MultiRewardIndex> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sources(&self) -> Vec<String> {
        self.0.iter().map(|index| index.source.clone()).collect()
    }

    pub fn get(&self, source: &str) -> Option<&RewardIndexes> {
        self.0.iter().find(|index| index.source == source).map(|index| &index.reward_indexes)
    }

    pub fn set(&mut self, source: &str, reward_indexes: RewardIndexes) {
        match self.0.iter_mut().find(|index| index.source == source) {
            Some(index) => index.reward_indexes = reward_indexes,
            None => self.0.push(MultiRewardIndex::new(source, reward_indexes)),
        }
    }

    pub fn with(mut self, source: &str, reward_indexes: RewardIndexes) -> Self {
        self.set(source, reward_indexes);
        self
    }

    pub fn remove(&mut self, source: &str) {
        self.0.retain(|index| index.source != source);
    }

    pub fn validate(&self) -> StdResult<()> {
        let mut seen = HashSet::new();
        for index in self.iter() {
            if index.source.is_empty() {
                return Err(StdError::generic_err("multi reward index has an empty source"));
            }
            if !seen.insert(index.source.as_str()) {
                return Err(StdError::generic_err(format!(
                    "duplicate source in multi reward indexes: {}",
                    index.source
                )));
            }
            index.reward_indexes.validate()?;
        }
        Ok(())
    }
}

impl From<Vec<MultiRewardIndex>> for MultiRewardIndexes {
    fn from(indexes: Vec<MultiRewardIndex>) -> Self {
        MultiRewardIndexes(indexes)
    }
}
