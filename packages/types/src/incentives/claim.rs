use std::collections::HashSet;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, Coins, StdError, StdResult};

use super::reward_index::MultiRewardIndexes;

/// Rewards accrued by one owner for one kind of source, plus the global indexes the owner was
/// last synchronized against.
#[cw_serde]
pub struct Claim {
    pub owner: Addr,
    /// Accrued rewards not yet paid out, sorted by denom
    pub reward: Vec<Coin>,
    /// Snapshot of the global indexes for every source the owner has weight in
    pub reward_indexes: MultiRewardIndexes,
}

impl Claim {
    pub fn new(owner: Addr) -> Self {
        Self {
            owner,
            reward: vec![],
            reward_indexes: MultiRewardIndexes::default(),
        }
    }

    pub fn has_source(&self, source: &str) -> bool {
        self.reward_indexes.get(source).is_some()
    }

    pub fn add_reward(&mut self, earned: &[Coin]) -> StdResult<()> {
        if earned.iter().all(|coin| coin.amount.is_zero()) {
            return Ok(());
        }
        let mut reward = Coins::default();
        for coin in self.reward.drain(..).chain(earned.iter().cloned()) {
            reward.add(coin)?;
        }
        self.reward = reward.into();
        Ok(())
    }

    /// Removes and returns the rewards for `denoms`, or all rewards if no denoms are given.
    pub fn take_reward(&mut self, denoms: Option<&[String]>) -> Vec<Coin> {
        let (taken, kept): (Vec<Coin>, Vec<Coin>) =
            self.reward.drain(..).partition(|coin| match denoms {
                Some(denoms) => denoms.contains(&coin.denom),
                None => true,
            });
        self.reward = kept;
        taken
    }

    pub fn validate(&self) -> StdResult<()> {
        let mut denoms = HashSet::new();
        for coin in self.reward.iter() {
            if coin.amount.is_zero() {
                return Err(StdError::generic_err(format!(
                    "claim of {} holds a zero reward for {}",
                    self.owner, coin.denom
                )));
            }
            if !denoms.insert(coin.denom.as_str()) {
                return Err(StdError::generic_err(format!(
                    "claim of {} holds duplicate reward denom {}",
                    self.owner, coin.denom
                )));
            }
        }
        self.reward_indexes.validate()
    }
}
