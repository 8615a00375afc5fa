use std::{
    cmp::{max, min},
    collections::HashSet,
};

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Coin;
use kestrel_utils::{error::ValidationError, helpers::validate_native_denom};

/// An emission schedule paying `rewards_per_second` to everyone with weight in `source`
/// between `start` and `end` (seconds since the UNIX epoch).
#[cw_serde]
pub struct MultiRewardPeriod {
    /// Bond denom for delegator rewards, pool id for swap rewards
    pub source: String,
    pub start: u64,
    pub end: u64,
    /// Amount of each reward denom emitted every second, shared by all weight in the source
    pub rewards_per_second: Vec<Coin>,
}

impl MultiRewardPeriod {
    pub fn new(
        source: impl Into<String>,
        start: u64,
        end: u64,
        rewards_per_second: Vec<Coin>,
    ) -> Self {
        Self {
            source: source.into(),
            start,
            end,
            rewards_per_second,
        }
    }

    pub fn reward_denoms(&self) -> impl Iterator<Item = &str> {
        self.rewards_per_second.iter().map(|coin| coin.denom.as_str())
    }

    /// Number of seconds of the interval `[from, to]` that fall within this period.
    pub fn seconds_within(&self, from: u64, to: u64) -> u64 {
        let start = max(from, self.start);
        let end = min(to, self.end);
        end.saturating_sub(start)
    }

    pub fn overlaps(&self, other: &MultiRewardPeriod) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_native_denom(&self.source)?;

        if self.end <= self.start {
            return Err(ValidationError::InvalidParam {
                param_name: "end".to_string(),
                invalid_value: self.end.to_string(),
                predicate: format!("> {}", self.start),
            });
        }

        let mut denoms = HashSet::new();
        for coin in self.rewards_per_second.iter() {
            validate_native_denom(&coin.denom)?;
            if !denoms.insert(coin.denom.as_str()) {
                return Err(ValidationError::InvalidParam {
                    param_name: "rewards_per_second".to_string(),
                    invalid_value: coin.denom.clone(),
                    predicate: "unique denoms".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Validates each period, and that periods of the same source never pay the same denom at the
/// same time.
pub fn validate_reward_periods(periods: &[MultiRewardPeriod]) -> Result<(), ValidationError> {
    for (i, period) in periods.iter().enumerate() {
        period.validate()?;

        for other in periods[i + 1..].iter() {
            if period.source != other.source || !period.overlaps(other) {
                continue;
            }
            let shared = period.reward_denoms().find(|d| other.reward_denoms().any(|o| o == *d));
            if let Some(denom) = shared {
                return Err(ValidationError::InvalidParam {
                    param_name: "rewards_per_second".to_string(),
                    invalid_value: format!("{} for source {}", denom, period.source),
                    predicate: "not paid by overlapping periods of the same source".to_string(),
                });
            }
        }
    }

    Ok(())
}
