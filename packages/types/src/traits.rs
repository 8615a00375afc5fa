use cosmwasm_std::Coin;

use crate::incentives::RewardIndexes;

/// Renders values as event attribute values
pub trait Stringify {
    fn to_string(&self) -> String;
}

impl Stringify for &[Coin] {
    fn to_string(&self) -> String {
        self.iter().map(|coin| coin.to_string()).collect::<Vec<String>>().join(",")
    }
}

impl Stringify for RewardIndexes {
    fn to_string(&self) -> String {
        self.iter()
            .map(|index| format!("{}:{}", index.reward_denom, index.reward_factor))
            .collect::<Vec<String>>()
            .join(",")
    }
}
