use std::fmt;

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Decimal, Uint128};
use mars_owner::OwnerUpdate;
use strum::EnumIter;

use super::{
    claim::Claim,
    genesis::GenesisState,
    period::MultiRewardPeriod,
    reward_index::{MultiRewardIndexes, RewardIndexes},
};

/// The kinds of weight the contract rewards. Each kind has its own claims, indexes and periods.
#[cw_serde]
#[derive(Copy, Eq, Hash, EnumIter)]
pub enum RewardKind {
    /// Native tokens delegated to bonded validators, the source being the bond denom
    Delegator,
    /// Liquidity provider shares of a swap pool, the source being the pool id
    Swap,
}

impl RewardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewardKind::Delegator => "delegator",
            RewardKind::Swap => "swap",
        }
    }
}

impl fmt::Display for RewardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Global configuration
#[cw_serde]
pub struct Config {
    /// Denom delegated to validators; the only delegator reward source
    pub bond_denom: String,
    /// Contract sending staking hooks and answering staking queries
    pub staking_hub: Option<Addr>,
    /// Contract sending swap hooks and answering pool queries
    pub swap: Option<Addr>,
}

impl Config {
    pub fn hook_source(&self, kind: RewardKind) -> Option<&Addr> {
        match kind {
            RewardKind::Delegator => self.staking_hub.as_ref(),
            RewardKind::Swap => self.swap.as_ref(),
        }
    }

    pub fn set_hook_source(&mut self, kind: RewardKind, addr: Option<Addr>) {
        match kind {
            RewardKind::Delegator => self.staking_hub = addr,
            RewardKind::Swap => self.swap = addr,
        }
    }
}

/// Emission schedules of every reward kind
#[cw_serde]
#[derive(Default)]
pub struct Params {
    pub delegator_reward_periods: Vec<MultiRewardPeriod>,
    pub swap_reward_periods: Vec<MultiRewardPeriod>,
}

impl Params {
    pub fn reward_periods(&self, kind: RewardKind) -> &[MultiRewardPeriod] {
        match kind {
            RewardKind::Delegator => &self.delegator_reward_periods,
            RewardKind::Swap => &self.swap_reward_periods,
        }
    }
}

#[cw_serde]
pub struct InstantiateMsg {
    /// Contract owner
    pub owner: String,
    /// Denom delegated to validators
    pub bond_denom: String,
    /// Staking hub allowed to send staking hooks
    pub staking_hub: Option<String>,
    /// Swap contract allowed to send swap hooks
    pub swap: Option<String>,
    /// Initial emission schedules
    pub params: Params,
    /// State to start from, e.g. when migrating from another chain
    pub genesis: Option<GenesisState>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Notification from the staking hub. Only callable by the registered staking hub.
    StakingHook(StakingHookMsg),

    /// Notification from the swap contract. Only callable by the registered swap contract.
    SwapHook(SwapHookMsg),

    /// Advance the global reward indexes of every source with a reward period up to the
    /// current block time. Only the given kind is accumulated if one is provided.
    AccumulateRewards {
        kind: Option<RewardKind>,
    },

    /// Synchronize the sender's claim and send them the accrued rewards.
    ClaimRewards {
        kind: RewardKind,
        /// Reward denoms to pay out. All denoms are paid out if not provided.
        denoms: Option<Vec<String>>,
    },

    /// Replace the reward periods of a kind (only callable by owner). Existing periods are
    /// accumulated up to the current block time first.
    UpdateRewardPeriods {
        kind: RewardKind,
        periods: Vec<MultiRewardPeriod>,
    },

    /// Register the contract sending hooks of a kind (only callable by owner). Fails if one
    /// is already registered.
    RegisterHooks {
        kind: RewardKind,
        addr: String,
    },

    /// Unregister the contract sending hooks of a kind (only callable by owner)
    ClearHooks {
        kind: RewardKind,
    },

    /// Manages owner role state
    UpdateOwner(OwnerUpdate),
}

/// Hooks sent by the staking hub. `Before*` hooks must be delivered before the delegation or
/// validator changes, `After*` hooks after it.
#[cw_serde]
pub enum StakingHookMsg {
    /// A delegation is about to be created
    BeforeDelegationCreated {
        delegator: String,
        validator: String,
    },
    /// The shares of an existing delegation are about to change (delegate, undelegate,
    /// redelegate away)
    BeforeDelegationModified {
        delegator: String,
        validator: String,
    },
    /// A delegation was created or modified
    AfterDelegationModified {
        delegator: String,
        validator: String,
    },
    /// A validator entered the bonded set
    AfterValidatorBonded {
        validator: String,
    },
    /// A validator left the bonded set
    AfterValidatorBeginUnbonding {
        validator: String,
    },
    /// A validator is about to be slashed by `fraction`
    BeforeValidatorSlashed {
        validator: String,
        fraction: Decimal,
    },
}

impl StakingHookMsg {
    pub fn name(&self) -> &'static str {
        match self {
            StakingHookMsg::BeforeDelegationCreated {
                ..
            } => "before_delegation_created",
            StakingHookMsg::BeforeDelegationModified {
                ..
            } => "before_delegation_modified",
            StakingHookMsg::AfterDelegationModified {
                ..
            } => "after_delegation_modified",
            StakingHookMsg::AfterValidatorBonded {
                ..
            } => "after_validator_bonded",
            StakingHookMsg::AfterValidatorBeginUnbonding {
                ..
            } => "after_validator_begin_unbonding",
            StakingHookMsg::BeforeValidatorSlashed {
                ..
            } => "before_validator_slashed",
        }
    }
}

/// Hooks sent by the swap contract
#[cw_serde]
pub enum SwapHookMsg {
    /// A depositor provided liquidity to a pool for the first time
    AfterPoolDepositCreated {
        depositor: String,
        pool_id: String,
        shares_owned: Uint128,
    },
    /// A depositor's shares are about to change. `shares_owned` is the amount before the change.
    BeforePoolDepositModified {
        depositor: String,
        pool_id: String,
        shares_owned: Uint128,
    },
}

impl SwapHookMsg {
    pub fn name(&self) -> &'static str {
        match self {
            SwapHookMsg::AfterPoolDepositCreated {
                ..
            } => "after_pool_deposit_created",
            SwapHookMsg::BeforePoolDepositModified {
                ..
            } => "before_pool_deposit_modified",
        }
    }
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Query contract config
    #[returns(ConfigResponse)]
    Config {},

    /// Query the reward periods of every kind
    #[returns(Params)]
    Params {},

    /// Query the global reward indexes of a source, as last accumulated
    #[returns(RewardIndexes)]
    RewardIndexes {
        kind: RewardKind,
        source: String,
    },

    /// Query the global reward indexes of every source of a kind
    #[returns(MultiRewardIndexes)]
    AllRewardIndexes {
        kind: RewardKind,
    },

    /// Query the last time the global indexes of a source were accumulated
    #[returns(Option<u64>)]
    AccrualTime {
        kind: RewardKind,
        source: String,
    },

    /// Query a claim as stored, without synchronizing it
    #[returns(Option<Claim>)]
    Claim {
        kind: RewardKind,
        owner: String,
    },

    /// Enumerate stored claims with pagination
    #[returns(Vec<Claim>)]
    Claims {
        kind: RewardKind,
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Query a claim as it would be after accumulating and synchronizing at the current block
    /// time
    #[returns(Option<Claim>)]
    Rewards {
        kind: RewardKind,
        owner: String,
    },

    /// Export the whole accrual state
    #[returns(GenesisState)]
    ExportGenesis {},
}

#[cw_serde]
pub struct ConfigResponse {
    /// The contract's owner
    pub owner: Option<String>,
    /// The contract's proposed owner
    pub proposed_new_owner: Option<String>,
    /// Denom delegated to validators
    pub bond_denom: String,
    /// Contract sending staking hooks
    pub staking_hub: Option<String>,
    /// Contract sending swap hooks
    pub swap: Option<String>,
}
