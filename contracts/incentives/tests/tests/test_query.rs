use cosmwasm_std::coin;
use kestrel_types::{
    incentives::{
        Claim, ConfigResponse, MultiRewardIndexes, Params, QueryMsg, RewardKind,
    },
    staking::BondStatus,
};

use super::helpers::*;

#[test]
fn query_config() {
    let deps = th_setup(Params::default());

    let config: ConfigResponse = th_query(deps.as_ref(), QueryMsg::Config {});
    assert_eq!(
        config,
        ConfigResponse {
            owner: Some(OWNER.to_string()),
            proposed_new_owner: None,
            bond_denom: BOND_DENOM.to_string(),
            staking_hub: Some(STAKING_HUB.to_string()),
            swap: Some(SWAP.to_string()),
        }
    );
}

#[test]
fn query_params() {
    let deps = th_setup(hard_params());

    let params: Params = th_query(deps.as_ref(), QueryMsg::Params {});
    assert_eq!(params, hard_params());
}

#[test]
fn unknown_sources_have_no_indexes() {
    let deps = th_setup(hard_params());

    let indexes = th_global_indexes(deps.as_ref(), RewardKind::Delegator, "uatom");
    assert!(indexes.is_empty());

    let time: Option<u64> = th_query(
        deps.as_ref(),
        QueryMsg::AccrualTime {
            kind: RewardKind::Delegator,
            source: "uatom".to_string(),
        },
    );
    assert_eq!(time, None);
}

#[test]
fn all_reward_indexes_are_listed_per_kind() {
    let params = Params {
        delegator_reward_periods: vec![delegator_period(vec![coin(122_354, "hard")])],
        swap_reward_periods: vec![
            swap_period(POOL_ID, vec![coin(56_789, "swp")]),
            swap_period("hard:usdx", vec![coin(10, "swp")]),
        ],
    };
    let mut deps = th_setup(params);
    deps.querier.set_pool(ukava_usdx_pool(1_000_000));
    th_accumulate(deps.as_mut(), START, None).unwrap();

    let all: MultiRewardIndexes = th_query(
        deps.as_ref(),
        QueryMsg::AllRewardIndexes {
            kind: RewardKind::Swap,
        },
    );
    assert_eq!(
        all,
        MultiRewardIndexes::default()
            .with("hard:usdx", reward_indexes(&[("swp", "0")]))
            .with(POOL_ID, reward_indexes(&[("swp", "0")]))
    );

    let all: MultiRewardIndexes = th_query(
        deps.as_ref(),
        QueryMsg::AllRewardIndexes {
            kind: RewardKind::Delegator,
        },
    );
    assert_eq!(all.sources(), vec![BOND_DENOM.to_string()]);
}

#[test]
fn rewards_are_simulated_without_writing() {
    let mut deps = th_setup_delegation(hard_params());
    let stored = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();

    let simulated: Option<Claim> = th_query_at(
        deps.as_ref(),
        START + 100,
        QueryMsg::Rewards {
            kind: RewardKind::Delegator,
            owner: DELEGATOR.to_string(),
        },
    );
    let simulated = simulated.unwrap();
    assert_eq!(simulated.reward, vec![coin(6_117_700, "hard")]);

    // storage is untouched
    assert_eq!(th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap(), stored);
    let indexes = th_global_indexes(deps.as_ref(), RewardKind::Delegator, BOND_DENOM);
    assert_eq!(indexes, reward_indexes(&[("hard", "0")]));

    // and matches the real synchronization
    th_touch_delegation(&mut deps, START + 100, DELEGATOR, VALIDATOR);
    assert_eq!(th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap(), simulated);
}

#[test]
fn rewards_of_unknown_owners_are_none() {
    let deps = th_setup_delegation(hard_params());

    let simulated: Option<Claim> = th_query_at(
        deps.as_ref(),
        START + 100,
        QueryMsg::Rewards {
            kind: RewardKind::Delegator,
            owner: "stranger".to_string(),
        },
    );
    assert_eq!(simulated, None);
}

#[test]
fn claims_are_paginated() {
    let mut deps = th_setup(hard_params());
    deps.querier.set_validator(VALIDATOR, BondStatus::Bonded);

    let delegators = (0..35).map(|i| format!("delegator_{i:02}")).collect::<Vec<_>>();
    for delegator in delegators.iter() {
        th_delegate(&mut deps, START, delegator, VALIDATOR, 1_000);
    }

    let claims = |start_after: Option<&str>, limit: Option<u32>| -> Vec<Claim> {
        th_query(
            deps.as_ref(),
            QueryMsg::Claims {
                kind: RewardKind::Delegator,
                start_after: start_after.map(String::from),
                limit,
            },
        )
    };
    let owners = |claims: Vec<Claim>| -> Vec<String> {
        claims.into_iter().map(|claim| claim.owner.to_string()).collect()
    };

    // default limit
    assert_eq!(owners(claims(None, None)), delegators[..10].to_vec());

    // capped limit
    assert_eq!(owners(claims(None, Some(50))), delegators[..30].to_vec());

    // resumes after the given owner
    assert_eq!(owners(claims(Some("delegator_29"), Some(30))), delegators[30..].to_vec());

    // swap claims are kept apart
    let swap_claims: Vec<Claim> = th_query(
        deps.as_ref(),
        QueryMsg::Claims {
            kind: RewardKind::Swap,
            start_after: None,
            limit: None,
        },
    );
    assert!(swap_claims.is_empty());
}
