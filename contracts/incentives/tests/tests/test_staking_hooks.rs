use cosmwasm_std::{coin, Decimal};
use kestrel_incentives::ContractError;
use kestrel_types::{
    incentives::{
        Claim, GenesisState, MultiRewardIndexes, Params, RewardKind, StakingHookMsg,
    },
    staking::BondStatus,
};

use super::helpers::*;

#[test]
fn delegating_creates_a_claim_at_current_indexes() {
    let mut deps = th_setup_delegation(hard_params());

    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    assert!(claim.reward.is_empty());
    assert_eq!(
        claim.reward_indexes,
        MultiRewardIndexes::default().with(BOND_DENOM, reward_indexes(&[("hard", "0")]))
    );

    // a second delegator joining later does not earn what was emitted before
    th_delegate(&mut deps, START + 100, "late_delegator", VALIDATOR, 500_000);
    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, "late_delegator").unwrap();
    assert!(claim.reward.is_empty());
    assert_eq!(
        claim.reward_indexes.get(BOND_DENOM),
        Some(&reward_indexes(&[("hard", "6.1177")]))
    );
}

#[test]
fn rewards_follow_the_index_delta() {
    let mut deps = th_setup_delegation(hard_params());

    // ten blocks of ten seconds
    for block in 1..=10 {
        th_accumulate(deps.as_mut(), START + block * 10, None).unwrap();
    }
    th_touch_delegation(&mut deps, START + 100, DELEGATOR, VALIDATOR);

    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    assert_eq!(claim.reward, vec![coin(6_117_700, "hard")]);
    assert_eq!(
        claim.reward_indexes.get(BOND_DENOM),
        Some(&reward_indexes(&[("hard", "6.1177")]))
    );
}

#[test]
fn synchronizing_twice_in_one_block_is_idempotent() {
    let mut deps = th_setup_delegation(hard_params());

    th_touch_delegation(&mut deps, START + 7, DELEGATOR, VALIDATOR);
    let first = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    th_touch_delegation(&mut deps, START + 7, DELEGATOR, VALIDATOR);
    let second = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();

    assert_eq!(first.reward, vec![coin(428_239, "hard")]);
    assert_eq!(first, second);
}

#[test]
fn delegation_changes_apply_from_the_change_onwards() {
    let mut deps = th_setup_delegation(hard_params());

    // 10 seconds at 1,000,000 of 2,000,000
    th_delegate(&mut deps, START + 10, DELEGATOR, VALIDATOR, 2_000_000);
    // 10 seconds at 3,000,000 of 4,000,000
    th_touch_delegation(&mut deps, START + 20, DELEGATOR, VALIDATOR);

    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    // 1,000,000 * 0.61177 + 3,000,000 * 0.305885
    assert_eq!(claim.reward, vec![coin(611_770 + 917_655, "hard")]);
}

#[test]
fn full_undelegation_keeps_rewards_and_leaves_the_source() {
    let mut deps = th_setup_delegation(hard_params());

    th_undelegate(&mut deps, START + 10, DELEGATOR, VALIDATOR, 1_000_000);

    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    assert_eq!(claim.reward, vec![coin(611_770, "hard")]);
    assert!(!claim.has_source(BOND_DENOM));

    // nothing more accrues
    th_touch_delegation(&mut deps, START + 100, DELEGATOR, VALIDATOR);
    let later = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    assert_eq!(later, claim);
}

#[test]
fn validator_unbonding_stops_accrual() {
    let mut deps = th_setup_delegation(hard_params());

    th_begin_unbonding(&mut deps, START + 10, VALIDATOR);

    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    assert_eq!(claim.reward, vec![coin(611_770, "hard")]);
    assert!(!claim.has_source(BOND_DENOM));

    th_touch_delegation(&mut deps, START + 100, DELEGATOR, VALIDATOR);

    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    assert_eq!(claim.reward, vec![coin(611_770, "hard")]);
    assert!(!claim.has_source(BOND_DENOM));

    // with no bonded tokens left the index does not move
    let indexes = th_global_indexes(deps.as_ref(), RewardKind::Delegator, BOND_DENOM);
    assert_eq!(indexes, reward_indexes(&[("hard", "0.61177")]));
}

#[test]
fn unbonding_keeps_the_source_while_other_delegations_are_bonded() {
    let mut deps = th_setup_delegation(hard_params());
    deps.querier.set_validator("validator_2", BondStatus::Bonded);
    th_delegate(&mut deps, START, DELEGATOR, "validator_2", 1_000_000);

    // 2,000,000 of 3,000,000 for 30 seconds
    th_begin_unbonding(&mut deps, START + 30, VALIDATOR);
    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    assert_eq!(claim.reward, vec![coin(2_447_080, "hard")]);
    assert!(claim.has_source(BOND_DENOM));

    // then all 1,000,000 bonded for 10 seconds
    th_touch_delegation(&mut deps, START + 40, DELEGATOR, "validator_2");
    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    assert_eq!(claim.reward, vec![coin(2_447_080 + 1_223_540, "hard")]);
}

#[test]
fn redelegating_between_bonded_validators_keeps_earning() {
    let mut deps = th_setup_delegation(hard_params());
    deps.querier.set_validator("validator_2", BondStatus::Bonded);

    th_redelegate(&mut deps, START + 10, DELEGATOR, VALIDATOR, "validator_2", 1_000_000);

    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    assert_eq!(claim.reward, vec![coin(611_770, "hard")]);
    assert_eq!(
        claim.reward_indexes.get(BOND_DENOM),
        Some(&reward_indexes(&[("hard", "0.61177")]))
    );

    // same weight of the same total
    th_touch_delegation(&mut deps, START + 20, DELEGATOR, "validator_2");
    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    assert_eq!(claim.reward, vec![coin(1_223_540, "hard")]);
}

#[test]
fn redelegating_to_an_unbonded_validator_stops_accrual() {
    let mut deps = th_setup_delegation(hard_params());
    deps.querier.set_validator("validator_2", BondStatus::Unbonded);

    th_redelegate(&mut deps, START + 10, DELEGATOR, VALIDATOR, "validator_2", 1_000_000);

    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    assert_eq!(claim.reward, vec![coin(611_770, "hard")]);
    assert!(!claim.has_source(BOND_DENOM));

    th_touch_delegation(&mut deps, START + 20, DELEGATOR, "validator_2");
    let later = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    assert_eq!(later, claim);

    // the self delegation is all that is left bonded
    let indexes = th_global_indexes(deps.as_ref(), RewardKind::Delegator, BOND_DENOM);
    assert_eq!(indexes, reward_indexes(&[("hard", "1.83531")]));
}

#[test]
fn bonding_a_validator_is_not_retroactive() {
    let mut deps = th_setup_delegation(hard_params());
    deps.querier.set_validator("validator_2", BondStatus::Unbonded);
    th_delegate(&mut deps, START, "delegator_2", "validator_2", 500_000);
    assert_eq!(th_claim(deps.as_ref(), RewardKind::Delegator, "delegator_2"), None);

    th_bond_validator(&mut deps, START + 50, "validator_2");

    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, "delegator_2").unwrap();
    assert!(claim.reward.is_empty());
    assert_eq!(
        claim.reward_indexes.get(BOND_DENOM),
        Some(&reward_indexes(&[("hard", "3.05885")]))
    );

    // from now on the total is 2,500,000
    th_touch_delegation(&mut deps, START + 60, "delegator_2", "validator_2");
    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, "delegator_2").unwrap();
    assert_eq!(claim.reward, vec![coin(244_708, "hard")]);
}

#[test]
fn bonding_a_validator_settles_existing_delegators_first() {
    let mut deps = th_setup_delegation(hard_params());
    deps.querier.set_validator("validator_2", BondStatus::Unbonded);
    th_delegate(&mut deps, START, DELEGATOR, "validator_2", 1_000_000);

    th_bond_validator(&mut deps, START + 10, "validator_2");

    // the first 10 seconds only count the bonded delegation
    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    assert_eq!(claim.reward, vec![coin(611_770, "hard")]);

    // then 2,000,000 of 3,000,000 for 30 seconds
    th_touch_delegation(&mut deps, START + 40, DELEGATOR, VALIDATOR);
    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    assert_eq!(claim.reward, vec![coin(611_770 + 2_447_080, "hard")]);
}

#[test]
fn slashing_settles_before_the_weight_drops() {
    let mut deps = th_setup_delegation(hard_params());

    th_slash(&mut deps, START + 10, VALIDATOR, Decimal::percent(50));

    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    assert_eq!(claim.reward, vec![coin(611_770, "hard")]);
    assert_eq!(deps.querier.delegation(DELEGATOR, VALIDATOR).u128(), 500_000);

    // 500,000 of 1,000,000 for 10 seconds
    th_touch_delegation(&mut deps, START + 20, DELEGATOR, VALIDATOR);
    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    assert_eq!(claim.reward, vec![coin(1_223_540, "hard")]);
}

#[test]
fn new_reward_denoms_accrue_from_zero_for_existing_claims() {
    let mut deps = th_setup_delegation(hard_params());

    let periods = vec![delegator_period(vec![coin(122_354, "hard"), coin(567_889, "swp")])];
    th_execute(
        deps.as_mut(),
        START + 10,
        OWNER,
        kestrel_types::incentives::ExecuteMsg::UpdateRewardPeriods {
            kind: RewardKind::Delegator,
            periods,
        },
    )
    .unwrap();

    th_touch_delegation(&mut deps, START + 17, DELEGATOR, VALIDATOR);

    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    // 17 seconds of hard, 7 seconds of swp
    assert_eq!(claim.reward, vec![coin(1_040_009, "hard"), coin(1_987_611, "swp")]);
}

#[test]
fn claim_indexes_above_global_are_rejected() {
    let mut claim = Claim::new(cosmwasm_std::Addr::unchecked(DELEGATOR));
    claim.reward_indexes =
        MultiRewardIndexes::default().with(BOND_DENOM, reward_indexes(&[("hard", "1")]));
    let genesis = GenesisState {
        delegator: kestrel_types::incentives::GenesisRewardState {
            accumulation_times: vec![kestrel_types::incentives::AccumulationTime::new(
                BOND_DENOM, START,
            )],
            multi_reward_indexes: MultiRewardIndexes::default()
                .with(BOND_DENOM, reward_indexes(&[("hard", "0.5")])),
        },
        delegator_claims: vec![claim],
        ..Default::default()
    };
    let mut deps = th_setup_with_genesis(hard_params(), Some(genesis));
    deps.querier.set_validator(VALIDATOR, BondStatus::Bonded);
    deps.querier.set_delegation(DELEGATOR, VALIDATOR, 1_000_000u128);

    let err = th_staking_hook(
        deps.as_mut(),
        START,
        StakingHookMsg::BeforeDelegationModified {
            delegator: DELEGATOR.to_string(),
            validator: VALIDATOR.to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::NegativeRewardDelta {
            reward_source: BOND_DENOM.to_string(),
            denom: "hard".to_string(),
            global: d("0.5"),
            claim: d("1"),
        }
    );
}

#[test]
fn hooks_are_only_accepted_from_the_staking_hub() {
    let mut deps = th_setup(Params::default());

    let err = th_execute(
        deps.as_mut(),
        START,
        "impostor",
        kestrel_types::incentives::ExecuteMsg::StakingHook(StakingHookMsg::AfterValidatorBonded {
            validator: VALIDATOR.to_string(),
        }),
    )
    .unwrap_err();
    assert_eq!(err, ContractError::Unauthorized {});
}
