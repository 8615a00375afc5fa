use cosmwasm_std::{coin, BankMsg, Response, SubMsg, Uint128};
use kestrel_incentives::ContractError;
use kestrel_types::incentives::{Claim, ExecuteMsg, Params, QueryMsg, RewardKind, SwapHookMsg};

use super::helpers::*;

fn th_claim_rewards(
    deps: &mut MockDeps,
    time: u64,
    owner: &str,
    kind: RewardKind,
    denoms: Option<Vec<&str>>,
) -> Result<Response, ContractError> {
    th_execute(
        deps.as_mut(),
        time,
        owner,
        ExecuteMsg::ClaimRewards {
            kind,
            denoms: denoms.map(|denoms| denoms.into_iter().map(String::from).collect()),
        },
    )
}

fn two_denom_params() -> Params {
    Params {
        delegator_reward_periods: vec![delegator_period(vec![
            coin(122_354, "hard"),
            coin(567_889, "swp"),
        ])],
        swap_reward_periods: vec![],
    }
}

#[test]
fn claiming_pays_out_accrued_rewards() {
    let mut deps = th_setup_delegation(hard_params());

    let res = th_claim_rewards(&mut deps, START + 100, DELEGATOR, RewardKind::Delegator, None)
        .unwrap();
    assert_eq!(
        res.messages,
        vec![SubMsg::new(BankMsg::Send {
            to_address: DELEGATOR.to_string(),
            amount: vec![coin(6_117_700, "hard")],
        })]
    );

    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    assert!(claim.reward.is_empty());
    assert_eq!(
        claim.reward_indexes.get(BOND_DENOM),
        Some(&reward_indexes(&[("hard", "6.1177")]))
    );

    // nothing left in the same block
    let res = th_claim_rewards(&mut deps, START + 100, DELEGATOR, RewardKind::Delegator, None)
        .unwrap();
    assert!(res.messages.is_empty());
}

#[test]
fn claiming_selected_denoms_keeps_the_rest() {
    let mut deps = th_setup_delegation(two_denom_params());

    let res = th_claim_rewards(
        &mut deps,
        START + 7,
        DELEGATOR,
        RewardKind::Delegator,
        Some(vec!["swp"]),
    )
    .unwrap();
    assert_eq!(
        res.messages,
        vec![SubMsg::new(BankMsg::Send {
            to_address: DELEGATOR.to_string(),
            amount: vec![coin(1_987_611, "swp")],
        })]
    );

    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    assert_eq!(claim.reward, vec![coin(428_239, "hard")]);

    let res = th_claim_rewards(
        &mut deps,
        START + 7,
        DELEGATOR,
        RewardKind::Delegator,
        Some(vec!["hard", "unknown"]),
    )
    .unwrap();
    assert_eq!(
        res.messages,
        vec![SubMsg::new(BankMsg::Send {
            to_address: DELEGATOR.to_string(),
            amount: vec![coin(428_239, "hard")],
        })]
    );
}

#[test]
fn claiming_without_a_claim_sends_nothing() {
    let mut deps = th_setup_delegation(hard_params());

    let res = th_claim_rewards(&mut deps, START + 100, "stranger", RewardKind::Delegator, None)
        .unwrap();
    assert!(res.messages.is_empty());
    assert_eq!(th_claim(deps.as_ref(), RewardKind::Delegator, "stranger"), None);
}

#[test]
fn rewards_of_departed_sources_can_still_be_claimed() {
    let mut deps = th_setup_delegation(hard_params());
    th_undelegate(&mut deps, START + 10, DELEGATOR, VALIDATOR, 1_000_000);

    let res = th_claim_rewards(&mut deps, START + 100, DELEGATOR, RewardKind::Delegator, None)
        .unwrap();
    assert_eq!(
        res.messages,
        vec![SubMsg::new(BankMsg::Send {
            to_address: DELEGATOR.to_string(),
            amount: vec![coin(611_770, "hard")],
        })]
    );
}

#[test]
fn swap_rewards_are_claimed_separately() {
    let params = Params {
        delegator_reward_periods: vec![delegator_period(vec![coin(122_354, "hard")])],
        swap_reward_periods: vec![swap_period(POOL_ID, vec![coin(56_789, "swp")])],
    };
    let mut deps = th_setup_delegation(params);
    deps.querier.set_pool(ukava_usdx_pool(1_000_000));
    deps.querier.set_depositor_shares(share_record(DELEGATOR, POOL_ID, 1_000_000));
    th_swap_hook(
        deps.as_mut(),
        START,
        SwapHookMsg::AfterPoolDepositCreated {
            depositor: DELEGATOR.to_string(),
            pool_id: POOL_ID.to_string(),
            shares_owned: Uint128::new(1_000_000),
        },
    )
    .unwrap();

    let res =
        th_claim_rewards(&mut deps, START + 50, DELEGATOR, RewardKind::Swap, None).unwrap();
    assert_eq!(
        res.messages,
        vec![SubMsg::new(BankMsg::Send {
            to_address: DELEGATOR.to_string(),
            amount: vec![coin(2_839_450, "swp")],
        })]
    );

    // delegator rewards are untouched
    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    assert!(claim.reward.is_empty());
    assert_eq!(
        claim.reward_indexes.get(BOND_DENOM),
        Some(&reward_indexes(&[("hard", "0")]))
    );
}

#[test]
fn credited_rewards_are_paid_after_hooks_are_cleared() {
    let mut deps = th_setup_delegation(hard_params());
    th_touch_delegation(&mut deps, START + 10, DELEGATOR, VALIDATOR);
    th_execute(
        deps.as_mut(),
        START + 10,
        OWNER,
        ExecuteMsg::ClearHooks {
            kind: RewardKind::Delegator,
        },
    )
    .unwrap();

    // no weight can be read any more, so nothing accrues past what was credited
    let simulated: Option<Claim> = th_query_at(
        deps.as_ref(),
        START + 100,
        QueryMsg::Rewards {
            kind: RewardKind::Delegator,
            owner: DELEGATOR.to_string(),
        },
    );
    assert_eq!(simulated.unwrap().reward, vec![coin(611_770, "hard")]);

    let res = th_claim_rewards(&mut deps, START + 100, DELEGATOR, RewardKind::Delegator, None)
        .unwrap();
    assert_eq!(
        res.messages,
        vec![SubMsg::new(BankMsg::Send {
            to_address: DELEGATOR.to_string(),
            amount: vec![coin(611_770, "hard")],
        })]
    );

    let claim = th_claim(deps.as_ref(), RewardKind::Delegator, DELEGATOR).unwrap();
    assert!(claim.reward.is_empty());
    assert_eq!(
        claim.reward_indexes.get(BOND_DENOM),
        Some(&reward_indexes(&[("hard", "0.61177")]))
    );
}
