use cosmwasm_std::{
    from_json,
    testing::MockQuerier,
    Decimal, Empty, Querier, QuerierResult, QueryRequest, SystemError, SystemResult, Uint128,
    WasmQuery,
};
use kestrel_types::{
    staking::{self, BondStatus},
    swap::{self, PoolRecord, ShareRecord},
};

use crate::{staking_querier::StakingQuerier, swap_querier::SwapQuerier};

pub struct KestrelMockQuerier {
    base: MockQuerier<Empty>,
    staking_querier: StakingQuerier,
    swap_querier: SwapQuerier,
}

impl Querier for KestrelMockQuerier {
    fn raw_query(&self, bin_request: &[u8]) -> QuerierResult {
        let request: QueryRequest<Empty> = match from_json(bin_request) {
            Ok(v) => v,
            Err(e) => {
                return SystemResult::Err(SystemError::InvalidRequest {
                    error: format!("Parsing query request: {e}"),
                    request: bin_request.into(),
                })
            }
        };

        self.handle_query(&request)
    }
}

impl KestrelMockQuerier {
    pub fn new(base: MockQuerier<Empty>) -> Self {
        KestrelMockQuerier {
            base,
            staking_querier: StakingQuerier::default(),
            swap_querier: SwapQuerier::default(),
        }
    }

    pub fn set_validator(&mut self, validator: &str, status: BondStatus) {
        self.staking_querier.validators.insert(validator.to_string(), status);
    }

    /// Sets the tokens `delegator` has delegated to `validator`. Zero removes the delegation.
    pub fn set_delegation(&mut self, delegator: &str, validator: &str, amount: impl Into<Uint128>) {
        let key = (delegator.to_string(), validator.to_string());
        let amount = amount.into();
        if amount.is_zero() {
            self.staking_querier.delegations.remove(&key);
        } else {
            self.staking_querier.delegations.insert(key, amount);
        }
    }

    /// Multiplies every delegation to `validator` by `1 - fraction`, rounding down
    pub fn slash_validator(&mut self, validator: &str, fraction: Decimal) {
        let remaining = Decimal::one() - fraction;
        for ((_, val), amount) in self.staking_querier.delegations.iter_mut() {
            if val == validator {
                *amount = amount.mul_floor(remaining);
            }
        }
    }

    pub fn delegation(&self, delegator: &str, validator: &str) -> Uint128 {
        self.staking_querier
            .delegations
            .get(&(delegator.to_string(), validator.to_string()))
            .copied()
            .unwrap_or_default()
    }

    pub fn total_bonded(&self) -> Uint128 {
        self.staking_querier.total_bonded()
    }

    pub fn set_pool(&mut self, pool: PoolRecord) {
        self.swap_querier.pools.insert(pool.pool_id.clone(), pool);
    }

    pub fn pool(&self, pool_id: &str) -> Option<PoolRecord> {
        self.swap_querier.pools.get(pool_id).cloned()
    }

    pub fn remove_pool(&mut self, pool_id: &str) {
        self.swap_querier.pools.remove(pool_id);
    }

    pub fn set_depositor_shares(&mut self, shares: ShareRecord) {
        let key = (shares.depositor.to_string(), shares.pool_id.clone());
        self.swap_querier.shares.insert(key, shares);
    }

    pub fn depositor_shares(&self, depositor: &str, pool_id: &str) -> Uint128 {
        self.swap_querier
            .shares
            .get(&(depositor.to_string(), pool_id.to_string()))
            .map(|record| record.shares_owned)
            .unwrap_or_default()
    }

    pub fn handle_query(&self, request: &QueryRequest<Empty>) -> QuerierResult {
        match &request {
            QueryRequest::Wasm(WasmQuery::Smart {
                contract_addr: _,
                msg,
            }) => {
                // Staking hub Queries
                if let Ok(staking_query) = from_json::<staking::QueryMsg>(msg) {
                    return self.staking_querier.handle_query(staking_query);
                }

                // Swap Queries
                if let Ok(swap_query) = from_json::<swap::QueryMsg>(msg) {
                    return self.swap_querier.handle_query(swap_query);
                }

                panic!("[mock]: Unsupported wasm query: {msg:?}");
            }

            _ => self.base.handle_query(request),
        }
    }
}
