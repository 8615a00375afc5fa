use std::collections::HashMap;

use cosmwasm_std::{to_json_binary, Binary, ContractResult, QuerierResult};
use kestrel_types::swap::{PoolRecord, QueryMsg, ShareRecord};

/// Pools and deposits of a mocked swap contract. Records are returned as set, without validation.
#[derive(Default)]
pub struct SwapQuerier {
    pub pools: HashMap<String, PoolRecord>,
    /// (depositor, pool id) -> share record
    pub shares: HashMap<(String, String), ShareRecord>,
}

impl SwapQuerier {
    pub fn handle_query(&self, query: QueryMsg) -> QuerierResult {
        let ret: ContractResult<Binary> = match query {
            QueryMsg::Pool {
                pool_id,
            } => to_json_binary(&self.pools.get(&pool_id)).into(),
            QueryMsg::DepositorShares {
                depositor,
                pool_id,
            } => to_json_binary(&self.shares.get(&(depositor, pool_id))).into(),
        };
        Ok(ret).into()
    }
}
