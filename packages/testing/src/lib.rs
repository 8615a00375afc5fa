#![cfg(not(target_arch = "wasm32"))]

/// cosmwasm_std::testing overrides and mocks of the staking hub and swap contracts
mod kestrel_mock_querier;
mod mocks;
mod staking_querier;
mod swap_querier;

pub use kestrel_mock_querier::KestrelMockQuerier;
pub use mocks::*;
