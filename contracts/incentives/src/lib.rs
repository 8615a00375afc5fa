pub mod accumulator;
pub mod claim;
pub mod config;
pub mod contract;
pub mod delegator;
mod error;
pub mod genesis;
pub mod helpers;
pub mod query;
pub mod state;
pub mod swap;
pub mod synchronizer;

pub use error::ContractError;
