pub mod error;
pub mod incentives;
pub mod staking;
pub mod swap;
pub mod traits;
