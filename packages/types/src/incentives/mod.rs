mod claim;
mod genesis;
mod msg;
mod period;
mod reward_index;

pub use claim::*;
pub use genesis::*;
pub use msg::*;
pub use period::*;
pub use reward_index::*;
