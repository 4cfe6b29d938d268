// Purpose: Account factory contract entry point and tests
pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use contract::*;
pub use error::ContractError;
pub use msg::*;
pub use state::*;
