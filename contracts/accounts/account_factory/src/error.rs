use cosmwasm_std::{Addr, StdError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Salt must be {expected} bytes, got {actual}")]
    InvalidSalt { expected: usize, actual: usize },

    #[error("Account already exists: {account}")]
    AddressCollision { account: Addr },

    #[error("Unauthorized: accounts can only be deployed through CreateAccount")]
    Unauthorized {},

    #[error("Account deployment ran out of gas (limit {gas_limit})")]
    InsufficientResources { gas_limit: u64 },

    #[error("Account deployment failed: {reason}")]
    DeploymentFailed { reason: String },

    #[error("Unknown reply id: {0}")]
    UnknownReplyId(u64),
}
