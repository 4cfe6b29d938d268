use cosmwasm_std::{Addr, StdError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Install rejected: {0}")]
    InstallRejected(String),

    #[error("Install data must not be empty")]
    EmptyInstallData,

    #[error("Module already installed on {0}")]
    AlreadyInstalled(Addr),

    #[error("Module not installed on {0}")]
    NotInstalled(Addr),
}
