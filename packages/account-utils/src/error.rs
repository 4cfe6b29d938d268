use cosmwasm_std::StdError;
use nexus_bootstrap_utils::BootstrapError;
use nexus_module_utils::ModuleType;
use thiserror::Error;

use crate::msg::InitState;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] UnauthorizedReason),

    #[error("Account is already initialized")]
    AlreadyInitialized,

    #[error("Invalid init payload: {0}")]
    InvalidPayload(#[from] BootstrapError),

    #[error("Invalid module {module}: {reason}")]
    InvalidModule { module: String, reason: String },

    #[error("Module {module} is already installed as a {module_type}")]
    ModuleAlreadyInstalled {
        module: String,
        module_type: ModuleType,
    },

    #[error("Install completed while account was {0:?}")]
    UnexpectedInitState(InitState),

    #[error("Unknown reply id: {0}")]
    UnknownReplyId(u64),
}

#[derive(Error, Debug, PartialEq)]
pub enum UnauthorizedReason {
    #[error("Not the account deployer")]
    NotDeployer,
}
