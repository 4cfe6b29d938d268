use cosmwasm_std::StdError;
use nexus_module_utils::ModuleType;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum BootstrapError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Bootstrap config must install at least one validator")]
    NoValidators,

    #[error("Module {module} is listed as a {expected} but declared as a {found}")]
    ModuleTypeMismatch {
        module: String,
        expected: ModuleType,
        found: ModuleType,
    },
}
