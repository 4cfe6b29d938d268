use cosmwasm_std::StdError;
use cw_ownable::OwnershipError;
use cw_utils::ParseReplyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    OwnershipError(#[from] OwnershipError),

    #[error(transparent)]
    ParseReply(#[from] ParseReplyError),

    #[error("Factory {factory} is not allowed")]
    UnauthorizedFactory { factory: String },

    #[error("Factory {factory} is already allowed")]
    FactoryAlreadyAllowed { factory: String },

    #[error("Factory {factory} returned no response data")]
    MissingFactoryResponse { factory: String },

    #[error("Unknown reply id: {0}")]
    UnknownReplyId(u64),
}
