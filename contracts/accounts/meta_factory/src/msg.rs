use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary};
use cw_ownable::{cw_ownable_execute, cw_ownable_query};

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub factories: Vec<String>,
}

#[cw_ownable_execute]
#[cw_serde]
pub enum ExecuteMsg {
    /// Forward `msg` with the attached funds to an allowed factory. The
    /// factory's response data becomes this contract's response data.
    DeployWithFactory { factory: String, msg: Binary },
    AddFactory { factory: String },
    RemoveFactory { factory: String },
}

#[cw_ownable_query]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(bool)]
    IsFactoryAllowed { factory: String },
    #[returns(Vec<Addr>)]
    ListFactories {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}
