// Purpose: Message types for account factory contract
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Checksum, HexBinary};

#[cw_serde]
pub struct InstantiateMsg {
    pub account_code_id: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Deploy an account at the address derived from `init_payload` and `salt`
    /// and initialize it with `init_payload`. With `gas_limit` set, deployment
    /// and initialization share that budget.
    CreateAccount {
        init_payload: Binary,
        salt: HexBinary,
        gas_limit: Option<u64>,
    },
    /// Deployment unit dispatched by the factory to itself
    DeployAccount {
        init_payload: Binary,
        salt: HexBinary,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Compute the deterministic address for an account
    #[returns(ComputeAccountAddressResponse)]
    ComputeAccountAddress {
        init_payload: Binary,
        salt: HexBinary,
    },
    #[returns(Config)]
    Config {},
    /// Check if an account has been created by this factory
    #[returns(bool)]
    IsAccountCreated { account: String },
}

#[cw_serde]
pub struct Config {
    pub account_code_id: u64,
    // Checksum of the account code, fixed for the lifetime of the factory
    pub account_checksum: Checksum,
}

#[cw_serde]
pub struct ComputeAccountAddressResponse {
    pub account: Addr,
}

/// Response data of `CreateAccount`
#[cw_serde]
pub struct CreateAccountResponse {
    pub account: Addr,
}
