use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{to_json_binary, Addr, Binary, CosmosMsg, StdResult, WasmMsg};
use nexus_module_utils::ModuleType;

#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    // Installs the modules encoded in `init_payload`. Succeeds at most once per account.
    InitializeAccount { init_payload: Binary },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(InitState)]
    InitState {},
    #[returns(bool)]
    IsInitialized {},
    // Address that instantiated the account, normally the factory
    #[returns(Addr)]
    Deployer {},
    // Installed modules in install order, optionally filtered by type
    #[returns(Vec<InstalledModule>)]
    InstalledModules { module_type: Option<ModuleType> },
    #[returns(bool)]
    IsModuleInstalled {
        module_type: ModuleType,
        module: String,
    },
    // Asks an installed validator whether `signature` over `hash` is valid for this account
    #[returns(bool)]
    IsValidSignature {
        validator: String,
        sender: String,
        hash: Binary,
        signature: Binary,
    },
}

/// Lifecycle of the one-time initialization. The only transitions are
/// `Uninitialized -> Initializing -> Initialized`.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum InitState {
    Uninitialized,
    // Module installs are in flight; any initializer call is rejected
    Initializing,
    Initialized,
}

#[cw_serde]
pub struct InstalledModule {
    pub module: Addr,
    pub module_type: ModuleType,
}

pub fn initialize_account_msg(account: &Addr, init_payload: Binary) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: account.to_string(),
        msg: to_json_binary(&ExecuteMsg::InitializeAccount { init_payload })?,
        funds: vec![],
    }))
}
