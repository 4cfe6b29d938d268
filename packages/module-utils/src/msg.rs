//! Interface every installable module contract exposes to accounts.
//!
//! Module contracts are free to add their own variants to their execute and
//! query enums, but must accept the JSON shapes below unchanged.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{to_json_binary, Addr, Binary, CosmosMsg, QuerierWrapper, StdResult, WasmMsg};

use crate::ModuleType;

#[cw_serde]
pub enum ModuleExecuteMsg {
    // Called by the account when the module is installed, with the per-module init data
    OnInstall { data: Binary },
    // Called by the account when the module is removed
    OnUninstall { data: Binary },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum ModuleQueryMsg {
    // Whether the module can be installed under the given ERC-7579 type id
    #[returns(bool)]
    IsModuleType { type_id: u64 },
    // Whether the module holds install state for `account`
    #[returns(bool)]
    IsInitialized { account: String },
    // Validator modules only: checks `signature` over `hash` on behalf of `account`
    #[returns(bool)]
    IsValidSignatureWithSender {
        account: String,
        sender: String,
        hash: Binary,
        signature: Binary,
    },
    // Validator modules only: checks `signature` over a user operation hash
    // submitted through the account entry point
    #[returns(bool)]
    ValidateUserOp {
        account: String,
        user_op_hash: Binary,
        signature: Binary,
    },
}

pub fn on_install_msg(module: &Addr, data: Binary) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: module.to_string(),
        msg: to_json_binary(&ModuleExecuteMsg::OnInstall { data })?,
        funds: vec![],
    }))
}

pub fn on_uninstall_msg(module: &Addr, data: Binary) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: module.to_string(),
        msg: to_json_binary(&ModuleExecuteMsg::OnUninstall { data })?,
        funds: vec![],
    }))
}

pub fn query_is_module_type(
    querier: &QuerierWrapper,
    module: &Addr,
    module_type: ModuleType,
) -> StdResult<bool> {
    querier.query_wasm_smart(
        module,
        &ModuleQueryMsg::IsModuleType {
            type_id: module_type.type_id(),
        },
    )
}

pub fn query_is_valid_signature(
    querier: &QuerierWrapper,
    validator: &Addr,
    account: &Addr,
    sender: &Addr,
    hash: Binary,
    signature: Binary,
) -> StdResult<bool> {
    querier.query_wasm_smart(
        validator,
        &ModuleQueryMsg::IsValidSignatureWithSender {
            account: account.to_string(),
            sender: sender.to_string(),
            hash,
            signature,
        },
    )
}

pub fn query_validate_user_op(
    querier: &QuerierWrapper,
    validator: &Addr,
    account: &Addr,
    user_op_hash: Binary,
    signature: Binary,
) -> StdResult<bool> {
    querier.query_wasm_smart(
        validator,
        &ModuleQueryMsg::ValidateUserOp {
            account: account.to_string(),
            user_op_hash,
            signature,
        },
    )
}
