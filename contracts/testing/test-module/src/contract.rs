#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;
use nexus_module_utils::ModuleType;

use crate::{
    error::ContractError,
    msg::{signature_for, ExecuteMsg, InstantiateMsg, QueryMsg},
    state::{INSTALLS, INSTALL_CALLBACK, INSTALL_FAILURE, MODULE_TYPES},
};

// version info for migration info
const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    MODULE_TYPES.save(deps.storage, &msg.module_types)?;
    INSTALL_FAILURE.save(deps.storage, &None)?;
    INSTALL_CALLBACK.save(deps.storage, &None)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute(
            "module_types",
            msg.module_types
                .iter()
                .map(ModuleType::to_string)
                .collect::<Vec<_>>()
                .join(","),
        ))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::OnInstall { data } => execute::on_install(deps, info, data),
        ExecuteMsg::OnUninstall { data: _ } => execute::on_uninstall(deps, info),
        ExecuteMsg::SetInstallFailure { reason } => {
            INSTALL_FAILURE.save(deps.storage, &reason)?;
            Ok(Response::new().add_attribute("method", "set_install_failure"))
        }
        ExecuteMsg::SetInstallCallback { msg } => {
            INSTALL_CALLBACK.save(deps.storage, &msg)?;
            Ok(Response::new().add_attribute("method", "set_install_callback"))
        }
    }
}

mod execute {
    use cosmwasm_std::{Binary, DepsMut, MessageInfo, Response, WasmMsg};

    use crate::{
        state::{INSTALLS, INSTALL_CALLBACK, INSTALL_FAILURE},
        ContractError,
    };

    pub fn on_install(
        deps: DepsMut,
        info: MessageInfo,
        data: Binary,
    ) -> Result<Response, ContractError> {
        if let Some(reason) = INSTALL_FAILURE.load(deps.storage)? {
            return Err(ContractError::InstallRejected(reason));
        }
        if data.is_empty() {
            return Err(ContractError::EmptyInstallData);
        }
        if INSTALLS.has(deps.storage, info.sender.clone()) {
            return Err(ContractError::AlreadyInstalled(info.sender));
        }

        INSTALLS.save(deps.storage, info.sender.clone(), &data)?;

        let mut response = Response::new()
            .add_attribute("method", "on_install")
            .add_attribute("account", info.sender.as_str());

        if let Some(msg) = INSTALL_CALLBACK.load(deps.storage)? {
            response = response.add_message(WasmMsg::Execute {
                contract_addr: info.sender.to_string(),
                msg,
                funds: vec![],
            });
        }

        Ok(response)
    }

    pub fn on_uninstall(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
        if !INSTALLS.has(deps.storage, info.sender.clone()) {
            return Err(ContractError::NotInstalled(info.sender));
        }
        INSTALLS.remove(deps.storage, info.sender.clone());

        Ok(Response::new()
            .add_attribute("method", "on_uninstall")
            .add_attribute("account", info.sender))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::IsModuleType { type_id } => {
            let module_types = MODULE_TYPES.load(deps.storage)?;
            let supported = ModuleType::from_type_id(type_id)
                .is_some_and(|module_type| module_types.contains(&module_type));
            to_json_binary(&supported)
        }
        QueryMsg::IsInitialized { account } => {
            let account = deps.api.addr_validate(&account)?;
            to_json_binary(&INSTALLS.has(deps.storage, account))
        }
        QueryMsg::IsValidSignatureWithSender {
            account,
            sender: _,
            hash,
            signature,
        } => to_json_binary(&verify(deps, &account, &hash, &signature)?),
        QueryMsg::ValidateUserOp {
            account,
            user_op_hash,
            signature,
        } => to_json_binary(&verify(deps, &account, &user_op_hash, &signature)?),
        QueryMsg::InstallData { account } => {
            let account = deps.api.addr_validate(&account)?;
            to_json_binary(&INSTALLS.may_load(deps.storage, account)?)
        }
    }
}

fn verify(deps: Deps, account: &str, hash: &Binary, signature: &Binary) -> StdResult<bool> {
    let account = deps.api.addr_validate(account)?;
    Ok(INSTALLS
        .may_load(deps.storage, account)?
        .is_some_and(|owner| signature_for(&owner, hash) == *signature))
}
