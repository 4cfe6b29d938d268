#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Order, Reply, Response, StdError,
    StdResult,
};
use cw2::set_contract_version;
use nexus_account_utils::{
    error::ContractError,
    msg::{ExecuteMsg, InitState, InstalledModule, InstantiateMsg, QueryMsg},
};
use nexus_module_utils::{msg::query_is_valid_signature, ModuleType};

use crate::state::{DEPLOYER, INIT_STATE, MODULES};

// version info for migration info
const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const INSTALL_COMPLETE_REPLY_ID: u64 = 1;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    _msg: InstantiateMsg,
) -> StdResult<Response> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    INIT_STATE.save(deps.storage, &InitState::Uninitialized)?;
    DEPLOYER.save(deps.storage, &info.sender)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("deployer", info.sender))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::InitializeAccount { init_payload } => {
            execute::initialize_account(deps, info, init_payload)
        }
    }
}

mod execute {
    use cosmwasm_std::{Addr, Binary, Deps, DepsMut, MessageInfo, Response, SubMsg};
    use nexus_account_utils::{
        error::{ContractError, UnauthorizedReason},
        msg::InitState,
    };
    use nexus_bootstrap_utils::{BootstrapConfig, BootstrapError, ModuleInit};
    use nexus_module_utils::msg::{on_install_msg, query_is_module_type};

    use crate::state::{DEPLOYER, INIT_STATE, MODULES};

    use super::INSTALL_COMPLETE_REPLY_ID;

    pub fn initialize_account(
        deps: DepsMut,
        info: MessageInfo,
        init_payload: Binary,
    ) -> Result<Response, ContractError> {
        // Checked before the caller so that module callbacks made while
        // installing are rejected the same way as any late caller
        if INIT_STATE.load(deps.storage)? != InitState::Uninitialized {
            return Err(ContractError::AlreadyInitialized);
        }
        if info.sender != DEPLOYER.load(deps.storage)? {
            return Err(UnauthorizedReason::NotDeployer.into());
        }

        let config = BootstrapConfig::from_payload(&init_payload)?;

        let mut install_msgs = vec![];
        for (position, init) in config.install_sequence().enumerate() {
            let module = validate_module(deps.as_ref(), init)?;

            let key = (init.module_type.type_id(), module.clone());
            if MODULES.has(deps.storage, key.clone()) {
                return Err(ContractError::ModuleAlreadyInstalled {
                    module: module.to_string(),
                    module_type: init.module_type,
                });
            }
            MODULES.save(deps.storage, key, &(position as u32))?;

            install_msgs.push(on_install_msg(&module, init.init_data.clone())?);
        }

        INIT_STATE.save(deps.storage, &InitState::Initializing)?;

        let installed = install_msgs.len();
        // validated configs always carry a validator
        let last_install = install_msgs.pop().ok_or(BootstrapError::NoValidators)?;

        Ok(Response::new()
            .add_messages(install_msgs)
            .add_submessage(SubMsg::reply_on_success(
                last_install,
                INSTALL_COMPLETE_REPLY_ID,
            ))
            .add_attribute("method", "initialize_account")
            .add_attribute("modules", installed.to_string()))
    }

    fn validate_module(deps: Deps, init: &ModuleInit) -> Result<Addr, ContractError> {
        let invalid = |reason: String| ContractError::InvalidModule {
            module: init.module.clone(),
            reason,
        };

        let module = deps
            .api
            .addr_validate(&init.module)
            .map_err(|e| invalid(e.to_string()))?;

        let supported = query_is_module_type(&deps.querier, &module, init.module_type)
            .map_err(|e| invalid(e.to_string()))?;
        if !supported {
            return Err(invalid(format!(
                "does not support module type {}",
                init.module_type
            )));
        }

        Ok(module)
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        INSTALL_COMPLETE_REPLY_ID => {
            let state = INIT_STATE.load(deps.storage)?;
            if state != InitState::Initializing {
                return Err(ContractError::UnexpectedInitState(state));
            }
            INIT_STATE.save(deps.storage, &InitState::Initialized)?;

            Ok(Response::new().add_attribute("method", "install_complete"))
        }
        id => Err(ContractError::UnknownReplyId(id)),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::InitState {} => to_json_binary(&INIT_STATE.load(deps.storage)?),
        QueryMsg::IsInitialized {} => {
            to_json_binary(&(INIT_STATE.load(deps.storage)? == InitState::Initialized))
        }
        QueryMsg::Deployer {} => to_json_binary(&DEPLOYER.load(deps.storage)?),
        QueryMsg::InstalledModules { module_type } => {
            to_json_binary(&query_installed_modules(deps, module_type)?)
        }
        QueryMsg::IsModuleInstalled {
            module_type,
            module,
        } => {
            let module = deps.api.addr_validate(&module)?;
            to_json_binary(&MODULES.has(deps.storage, (module_type.type_id(), module)))
        }
        QueryMsg::IsValidSignature {
            validator,
            sender,
            hash,
            signature,
        } => {
            let validator = deps.api.addr_validate(&validator)?;
            let sender = deps.api.addr_validate(&sender)?;
            if !MODULES.has(
                deps.storage,
                (ModuleType::Validator.type_id(), validator.clone()),
            ) {
                return Err(StdError::generic_err(format!(
                    "validator {validator} is not installed"
                )));
            }

            let valid = query_is_valid_signature(
                &deps.querier,
                &validator,
                &env.contract.address,
                &sender,
                hash,
                signature,
            )?;
            to_json_binary(&valid)
        }
    }
}

fn query_installed_modules(
    deps: Deps,
    module_type: Option<ModuleType>,
) -> StdResult<Vec<InstalledModule>> {
    let mut modules = MODULES
        .range(deps.storage, None, None, Order::Ascending)
        .filter(|entry| match (entry, module_type) {
            (Ok(((type_id, _), _)), Some(filter)) => *type_id == filter.type_id(),
            _ => true,
        })
        .map(|entry| {
            let ((type_id, module), position) = entry?;
            let module_type = ModuleType::from_type_id(type_id).ok_or_else(|| {
                StdError::generic_err(format!("unknown module type id {type_id}"))
            })?;
            Ok((position, InstalledModule {
                module,
                module_type,
            }))
        })
        .collect::<StdResult<Vec<_>>>()?;

    modules.sort_by_key(|(position, _)| *position);

    Ok(modules.into_iter().map(|(_, module)| module).collect())
}
