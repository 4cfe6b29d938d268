// Purpose: Account factory contract with Instantiate2-based deterministic creation
//
// Accounts live at an address fixed by the account code checksum, the factory
// address, the init payload and the caller's salt. Creation deploys the account
// and initializes it with the same payload in one atomic unit: if either step
// fails nothing is left behind and the same request can be submitted again.

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    from_json, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult, SubMsgResult,
};
use cw2::set_contract_version;
use nexus_factory_utils::compute_account_address;

use crate::error::ContractError;
use crate::msg::{ComputeAccountAddressResponse, Config, ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{CONFIG, CREATED_ACCOUNTS};

const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEPLOY_REPLY_ID: u64 = 1;

/// Errors the chain reports when a sub-message exhausts its gas limit: the
/// redacted ABCI error, or the raw gas meter panic which starts with the prefix
const OUT_OF_GAS_CODE: &str = "codespace: sdk, code: 11";
const OUT_OF_GAS_PREFIX: &str = "out of gas in location:";

fn is_out_of_gas(reason: &str) -> bool {
    reason.contains(OUT_OF_GAS_CODE) || reason.trim_start().starts_with(OUT_OF_GAS_PREFIX)
}

/// Initialize the account factory contract
///
/// Resolves the checksum of the account code once so that address derivation
/// never depends on later chain state.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let code_info = deps.querier.query_wasm_code_info(msg.account_code_id)?;
    CONFIG.save(
        deps.storage,
        &Config {
            account_code_id: msg.account_code_id,
            account_checksum: code_info.checksum,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("account_code_id", msg.account_code_id.to_string())
        .add_attribute("account_checksum", code_info.checksum.to_hex()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateAccount {
            init_payload,
            salt,
            gas_limit,
        } => execute::create_account(deps, env, info, init_payload, salt, gas_limit),
        ExecuteMsg::DeployAccount { init_payload, salt } => {
            execute::deploy_account(deps, env, info, init_payload, salt)
        }
    }
}

mod execute {
    use cosmwasm_std::{
        to_json_binary, Binary, DepsMut, Empty, Env, HexBinary, MessageInfo, Response, SubMsg,
        WasmMsg,
    };
    use nexus_account_utils::msg::{initialize_account_msg, InstantiateMsg as AccountInstantiateMsg};
    use nexus_factory_utils::{
        account_created_event, account_salt, compute_account_address, SALT_LENGTH,
    };

    use crate::error::ContractError;
    use crate::msg::{CreateAccountResponse, ExecuteMsg};
    use crate::state::{CONFIG, CREATED_ACCOUNTS};

    use super::DEPLOY_REPLY_ID;

    /// Deploy and initialize an account at its deterministic address
    ///
    /// The deployment runs as a self-call so that it can be bounded by
    /// `gas_limit` and its failure classified in `reply`.
    pub fn create_account(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        init_payload: Binary,
        salt: HexBinary,
        gas_limit: Option<u64>,
    ) -> Result<Response, ContractError> {
        if salt.len() != SALT_LENGTH {
            return Err(ContractError::InvalidSalt {
                expected: SALT_LENGTH,
                actual: salt.len(),
            });
        }

        let config = CONFIG.load(deps.storage)?;
        let account = compute_account_address(
            deps.api,
            &env.contract.address,
            &config.account_checksum,
            &init_payload,
            &salt,
        )?;

        if CREATED_ACCOUNTS.has(deps.storage, account.clone())
            || deps.querier.query_wasm_contract_info(&account).is_ok()
        {
            return Err(ContractError::AddressCollision { account });
        }

        let deploy = WasmMsg::Execute {
            contract_addr: env.contract.address.to_string(),
            msg: to_json_binary(&ExecuteMsg::DeployAccount {
                init_payload: init_payload.clone(),
                salt: salt.clone(),
            })?,
            funds: info.funds,
        };
        let deploy = match gas_limit {
            Some(limit) => SubMsg::reply_on_error(deploy, DEPLOY_REPLY_ID)
                .with_gas_limit(limit)
                .with_payload(to_json_binary(&limit)?),
            None => SubMsg::new(deploy),
        };

        CREATED_ACCOUNTS.save(deps.storage, account.clone(), &Empty {})?;

        Ok(Response::new()
            .add_submessage(deploy)
            .add_event(account_created_event(&account, &init_payload, &salt))
            .add_attribute("method", "create_account")
            .add_attribute("account", account.as_str())
            .set_data(to_json_binary(&CreateAccountResponse { account })?))
    }

    /// Instantiate the account and hand it its init payload
    pub fn deploy_account(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        init_payload: Binary,
        salt: HexBinary,
    ) -> Result<Response, ContractError> {
        if info.sender != env.contract.address {
            return Err(ContractError::Unauthorized {});
        }

        let config = CONFIG.load(deps.storage)?;
        let account = compute_account_address(
            deps.api,
            &env.contract.address,
            &config.account_checksum,
            &init_payload,
            &salt,
        )?;

        let instantiate = WasmMsg::Instantiate2 {
            admin: None,
            code_id: config.account_code_id,
            label: format!("nexus-account-{}", salt.to_hex()),
            msg: to_json_binary(&AccountInstantiateMsg {})?,
            funds: info.funds,
            salt: Binary::from(account_salt(&init_payload, &salt).to_vec()),
        };

        Ok(Response::new()
            .add_message(instantiate)
            .add_message(initialize_account_msg(&account, init_payload)?)
            .add_attribute("method", "deploy_account")
            .add_attribute("account", account))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        DEPLOY_REPLY_ID => match msg.result {
            SubMsgResult::Err(reason) => {
                let gas_limit: u64 = from_json(&msg.payload)?;
                // the reply only sees the error text, so other failures lose their type
                if is_out_of_gas(&reason) {
                    Err(ContractError::InsufficientResources { gas_limit })
                } else {
                    Err(ContractError::DeploymentFailed { reason })
                }
            }
            // only registered for errors
            SubMsgResult::Ok(_) => Ok(Response::new()),
        },
        id => Err(ContractError::UnknownReplyId(id)),
    }
}

/// Query entry point for reading factory state
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::ComputeAccountAddress { init_payload, salt } => {
            let config = CONFIG.load(deps.storage)?;
            let account = compute_account_address(
                deps.api,
                &env.contract.address,
                &config.account_checksum,
                &init_payload,
                &salt,
            )?;
            to_json_binary(&ComputeAccountAddressResponse { account })
        }
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::IsAccountCreated { account } => {
            let account = deps.api.addr_validate(&account)?;
            to_json_binary(&CREATED_ACCOUNTS.has(deps.storage, account))
        }
    }
}
