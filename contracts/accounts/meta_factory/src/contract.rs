#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Order, Reply, Response,
    StdError, StdResult,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;

use crate::{
    error::ContractError,
    msg::{ExecuteMsg, InstantiateMsg, QueryMsg},
    state::FACTORIES,
};

// version info for migration info
const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// pagination info for queries
const MAX_PAGE_LIMIT: u32 = 250;

pub const FORWARD_REPLY_ID: u64 = 1;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    cw_ownable::initialize_owner(deps.storage, deps.api, Some(&msg.owner))?;

    msg.factories.iter().try_for_each(|factory| {
        FACTORIES.save(deps.storage, deps.api.addr_validate(factory)?, &Empty {})
    })?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", msg.owner)
        .add_attribute("factories", msg.factories.len().to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::DeployWithFactory { factory, msg } => {
            execute::deploy_with_factory(deps, info, factory, msg)
        }
        ExecuteMsg::AddFactory { factory } => {
            cw_ownable::assert_owner(deps.storage, &info.sender)?;
            execute::add_factory(deps, factory)
        }
        ExecuteMsg::RemoveFactory { factory } => {
            cw_ownable::assert_owner(deps.storage, &info.sender)?;
            execute::remove_factory(deps, factory)
        }
        ExecuteMsg::UpdateOwnership(action) => {
            let ownership = cw_ownable::update_ownership(deps, &env.block, &info.sender, action)?;
            Ok(Response::new().add_attributes(ownership.into_attributes()))
        }
    }
}

mod execute {
    use cosmwasm_std::{Binary, DepsMut, Empty, MessageInfo, Response, SubMsg, WasmMsg};

    use crate::{error::ContractError, state::FACTORIES};

    use super::FORWARD_REPLY_ID;

    pub fn deploy_with_factory(
        deps: DepsMut,
        info: MessageInfo,
        factory: String,
        msg: Binary,
    ) -> Result<Response, ContractError> {
        // unparseable addresses can never have been allowed
        let factory_addr = deps
            .api
            .addr_validate(&factory)
            .ok()
            .filter(|addr| FACTORIES.has(deps.storage, addr.clone()))
            .ok_or(ContractError::UnauthorizedFactory { factory })?;

        let forward = WasmMsg::Execute {
            contract_addr: factory_addr.to_string(),
            msg,
            funds: info.funds,
        };

        Ok(Response::new()
            .add_submessage(
                SubMsg::reply_on_success(forward, FORWARD_REPLY_ID)
                    .with_payload(factory_addr.as_bytes().to_vec()),
            )
            .add_attribute("method", "deploy_with_factory")
            .add_attribute("factory", factory_addr)
            .add_attribute("sender", info.sender))
    }

    pub fn add_factory(deps: DepsMut, factory: String) -> Result<Response, ContractError> {
        let addr = deps.api.addr_validate(&factory)?;
        if FACTORIES.has(deps.storage, addr.clone()) {
            return Err(ContractError::FactoryAlreadyAllowed { factory });
        }
        FACTORIES.save(deps.storage, addr.clone(), &Empty {})?;

        Ok(Response::new()
            .add_attribute("method", "add_factory")
            .add_attribute("factory", addr))
    }

    pub fn remove_factory(deps: DepsMut, factory: String) -> Result<Response, ContractError> {
        let addr = deps.api.addr_validate(&factory)?;
        if !FACTORIES.has(deps.storage, addr.clone()) {
            return Err(ContractError::UnauthorizedFactory { factory });
        }
        FACTORIES.remove(deps.storage, addr.clone());

        Ok(Response::new()
            .add_attribute("method", "remove_factory")
            .add_attribute("factory", addr))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        FORWARD_REPLY_ID => {
            let factory = String::from_utf8_lossy(msg.payload.as_slice()).into_owned();
            let response = msg.result.into_result().map_err(StdError::generic_err)?;

            // newer chains only fill msg_responses
            #[allow(deprecated)]
            let encoded = match response.msg_responses.first() {
                Some(msg_response) => Some(msg_response.value.clone()),
                None => response.data,
            };
            let data = match encoded {
                Some(bytes) => cw_utils::parse_execute_response_data(bytes.as_slice())?.data,
                None => None,
            }
            .ok_or(ContractError::MissingFactoryResponse {
                factory: factory.clone(),
            })?;

            Ok(Response::new()
                .set_data(data)
                .add_attribute("method", "forward_reply")
                .add_attribute("factory", factory))
        }
        id => Err(ContractError::UnknownReplyId(id)),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Ownership {} => to_json_binary(&cw_ownable::get_ownership(deps.storage)?),
        QueryMsg::IsFactoryAllowed { factory } => {
            let allowed = deps
                .api
                .addr_validate(&factory)
                .is_ok_and(|addr| FACTORIES.has(deps.storage, addr));
            to_json_binary(&allowed)
        }
        QueryMsg::ListFactories { start_after, limit } => {
            to_json_binary(&list_factories(deps, start_after, limit)?)
        }
    }
}

fn list_factories(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Vec<Addr>> {
    let limit = limit.unwrap_or(MAX_PAGE_LIMIT).min(MAX_PAGE_LIMIT);
    let start = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?
        .map(Bound::exclusive);

    FACTORIES
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit as usize)
        .collect()
}
