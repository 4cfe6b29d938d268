use cosmwasm_std::{
    testing::{mock_dependencies, mock_env},
    Addr, Binary, Reply, SubMsgResponse, SubMsgResult,
};
use cw_multi_test::{error::AnyResult, App, AppResponse, ContractWrapper, Executor};
use getset::Getters;
use itertools::Itertools;
use nexus_account_utils::{
    error::{ContractError, UnauthorizedReason},
    msg::{ExecuteMsg, InitState, InstalledModule, InstantiateMsg, QueryMsg},
    testing::{AccountTestSuite, AccountTestSuiteBase},
};
use nexus_bootstrap_utils::{BootstrapConfig, ModuleInit};
use nexus_module_utils::ModuleType;
use nexus_test_module::msg::signature_for;

use crate::{contract::INSTALL_COMPLETE_REPLY_ID, state::INIT_STATE};

#[derive(Getters)]
struct NexusAccountTestSuite {
    #[getset(get)]
    inner: AccountTestSuiteBase,
}

impl Default for NexusAccountTestSuite {
    fn default() -> Self {
        Self::new()
    }
}

impl NexusAccountTestSuite {
    pub fn new() -> Self {
        let account_code = ContractWrapper::new(
            crate::contract::execute,
            crate::contract::instantiate,
            crate::contract::query,
        )
        .with_reply(crate::contract::reply);

        Self {
            inner: AccountTestSuiteBase::new(Box::new(account_code)),
        }
    }

    // The suite owner plays the factory: it deploys and initializes accounts
    fn account_init(&mut self) -> Addr {
        let code_id = self.account_code_id();
        self.contract_init(code_id, "nexus_account", &InstantiateMsg {}, &[])
    }

    fn init_as_owner(&mut self, account: &Addr, payload: Binary) -> AnyResult<AppResponse> {
        let owner = self.owner().clone();
        self.initialize_account(&owner, account, payload)
    }

    fn query_is_valid_signature(
        &self,
        account: &Addr,
        validator: &Addr,
        hash: &[u8],
        signature: Binary,
    ) -> AnyResult<bool> {
        Ok(self.app().wrap().query_wasm_smart(
            account,
            &QueryMsg::IsValidSignature {
                validator: validator.to_string(),
                sender: self.owner().to_string(),
                hash: Binary::from(hash),
                signature,
            },
        )?)
    }
}

impl AccountTestSuite for NexusAccountTestSuite {
    fn app(&self) -> &App {
        self.inner.app()
    }

    fn app_mut(&mut self) -> &mut App {
        self.inner.app_mut()
    }

    fn owner(&self) -> &Addr {
        self.inner.owner()
    }

    fn account_code_id(&self) -> u64 {
        self.inner.account_code_id()
    }

    fn module_code_id(&self) -> u64 {
        self.inner.module_code_id()
    }
}

/// Modules whose `OnInstall` ran, in execution order.
fn install_order(res: &AppResponse) -> Vec<String> {
    res.events
        .iter()
        .filter(|e| e.ty == "wasm")
        .filter(|e| {
            e.attributes
                .iter()
                .any(|a| a.key == "method" && a.value == "on_install")
        })
        .filter_map(|e| {
            e.attributes
                .iter()
                .find(|a| a.key == "_contract_address")
                .map(|a| a.value.clone())
        })
        .collect()
}

#[test]
fn instantiate_starts_uninitialized() {
    let mut suite = NexusAccountTestSuite::default();
    let account = suite.account_init();

    assert_eq!(suite.query_init_state(&account), InitState::Uninitialized);
    assert!(!suite.query_is_initialized(&account));

    let deployer: Addr = suite.query_wasm(&account, &QueryMsg::Deployer {});
    assert_eq!(&deployer, suite.owner());
    assert!(suite.query_installed_modules(&account, None).is_empty());
}

#[test]
fn initialize_installs_validator() {
    let mut suite = NexusAccountTestSuite::default();
    let validator = suite.validator_init("validator");
    let account = suite.account_init();

    let payload = suite.owner_validator_payload(&validator);
    suite.init_as_owner(&account, payload).unwrap();

    assert_eq!(suite.query_init_state(&account), InitState::Initialized);
    assert!(suite.query_is_module_installed(&account, ModuleType::Validator, &validator));
    assert!(!suite.query_is_module_installed(&account, ModuleType::Hook, &validator));
    assert!(suite.module_is_initialized(&validator, &account));
    assert_eq!(
        suite.module_install_data(&validator, &account),
        Some(Binary::from(suite.owner().as_bytes()))
    );
}

#[test]
fn second_initialize_fails_for_any_caller() {
    let mut suite = NexusAccountTestSuite::default();
    let validator = suite.validator_init("validator");
    let account = suite.account_init();

    let payload = suite.owner_validator_payload(&validator);
    suite.init_as_owner(&account, payload.clone()).unwrap();

    // the deployer
    let err = suite.init_as_owner(&account, payload.clone()).unwrap_err();
    assert_eq!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::AlreadyInitialized
    );

    // a stranger
    let stranger = suite.api().addr_make("stranger");
    let err = suite
        .initialize_account(&stranger, &account, payload.clone())
        .unwrap_err();
    assert_eq!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::AlreadyInitialized
    );

    // the account itself
    let err = suite
        .initialize_account(&account, &account, payload)
        .unwrap_err();
    assert_eq!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::AlreadyInitialized
    );

    assert_eq!(suite.query_init_state(&account), InitState::Initialized);
}

#[test]
fn only_deployer_can_initialize() {
    let mut suite = NexusAccountTestSuite::default();
    let validator = suite.validator_init("validator");
    let account = suite.account_init();

    let payload = suite.owner_validator_payload(&validator);
    let stranger = suite.api().addr_make("stranger");
    let err = suite
        .initialize_account(&stranger, &account, payload)
        .unwrap_err();

    assert_eq!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::Unauthorized(UnauthorizedReason::NotDeployer)
    );
    assert_eq!(suite.query_init_state(&account), InitState::Uninitialized);
}

#[test]
fn modules_installed_in_bootstrap_order() {
    let mut suite = NexusAccountTestSuite::default();
    let v1 = suite.validator_init("validator_1");
    let v2 = suite.validator_init("validator_2");
    let executor = suite.module_init("executor", vec![ModuleType::Executor]);
    let hook = suite.module_init("hook", vec![ModuleType::Hook]);
    let fallback = suite.module_init("fallback", vec![ModuleType::Fallback]);
    let account = suite.account_init();

    let payload = BootstrapConfig::new(vec![
        ModuleInit::validator(v2.to_string(), b"second".as_slice()),
        ModuleInit::validator(v1.to_string(), b"first".as_slice()),
    ])
    .with_executors(vec![ModuleInit::executor(
        executor.to_string(),
        b"exec".as_slice(),
    )])
    .with_hook(ModuleInit::hook(hook.to_string(), b"hook".as_slice()))
    .with_fallbacks(vec![ModuleInit::fallback(
        fallback.to_string(),
        b"fallback".as_slice(),
    )])
    .to_payload()
    .unwrap();

    let res = suite.init_as_owner(&account, payload).unwrap();

    let expected = [&v2, &v1, &executor, &hook, &fallback]
        .iter()
        .map(|a| a.to_string())
        .collect_vec();
    assert_eq!(install_order(&res), expected);

    let installed = suite.query_installed_modules(&account, None);
    assert_eq!(
        installed,
        vec![
            InstalledModule {
                module: v2.clone(),
                module_type: ModuleType::Validator
            },
            InstalledModule {
                module: v1.clone(),
                module_type: ModuleType::Validator
            },
            InstalledModule {
                module: executor,
                module_type: ModuleType::Executor
            },
            InstalledModule {
                module: hook.clone(),
                module_type: ModuleType::Hook
            },
            InstalledModule {
                module: fallback,
                module_type: ModuleType::Fallback
            },
        ]
    );

    let validators = suite.query_installed_modules(&account, Some(ModuleType::Validator));
    assert_eq!(
        validators.into_iter().map(|m| m.module).collect_vec(),
        vec![v2, v1]
    );
    let hooks = suite.query_installed_modules(&account, Some(ModuleType::Hook));
    assert_eq!(hooks.into_iter().map(|m| m.module).collect_vec(), vec![hook]);
}

#[test]
fn invalid_module_address_rolls_back() {
    let mut suite = NexusAccountTestSuite::default();
    let validator = suite.validator_init("validator");
    let account = suite.account_init();

    let payload = BootstrapConfig::new(vec![
        ModuleInit::validator(validator.to_string(), b"owner".as_slice()),
        ModuleInit::validator("", b"owner".as_slice()),
    ])
    .to_payload()
    .unwrap();

    let err = suite.init_as_owner(&account, payload).unwrap_err();
    assert!(matches!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::InvalidModule { module, .. } if module.is_empty()
    ));

    // nothing from the failed attempt survives
    assert_eq!(suite.query_init_state(&account), InitState::Uninitialized);
    assert!(suite.query_installed_modules(&account, None).is_empty());
    assert!(!suite.module_is_initialized(&validator, &account));

    let payload = suite.owner_validator_payload(&validator);
    suite.init_as_owner(&account, payload).unwrap();
    assert!(suite.query_is_initialized(&account));
}

#[test]
fn module_without_code_is_invalid() {
    let mut suite = NexusAccountTestSuite::default();
    let account = suite.account_init();
    let not_a_contract = suite.api().addr_make("not_a_contract");

    let payload = suite.owner_validator_payload(&not_a_contract);
    let err = suite.init_as_owner(&account, payload).unwrap_err();

    assert!(matches!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::InvalidModule { module, .. } if module == not_a_contract.as_str()
    ));
}

#[test]
fn module_of_wrong_type_is_invalid() {
    let mut suite = NexusAccountTestSuite::default();
    let hook = suite.module_init("hook", vec![ModuleType::Hook]);
    let account = suite.account_init();

    // a hook-only module offered as a validator
    let payload = suite.owner_validator_payload(&hook);
    let err = suite.init_as_owner(&account, payload).unwrap_err();

    assert_eq!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::InvalidModule {
            module: hook.to_string(),
            reason: "does not support module type validator".to_string(),
        }
    );
    assert_eq!(suite.query_init_state(&account), InitState::Uninitialized);
}

#[test]
fn failing_install_rolls_back() {
    let mut suite = NexusAccountTestSuite::default();
    let validator = suite.validator_init("validator");
    let hook = suite.module_init("hook", vec![ModuleType::Hook]);
    let account = suite.account_init();

    suite.module_set_install_failure(&hook, Some("hook misconfigured"));

    let payload = BootstrapConfig::new(vec![ModuleInit::validator(
        validator.to_string(),
        suite.owner().as_bytes(),
    )])
    .with_hook(ModuleInit::hook(hook.to_string(), b"cfg".as_slice()))
    .to_payload()
    .unwrap();

    let err = suite.init_as_owner(&account, payload.clone()).unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        nexus_test_module::ContractError::InstallRejected("hook misconfigured".to_string())
            .to_string()
    );

    // the validator installed before the hook was rolled back as well
    assert_eq!(suite.query_init_state(&account), InitState::Uninitialized);
    assert!(!suite.module_is_initialized(&validator, &account));
    assert!(suite.query_installed_modules(&account, None).is_empty());

    suite.module_set_install_failure(&hook, None);
    suite.init_as_owner(&account, payload).unwrap();

    assert!(suite.query_is_initialized(&account));
    assert!(suite.module_is_initialized(&validator, &account));
    assert!(suite.module_is_initialized(&hook, &account));
}

#[test]
fn reentrant_initialize_rejected() {
    let mut suite = NexusAccountTestSuite::default();
    let validator = suite.validator_init("validator");
    let account = suite.account_init();

    let payload = suite.owner_validator_payload(&validator);
    suite.module_set_install_callback(
        &validator,
        Some(&ExecuteMsg::InitializeAccount {
            init_payload: payload.clone(),
        }),
    );

    let err = suite.init_as_owner(&account, payload.clone()).unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        ContractError::AlreadyInitialized.to_string()
    );
    assert_eq!(suite.query_init_state(&account), InitState::Uninitialized);

    suite.module_set_install_callback::<ExecuteMsg>(&validator, None);
    suite.init_as_owner(&account, payload).unwrap();
    assert_eq!(suite.query_init_state(&account), InitState::Initialized);
}

#[test]
fn malformed_payload_rejected() {
    let mut suite = NexusAccountTestSuite::default();
    let account = suite.account_init();

    let err = suite
        .init_as_owner(&account, Binary::from(b"{\"not\":\"a config\"}".to_vec()))
        .unwrap_err();
    assert!(matches!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::InvalidPayload(_)
    ));
    assert_eq!(suite.query_init_state(&account), InitState::Uninitialized);
}

#[test]
fn duplicate_module_rejected() {
    let mut suite = NexusAccountTestSuite::default();
    let validator = suite.validator_init("validator");
    let account = suite.account_init();

    let payload = BootstrapConfig::new(vec![
        ModuleInit::validator(validator.to_string(), b"a".as_slice()),
        ModuleInit::validator(validator.to_string(), b"b".as_slice()),
    ])
    .to_payload()
    .unwrap();

    let err = suite.init_as_owner(&account, payload).unwrap_err();
    assert_eq!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::ModuleAlreadyInstalled {
            module: validator.to_string(),
            module_type: ModuleType::Validator,
        }
    );
}

#[test]
fn signature_checks_go_to_installed_validator() {
    let mut suite = NexusAccountTestSuite::default();
    let validator = suite.validator_init("validator");
    let other = suite.validator_init("other_validator");
    let account = suite.account_init();

    let payload = suite.owner_validator_payload(&validator);
    suite.init_as_owner(&account, payload).unwrap();

    let hash = b"user operation hash";
    let signature = signature_for(suite.owner().as_bytes(), hash);

    assert!(suite
        .query_is_valid_signature(&account, &validator, hash, signature.clone())
        .unwrap());
    assert!(!suite
        .query_is_valid_signature(&account, &validator, b"another hash", signature.clone())
        .unwrap());

    // not installed on this account
    assert!(suite
        .query_is_valid_signature(&account, &other, hash, signature)
        .is_err());
}

#[test]
fn unknown_reply_id_rejected() {
    let mut deps = mock_dependencies();

    #[allow(deprecated)]
    let reply = Reply {
        id: 42,
        payload: Binary::default(),
        gas_used: 0,
        result: SubMsgResult::Ok(SubMsgResponse {
            events: vec![],
            data: None,
            msg_responses: vec![],
        }),
    };

    assert_eq!(
        crate::contract::reply(deps.as_mut(), mock_env(), reply).unwrap_err(),
        ContractError::UnknownReplyId(42)
    );
}

#[test]
fn install_completion_requires_initializing_state() {
    let mut deps = mock_dependencies();
    INIT_STATE
        .save(deps.as_mut().storage, &InitState::Initialized)
        .unwrap();

    #[allow(deprecated)]
    let reply = Reply {
        id: INSTALL_COMPLETE_REPLY_ID,
        payload: Binary::default(),
        gas_used: 0,
        result: SubMsgResult::Ok(SubMsgResponse {
            events: vec![],
            data: None,
            msg_responses: vec![],
        }),
    };

    assert_eq!(
        crate::contract::reply(deps.as_mut(), mock_env(), reply).unwrap_err(),
        ContractError::UnexpectedInitState(InitState::Initialized)
    );
}
