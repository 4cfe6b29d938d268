use cosmwasm_std::{testing::MockApi, to_json_binary, Addr, Binary, Coin, Empty, HexBinary};
use cw_multi_test::{error::AnyResult, App, AppResponse, Contract, ContractWrapper, Executor};
use nexus_bootstrap_utils::{build_single_validator_payload, ModuleInit};
use nexus_module_utils::ModuleType;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt::Debug;

use crate::msg::{ExecuteMsg, InitState, InstalledModule, QueryMsg};

pub struct AccountTestSuiteBase {
    app: App,
    owner: Addr,
    account_code_id: u64,
    module_code_id: u64,
}

#[allow(dead_code)]
impl AccountTestSuiteBase {
    pub fn new(account_contract: Box<dyn Contract<Empty>>) -> Self {
        let mut app = App::default();

        let owner = app.api().addr_make("owner");

        let account_code_id = app.store_code(account_contract);

        let module_code = ContractWrapper::new(
            nexus_test_module::contract::execute,
            nexus_test_module::contract::instantiate,
            nexus_test_module::contract::query,
        );
        let module_code_id = app.store_code(Box::new(module_code));

        Self {
            app,
            owner,
            account_code_id,
            module_code_id,
        }
    }
}

pub trait AccountTestSuite {
    fn app(&self) -> &App;
    fn app_mut(&mut self) -> &mut App;
    fn owner(&self) -> &Addr;
    fn account_code_id(&self) -> u64;
    fn module_code_id(&self) -> u64;

    fn api(&self) -> &MockApi {
        self.app().api()
    }

    /// 32-byte salt derived from a human readable seed.
    fn hashed_salt(&self, seed: &str) -> HexBinary {
        HexBinary::from(Sha256::digest(seed.as_bytes()).to_vec())
    }

    fn contract_init<T: Serialize>(
        &mut self,
        code_id: u64,
        label: &str,
        init_msg: &T,
        funds: &[Coin],
    ) -> Addr {
        let owner = self.owner().clone();
        self.app_mut()
            .instantiate_contract(
                code_id,
                owner.clone(),
                &init_msg,
                funds,
                label,
                Some(owner.to_string()),
            )
            .unwrap()
    }

    fn contract_execute<T: Serialize + Debug>(
        &mut self,
        addr: Addr,
        msg: &T,
    ) -> AnyResult<AppResponse> {
        let sender = self.owner().clone();
        self.app_mut().execute_contract(sender, addr, &msg, &[])
    }

    fn query_wasm<T, U>(&self, addr: &Addr, query: &T) -> U
    where
        T: Serialize,
        U: serde::de::DeserializeOwned,
    {
        self.app()
            .wrap()
            .query_wasm_smart::<U>(addr, &query)
            .unwrap()
    }

    fn module_init(&mut self, label: &str, module_types: Vec<ModuleType>) -> Addr {
        let code_id = self.module_code_id();
        self.contract_init(
            code_id,
            label,
            &nexus_test_module::msg::InstantiateMsg { module_types },
            &[],
        )
    }

    fn validator_init(&mut self, label: &str) -> Addr {
        self.module_init(label, vec![ModuleType::Validator])
    }

    fn module_set_install_failure(&mut self, module: &Addr, reason: Option<&str>) {
        self.contract_execute(
            module.clone(),
            &nexus_test_module::msg::ExecuteMsg::SetInstallFailure {
                reason: reason.map(str::to_string),
            },
        )
        .unwrap();
    }

    fn module_set_install_callback<T: Serialize>(&mut self, module: &Addr, msg: Option<&T>) {
        let msg = msg.map(|m| to_json_binary(m).unwrap());
        self.contract_execute(
            module.clone(),
            &nexus_test_module::msg::ExecuteMsg::SetInstallCallback { msg },
        )
        .unwrap();
    }

    fn module_is_initialized(&self, module: &Addr, account: &Addr) -> bool {
        self.query_wasm(
            module,
            &nexus_test_module::msg::QueryMsg::IsInitialized {
                account: account.to_string(),
            },
        )
    }

    fn module_install_data(&self, module: &Addr, account: &Addr) -> Option<Binary> {
        self.query_wasm(
            module,
            &nexus_test_module::msg::QueryMsg::InstallData {
                account: account.to_string(),
            },
        )
    }

    /// Payload installing `validator` with the suite owner as its owner key.
    fn owner_validator_payload(&self, validator: &Addr) -> Binary {
        build_single_validator_payload(ModuleInit::validator(
            validator.to_string(),
            self.owner().as_bytes(),
        ))
        .unwrap()
    }

    fn initialize_account(
        &mut self,
        sender: &Addr,
        account: &Addr,
        init_payload: Binary,
    ) -> AnyResult<AppResponse> {
        self.app_mut().execute_contract(
            sender.clone(),
            account.clone(),
            &ExecuteMsg::InitializeAccount { init_payload },
            &[],
        )
    }

    fn query_init_state(&self, account: &Addr) -> InitState {
        self.query_wasm(account, &QueryMsg::InitState {})
    }

    fn query_is_initialized(&self, account: &Addr) -> bool {
        self.query_wasm(account, &QueryMsg::IsInitialized {})
    }

    fn query_installed_modules(
        &self,
        account: &Addr,
        module_type: Option<ModuleType>,
    ) -> Vec<InstalledModule> {
        self.query_wasm(account, &QueryMsg::InstalledModules { module_type })
    }

    fn query_is_module_installed(
        &self,
        account: &Addr,
        module_type: ModuleType,
        module: &Addr,
    ) -> bool {
        self.query_wasm(
            account,
            &QueryMsg::IsModuleInstalled {
                module_type,
                module: module.to_string(),
            },
        )
    }

    fn contract_exists(&self, addr: &Addr) -> bool {
        self.app().wrap().query_wasm_contract_info(addr).is_ok()
    }
}

#[allow(dead_code)]
impl AccountTestSuite for AccountTestSuiteBase {
    fn app(&self) -> &App {
        &self.app
    }

    fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    fn owner(&self) -> &Addr {
        &self.owner
    }

    fn account_code_id(&self) -> u64 {
        self.account_code_id
    }

    fn module_code_id(&self) -> u64 {
        self.module_code_id
    }
}
