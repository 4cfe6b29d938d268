use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Binary;
use nexus_module_utils::ModuleType;
use sha2::{Digest, Sha256};

#[cw_serde]
pub struct InstantiateMsg {
    pub module_types: Vec<ModuleType>,
}

#[cw_serde]
pub enum ExecuteMsg {
    OnInstall {
        data: Binary,
    },
    OnUninstall {
        data: Binary,
    },
    // Every following install fails with `reason`; `None` restores normal installs
    SetInstallFailure {
        reason: Option<String>,
    },
    // Raw execute msg sent back to the installing account from inside `OnInstall`
    SetInstallCallback {
        msg: Option<Binary>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(bool)]
    IsModuleType { type_id: u64 },
    #[returns(bool)]
    IsInitialized { account: String },
    #[returns(bool)]
    IsValidSignatureWithSender {
        account: String,
        sender: String,
        hash: Binary,
        signature: Binary,
    },
    #[returns(bool)]
    ValidateUserOp {
        account: String,
        user_op_hash: Binary,
        signature: Binary,
    },
    #[returns(Option<Binary>)]
    InstallData { account: String },
}

/// Signature the module accepts for `hash` from an account installed with `owner`.
pub fn signature_for(owner: &[u8], hash: &[u8]) -> Binary {
    let mut hasher = Sha256::new();
    hasher.update(owner);
    hasher.update(hash);
    Binary::from(hasher.finalize().to_vec())
}
