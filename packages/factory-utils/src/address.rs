//! Deterministic account address derivation.
//!
//! An account address is the `Instantiate2` address of the account code
//! checksum, instantiated by the factory, with a salt that commits to both the
//! init payload and the caller's salt. The derivation only reads its inputs, so
//! it can be evaluated before deployment and checked again afterwards.

use cosmwasm_std::{
    instantiate2_address, Addr, Api, Binary, Checksum, HexBinary, StdError, StdResult,
};
use sha2::{Digest, Sha256};

pub const SALT_LENGTH: usize = 32;

/// The `Instantiate2` salt for an account: sha256(init_payload || salt).
pub fn account_salt(init_payload: &[u8], salt: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(init_payload);
    hasher.update(salt);
    hasher.finalize().into()
}

pub fn compute_account_address(
    api: &dyn Api,
    factory: &Addr,
    checksum: &Checksum,
    init_payload: &Binary,
    salt: &HexBinary,
) -> StdResult<Addr> {
    if salt.len() != SALT_LENGTH {
        return Err(StdError::generic_err(format!(
            "salt must be {SALT_LENGTH} bytes, got {}",
            salt.len()
        )));
    }

    let creator = api.addr_canonicalize(factory.as_str())?;
    let canonical = instantiate2_address(
        checksum.as_slice(),
        &creator,
        &account_salt(init_payload, salt),
    )
    .map_err(|e| StdError::generic_err(e.to_string()))?;

    api.addr_humanize(&canonical)
}
