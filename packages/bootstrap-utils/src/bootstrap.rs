//! Encoding of the one-time account initialization call.
//!
//! A `BootstrapConfig` lists the modules an account installs while it is being
//! created. Its JSON encoding is the init payload handed to the factory, which
//! forwards it untouched to the account's `InitializeAccount` entry point.
//! Only the shape of the config is checked here: module addresses are
//! validated by the account when it installs them.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{from_json, to_json_binary, Binary};
use nexus_module_utils::ModuleType;

use crate::error::BootstrapError;

#[cw_serde]
pub struct ModuleInit {
    pub module: String,
    pub module_type: ModuleType,
    pub init_data: Binary,
}

impl ModuleInit {
    pub fn new(
        module: impl Into<String>,
        module_type: ModuleType,
        init_data: impl Into<Binary>,
    ) -> Self {
        ModuleInit {
            module: module.into(),
            module_type,
            init_data: init_data.into(),
        }
    }

    pub fn validator(module: impl Into<String>, init_data: impl Into<Binary>) -> Self {
        Self::new(module, ModuleType::Validator, init_data)
    }

    pub fn executor(module: impl Into<String>, init_data: impl Into<Binary>) -> Self {
        Self::new(module, ModuleType::Executor, init_data)
    }

    pub fn hook(module: impl Into<String>, init_data: impl Into<Binary>) -> Self {
        Self::new(module, ModuleType::Hook, init_data)
    }

    pub fn fallback(module: impl Into<String>, init_data: impl Into<Binary>) -> Self {
        Self::new(module, ModuleType::Fallback, init_data)
    }
}

#[cw_serde]
pub struct BootstrapConfig {
    pub validators: Vec<ModuleInit>,
    #[serde(default)]
    pub executors: Vec<ModuleInit>,
    pub hook: Option<ModuleInit>,
    #[serde(default)]
    pub fallbacks: Vec<ModuleInit>,
}

impl BootstrapConfig {
    pub fn new(validators: Vec<ModuleInit>) -> Self {
        BootstrapConfig {
            validators,
            executors: vec![],
            hook: None,
            fallbacks: vec![],
        }
    }

    pub fn with_executors(mut self, executors: Vec<ModuleInit>) -> Self {
        self.executors = executors;
        self
    }

    pub fn with_hook(mut self, hook: ModuleInit) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn with_fallbacks(mut self, fallbacks: Vec<ModuleInit>) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    pub fn validate(&self) -> Result<(), BootstrapError> {
        if self.validators.is_empty() {
            return Err(BootstrapError::NoValidators);
        }

        let slots = [
            (ModuleType::Validator, self.validators.as_slice()),
            (ModuleType::Executor, self.executors.as_slice()),
            (ModuleType::Hook, self.hook.as_slice()),
            (ModuleType::Fallback, self.fallbacks.as_slice()),
        ];

        for (expected, modules) in slots {
            if let Some(m) = modules.iter().find(|m| m.module_type != expected) {
                return Err(BootstrapError::ModuleTypeMismatch {
                    module: m.module.clone(),
                    expected,
                    found: m.module_type,
                });
            }
        }

        Ok(())
    }

    /// Modules in the exact order the account must install them: validators,
    /// executors, the hook, then fallbacks, each list in its given order.
    pub fn install_sequence(&self) -> impl Iterator<Item = &ModuleInit> {
        self.validators
            .iter()
            .chain(self.executors.iter())
            .chain(self.hook.iter())
            .chain(self.fallbacks.iter())
    }

    pub fn to_payload(&self) -> Result<Binary, BootstrapError> {
        self.validate()?;
        Ok(to_json_binary(self)?)
    }

    pub fn from_payload(payload: &Binary) -> Result<Self, BootstrapError> {
        let config: BootstrapConfig = from_json(payload)?;
        config.validate()?;
        Ok(config)
    }
}

/// Encodes the initialization call for an account with the given validators
/// and optional hook.
pub fn build_init_payload(
    validators: Vec<ModuleInit>,
    hook: Option<ModuleInit>,
) -> Result<Binary, BootstrapError> {
    let config = BootstrapConfig {
        hook,
        ..BootstrapConfig::new(validators)
    };
    config.to_payload()
}

pub fn build_single_validator_payload(validator: ModuleInit) -> Result<Binary, BootstrapError> {
    build_init_payload(vec![validator], None)
}
