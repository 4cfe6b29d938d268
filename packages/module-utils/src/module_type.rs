use std::fmt;

use cosmwasm_schema::cw_serde;

/// Module categories an account can install, numbered as in ERC-7579.
#[cw_serde]
#[derive(Copy, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleType {
    Validator,
    Executor,
    Fallback,
    Hook,
}

impl ModuleType {
    pub const ALL: [ModuleType; 4] = [
        ModuleType::Validator,
        ModuleType::Executor,
        ModuleType::Fallback,
        ModuleType::Hook,
    ];

    pub fn type_id(&self) -> u64 {
        match self {
            ModuleType::Validator => 1,
            ModuleType::Executor => 2,
            ModuleType::Fallback => 3,
            ModuleType::Hook => 4,
        }
    }

    pub fn from_type_id(type_id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.type_id() == type_id)
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModuleType::Validator => "validator",
            ModuleType::Executor => "executor",
            ModuleType::Fallback => "fallback",
            ModuleType::Hook => "hook",
        };
        f.write_str(name)
    }
}
