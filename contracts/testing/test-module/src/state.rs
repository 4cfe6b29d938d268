use cosmwasm_std::{Addr, Binary};
use cw_storage_plus::{Item, Map};
use nexus_module_utils::ModuleType;

// Types this module answers `true` for in `IsModuleType`
pub const MODULE_TYPES: Item<Vec<ModuleType>> = Item::new("module_types");

// Install data per account; for validators this is the owner key
pub const INSTALLS: Map<Addr, Binary> = Map::new("installs");

pub const INSTALL_FAILURE: Item<Option<String>> = Item::new("install_failure");

pub const INSTALL_CALLBACK: Item<Option<Binary>> = Item::new("install_callback");
