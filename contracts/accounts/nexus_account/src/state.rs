use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};
use nexus_account_utils::msg::InitState;

pub const INIT_STATE: Item<InitState> = Item::new("init_state");

// Whoever instantiated the account; the only address allowed to initialize it
pub const DEPLOYER: Item<Addr> = Item::new("deployer");

// Installed modules keyed by (module type id, module), valued by install position
pub const MODULES: Map<(u64, Addr), u32> = Map::new("modules");
