// Purpose: State definitions for account factory contract
use cosmwasm_std::{Addr, Empty};
use cw_storage_plus::{Item, Map};

use crate::msg::Config;

pub const CONFIG: Item<Config> = Item::new("config");

/// Accounts deployed by this factory
pub const CREATED_ACCOUNTS: Map<Addr, Empty> = Map::new("created_accounts");
