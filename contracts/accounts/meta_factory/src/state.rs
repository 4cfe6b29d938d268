use cosmwasm_std::{Addr, Empty};
use cw_storage_plus::Map;

/// Factories that `DeployWithFactory` may forward to
pub const FACTORIES: Map<Addr, Empty> = Map::new("factories");
