use cosmwasm_std::{Addr, Binary, Event, HexBinary};

pub const ACCOUNT_CREATED_EVENT: &str = "account_created";

/// Event emitted once per successful account creation. Indexers rebuild the
/// deployment history from these three attributes alone.
pub fn account_created_event(account: &Addr, init_payload: &Binary, salt: &HexBinary) -> Event {
    Event::new(ACCOUNT_CREATED_EVENT)
        .add_attribute("account", account)
        .add_attribute("init_payload", init_payload.to_base64())
        .add_attribute("salt", salt.to_hex())
}
