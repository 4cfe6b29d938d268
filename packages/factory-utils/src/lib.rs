pub mod address;
pub mod event;

pub use address::{account_salt, compute_account_address, SALT_LENGTH};
pub use event::{account_created_event, ACCOUNT_CREATED_EVENT};
