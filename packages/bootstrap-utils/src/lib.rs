pub mod bootstrap;
pub mod error;

pub use bootstrap::{
    build_init_payload, build_single_validator_payload, BootstrapConfig, ModuleInit,
};
pub use error::BootstrapError;
