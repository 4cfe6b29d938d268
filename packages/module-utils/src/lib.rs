pub mod module_type;
pub mod msg;

pub use module_type::ModuleType;
