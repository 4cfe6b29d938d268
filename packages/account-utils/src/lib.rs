pub mod error;
pub mod msg;

#[cfg(feature = "testing")]
pub mod testing;
