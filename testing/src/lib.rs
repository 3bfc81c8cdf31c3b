#[cfg(feature = "chrono")]
pub mod chrono;
pub mod core;
#[cfg(feature = "perm")]
pub mod perm;
