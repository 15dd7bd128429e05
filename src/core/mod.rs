//! Core infrastructure shared by the library and the binary

pub mod logging;
pub mod sync;
pub mod version;
