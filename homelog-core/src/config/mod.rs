//! Configuration types
//!
//! Validated at build time and embedded in the firmware as postcard binary
//! data.

pub mod station;
pub mod types;

pub use station::*;
pub use types::*;
