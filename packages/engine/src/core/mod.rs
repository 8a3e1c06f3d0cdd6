//! Core primitives shared by every system.
//!
//! - fixed/  - deterministic Q32.32 numerics (scalar, vector, transform)
//! - utils/  - checked-in-debug access macros

#[macro_use]
pub mod utils;
pub mod fixed;
