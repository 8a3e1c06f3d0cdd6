//! Domain data - materials and world configuration.

pub mod material;
pub mod settings;
