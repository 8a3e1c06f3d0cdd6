//! Spatial indexing for the broad phase.

pub mod grid;
