//! Shared types for the pingr workspace.
//!
//! Everything that more than one crate needs to agree on lives here: the run
//! configuration, the probe record model, address validation and subnet
//! arithmetic.

pub mod config;
pub mod error;
pub mod network;
pub mod record;
pub mod utils;
