//! Configuration types for Eventfund.
//!
//! This crate provides the configuration used by the Eventfund client
//! for `.eventfund/config.yaml` files.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;
