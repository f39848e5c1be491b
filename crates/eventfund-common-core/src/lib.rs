//! Eventfund common core types.

pub mod role;
pub mod status;

pub use role::{Role, RoleParseError};
pub use status::LoadState;
