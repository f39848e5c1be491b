//! Common status types.

use serde::{Deserialize, Serialize};

/// Progress of an on-demand resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "value")]
pub enum LoadState<T> {
    /// Not loaded yet, or currently loading.
    Pending,
    /// Loaded successfully.
    Ready(T),
    /// Loading failed with a message.
    Failed(String),
}

impl<T> LoadState<T> {
    /// Is the state terminal (ready or failed)?
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready(_) | Self::Failed(_))
    }

    /// Borrow the loaded value, if any.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::Pending
    }
}
