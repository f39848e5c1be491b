//! On-demand loading of heavy resources.

use eventfund_common_core::LoadState;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::fmt;
use std::future::Future;
use tokio::sync::Mutex;
use tracing::{debug, warn};

type Loader<T> = Box<dyn Fn() -> BoxFuture<'static, Result<T, String>> + Send + Sync>;

/// A value produced by an async loader the first time it is needed.
///
/// Concurrent `load` calls share one run of the loader. Once ready or
/// failed, the result is cached until [`reset`](Self::reset).
pub struct LazyResource<T> {
    name: String,
    loader: Loader<T>,
    state: Mutex<LoadState<T>>,
}

impl<T: Clone + Send + 'static> LazyResource<T> {
    pub fn new<F, Fut, E>(name: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: fmt::Display + 'static,
    {
        Self {
            name: name.into(),
            loader: Box::new(move || {
                loader()
                    .map(|result| result.map_err(|e| e.to_string()))
                    .boxed()
            }),
            state: Mutex::new(LoadState::Pending),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the loader if nothing is cached, then return the terminal state.
    pub async fn load(&self) -> LoadState<T> {
        let mut state = self.state.lock().await;
        if state.is_terminal() {
            return state.clone();
        }

        debug!(resource = %self.name, "Loading resource");
        *state = match (self.loader)().await {
            Ok(value) => LoadState::Ready(value),
            Err(e) => {
                warn!(resource = %self.name, error = %e, "Resource failed to load");
                LoadState::Failed(e)
            }
        };
        state.clone()
    }

    /// Current state without waiting. `Pending` while a load is running.
    pub fn state(&self) -> LoadState<T> {
        match self.state.try_lock() {
            Ok(state) => state.clone(),
            Err(_) => LoadState::Pending,
        }
    }

    /// Forget the cached result.
    pub async fn reset(&self) {
        *self.state.lock().await = LoadState::Pending;
    }
}

impl<T> fmt::Debug for LazyResource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyResource")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
