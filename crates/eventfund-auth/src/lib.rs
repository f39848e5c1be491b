//! Session handling and role-based access control for the Eventfund client.
//!
//! The [`AccessGuard`] decides whether the stored [`Session`] may enter a
//! region protected by an [`AccessPolicy`]. Denials carry the redirect to
//! the login boundary. [`RouteTable`] maps paths to policies and
//! [`ProtectedView`] ties a check to the lifetime of a mounted view.

pub mod api;
pub mod error;
pub mod flow;
pub mod guard;
pub mod loader;
pub mod policy;
pub mod routes;
pub mod session;
pub mod store;

pub use api::{
    AuthApi, Credentials, HttpAuthApi, LoginResponse, MockAuthApi, TokenVerifier, UserProfile,
};
pub use error::{AuthError, StoreError, StoreResult};
pub use flow::{login, logout};
pub use guard::{AccessGuard, Decision, DenyReason, GuardAuditEvent, GuardState, ProtectedView};
pub use loader::LazyResource;
pub use policy::AccessPolicy;
pub use routes::{RouteAccess, RouteOutcome, RouteTable};
pub use session::{Session, SessionLookup, ROLE_KEY, TOKEN_KEY};
pub use store::{FileStore, MemoryStore, SessionStore};

pub use eventfund_common_core::{LoadState, Role, RoleParseError};
