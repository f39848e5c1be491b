//! Command implementations.

mod authorize;
mod check;
mod login;
mod logout;
mod routes;
mod whoami;

pub use authorize::AuthorizeCommand;
pub use check::CheckCommand;
pub use login::LoginCommand;
pub use logout::LogoutCommand;
pub use routes::RoutesCommand;
pub use whoami::WhoamiCommand;
