//! OAuth client credentials, the session-scoped bearer token cache, and the token manager.

pub mod credentials;
pub mod manager;
pub mod secret;
pub mod session;
pub mod token;

pub use credentials::*;
pub use manager::*;
pub use secret::*;
pub use session::*;
pub use token::*;
