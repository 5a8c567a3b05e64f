//! Caller identity resolution for Teamline
//!
//! Validates bearer credentials and resolves them to a user id. The rest of
//! the application only ever sees the resolved id; profile data is loaded
//! from the identity directory by whoever needs it.

pub mod claims;
pub mod config;
pub mod error;
pub mod extractors;
mod jwt;

pub use claims::Claims;
pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::AuthUser;
