//! HTTP boundary for the teams domain

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::TeamsState;
pub use routes::routes;
