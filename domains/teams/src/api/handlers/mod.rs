//! Request handlers for the teams domain API

pub mod invitations;
pub mod members;
pub mod teams;
pub mod users;
