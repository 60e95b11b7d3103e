//! Wire representations exchanged with the REST API and the client
//! configuration.

pub mod auth;
#[cfg(feature = "client")]
pub mod config;
pub mod place;
pub mod route;
