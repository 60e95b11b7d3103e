//! Core library exports for the tourist routes client.
//!
//! The `data` feature exposes the domain types, wire models, forms and view
//! models. The default `client` feature adds the HTTP gateway, credential
//! storage, the session executor and the service layer used by the CLI.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;

#[cfg(feature = "client")]
pub mod api;
#[cfg(feature = "client")]
pub mod credentials;
#[cfg(feature = "client")]
pub mod error_conversions;
#[cfg(feature = "client")]
pub mod services;
#[cfg(feature = "client")]
pub mod session;
