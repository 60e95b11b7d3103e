//! Domain types shared by every layer.

pub mod auth;
pub mod filter;
pub mod geo;
pub mod navigation;
pub mod place;
pub mod route;
pub mod types;
