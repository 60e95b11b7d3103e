//! Flat view models ready for rendering.

pub mod catalog;
pub mod routes;
