pub mod auth;
pub mod filter;
