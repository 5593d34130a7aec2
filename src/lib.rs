//! Library crate for diamond-logo-back, exposing modules for binaries and tests.

pub mod config;
/// Outbound backends.
pub mod dao;
mod dto;
mod error;
pub mod extract;
pub mod render;
/// HTTP routes.
pub mod routes;
/// Business logic behind the routes.
pub mod services;
/// Shared application state and the designer session model.
pub mod state;
