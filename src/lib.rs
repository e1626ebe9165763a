//! The `todokeep` library crate.
//!
//! Domain models, authentication, audit logging, error handling, and route
//! configuration for the todokeep service. The binary (`main.rs`) wires
//! these modules into an `actix-web` server.

pub mod audit;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
