//! # sensorgrid-service
//!
//! HTTP/JSON resource server for devices and their attached sensors, backed
//! by PostgreSQL.
//!
//! The interesting part of the crate is the list machinery in
//! [`repository::query`]: untrusted `page`/`count`/`sort`/`search`/`device_id`
//! parameters are resolved into bounded integers and whitelisted sort
//! clauses, assembled into a shared-WHERE count+select statement pair, and
//! reconciled into the paginated response envelope in
//! [`handlers::response`]. Everything else is conventional axum/sqlx
//! plumbing.

pub mod config;
pub mod database;
pub mod entities;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod repository;
pub mod server;

pub use config::Config;
pub use error::{Error, Result};
