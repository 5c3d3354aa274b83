//! foglio: a headless client library for remote blog services.
//!
//! The remote service owns all state; this crate is the glue a front-end
//! needs around it:
//!
//! - [`render`] turns the service's markdown dialect into HTML plus a table
//!   of contents,
//! - [`cache`] keeps idempotent reads warm behind a TTL with prefix
//!   invalidation,
//! - [`client`] exposes every endpoint as a typed operation, reading through
//!   the cache and invalidating it on writes,
//! - [`config`] and [`telemetry`] carry the deployment surface (layered
//!   settings, tracing, metric descriptions).

pub mod cache;
pub mod client;
pub mod config;
pub mod domain;
pub mod render;
pub mod telemetry;
