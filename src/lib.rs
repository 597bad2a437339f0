//! Learn & Grow live classes service
//!
//! Scheduling, moderation and visibility of live classes for the Learn & Grow
//! learning platform, built on Actix Web.
//!
//! # Layout
//! - `cache`: object cache (Moka/Redis) for authenticated identities
//! - `config`: layered configuration
//! - `entity`: SeaORM entities
//! - `errors`: crate error type
//! - `middlewares`: authentication, role gates, rate limiting
//! - `models`: wire and domain types
//! - `routes`: HTTP routes
//! - `runtime`: startup and shutdown
//! - `services`: live class lifecycle, access guard, entitlements
//! - `storage`: repository trait and its SeaORM implementation
//! - `utils`: validation, JWT, extractors

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
