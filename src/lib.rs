//! pgfinder backend library
//!
//! API server for a PG/flat rental marketplace: listings, authentication,
//! capability-gated owner and admin surfaces, and the subscription paywall
//! backed by an external payment gateway.

pub mod app_state;
pub mod auth;
pub mod config;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
