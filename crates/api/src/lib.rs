//! PaisaAds storefront API server library.
//!
//! Resolves ad slots and paginated line-ad feeds server-side so thin clients
//! only render. Exposes config, state, error handling, and routes so that
//! integration tests and the binary entrypoint share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
