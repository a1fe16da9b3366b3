//! HTTP access to the PaisaAds platform backend, plus the stateful pieces a
//! storefront surface builds on top of it: fetch state with retry and the
//! per-page board of autoplaying slot carousels.

pub mod api;
pub mod board;
pub mod config;
pub mod feed;
pub mod source;
