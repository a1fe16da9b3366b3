//! PaisaAds storefront engine.
//!
//! Pure building blocks shared by the storefront API and the kiosk runner:
//! ad models, slot classification, pool rotation, pagination, filters and
//! category helpers. Nothing in this crate performs I/O.

pub mod ads;
pub mod auth;
pub mod carousel;
pub mod categories;
pub mod error;
pub mod filters;
pub mod images;
pub mod ordering;
pub mod pagination;
pub mod rotation;
pub mod slots;
pub mod types;
