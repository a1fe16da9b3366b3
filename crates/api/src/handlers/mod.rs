pub mod categories;
pub mod storefront;
