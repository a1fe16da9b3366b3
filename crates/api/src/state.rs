use std::sync::Arc;

use paisa_client::source::AdSource;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (JWT secret, storefront defaults).
    pub config: Arc<ServerConfig>,
    /// Where today's ads and the category tree come from.
    pub source: Arc<dyn AdSource>,
}
