use std::sync::Arc;

use aristotle_events::AccountNotifier;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool and notifier are handles, the config is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: aristotle_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Sends activation and password-reset emails off the request path.
    pub notifier: AccountNotifier,
}
