//! Application state shared across handlers

use std::sync::Arc;

use crate::service::AuthService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AuthService>,
}
