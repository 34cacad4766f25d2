//! Shared application state for all routes.

use crate::store::LunchlyStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LunchlyStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn LunchlyStore>) -> Self {
        AppState { store }
    }
}
