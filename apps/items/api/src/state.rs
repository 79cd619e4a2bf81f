//! Application state shared by request handlers.

use domain_items::InMemoryItemRepository;

/// Shared application state.
///
/// Cloning is cheap: the repository is a handle onto one shared store.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Process-lifetime item store
    pub repository: InMemoryItemRepository,
}

impl AppState {
    pub fn new(config: crate::config::Config) -> Self {
        Self {
            config,
            repository: InMemoryItemRepository::new(),
        }
    }
}
