use shared::StoreMode;
use std::sync::Arc;
use tracing::info;

use crate::storage::RecordStore;

/// Switches the store between the production and `test_` namespaces
#[derive(Clone)]
pub struct StoreModeService {
    store: Arc<dyn RecordStore>,
}

impl StoreModeService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn current_mode(&self) -> StoreMode {
        self.store.mode()
    }

    pub fn set_mode(&self, mode: StoreMode) -> StoreMode {
        let previous = self.store.mode();
        self.store.set_mode(mode);
        if previous != mode {
            info!("Store mode switched from {} to {}", previous, mode);
        }
        mode
    }
}
