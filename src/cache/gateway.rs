//! Non-fatal cache restore/save around a `CacheStore`

use crate::cache::key::CacheKey;
use crate::cache::store::CacheStore;
use crate::ui::{self, UiContext};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Cache access that never fails the run
#[derive(Clone)]
pub struct CacheGateway {
    store: Option<Arc<dyn CacheStore>>,
    ui: UiContext,
}

impl CacheGateway {
    pub fn new(store: Arc<dyn CacheStore>, ui: UiContext) -> Self {
        Self {
            store: Some(store),
            ui,
        }
    }

    /// A gateway that always misses and never saves
    pub fn disabled(ui: UiContext) -> Self {
        Self { store: None, ui }
    }

    /// Try to restore `paths`; returns the key that was restored, if any.
    /// Errors are reported as warnings and treated as a miss.
    pub async fn try_restore(&self, paths: &[PathBuf], key: &CacheKey) -> Option<String> {
        let Some(ref store) = self.store else {
            debug!("Cache disabled, skipping restore");
            return None;
        };

        ui::info(&self.ui, &format!("Trying to restore cache: key '{}'", key));
        match store.restore(paths, key.as_str()).await {
            Ok(Some(restored)) => {
                ui::info(&self.ui, &format!("Cache restored from key: {}", restored));
                Some(restored)
            }
            Ok(None) => {
                ui::info(&self.ui, &format!("Cache not found for key '{}'", key));
                None
            }
            Err(e) => {
                ui::warning(&self.ui, &e.to_string());
                None
            }
        }
    }

    /// Save `paths` under `key` unless `restored` is already an exact hit.
    /// Errors are reported as warnings.
    pub async fn try_save(&self, paths: &[PathBuf], key: &CacheKey, restored: Option<&str>) {
        let Some(ref store) = self.store else {
            debug!("Cache disabled, skipping save");
            return;
        };
        if restored == Some(key.as_str()) {
            debug!("Cache hit on '{}', not saving", key);
            return;
        }

        ui::info(&self.ui, &format!("Saving cache: '{}'", key));
        if let Err(e) = store.save(paths, key.as_str()).await {
            ui::warning(&self.ui, &e.to_string());
        }
    }
}
