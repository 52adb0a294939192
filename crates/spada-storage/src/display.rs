//! Persistence of annotation display preferences.

use spada_annotation::{DISPLAY_STORAGE_KEY, DisplayConfig};

use crate::{SetOutcome, StorageError, Store};

/// Reads the display configuration. Missing or unreadable data yields the defaults.
pub fn load_display_config(store: &Store) -> DisplayConfig {
    store.get_item(DISPLAY_STORAGE_KEY).unwrap_or_default()
}

/// Writes the display configuration.
pub fn save_display_config(
    store: &mut Store,
    config: &DisplayConfig,
) -> Result<SetOutcome, StorageError> {
    store.set_item(DISPLAY_STORAGE_KEY, config)
}
