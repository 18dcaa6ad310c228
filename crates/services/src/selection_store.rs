use std::sync::Arc;

use quiz_core::model::Selections;
use storage::repository::SlotRepository;
use tracing::{debug, warn};

use crate::error::SelectionStoreError;

/// Slot the answers live in.
pub const SELECTIONS_KEY: &str = "primitiveMbtiSelections";

/// Persists the user's answers in a single key/value slot as a JSON array.
#[derive(Clone)]
pub struct SelectionStore {
    slots: Arc<dyn SlotRepository>,
    key: String,
}

impl SelectionStore {
    #[must_use]
    pub fn new(slots: Arc<dyn SlotRepository>) -> Self {
        Self::with_key(slots, SELECTIONS_KEY)
    }

    #[must_use]
    pub fn with_key(slots: Arc<dyn SlotRepository>, key: impl Into<String>) -> Self {
        Self {
            slots,
            key: key.into(),
        }
    }

    /// Load the stored answers.
    ///
    /// A missing slot or an unreadable payload is treated as "no answers
    /// yet"; stray non-integer elements are dropped.
    ///
    /// # Errors
    ///
    /// Returns `SelectionStoreError::Storage` if the backend itself fails.
    pub async fn read(&self) -> Result<Selections, SelectionStoreError> {
        let Some(raw) = self.slots.get_slot(&self.key).await? else {
            return Ok(Selections::new());
        };

        let Some(selections) = Selections::try_from_stored(&raw) else {
            warn!(key = %self.key, "ignoring malformed stored selections");
            return Ok(Selections::new());
        };
        Ok(selections)
    }

    /// Overwrite the stored answers.
    ///
    /// # Errors
    ///
    /// Returns `SelectionStoreError` if encoding or persistence fails.
    pub async fn write(&self, selections: &Selections) -> Result<(), SelectionStoreError> {
        let raw = selections.to_stored()?;
        self.slots.put_slot(&self.key, &raw).await?;
        debug!(key = %self.key, answered = selections.len(), "selections saved");
        Ok(())
    }
}
