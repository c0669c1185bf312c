use crate::domain::{TaskList, TodoState};
use crate::infrastructure::storage::{KeyValueStore, StorageError};
use log::{debug, warn};

/// Key holding the JSON array of lists.
pub const LISTS_KEY: &str = "task.lists";
/// Key holding the raw id of the selected list.
pub const SELECTED_LIST_ID_KEY: &str = "task.selectedListId";

/// Reads and writes the to-do state under its two fixed keys.
#[derive(Debug)]
pub struct StorageAdapter<S> {
    store: S,
}

impl<S: KeyValueStore> StorageAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Writes both keys in a single batch.
    ///
    /// With no selection the selection key is removed rather than written.
    pub fn persist(
        &mut self,
        lists: &[TaskList],
        selected_list_id: Option<&str>,
    ) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(lists)?;
        self.store.write_batch(&[
            (LISTS_KEY, Some(serialized.as_str())),
            (SELECTED_LIST_ID_KEY, selected_list_id),
        ])?;
        debug!(
            "event=state_persisted module=storage status=ok lists={} selected={}",
            lists.len(),
            selected_list_id.unwrap_or("none")
        );
        Ok(())
    }

    /// Reads the persisted state. Never fails.
    ///
    /// Missing or unparsable list data loads as an empty collection. A missing
    /// selection, or the literal `null` a browser writes for one, loads as no
    /// selection.
    pub fn load(&self) -> TodoState {
        let lists = match self.store.get(LISTS_KEY) {
            Some(raw) => match serde_json::from_str::<Option<Vec<TaskList>>>(&raw) {
                Ok(lists) => lists.unwrap_or_default(),
                Err(err) => {
                    warn!(
                        "event=state_load module=storage status=corrupt key={} error={}",
                        LISTS_KEY, err
                    );
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let selected_list_id = self
            .store
            .get(SELECTED_LIST_ID_KEY)
            .filter(|id| id.as_str() != "null");

        debug!(
            "event=state_load module=storage status=ok lists={} selected={}",
            lists.len(),
            selected_list_id.as_deref().unwrap_or("none")
        );

        TodoState {
            lists,
            selected_list_id,
        }
    }
}
