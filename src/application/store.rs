//! The to-do state store.
//!
//! Every mutation runs to completion against the in-memory state and then
//! persists both keys. A returned [`StorageError`] always means the mutation
//! itself was applied and only the write failed.

use crate::domain::{validate_name, IdGenerator, TaskList, TodoState};
use crate::infrastructure::{KeyValueStore, StorageAdapter, StorageError};
use log::{debug, info};

/// Owns the lists, the selection, and everything needed to persist them.
#[derive(Debug)]
pub struct TodoStore<S> {
    state: TodoState,
    storage: StorageAdapter<S>,
    ids: IdGenerator,
}

impl<S: KeyValueStore> TodoStore<S> {
    /// Loads the persisted state and seeds id generation with it.
    pub fn open(storage: StorageAdapter<S>) -> Self {
        Self::with_id_generator(storage, IdGenerator::new())
    }

    /// Like [`TodoStore::open`], with a caller-supplied id generator.
    pub fn with_id_generator(storage: StorageAdapter<S>, mut ids: IdGenerator) -> Self {
        let state = storage.load();
        for list in &state.lists {
            ids.observe(&list.id);
            for task in &list.tasks {
                ids.observe(&task.id);
            }
        }
        info!(
            "event=store_open module=store status=ok lists={}",
            state.lists.len()
        );
        Self {
            state,
            storage,
            ids,
        }
    }

    pub fn state(&self) -> &TodoState {
        &self.state
    }

    pub fn selected_list(&self) -> Option<&TaskList> {
        self.state.selected_list()
    }

    pub fn storage(&self) -> &StorageAdapter<S> {
        &self.storage
    }

    /// Points the selection at `list_id` without checking that it exists.
    pub fn select_list(&mut self, list_id: impl Into<String>) -> Result<(), StorageError> {
        let list_id = list_id.into();
        debug!("event=list_selected module=store list_id={}", list_id);
        self.state.selected_list_id = Some(list_id);
        self.persist()
    }

    /// Appends a new list and returns its id.
    ///
    /// A blank name is declined: nothing changes, nothing is written, and
    /// `Ok(None)` is returned. The selection is left alone either way.
    pub fn add_list(&mut self, name: &str) -> Result<Option<String>, StorageError> {
        let Some(name) = validate_name(name) else {
            debug!("event=list_rejected module=store reason=blank_name");
            return Ok(None);
        };

        let list = self.ids.create_list(name);
        let list_id = list.id.clone();
        self.state.lists.push(list);
        info!("event=list_added module=store list_id={}", list_id);

        self.persist()?;
        Ok(Some(list_id))
    }

    /// Removes the selected list and clears the selection.
    ///
    /// Does nothing to the lists when there is no selection or the selected
    /// id is unknown. The selection ends up cleared in every case.
    pub fn delete_selected_list(&mut self) -> Result<(), StorageError> {
        if let Some(list_id) = self.state.selected_list_id.take() {
            let before = self.state.lists.len();
            self.state.lists.retain(|list| list.id != list_id);
            if self.state.lists.len() < before {
                info!("event=list_deleted module=store list_id={}", list_id);
            }
        }
        self.persist()
    }

    /// Appends a new task to the selected list and returns its id.
    ///
    /// Blank names are declined without a write. With no resolvable
    /// selection the call is a no-op returning `Ok(None)`.
    pub fn add_task(&mut self, name: &str) -> Result<Option<String>, StorageError> {
        let Some(name) = validate_name(name) else {
            debug!("event=task_rejected module=store reason=blank_name");
            return Ok(None);
        };

        let task_id = match self.state.selected_list_mut() {
            Some(list) => {
                let task = self.ids.create_task(name);
                let task_id = task.id.clone();
                list.tasks.push(task);
                info!(
                    "event=task_added module=store list_id={} task_id={}",
                    list.id, task_id
                );
                Some(task_id)
            }
            None => {
                debug!("event=task_rejected module=store reason=no_selection");
                None
            }
        };

        self.persist()?;
        Ok(task_id)
    }

    /// Sets the completion flag of a task in the selected list.
    pub fn toggle_task(&mut self, task_id: &str, complete: bool) -> Result<(), StorageError> {
        if let Some(task) = self
            .state
            .selected_list_mut()
            .and_then(|list| list.task_mut(task_id))
        {
            task.complete = complete;
            debug!(
                "event=task_toggled module=store task_id={} complete={}",
                task_id, complete
            );
        }
        self.persist()
    }

    /// Drops completed tasks from the selected list, keeping order.
    pub fn clear_completed_tasks(&mut self) -> Result<(), StorageError> {
        if let Some(list) = self.state.selected_list_mut() {
            let removed = list.clear_completed();
            info!(
                "event=tasks_cleared module=store list_id={} removed={}",
                list.id, removed
            );
        }
        self.persist()
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        self.storage.persist(
            &self.state.lists,
            self.state.selected_list_id.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{MemoryStore, LISTS_KEY, SELECTED_LIST_ID_KEY};
    use std::collections::HashSet;

    fn empty_store() -> TodoStore<MemoryStore> {
        TodoStore::open(StorageAdapter::new(MemoryStore::new()))
    }

    fn names(list: &TaskList) -> Vec<&str> {
        list.tasks.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_open_empty() {
        let store = empty_store();
        assert!(store.state().lists.is_empty());
        assert!(store.state().selected_list_id.is_none());
        assert!(store.selected_list().is_none());
    }

    #[test]
    fn test_add_list_rejects_blank_names() {
        let mut store = empty_store();

        assert_eq!(store.add_list("").unwrap(), None);
        assert_eq!(store.add_list("   ").unwrap(), None);
        assert!(store.state().lists.is_empty());
        // Declined input is not written
        assert!(store.storage().store().is_empty());
    }

    #[test]
    fn test_add_list_appends_one_empty_list() {
        let mut store = empty_store();
        let id = store.add_list("Groceries").unwrap().unwrap();

        let lists = &store.state().lists;
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].id, id);
        assert_eq!(lists[0].name, "Groceries");
        assert!(lists[0].tasks.is_empty());
        assert!(store.state().selected_list_id.is_none());
    }

    #[test]
    fn test_add_list_keeps_name_as_typed() {
        let mut store = empty_store();
        let id = store.add_list("  Work  ").unwrap().unwrap();
        assert_eq!(store.state().lists[0].name, "  Work  ");

        store.select_list(id).unwrap();
        store.add_task(" Ship it").unwrap();
        assert_eq!(store.selected_list().unwrap().tasks[0].name, " Ship it");
    }

    #[test]
    fn test_every_mutation_persists() {
        let mut store = empty_store();
        let id = store.add_list("Home").unwrap().unwrap();
        assert!(store.storage().store().get(LISTS_KEY).is_some());

        store.select_list(id.clone()).unwrap();
        assert_eq!(store.storage().store().get(SELECTED_LIST_ID_KEY), Some(id));
        assert_eq!(store.storage().load(), *store.state());

        let task_id = store.add_task("Dishes").unwrap().unwrap();
        store.toggle_task(&task_id, true).unwrap();
        assert_eq!(store.storage().load(), *store.state());

        store.clear_completed_tasks().unwrap();
        assert_eq!(store.storage().load(), *store.state());

        store.delete_selected_list().unwrap();
        assert_eq!(store.storage().load(), *store.state());
        assert_eq!(store.storage().store().get(SELECTED_LIST_ID_KEY), None);
    }

    #[test]
    fn test_select_list_unknown_id_is_allowed() {
        let mut store = empty_store();
        store.select_list("nope").unwrap();
        assert_eq!(store.state().selected_list_id.as_deref(), Some("nope"));
        assert!(store.selected_list().is_none());
    }

    #[test]
    fn test_add_task_without_selection_is_noop() {
        let mut store = empty_store();
        store.add_list("Home").unwrap();

        assert_eq!(store.add_task("Buy milk").unwrap(), None);
        assert!(store.state().lists[0].tasks.is_empty());

        store.select_list("dangling").unwrap();
        assert_eq!(store.add_task("Buy milk").unwrap(), None);
        assert!(store.state().lists[0].tasks.is_empty());
    }

    #[test]
    fn test_add_task_rejects_blank_names() {
        let mut store = empty_store();
        let id = store.add_list("Home").unwrap().unwrap();
        store.select_list(id).unwrap();

        assert_eq!(store.add_task(" ").unwrap(), None);
        assert!(store.selected_list().unwrap().tasks.is_empty());
    }

    #[test]
    fn test_toggle_task_lookups() {
        let mut store = empty_store();
        let home = store.add_list("Home").unwrap().unwrap();
        let work = store.add_list("Work").unwrap().unwrap();

        store.select_list(home.clone()).unwrap();
        let task_id = store.add_task("Buy milk").unwrap().unwrap();

        // Task is not in the selected list
        store.select_list(work).unwrap();
        store.toggle_task(&task_id, true).unwrap();
        assert!(!store.state().list(&home).unwrap().tasks[0].complete);

        store.select_list(home.clone()).unwrap();
        store.toggle_task("unknown", true).unwrap();
        assert!(!store.state().list(&home).unwrap().tasks[0].complete);

        store.toggle_task(&task_id, true).unwrap();
        assert!(store.state().list(&home).unwrap().tasks[0].complete);

        store.toggle_task(&task_id, false).unwrap();
        assert!(!store.state().list(&home).unwrap().tasks[0].complete);
    }

    #[test]
    fn test_clear_completed_is_idempotent() {
        let mut store = empty_store();
        let id = store.add_list("Home").unwrap().unwrap();
        store.select_list(id).unwrap();
        let a = store.add_task("a").unwrap().unwrap();
        store.add_task("b").unwrap();
        let c = store.add_task("c").unwrap().unwrap();
        store.add_task("d").unwrap();
        store.toggle_task(&a, true).unwrap();
        store.toggle_task(&c, true).unwrap();

        store.clear_completed_tasks().unwrap();
        let once = store.selected_list().unwrap().tasks.clone();
        store.clear_completed_tasks().unwrap();
        let twice = store.selected_list().unwrap().tasks.clone();

        assert_eq!(once, twice);
        assert_eq!(names(store.selected_list().unwrap()), vec!["b", "d"]);
    }

    #[test]
    fn test_clear_completed_without_selection_is_noop() {
        let mut store = empty_store();
        store.add_list("Home").unwrap();
        store.clear_completed_tasks().unwrap();
        assert_eq!(store.state().lists.len(), 1);
    }

    #[test]
    fn test_delete_selected_list() {
        let mut store = empty_store();
        let home = store.add_list("Home").unwrap().unwrap();
        let work = store.add_list("Work").unwrap().unwrap();

        store.select_list(home.clone()).unwrap();
        store.delete_selected_list().unwrap();

        assert!(store.state().list(&home).is_none());
        assert!(store.state().list(&work).is_some());
        // No implicit re-selection
        assert!(store.state().selected_list_id.is_none());
    }

    #[test]
    fn test_delete_without_selection_is_idempotent() {
        let mut store = empty_store();
        store.add_list("Home").unwrap();

        store.delete_selected_list().unwrap();
        store.delete_selected_list().unwrap();
        assert_eq!(store.state().lists.len(), 1);

        store.select_list("ghost").unwrap();
        store.delete_selected_list().unwrap();
        assert_eq!(store.state().lists.len(), 1);
        assert!(store.state().selected_list_id.is_none());
    }

    #[test]
    fn test_ids_stay_distinct() {
        let mut store = empty_store();
        for i in 0..20 {
            let id = store.add_list(&format!("List {i}")).unwrap().unwrap();
            store.select_list(id).unwrap();
            for j in 0..10 {
                store.add_task(&format!("Task {j}")).unwrap();
            }
        }

        let list_ids: HashSet<&str> = store.state().lists.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(list_ids.len(), 20);
        for list in &store.state().lists {
            let task_ids: HashSet<&str> = list.tasks.iter().map(|t| t.id.as_str()).collect();
            assert_eq!(task_ids.len(), list.tasks.len());
        }
    }

    #[test]
    fn test_loaded_max_id_is_not_reissued() {
        let mut kv = MemoryStore::new();
        kv.set(
            LISTS_KEY,
            r#"[{"id":"18446744073709551615","name":"Old","tasks":[]}]"#,
        )
        .unwrap();

        let mut store = TodoStore::open(StorageAdapter::new(kv));
        store.add_list("A").unwrap();
        store.add_list("B").unwrap();

        let ids: HashSet<&str> = store.state().lists.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_reopen_does_not_reissue_ids() {
        let mut first = TodoStore::with_id_generator(
            StorageAdapter::new(MemoryStore::new()),
            IdGenerator::with_clock(|| 1_000),
        );
        let id = first.add_list("Home").unwrap().unwrap();
        assert_eq!(id, "1000");

        // Same frozen clock after a reload
        let store = first.storage.into_store();
        let mut second =
            TodoStore::with_id_generator(StorageAdapter::new(store), IdGenerator::with_clock(|| 1_000));
        let next = second.add_list("Work").unwrap().unwrap();
        assert_eq!(next, "1001");
    }
}
