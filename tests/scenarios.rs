use std::collections::HashSet;

use tempfile::tempdir;
use tlist::application::TodoStore;
use tlist::domain::TodoState;
use tlist::infrastructure::{FileStore, KeyValueStore, MemoryStore, StorageAdapter, LISTS_KEY};
use tlist::presentation::render;

fn memory_store() -> TodoStore<MemoryStore> {
    TodoStore::open(StorageAdapter::new(MemoryStore::new()))
}

fn assert_ids_distinct(state: &TodoState) {
    let list_ids: HashSet<&str> = state.lists.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(list_ids.len(), state.lists.len());
    for list in &state.lists {
        let task_ids: HashSet<&str> = list.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(task_ids.len(), list.tasks.len());
    }
}

#[test]
fn walkthrough_home_list() {
    let mut store = memory_store();

    // Scenario 1: creating a list does not select it
    let home_id = store.add_list("Home").unwrap().expect("list added");
    assert_eq!(store.state().lists.len(), 1);
    assert_eq!(store.state().lists[0].name, "Home");
    assert!(store.state().lists[0].tasks.is_empty());
    assert!(store.state().selected_list_id.is_none());
    assert!(render(store.state()).detail.is_none());

    // Scenario 2: select and add a task
    store.select_list(home_id.clone()).unwrap();
    let milk_id = store.add_task("Buy milk").unwrap().expect("task added");
    let tasks = &store.selected_list().unwrap().tasks;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "Buy milk");
    assert!(!tasks[0].complete);
    assert_eq!(render(store.state()).detail.unwrap().remaining, "1 task remaining");

    // Scenario 3: complete it
    store.toggle_task(&milk_id, true).unwrap();
    assert!(store.selected_list().unwrap().task(&milk_id).unwrap().complete);
    assert_eq!(render(store.state()).detail.unwrap().remaining, "0 tasks remaining");

    // Scenario 4: clear completed keeps the open task
    store.add_task("Buy eggs").unwrap();
    store.clear_completed_tasks().unwrap();
    let names: Vec<&str> = store
        .selected_list()
        .unwrap()
        .tasks
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(names, vec!["Buy eggs"]);

    // Scenario 5: delete hides the task pane
    store.delete_selected_list().unwrap();
    assert!(store.state().list(&home_id).is_none());
    assert!(store.state().selected_list_id.is_none());
    assert!(render(store.state()).detail.is_none());
}

#[test]
fn blank_list_names_leave_lists_unchanged() {
    let mut store = memory_store();
    store.add_list("").unwrap();
    store.add_list("   ").unwrap();
    assert!(store.state().lists.is_empty());

    store.add_list("Groceries").unwrap();
    assert_eq!(store.state().lists.len(), 1);
    assert!(store.state().lists[0].tasks.is_empty());
}

#[test]
fn ids_stay_distinct_across_mixed_operations() {
    let mut store = memory_store();
    let mut list_ids = Vec::new();

    for round in 0..5 {
        let id = store.add_list(&format!("List {round}")).unwrap().unwrap();
        list_ids.push(id.clone());
        store.select_list(id).unwrap();
        for n in 0..6 {
            let task = store.add_task(&format!("Task {n}")).unwrap().unwrap();
            if n % 2 == 0 {
                store.toggle_task(&task, true).unwrap();
            }
        }
        store.clear_completed_tasks().unwrap();
        store.add_task("After clear").unwrap();

        if round == 2 {
            store.select_list(list_ids[0].clone()).unwrap();
            store.delete_selected_list().unwrap();
        }
        assert_ids_distinct(store.state());
    }

    assert_eq!(store.state().lists.len(), 4);
}

#[test]
fn state_survives_restart_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tlist.json");

    let expected = {
        let mut store = TodoStore::open(StorageAdapter::new(FileStore::open(&path)));
        let home = store.add_list("Home").unwrap().unwrap();
        store.add_list("Work").unwrap();
        store.select_list(home).unwrap();
        let milk = store.add_task("Buy milk").unwrap().unwrap();
        store.add_task("Buy eggs").unwrap();
        store.toggle_task(&milk, true).unwrap();
        store.state().clone()
    };

    let mut reopened = TodoStore::open(StorageAdapter::new(FileStore::open(&path)));
    assert_eq!(*reopened.state(), expected);

    // Ids created after the restart do not collide with loaded ones
    let extra = reopened.add_task("Buy bread").unwrap().unwrap();
    assert!(expected.lists[0].tasks.iter().all(|t| t.id != extra));
    assert_ids_distinct(reopened.state());
}

#[test]
fn corrupt_persisted_lists_load_as_empty() {
    let mut kv = MemoryStore::new();
    kv.set(LISTS_KEY, "{not json").unwrap();

    let mut store = TodoStore::open(StorageAdapter::new(kv));
    assert!(store.state().lists.is_empty());

    // The store keeps working and overwrites the bad value
    store.add_list("Fresh").unwrap();
    let reloaded = store.storage().load();
    assert_eq!(reloaded.lists.len(), 1);
}
