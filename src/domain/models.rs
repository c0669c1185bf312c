//! Core to-do entities and the in-memory state they live in.
//!
//! Field names match the persisted JSON layout (`id`, `name`, `tasks`,
//! `complete`), so these types serialize directly into the `task.lists` value.

use serde::{Deserialize, Serialize};

/// A named unit of work with a completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque identifier, unique within the owning list
    pub id: String,
    /// Display name, never empty
    pub name: String,
    /// Whether the task has been checked off
    #[serde(default)]
    pub complete: bool,
}

impl Task {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            complete: false,
        }
    }
}

/// A named, ordered collection of tasks.
///
/// Tasks keep their insertion order. The only operation that removes tasks
/// is [`TaskList::clear_completed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    /// Number of tasks that are not complete yet.
    pub fn remaining_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.complete).count()
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == task_id)
    }

    /// Drops every completed task, keeping the relative order of the rest.
    ///
    /// Returns the number of tasks removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.complete);
        before - self.tasks.len()
    }
}

/// The whole to-do state: every list plus the selection pointer.
///
/// `selected_list_id` is only a lookup key. It may point at a list that no
/// longer exists, which is treated the same as no selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoState {
    pub lists: Vec<TaskList>,
    pub selected_list_id: Option<String>,
}

impl TodoState {
    pub fn list(&self, list_id: &str) -> Option<&TaskList> {
        self.lists.iter().find(|list| list.id == list_id)
    }

    /// The list the selection resolves to, if any.
    pub fn selected_list(&self) -> Option<&TaskList> {
        self.selected_list_id
            .as_deref()
            .and_then(|id| self.list(id))
    }

    pub fn selected_list_mut(&mut self) -> Option<&mut TaskList> {
        let id = self.selected_list_id.as_deref()?;
        self.lists.iter_mut().find(|list| list.id == id)
    }
}

/// Accepts a user-supplied name unless it is blank.
///
/// Blankness is judged on the trimmed text, but an accepted name is returned
/// exactly as typed.
///
/// # Examples
///
/// ```
/// use tlist::domain::validate_name;
///
/// assert_eq!(validate_name(" Groceries "), Some(" Groceries "));
/// assert_eq!(validate_name("   "), None);
/// ```
pub fn validate_name(raw: &str) -> Option<&str> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw)
    }
}
