//! Pure rendering of the to-do state into a screen description.
//!
//! [`render`] rebuilds the whole [`View`] from scratch every time. The
//! terminal drawing code only ever reads a `View`, never the state itself.

use crate::domain::TodoState;

/// Everything the screen shows that depends on the to-do state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    /// One row per list, in display order
    pub lists: Vec<ListRow>,
    /// The task pane, or `None` when it is hidden
    pub detail: Option<TaskPane>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub id: String,
    pub name: String,
    /// Set on the row whose id matches the selection
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPane {
    pub title: String,
    /// The "N tasks remaining" line
    pub remaining: String,
    pub tasks: Vec<TaskRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: String,
    pub name: String,
    pub complete: bool,
}

impl View {
    /// Index of the active list row, if one is marked.
    pub fn active_index(&self) -> Option<usize> {
        self.lists.iter().position(|row| row.active)
    }

    pub fn task_count(&self) -> usize {
        self.detail.as_ref().map_or(0, |pane| pane.tasks.len())
    }
}

/// Builds the view for `state`.
///
/// The task pane is hidden when nothing is selected or the selection does
/// not resolve to an existing list.
pub fn render(state: &TodoState) -> View {
    let selected = state.selected_list_id.as_deref();

    let lists = state
        .lists
        .iter()
        .map(|list| ListRow {
            id: list.id.clone(),
            name: list.name.clone(),
            active: Some(list.id.as_str()) == selected,
        })
        .collect();

    let detail = state.selected_list().map(|list| TaskPane {
        title: list.name.clone(),
        remaining: remaining_label(list.remaining_count()),
        tasks: list
            .tasks
            .iter()
            .map(|task| TaskRow {
                id: task.id.clone(),
                name: task.name.clone(),
                complete: task.complete,
            })
            .collect(),
    });

    View { lists, detail }
}

/// Formats the remaining-count line.
///
/// # Examples
///
/// ```
/// use tlist::presentation::remaining_label;
///
/// assert_eq!(remaining_label(1), "1 task remaining");
/// assert_eq!(remaining_label(0), "0 tasks remaining");
/// ```
pub fn remaining_label(count: usize) -> String {
    let noun = if count == 1 { "task" } else { "tasks" };
    format!("{count} {noun} remaining")
}
