//! Application state management for the terminal to-do manager.
//!
//! This module contains the main application state, the commands the
//! interface raises against the store, and the UI modes.

use crate::application::store::TodoStore;
use crate::infrastructure::KeyValueStore;
use crate::presentation::view::{render, View};
use log::error;

/// Represents the current mode of the application.
///
/// The mode determines how key presses are interpreted and which
/// UI elements are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Navigation mode - arrow keys move the cursor, shortcuts available
    Normal,
    /// The user is typing the name of a new list
    NewList,
    /// The user is typing the name of a new task
    NewTask,
    /// Help screen is displayed
    Help,
}

/// Which pane the cursor keys act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Lists,
    Tasks,
}

/// A single user intent against the to-do state.
///
/// Each variant maps to exactly one store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A list row was chosen
    SelectList(String),
    /// A task's checkbox was flipped to `complete`
    ToggleTask { task_id: String, complete: bool },
    /// "Clear completed" on the selected list
    ClearCompleted,
    /// "Delete list" on the selected list
    DeleteList,
    /// The new-list form was submitted
    AddList(String),
    /// The new-task form was submitted
    AddTask(String),
}

/// Main application state containing the store and UI state.
///
/// The `view` field is always the render of the store's current state; it
/// is rebuilt after every command.
///
/// # Examples
///
/// ```
/// use tlist::application::{App, Command, TodoStore};
/// use tlist::infrastructure::{MemoryStore, StorageAdapter};
///
/// let store = TodoStore::open(StorageAdapter::new(MemoryStore::new()));
/// let mut app = App::new(store);
/// app.dispatch(Command::AddList("Home".to_string()));
/// assert_eq!(app.view.lists.len(), 1);
/// ```
#[derive(Debug)]
pub struct App<S> {
    /// The to-do store, the only owner of lists and selection
    store: TodoStore<S>,
    /// Last rendered view of the store
    pub view: View,
    /// Current application mode
    pub mode: AppMode,
    /// Pane the cursor keys act on
    pub focus: Focus,
    /// Highlighted row in the lists pane
    pub list_cursor: usize,
    /// Highlighted row in the task pane
    pub task_cursor: usize,
    /// Name being typed in `NewList`/`NewTask` mode
    pub input: String,
    /// Cursor position within the input, in characters
    pub cursor_position: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
}

impl<S: KeyValueStore> App<S> {
    /// Creates the application around an opened store.
    ///
    /// The list cursor starts on the selected list when there is one.
    pub fn new(store: TodoStore<S>) -> Self {
        let view = render(store.state());
        let list_cursor = view.active_index().unwrap_or(0);
        Self {
            store,
            view,
            mode: AppMode::Normal,
            focus: Focus::Lists,
            list_cursor,
            task_cursor: 0,
            input: String::new(),
            cursor_position: 0,
            status_message: None,
            help_scroll: 0,
        }
    }

    pub fn store(&self) -> &TodoStore<S> {
        &self.store
    }

    /// Runs one command: store mutation, persist, then a full re-render.
    ///
    /// A failed write is logged and reported in the status bar; the
    /// in-memory change stays applied and the session continues.
    pub fn dispatch(&mut self, command: Command) {
        let result = match command {
            Command::SelectList(id) => self.store.select_list(id),
            Command::ToggleTask { task_id, complete } => {
                self.store.toggle_task(&task_id, complete)
            }
            Command::ClearCompleted => self.store.clear_completed_tasks(),
            Command::DeleteList => self.store.delete_selected_list(),
            Command::AddList(name) => self.store.add_list(&name).map(|added| {
                if added.is_some() {
                    self.list_cursor = self.store.state().lists.len() - 1;
                }
            }),
            Command::AddTask(name) => self.store.add_task(&name).map(|added| {
                if added.is_some() {
                    self.task_cursor = self.store.selected_list().map_or(0, |l| l.tasks.len() - 1);
                }
            }),
        };

        if let Err(err) = result {
            error!("event=persist_failed module=app status=error error={}", err);
            self.status_message = Some(format!("Save failed: {err}"));
        }

        self.refresh_view();
    }

    /// Rebuilds the view from the store and clamps both cursors.
    pub fn refresh_view(&mut self) {
        self.view = render(self.store.state());
        self.list_cursor = clamp_cursor(self.list_cursor, self.view.lists.len());
        self.task_cursor = clamp_cursor(self.task_cursor, self.view.task_count());
        if self.view.detail.is_none() {
            self.focus = Focus::Lists;
        }
    }

    /// Moves focus to the other pane.
    ///
    /// The task pane can only take focus while it is visible.
    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Lists if self.view.detail.is_some() => Focus::Tasks,
            _ => Focus::Lists,
        };
    }

    pub fn move_up(&mut self) {
        match self.focus {
            Focus::Lists => self.list_cursor = self.list_cursor.saturating_sub(1),
            Focus::Tasks => self.task_cursor = self.task_cursor.saturating_sub(1),
        }
    }

    pub fn move_down(&mut self) {
        match self.focus {
            Focus::Lists => {
                if self.list_cursor + 1 < self.view.lists.len() {
                    self.list_cursor += 1;
                }
            }
            Focus::Tasks => {
                if self.task_cursor + 1 < self.view.task_count() {
                    self.task_cursor += 1;
                }
            }
        }
    }

    /// Selects the list under the list cursor.
    pub fn select_current_list(&mut self) {
        if let Some(row) = self.view.lists.get(self.list_cursor) {
            let id = row.id.clone();
            self.task_cursor = 0;
            self.dispatch(Command::SelectList(id));
        }
    }

    /// Flips the task under the task cursor.
    pub fn toggle_current_task(&mut self) {
        let target = self
            .view
            .detail
            .as_ref()
            .and_then(|pane| pane.tasks.get(self.task_cursor))
            .map(|row| (row.id.clone(), !row.complete));

        if let Some((task_id, complete)) = target {
            self.dispatch(Command::ToggleTask { task_id, complete });
        }
    }

    /// Enter in normal mode: select on the lists pane, toggle on the task pane.
    pub fn activate(&mut self) {
        match self.focus {
            Focus::Lists => self.select_current_list(),
            Focus::Tasks => self.toggle_current_task(),
        }
    }

    /// Switches to new-list mode with an empty input.
    pub fn start_new_list(&mut self) {
        self.mode = AppMode::NewList;
        self.input.clear();
        self.cursor_position = 0;
        self.status_message = None;
    }

    /// Switches to new-task mode with an empty input.
    ///
    /// Refused with a status hint while the task pane is hidden, since a task
    /// needs a selected list to go into.
    pub fn start_new_task(&mut self) {
        if self.view.detail.is_none() {
            self.status_message = Some("Select a list before adding tasks".to_string());
            return;
        }
        self.mode = AppMode::NewTask;
        self.input.clear();
        self.cursor_position = 0;
        self.status_message = None;
    }

    /// Submits the typed name as a new list or task and returns to normal mode.
    ///
    /// Blank input is silently declined by the store.
    pub fn submit_input(&mut self) {
        let name = std::mem::take(&mut self.input);
        let command = match self.mode {
            AppMode::NewList => Some(Command::AddList(name)),
            AppMode::NewTask => Some(Command::AddTask(name)),
            AppMode::Normal | AppMode::Help => None,
        };

        self.mode = AppMode::Normal;
        self.cursor_position = 0;

        if let Some(command) = command {
            self.dispatch(command);
        }
    }

    /// Cancels name entry without changing anything.
    pub fn cancel_input(&mut self) {
        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn open_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Inserts a character at the input cursor.
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor_position);
        self.input.insert(at, c);
        self.cursor_position += 1;
    }

    /// Deletes the character before the input cursor.
    pub fn delete_before_cursor(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let at = self.byte_offset(self.cursor_position);
            self.input.remove(at);
        }
    }

    /// Deletes the character under the input cursor.
    pub fn delete_at_cursor(&mut self) {
        if self.cursor_position < self.input_len() {
            let at = self.byte_offset(self.cursor_position);
            self.input.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor_position < self.input_len() {
            self.cursor_position += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input_len();
    }

    fn input_len(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map_or(self.input.len(), |(offset, _)| offset)
    }
}

fn clamp_cursor(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}
