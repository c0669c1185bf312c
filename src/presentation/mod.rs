//! Presentation layer handling terminal UI and user input.
//!
//! `view` turns the to-do state into a plain screen description, `ui` draws
//! that description with ratatui, and `input` maps key presses onto the
//! application.

pub mod input;
pub mod ui;
pub mod view;

pub use input::*;
pub use ui::*;
pub use view::*;
