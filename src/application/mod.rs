//! Application layer managing state and user workflows.
//!
//! This module owns the to-do store and coordinates between it and the
//! presentation layer: every user command mutates the store, which persists,
//! and the view is rebuilt.

pub mod state;
pub mod store;

pub use state::*;
pub use store::*;
