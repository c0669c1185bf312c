//! TLIST - Terminal To-Do Library
//!
//! Named lists of tasks with completion flags, kept in a local key-value
//! file and driven from a terminal interface.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::*;
pub use domain::*;
