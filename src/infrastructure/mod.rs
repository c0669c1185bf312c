//! Infrastructure layer providing storage and logging.
//!
//! This module contains the key-value stores, the storage adapter that
//! maps the to-do state onto them, and the file logging setup.

pub mod logging;
pub mod persistence;
pub mod storage;

pub use logging::*;
pub use persistence::*;
pub use storage::*;
