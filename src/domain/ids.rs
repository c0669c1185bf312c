//! Identifier generation for lists and tasks.
//!
//! Ids are decimal millisecond timestamps. A plain timestamp collides when two
//! entities are created in the same tick, so the generator remembers the
//! largest value it has handed out (or seen in loaded data) and bumps past it.
//! Once that value hits `u64::MAX` the generator continues with
//! `18446744073709551615-<n>` ids.

use super::models::{Task, TaskList};
use std::time::{SystemTime, UNIX_EPOCH};

/// Produces never repeating ids.
///
/// Every id returned by [`IdGenerator::next_id`] differs from every id
/// previously returned or passed to [`IdGenerator::observe`], regardless of
/// how fast calls arrive or whether the wall clock moves backwards.
///
/// # Examples
///
/// ```
/// use tlist::domain::IdGenerator;
///
/// let mut ids = IdGenerator::with_clock(|| 1_000);
/// assert_eq!(ids.next_id(), "1000");
/// assert_eq!(ids.next_id(), "1001");
/// ```
#[derive(Debug, Clone)]
pub struct IdGenerator {
    last: u64,
    /// Highest suffix issued or observed after `last` reached `u64::MAX`
    overflow: u64,
    clock: fn() -> u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Creates a generator driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(unix_millis)
    }

    /// Creates a generator driven by a custom millisecond clock.
    pub fn with_clock(clock: fn() -> u64) -> Self {
        Self {
            last: 0,
            overflow: 0,
            clock,
        }
    }

    /// Records an existing id so it is never issued again.
    ///
    /// Ids in neither the decimal nor the suffixed form cannot collide with
    /// generated ones and are ignored.
    pub fn observe(&mut self, id: &str) {
        if let Ok(value) = id.parse::<u64>() {
            self.last = self.last.max(value);
        } else if let Some(suffix) = id
            .strip_prefix(OVERFLOW_PREFIX)
            .and_then(|rest| rest.parse::<u64>().ok())
            .filter(|suffix| *suffix < u64::MAX)
        {
            self.last = u64::MAX;
            self.overflow = self.overflow.max(suffix);
        }
    }

    pub fn next_id(&mut self) -> String {
        if self.last == u64::MAX {
            self.overflow += 1;
            return format!("{OVERFLOW_PREFIX}{}", self.overflow);
        }

        let now = (self.clock)();
        let next = if now > self.last { now } else { self.last + 1 };
        self.last = next;
        next.to_string()
    }

    /// Builds an empty list with a fresh id. The name is taken as given.
    pub fn create_list(&mut self, name: impl Into<String>) -> TaskList {
        TaskList::new(self.next_id(), name)
    }

    /// Builds an incomplete task with a fresh id. The name is taken as given.
    pub fn create_task(&mut self, name: impl Into<String>) -> Task {
        Task::new(self.next_id(), name)
    }
}

const OVERFLOW_PREFIX: &str = "18446744073709551615-";

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
