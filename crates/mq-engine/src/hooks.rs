//! Seams between the engine and the outside world.
//!
//! All narration leaves through [`GameIo`] and all persistence goes through
//! [`SaveStore`], so the engine itself never touches stdout or the
//! filesystem. The in-memory implementations back the tests and any
//! embedding that wants to script a session.

use std::cell::RefCell;
use std::rc::Rc;

use crate::player::PlayerSnapshot;

/// Sink for everything the game says.
pub trait GameIo {
    /// Emit one block of text. May contain newlines; no trailing newline.
    fn print(&mut self, text: &str);
}

/// Persistence for player snapshots.
pub trait SaveStore {
    /// Persist a snapshot, replacing any previous one.
    fn save(&mut self, snapshot: &PlayerSnapshot);

    /// Load the stored snapshot, or `None` when there is nothing usable.
    fn load(&mut self) -> Option<PlayerSnapshot>;
}

/// A [`GameIo`] that collects output in memory.
///
/// Clones share the same buffer, so a test can hand one handle to the engine
/// and read from another.
#[derive(Debug, Clone, Default)]
pub struct MemoryIo {
    lines: Rc<RefCell<Vec<String>>>,
}

impl MemoryIo {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything printed so far, joined with newlines.
    pub fn text(&self) -> String {
        self.lines.borrow().join("\n")
    }

    /// Drain and return everything printed since the last call.
    pub fn take(&self) -> String {
        self.lines.borrow_mut().drain(..).collect::<Vec<_>>().join("\n")
    }
}

impl GameIo for MemoryIo {
    fn print(&mut self, text: &str) {
        self.lines.borrow_mut().push(text.to_string());
    }
}

/// A [`SaveStore`] that keeps the snapshot in memory.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<PlayerSnapshot>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored snapshot, if any.
    pub fn snapshot(&self) -> Option<PlayerSnapshot> {
        self.slot.borrow().clone()
    }
}

impl SaveStore for MemoryStore {
    fn save(&mut self, snapshot: &PlayerSnapshot) {
        *self.slot.borrow_mut() = Some(snapshot.clone());
    }

    fn load(&mut self) -> Option<PlayerSnapshot> {
        self.slot.borrow().clone()
    }
}
