//! Visited-pose history with undo/redo cursor semantics.

use arbor_math::Transform;

/// An ordered sequence of visited poses plus a cursor.
///
/// `cursor() == None` means "no history, at rest". Pushing while the cursor
/// sits before the tail discards the branch past the cursor before
/// appending, and the cursor always lands on the new tail. Stepping never
/// moves the cursor outside `0..len`.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<Transform>,
    cursor: Option<usize>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current cursor position, `None` when at rest with no history.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The entry under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&Transform> {
        self.cursor.map(|c| &self.entries[c])
    }

    /// The oldest entry, the pose the whole excursion started from.
    #[must_use]
    pub fn first(&self) -> Option<&Transform> {
        self.entries.first()
    }

    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&Transform> {
        self.entries.get(index)
    }

    /// Append a pose, discarding any branch past the cursor first. The
    /// cursor moves to the appended entry.
    pub fn push(&mut self, pose: Transform) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push(pose);
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Move the cursor toward the tail. At the tail (or with no history)
    /// this is a no-op returning `None`.
    pub fn step_forward(&mut self) -> Option<&Transform> {
        let cursor = self.cursor?;
        if cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor = Some(cursor + 1);
        self.current()
    }

    /// Move the cursor toward the start. At entry 0 (or with no history)
    /// this is a no-op returning `None`.
    pub fn step_back(&mut self) -> Option<&Transform> {
        let cursor = self.cursor?;
        if cursor == 0 {
            return None;
        }
        self.cursor = Some(cursor - 1);
        self.current()
    }

    /// Drop all entries and return to the at-rest state.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}
