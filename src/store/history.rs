//! Bounded undo/redo history ring.
//!
//! Kept outside the [`crate::document::Document`] so that restoring a
//! past document does not also restore the ring's own cursor.

use std::collections::VecDeque;

use crate::document::Document;

pub struct History {
    capacity: usize,
    entries: VecDeque<Document>,
    /// Index of the entry that reflects the *current* document. Always
    /// `Some` once constructed; the `Option` only exists to make
    /// `undo`/`redo`'s early-return-on-empty paths read as ordinary
    /// `?`-propagation.
    cursor: Option<usize>,
}

impl History {
    /// Seeds the ring with `initial` as entry 0, so the pre-first-commit
    /// document stays reachable via `undo()` rather than being lost the
    /// moment the first transaction commits.
    pub fn new(capacity: usize, initial: Document) -> Self {
        let mut entries = VecDeque::new();
        entries.push_back(initial);
        Self {
            capacity: capacity.max(1),
            entries,
            cursor: Some(0),
        }
    }

    /// Appends `document` as the new current entry, truncating any
    /// forward (redo) history first. Overflow drops the oldest entry
    /// and the cursor is decremented to compensate.
    pub fn push(&mut self, document: Document) {
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        } else {
            self.entries.clear();
        }
        self.entries.push_back(document);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            if let Some(cursor) = self.cursor {
                self.cursor = Some(cursor.saturating_sub(1));
            }
        }
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Steps back one entry and returns a clone of the document there,
    /// or `None` if already at the oldest entry.
    pub fn undo(&mut self) -> Option<Document> {
        let cursor = self.cursor?;
        if cursor == 0 {
            return None;
        }
        let new_cursor = cursor - 1;
        self.cursor = Some(new_cursor);
        self.entries.get(new_cursor).map(Document::deep_clone)
    }

    /// Steps forward one entry and returns a clone of the document
    /// there, or `None` if already at the newest entry.
    pub fn redo(&mut self) -> Option<Document> {
        let cursor = self.cursor?;
        if cursor + 1 >= self.entries.len() {
            return None;
        }
        let new_cursor = cursor + 1;
        self.cursor = Some(new_cursor);
        self.entries.get(new_cursor).map(Document::deep_clone)
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(modified: u64) -> Document {
        let mut d = Document::new(0);
        d.meta.modified = modified;
        d
    }

    #[test]
    fn seeded_initial_entry_is_reachable_before_any_push() {
        let h = History::new(50, doc(0));
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn undo_redo_round_trip() {
        let mut h = History::new(50, doc(0));
        h.push(doc(1));
        h.push(doc(2));
        assert!(h.can_undo());
        assert!(!h.can_redo());

        let back = h.undo().unwrap();
        assert_eq!(back.meta.modified, 1);
        assert!(h.can_redo());

        let forward = h.redo().unwrap();
        assert_eq!(forward.meta.modified, 2);
        assert!(!h.can_redo());
    }

    #[test]
    fn undo_past_first_commit_reaches_the_seeded_initial_document() {
        let mut h = History::new(50, doc(0));
        h.push(doc(1));
        h.push(doc(2));

        let back = h.undo().unwrap();
        assert_eq!(back.meta.modified, 1);
        let back = h.undo().unwrap();
        assert_eq!(back.meta.modified, 0, "second undo should reach the pre-first-commit document");
        assert!(h.undo().is_none());

        let forward = h.redo().unwrap();
        assert_eq!(forward.meta.modified, 1);
    }

    #[test]
    fn undo_at_oldest_entry_returns_none() {
        let mut h = History::new(50, doc(0));
        assert!(h.undo().is_none());
    }

    #[test]
    fn overflow_drops_oldest_and_keeps_cursor_at_newest() {
        let mut h = History::new(2, doc(0));
        h.push(doc(1));
        h.push(doc(2));
        assert_eq!(h.len(), 2);
        let back = h.undo().unwrap();
        assert_eq!(back.meta.modified, 1, "oldest entry (0) should have been dropped");
    }

    #[test]
    fn push_after_undo_truncates_redo_history() {
        let mut h = History::new(50, doc(0));
        h.push(doc(1));
        h.push(doc(2));
        h.undo();
        h.push(doc(3));
        assert!(!h.can_redo());
        let back = h.undo().unwrap();
        assert_eq!(back.meta.modified, 1);
    }
}
