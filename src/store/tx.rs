//! A single open transaction frame.

use crate::document::Document;

/// One entry on the transaction stack: a label and a deep clone of the
/// document as it stood when the frame was opened.
pub struct TxFrame {
    pub label: String,
    pub snapshot: Document,
    /// The store's logical clock reading when this frame was opened.
    pub started_at: u64,
}

impl TxFrame {
    pub fn new(label: String, snapshot: Document, started_at: u64) -> Self {
        Self {
            label,
            snapshot,
            started_at,
        }
    }
}
