//! Optimistic in-memory view of the persisted history list.
//!
//! ## Summary
//! The UI shows a new record immediately and persists it in the background.
//! This models that as a two-phase local transaction: a tentative insert at
//! the front returns a token, a successful persist commits it, and a failed
//! persist removes exactly the inserted instance via the token. Matching by
//! token rather than field equality means a compensating removal can never
//! take out an unrelated record that happens to carry identical fields.

use serde_json::Value;

/// Identity of one tentative insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingToken(u64);

#[derive(Debug)]
struct Entry {
    pending: Option<PendingToken>,
    record: Value,
}

/// In-memory history list with pending-insert bookkeeping.
#[derive(Debug, Default)]
pub struct OptimisticHistory {
    next_token: u64,
    entries: Vec<Entry>,
}

impl OptimisticHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the view over a freshly listed persisted history; every entry
    /// starts committed.
    #[must_use]
    pub fn from_persisted(records: Vec<Value>) -> Self {
        Self {
            next_token: 0,
            entries: records
                .into_iter()
                .map(|record| Entry {
                    pending: None,
                    record,
                })
                .collect(),
        }
    }

    /// The visible list, newest first, pending inserts included.
    #[must_use]
    pub fn records(&self) -> Vec<&Value> {
        self.entries.iter().map(|entry| &entry.record).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts `record` at the front and returns the token identifying this
    /// insert until it is committed or reverted.
    pub fn insert_tentative(&mut self, record: Value) -> PendingToken {
        let token = PendingToken(self.next_token);
        self.next_token += 1;
        self.entries.insert(
            0,
            Entry {
                pending: Some(token),
                record,
            },
        );
        token
    }

    /// Marks a tentative insert as persisted. Returns false when the token
    /// is unknown (already committed or reverted).
    pub fn commit(&mut self, token: PendingToken) -> bool {
        for entry in &mut self.entries {
            if entry.pending == Some(token) {
                entry.pending = None;
                return true;
            }
        }
        false
    }

    /// Removes the tentative insert identified by `token`, leaving every
    /// other entry in place. Returns false when the token is unknown.
    pub fn revert(&mut self, token: PendingToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.pending != Some(token));
        before != self.entries.len()
    }
}
