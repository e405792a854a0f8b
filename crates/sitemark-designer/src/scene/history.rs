//! Linear undo/redo history of whole-scene snapshots.

use std::sync::Arc;

use crate::design_state::DesignState;
use crate::model::ScaleInfo;

/// One history step: a snapshot and the image scale it was measured at.
#[derive(Debug, Clone)]
struct Entry {
    state: Arc<DesignState>,
    scale: Option<ScaleInfo>,
}

/// Snapshots plus a cursor. The snapshot at the cursor is the current scene.
///
/// The cursor always points at a valid snapshot: the list is never empty.
/// Each snapshot carries its scale so derived areas and lengths always
/// match the scale restored with them.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Entry>,
    cursor: usize,
    max_snapshots: usize,
}

impl History {
    /// Starts an uncalibrated history containing only `initial`. A
    /// `max_snapshots` of 0 keeps every snapshot.
    pub fn new(initial: DesignState, max_snapshots: usize) -> Self {
        Self {
            entries: vec![Entry {
                state: Arc::new(initial),
                scale: None,
            }],
            cursor: 0,
            max_snapshots,
        }
    }

    pub fn current(&self) -> &Arc<DesignState> {
        &self.entries[self.cursor].state
    }

    /// Scale of the snapshot at the cursor.
    pub fn scale(&self) -> Option<ScaleInfo> {
        self.entries[self.cursor].scale
    }

    /// Drops the redo tail, appends `state` at the current scale and moves
    /// the cursor onto it.
    pub fn commit(&mut self, state: DesignState) {
        let scale = self.scale();
        self.commit_scaled(state, scale);
    }

    /// Like [`History::commit`], but the new step also changes the scale.
    pub fn commit_scaled(&mut self, state: DesignState, scale: Option<ScaleInfo>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(Entry {
            state: Arc::new(state),
            scale,
        });
        self.cursor = self.entries.len() - 1;

        if self.max_snapshots > 0 && self.entries.len() > self.max_snapshots {
            let excess = self.entries.len() - self.max_snapshots;
            self.entries.drain(..excess);
            self.cursor -= excess;
            tracing::debug!("History limit reached, dropped {} oldest snapshot(s)", excess);
        }
    }

    /// Steps back one snapshot. Returns false at the oldest snapshot.
    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Steps forward one snapshot. Returns false at the tip.
    pub fn redo(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    pub fn redo_depth(&self) -> usize {
        self.entries.len() - self.cursor - 1
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn max_snapshots(&self) -> usize {
        self.max_snapshots
    }

    /// Replaces the whole history with a single snapshot.
    pub fn reset(&mut self, state: DesignState, scale: Option<ScaleInfo>) {
        self.entries = vec![Entry {
            state: Arc::new(state),
            scale,
        }];
        self.cursor = 0;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DesignState::default(), 0)
    }
}
