//! Scene Model.
//!
//! [`SceneModel`] owns the authoritative design: the history of
//! [`DesignState`] snapshots with the image scale of each, and the
//! background reference. Every mutation produces a new snapshot and goes through
//! [`SceneModel::commit`]; in read-only mode all of them are refused.
//!
//! This module is split into submodules:
//! - `history`: snapshot stack and cursor
//! - `collections`: per-collection updaters, delete and translate
//! - `properties`: entity property edits and rescaling
//! - `file_io`: load from and save to layout records

mod collections;
mod file_io;
mod history;
mod properties;

pub use history::History;

use std::sync::Arc;

use crate::design_state::DesignState;
use crate::model::ScaleInfo;
use crate::serialization::{BackgroundRef, LayoutMetadata};

#[derive(Debug, Clone)]
pub struct SceneModel {
    history: History,
    background: Option<BackgroundRef>,
    metadata: LayoutMetadata,
    read_only: bool,
    dirty: bool,
}

impl SceneModel {
    /// Empty scene keeping at most `max_snapshots` history entries
    /// (0 = unbounded).
    pub fn new(max_snapshots: usize) -> Self {
        Self {
            history: History::new(DesignState::default(), max_snapshots),
            background: None,
            metadata: LayoutMetadata::new("Untitled"),
            read_only: false,
            dirty: false,
        }
    }

    /// The snapshot at the history cursor. This is what gets rendered.
    pub fn state(&self) -> &DesignState {
        self.history.current()
    }

    /// Shared handle to the current snapshot.
    pub fn snapshot(&self) -> Arc<DesignState> {
        Arc::clone(self.history.current())
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        if self.read_only != read_only {
            tracing::debug!("Scene read-only: {}", read_only);
        }
        self.read_only = read_only;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the dirty flag after the caller has persisted the design.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.metadata.name = name.into();
    }

    /// Metadata of the loaded layout; saved back with only `name` and
    /// `modified` updated.
    pub fn metadata(&self) -> &LayoutMetadata {
        &self.metadata
    }

    /// Scale of the current snapshot; undo and redo restore it.
    pub fn scale(&self) -> Option<ScaleInfo> {
        self.history.scale()
    }

    /// Calibrated meters per pixel, `None` until the scale is set.
    pub fn meters_per_pixel(&self) -> Option<f64> {
        self.scale().map(|s| s.ratio)
    }

    pub fn background(&self) -> Option<&BackgroundRef> {
        self.background.as_ref()
    }

    pub fn set_background(&mut self, background: Option<BackgroundRef>) -> bool {
        if self.read_only {
            tracing::debug!("Ignoring background change in read-only mode");
            return false;
        }
        self.background = background;
        self.dirty = true;
        true
    }

    /// Appends `state` to the history and makes it current.
    ///
    /// Returns false (and changes nothing) in read-only mode.
    pub fn commit(&mut self, state: DesignState) -> bool {
        let scale = self.scale();
        self.commit_scaled(state, scale)
    }

    fn commit_scaled(&mut self, state: DesignState, scale: Option<ScaleInfo>) -> bool {
        if self.read_only {
            tracing::debug!("Ignoring commit in read-only mode");
            return false;
        }
        self.history.commit_scaled(state, scale);
        self.dirty = true;
        tracing::debug!(
            "Committed snapshot {} ({} items)",
            self.history.cursor(),
            self.state().item_count()
        );
        true
    }

    /// Builds the next snapshot from the current one and commits it.
    pub fn apply(&mut self, f: impl FnOnce(&DesignState) -> DesignState) -> bool {
        if self.read_only {
            tracing::debug!("Ignoring update in read-only mode");
            return false;
        }
        let next = f(self.state());
        self.commit(next)
    }

    pub fn undo(&mut self) -> bool {
        if self.read_only {
            return false;
        }
        let moved = self.history.undo();
        if moved {
            self.dirty = true;
            tracing::debug!("Undo to snapshot {}", self.history.cursor());
        }
        moved
    }

    pub fn redo(&mut self) -> bool {
        if self.read_only {
            return false;
        }
        let moved = self.history.redo();
        if moved {
            self.dirty = true;
            tracing::debug!("Redo to snapshot {}", self.history.cursor());
        }
        moved
    }

    pub fn can_undo(&self) -> bool {
        !self.read_only && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.read_only && self.history.can_redo()
    }
}

impl Default for SceneModel {
    fn default() -> Self {
        Self::new(0)
    }
}
