//! Input events and handler outcomes.

use sitemark_core::EntityId;

use crate::geometry::RectEdge;
use crate::model::{ItemKind, ItemRef, Point};

/// Modifier keys held during an event.
///
/// Shift constrains drawing to 45° and extends selections, Ctrl extends
/// selections and prefixes shortcuts, Alt forces alignment while placing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::NONE
        }
    }

    /// Modifier that toggles selection membership instead of replacing it.
    pub fn extends_selection(&self) -> bool {
        self.shift || self.ctrl
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
}

/// A pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub button: MouseButton,
    pub modifiers: Modifiers,
    /// 1 for a single click, 2 for the second press of a double-click
    pub click_count: u8,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
            click_count: 1,
        }
    }

    pub fn at(position: Point) -> Self {
        Self::new(position.x, position.y)
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn double_click(mut self) -> Self {
        self.click_count = 2;
        self
    }

    pub fn is_double_click(&self) -> bool {
        self.click_count >= 2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Delete,
    Backspace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Matches a character key case-insensitively.
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.key, Key::Char(k) if k.eq_ignore_ascii_case(&c))
    }
}

/// Real-world size of a picked item, for the dimension tool.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionInfo {
    pub item: ItemRef,
    /// Footprint size in meters for rectangles, bounding size for others
    pub width_m: f64,
    pub height_m: f64,
    /// Roof area or cable length where applicable
    pub area_m2: Option<f64>,
    pub length_m: Option<f64>,
}

/// An edge picked with the align-edges tool, in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePick {
    pub item: ItemRef,
    pub edge_index: usize,
    /// Named side for rectangular items
    pub side: Option<RectEdge>,
    pub start: Point,
    pub end: Point,
}

impl EdgePick {
    pub fn kind(&self) -> ItemKind {
        self.item.kind
    }
}

/// What a handler did. Interactive calls never fail; at worst they report
/// [`InteractionOutcome::Unchanged`].
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    /// Nothing visible changed
    Unchanged,
    /// Only ephemeral state changed (preview, hover, view); redraw
    Redraw,
    /// A snapshot was committed to the scene
    SceneChanged,
    /// A calibration line was finished; ask the user for its real length
    CalibrationRequested { pixel_distance: f64 },
    /// The user asked to save
    SaveRequested,
    /// The dimension tool picked an item
    DimensionPicked(DimensionInfo),
    /// The align-edges tool picked an edge
    EdgePicked(EdgePick),
    /// An item was placed
    Placed { ids: Vec<EntityId> },
}

impl InteractionOutcome {
    pub fn needs_redraw(&self) -> bool {
        !matches!(self, InteractionOutcome::Unchanged)
    }

    pub fn changed_scene(&self) -> bool {
        matches!(
            self,
            InteractionOutcome::SceneChanged | InteractionOutcome::Placed { .. }
        )
    }
}
