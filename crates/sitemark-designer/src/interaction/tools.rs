//! Tools and their in-progress state.
//!
//! [`Tool`] is what the UI asks for; [`ToolState`] is the active tool plus
//! whatever it has accumulated between events (draft points, drag start,
//! ghost placement). Switching tools replaces the state wholesale, which
//! is what cancels any in-progress drawing.

use std::fmt;

use sitemark_core::EntityId;

use super::events::{DimensionInfo, EdgePick};
use crate::geometry::Bounds;
use crate::model::{
    ArraySpec, BatchGroup, CableType, EquipmentType, ItemRef, MaterialConfig, Point,
};
use crate::snap::CableSnap;

/// Tool selection requests.
#[derive(Debug, Clone, PartialEq)]
pub enum Tool {
    Pan,
    Select,
    ScaleCalibration,
    RoofMask,
    RoofDirection,
    Line(CableType),
    PvArray(ArraySpec),
    Equipment(EquipmentType),
    Material(MaterialConfig),
    Batch(BatchGroup),
    Dimension,
    AlignEdges,
}

impl Tool {
    /// Whether this tool only ever mutates the scene. Such tools do nothing
    /// in read-only mode.
    pub fn is_editing(&self) -> bool {
        !matches!(self, Tool::Pan | Tool::Select | Tool::Dimension | Tool::AlignEdges)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Pan => write!(f, "pan"),
            Tool::Select => write!(f, "select"),
            Tool::ScaleCalibration => write!(f, "scale calibration"),
            Tool::RoofMask => write!(f, "roof mask"),
            Tool::RoofDirection => write!(f, "roof direction"),
            Tool::Line(t) => write!(f, "{} line", t),
            Tool::PvArray(_) => write!(f, "PV array"),
            Tool::Equipment(t) => write!(f, "{}", t),
            Tool::Material(c) => write!(f, "{} ({})", c.kind, c.name),
            Tool::Batch(b) => write!(f, "batch '{}'", b.name),
            Tool::Dimension => write!(f, "dimension"),
            Tool::AlignEdges => write!(f, "align edges"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanState {
    /// Last pointer position while the button is held, screen space
    pub last: Option<Point>,
}

/// Item captured at drag start with its initial reference point.
#[derive(Debug, Clone, PartialEq)]
pub struct DragItem {
    pub item: ItemRef,
    pub initial: Point,
}

/// Pose a single dragged rectangle snapped to.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSnap {
    pub position: Point,
    pub rotation: f64,
    pub snapped_to_id: EntityId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub start: Point,
    pub current: Point,
    pub items: Vec<DragItem>,
    pub snap: Option<DragSnap>,
}

impl DragState {
    pub fn delta(&self) -> Point {
        self.current - self.start
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarqueeState {
    /// Corners in world space
    pub start: Point,
    pub current: Point,
    pub additive: bool,
}

impl MarqueeState {
    pub fn bounds(&self) -> Bounds {
        Bounds::from_corners(self.start, self.current)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SelectState {
    #[default]
    Idle,
    Dragging(DragState),
    Marquee(MarqueeState),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibrationState {
    pub start: Option<Point>,
    pub end: Option<Point>,
    pub dragging: bool,
    /// Pixel length waiting for the real-world distance
    pub pending: Option<f64>,
}

/// Ordered point buffer of a polygon or polyline being drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub points: Vec<Point>,
    /// Pointer position for the rubber-band segment
    pub cursor: Option<Point>,
}

impl Draft {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineDraft {
    pub cable_type: CableType,
    pub draft: Draft,
    /// Terminus under the pointer, if any
    pub snap: Option<CableSnap>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectionDraft {
    pub start: Option<Point>,
    pub end: Option<Point>,
    pub target: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlacementItem {
    Array(ArraySpec),
    Equipment(EquipmentType),
    Material(MaterialConfig),
    Batch(BatchGroup),
}

/// Render-only preview of the pending placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Ghost {
    pub position: Point,
    pub rotation: f64,
    pub snapped_to_id: Option<EntityId>,
    pub roof_mask_id: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacementState {
    pub item: PlacementItem,
    /// Rotation added with the rotate key, degrees
    pub manual_rotation: f64,
    pub ghost: Option<Ghost>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickState {
    pub last_dimension: Option<DimensionInfo>,
    /// Edges picked so far; a third pick starts over
    pub edges: Vec<EdgePick>,
}

/// Active tool and its in-progress state.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolState {
    Pan(PanState),
    Select(SelectState),
    ScaleCalibration(CalibrationState),
    RoofMask(Draft),
    RoofDirection(DirectionDraft),
    Line(LineDraft),
    Placement(PlacementState),
    Dimension(PickState),
    AlignEdges(PickState),
}

impl Default for ToolState {
    fn default() -> Self {
        ToolState::Select(SelectState::Idle)
    }
}

impl From<Tool> for ToolState {
    fn from(tool: Tool) -> Self {
        match tool {
            Tool::Pan => ToolState::Pan(PanState::default()),
            Tool::Select => ToolState::Select(SelectState::Idle),
            Tool::ScaleCalibration => ToolState::ScaleCalibration(CalibrationState::default()),
            Tool::RoofMask => ToolState::RoofMask(Draft::default()),
            Tool::RoofDirection => ToolState::RoofDirection(DirectionDraft::default()),
            Tool::Line(cable_type) => ToolState::Line(LineDraft {
                cable_type,
                draft: Draft::default(),
                snap: None,
            }),
            Tool::PvArray(spec) => placement(PlacementItem::Array(spec)),
            Tool::Equipment(t) => placement(PlacementItem::Equipment(t)),
            Tool::Material(config) => placement(PlacementItem::Material(config)),
            Tool::Batch(group) => placement(PlacementItem::Batch(group)),
            Tool::Dimension => ToolState::Dimension(PickState::default()),
            Tool::AlignEdges => ToolState::AlignEdges(PickState::default()),
        }
    }
}

fn placement(item: PlacementItem) -> ToolState {
    ToolState::Placement(PlacementState {
        item,
        manual_rotation: 0.0,
        ghost: None,
    })
}

impl ToolState {
    pub fn name(&self) -> &'static str {
        match self {
            ToolState::Pan(_) => "pan",
            ToolState::Select(_) => "select",
            ToolState::ScaleCalibration(_) => "scale calibration",
            ToolState::RoofMask(_) => "roof mask",
            ToolState::RoofDirection(_) => "roof direction",
            ToolState::Line(_) => "line",
            ToolState::Placement(_) => "placement",
            ToolState::Dimension(_) => "dimension",
            ToolState::AlignEdges(_) => "align edges",
        }
    }

    /// True while a multi-event gesture or drawing is under way.
    pub fn in_progress(&self) -> bool {
        match self {
            ToolState::Pan(s) => s.last.is_some(),
            ToolState::Select(s) => !matches!(s, SelectState::Idle),
            ToolState::ScaleCalibration(s) => s.start.is_some(),
            ToolState::RoofMask(d) => !d.is_empty(),
            ToolState::RoofDirection(d) => d.start.is_some(),
            ToolState::Line(l) => !l.draft.is_empty(),
            ToolState::Placement(_) => false,
            ToolState::Dimension(_) | ToolState::AlignEdges(_) => false,
        }
    }
}
