use crate::domain::resources::{Color, ResourceId, Timestamp};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// Value Object - header key of a matrix column block. A base block is
/// keyed by the resource id; the counter-factual block appends a suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn base(id: &ResourceId) -> Self {
        Self(id.value().to_string())
    }

    pub fn cumulative(id: &ResourceId) -> Self {
        Self(format!("{}-cumulative", id.value()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Value Object - marker shape
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
pub enum MarkerShape {
    #[strum(serialize = "circle")]
    #[serde(rename = "circle")]
    Circle,
    #[strum(serialize = "square")]
    #[serde(rename = "square")]
    Square,
}

/// Fixed marker size - markers only distinguish event days from plain
/// days, they carry no magnitude.
pub const MARKER_SIZE: u32 = 8;

/// Value Object - visual emphasis for a day a recommendation landed on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    pub color: Color,
    pub shape: MarkerShape,
    pub size: u32,
}

/// Value Object - chart line style for one metric column. `slot` is the
/// sequential series index the renderer styles by; it is renumbered
/// whenever columns are excised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub color: Color,
    pub dashed: bool,
    pub slot: usize,
}

/// Value Object - one column of the shared matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnSpec {
    /// Index 0, always. Carries the day for the whole row.
    Time,
    /// A charted series: base or cumulative-overlay values.
    Metric { id: ColumnId, label: String, style: SeriesStyle },
    /// Tooltip text for the preceding metric column.
    Annotation { owner: ColumnId },
    /// Event marker for the preceding metric column.
    Marker { owner: ColumnId },
}

impl ColumnSpec {
    pub fn metric_id(&self) -> Option<&ColumnId> {
        match self {
            ColumnSpec::Metric { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Value Object - inclusive day range currently spanned by the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Value Object - a single matrix cell. `None` cells (days a series has no
/// data for) live as `Option<CellValue>` in the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Daily binding count
    Count(f64),
    /// Tooltip text
    Note(String),
    /// Event marker
    Point(MarkerSpec),
}
