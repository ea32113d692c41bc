//! Error taxonomy for the grid system model.
//!
//! - [`ValidationError`]: produced data would violate a stated invariant
//!   (field bounds, range ordering, contiguity, coverage).
//! - [`PreconditionError`]: the caller broke an operation contract (unknown
//!   id, artboard width outside the range, scaled root on export).
//! - [`GridError`]: union returned by partition edits.
//!
//! None of these are recovered internally. An edit that fails leaves the
//! caller's previous [`GridSystem`](crate::GridSystem) untouched.

use std::fmt;

use crate::id::PreferencesId;
use crate::preferences::{DemoElement, OffsetEdge};
use crate::range::RangeEdge;

/// Invariant violation detected by a constructor or by partition validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MinWidthOutOfRange {
        value: u32,
    },
    MaxWidthOutOfRange {
        value: u32,
    },
    EmptyRange {
        min_width: u32,
        max_width: u32,
    },
    /// A neighbour bound computed from an edit left the width domain.
    WidthUnderflow {
        value: u32,
    },
    ContentMaxWidthOutOfRange {
        value: u32,
    },
    ColumnsOutOfRange {
        value: u32,
    },
    GutterOutOfRange {
        value: u32,
    },
    MarginOutOfRange {
        value: u32,
    },
    ScaleOutOfRange {
        value: f64,
    },
    OffsetOutOfRange {
        element: DemoElement,
        edge: OffsetEdge,
        value: u32,
        max: u32,
    },
    OffsetMisordered {
        element: DemoElement,
        start: u32,
        end: u32,
    },
    NotFromStart {
        min_width: u32,
    },
    NotToEnd {
        max_width: u32,
    },
    NotContiguous {
        index: usize,
        max_width: Option<u32>,
        next_min_width: u32,
    },
    DuplicateId {
        id: PreferencesId,
    },
    /// The first entry's `min_width` and the last entry's `max_width` are
    /// pinned to the ends of the axis.
    FixedBoundary {
        id: PreferencesId,
        edge: RangeEdge,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinWidthOutOfRange { value } => {
                write!(f, "min width {value} is outside the viewport width domain")
            }
            Self::MaxWidthOutOfRange { value } => {
                write!(f, "max width {value} is outside the viewport width domain")
            }
            Self::EmptyRange {
                min_width,
                max_width,
            } => write!(
                f,
                "breakpoint range is empty: min width {min_width} must be below max width {max_width}"
            ),
            Self::WidthUnderflow { value } => {
                write!(f, "no viewport width precedes {value}")
            }
            Self::ContentMaxWidthOutOfRange { value } => {
                write!(f, "content max width {value} is outside [128, 1920]")
            }
            Self::ColumnsOutOfRange { value } => write!(f, "columns {value} is outside [1, 12]"),
            Self::GutterOutOfRange { value } => write!(f, "gutter {value} is outside [0, 256]"),
            Self::MarginOutOfRange { value } => write!(f, "margin {value} is outside [0, 256]"),
            Self::ScaleOutOfRange { value } => write!(f, "scale {value} is outside [1, 2]"),
            Self::OffsetOutOfRange {
                element,
                edge,
                value,
                max,
            } => write!(
                f,
                "{element} {edge} offset {value} is outside [1, {max}]"
            ),
            Self::OffsetMisordered {
                element,
                start,
                end,
            } => write!(
                f,
                "{element} offset start {start} must be below end {end}"
            ),
            Self::NotFromStart { min_width } => write!(
                f,
                "first breakpoint range starts at {min_width} instead of 0"
            ),
            Self::NotToEnd { max_width } => write!(
                f,
                "last breakpoint range ends at {max_width} instead of extending to infinity"
            ),
            Self::NotContiguous {
                index,
                max_width,
                next_min_width,
            } => match max_width {
                Some(max_width) => write!(
                    f,
                    "breakpoint ranges {index} and {} are not contiguous: {max_width} + 1 != {next_min_width}",
                    index + 1
                ),
                None => write!(
                    f,
                    "breakpoint range {index} is unbounded but is followed by a range starting at {next_min_width}"
                ),
            },
            Self::DuplicateId { id } => write!(f, "duplicate grid preferences id {id}"),
            Self::FixedBoundary { id, edge } => write!(
                f,
                "{edge} of grid preferences {id} is pinned to the end of the width axis"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Caller contract violation.
#[derive(Debug, Clone, PartialEq)]
pub enum PreconditionError {
    UnknownId {
        id: PreferencesId,
    },
    ArtboardOutOfRange {
        artboard_width: u32,
        range: String,
    },
    /// Layout export requires an unscaled root.
    ScaledRoot {
        scale: f64,
    },
}

impl fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownId { id } => write!(f, "grid preferences {id} not found"),
            Self::ArtboardOutOfRange {
                artboard_width,
                range,
            } => write!(
                f,
                "artboard width {artboard_width} does not match breakpoint range {range}"
            ),
            Self::ScaledRoot { scale } => write!(
                f,
                "layout export requires a root scale of 1, got {scale}"
            ),
        }
    }
}

impl std::error::Error for PreconditionError {}

/// Failure of a partition edit.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    Validation(ValidationError),
    Precondition(PreconditionError),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "validation failed: {err}"),
            Self::Precondition(err) => write!(f, "precondition failed: {err}"),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Precondition(err) => Some(err),
        }
    }
}

impl From<ValidationError> for GridError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<PreconditionError> for GridError {
    fn from(err: PreconditionError) -> Self {
        Self::Precondition(err)
    }
}
