//! Closed viewport-width intervals.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Narrowest viewport width a range may start at.
pub const VIEWPORT_WIDTH_MIN: u32 = 0;
/// Widest finite viewport width a range may end at.
pub const VIEWPORT_WIDTH_MAX: u32 = 9999;

/// One of the two bounds of a [`BreakpointRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangeEdge {
    MinWidth,
    MaxWidth,
}

impl RangeEdge {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MinWidth => "min width",
            Self::MaxWidth => "max width",
        }
    }
}

impl fmt::Display for RangeEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Replacement for one bound of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePatch {
    MinWidth(u32),
    /// `None` extends the range to infinity.
    MaxWidth(Option<u32>),
}

/// Inclusive interval `[min_width, max_width]` of viewport widths.
///
/// `max_width == None` means the range extends to infinity.
///
/// # Invariants
///
/// 1. `min_width` lies in `[0, 9998]`.
/// 2. A finite `max_width` lies in `[1, 9999]`.
/// 3. `min_width < max_width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBreakpointRange", into = "RawBreakpointRange")]
pub struct BreakpointRange {
    min_width: u32,
    max_width: Option<u32>,
}

impl BreakpointRange {
    /// Build and validate a range.
    pub fn new(min_width: u32, max_width: Option<u32>) -> Result<Self, ValidationError> {
        if min_width > VIEWPORT_WIDTH_MAX - 1 {
            return Err(ValidationError::MinWidthOutOfRange { value: min_width });
        }
        if let Some(max_width) = max_width {
            if !(VIEWPORT_WIDTH_MIN + 1..=VIEWPORT_WIDTH_MAX).contains(&max_width) {
                return Err(ValidationError::MaxWidthOutOfRange { value: max_width });
            }
            if min_width >= max_width {
                return Err(ValidationError::EmptyRange {
                    min_width,
                    max_width,
                });
            }
        }
        Ok(Self {
            min_width,
            max_width,
        })
    }

    /// Range covering the whole axis, `[0, ∞)`.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            min_width: VIEWPORT_WIDTH_MIN,
            max_width: None,
        }
    }

    #[must_use]
    pub const fn min_width(&self) -> u32 {
        self.min_width
    }

    /// Upper bound, `None` when unbounded.
    #[must_use]
    pub const fn max_width(&self) -> Option<u32> {
        self.max_width
    }

    #[must_use]
    pub const fn is_from_start(&self) -> bool {
        self.min_width == VIEWPORT_WIDTH_MIN
    }

    #[must_use]
    pub const fn is_to_end(&self) -> bool {
        self.max_width.is_none()
    }

    /// Inclusive membership test.
    #[must_use]
    pub fn matches(&self, width: u32) -> bool {
        self.min_width <= width && self.max_width.is_none_or(|max| width <= max)
    }

    /// Human-readable label: `"720 – 1023"` or `"1600 +"`.
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Copy of this range with one bound replaced, re-validated.
    pub fn patched(&self, patch: RangePatch) -> Result<Self, ValidationError> {
        match patch {
            RangePatch::MinWidth(min_width) => Self::new(min_width, self.max_width),
            RangePatch::MaxWidth(max_width) => Self::new(self.min_width, max_width),
        }
    }
}

impl Default for BreakpointRange {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for BreakpointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_width {
            Some(max_width) => write!(f, "{} – {}", self.min_width, max_width),
            None => write!(f, "{} +", self.min_width),
        }
    }
}

/// Wire form: `maxWidth` is omitted when the range is unbounded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBreakpointRange {
    min_width: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_width: Option<u32>,
}

impl TryFrom<RawBreakpointRange> for BreakpointRange {
    type Error = ValidationError;

    fn try_from(raw: RawBreakpointRange) -> Result<Self, Self::Error> {
        Self::new(raw.min_width, raw.max_width)
    }
}

impl From<BreakpointRange> for RawBreakpointRange {
    fn from(range: BreakpointRange) -> Self {
        Self {
            min_width: range.min_width,
            max_width: range.max_width,
        }
    }
}
