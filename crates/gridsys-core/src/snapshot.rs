//! Serializable snapshot of a grid system.
//!
//! Snapshots carry field content only. Ids are stripped on the way out and
//! re-minted on the way in, so a snapshot is safe to embed in shareable
//! links: decoding the same link twice yields equal content with distinct
//! ids.
//!
//! ```json
//! {"gridPreferencesList":[
//!   {"breakpointRange":{"minWidth":0,"maxWidth":719},"columns":4,"gutter":16,
//!    "margin":16,"scale":1,"demo":{"heading1":{"start":1,"end":5},...}},
//!   {"breakpointRange":{"minWidth":720},"contentMaxWidth":720,...}
//! ]}
//! ```

use serde::{Deserialize, Serialize, Serializer};

use crate::preferences::DemoOffsets;
use crate::range::BreakpointRange;

/// Wire form of one [`GridPreferences`](crate::GridPreferences), minus id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesSnapshot {
    pub breakpoint_range: BreakpointRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_max_width: Option<u32>,
    pub columns: u32,
    pub gutter: u32,
    pub margin: u32,
    #[serde(serialize_with = "serialize_scale")]
    pub scale: f64,
    pub demo: DemoOffsets,
}

/// Wire form of a [`GridSystem`](crate::GridSystem).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSystemSnapshot {
    pub grid_preferences_list: Vec<PreferencesSnapshot>,
}

/// Whole scales are written without a fraction (`1`, not `1.0`).
fn serialize_scale<S: Serializer>(scale: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    let whole = scale.trunc();
    if scale.is_finite() && whole == *scale && whole.abs() <= u32::MAX as f64 {
        serializer.serialize_i64(whole as i64)
    } else {
        serializer.serialize_f64(*scale)
    }
}

impl GridSystemSnapshot {
    /// Parse a JSON snapshot. Field bounds are checked later, when the
    /// snapshot is turned into a [`GridSystem`](crate::GridSystem).
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Compact JSON encoding.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Whether this snapshot equals the built-in default grid system.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == crate::defaults::default_snapshot()
    }
}
