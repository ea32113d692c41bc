#![forbid(unsafe_code)]

//! Responsive grid system model.
//!
//! A [`GridSystem`] partitions the viewport-width axis `[0, ∞)` into
//! contiguous [`BreakpointRange`]s, each carrying the [`GridPreferences`]
//! (columns, gutter, margin, content max width, root scale, demo offsets)
//! that apply at those widths. All values are immutable: edits return a new,
//! fully revalidated system or an error.

pub mod defaults;
pub mod error;
pub mod export;
pub mod id;
pub mod preferences;
pub mod range;
pub mod snapshot;
pub mod system;

pub use defaults::{default_snapshot, seed_preferences};
pub use error::{GridError, PreconditionError, ValidationError};
pub use export::{
    DesignTool, ExternalLayout, FigmaColumns, FigmaGridType, FigmaLayoutGrid, SketchColumns,
    SketchLayoutSettings,
};
pub use id::PreferencesId;
pub use preferences::{
    DemoElement, DemoOffset, DemoOffsets, GridPreferences, OffsetEdge, PreferenceField,
};
pub use range::{BreakpointRange, RangeEdge, RangePatch, VIEWPORT_WIDTH_MAX, VIEWPORT_WIDTH_MIN};
pub use snapshot::{GridSystemSnapshot, PreferencesSnapshot};
pub use system::GridSystem;
