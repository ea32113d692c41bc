//! Built-in default grid system.

use crate::preferences::{DemoOffset, DemoOffsets};
use crate::range::BreakpointRange;
use crate::snapshot::{GridSystemSnapshot, PreferencesSnapshot};

fn range(min_width: u32, max_width: Option<u32>) -> BreakpointRange {
    BreakpointRange::new(min_width, max_width).expect("default breakpoint ranges are valid")
}

fn demo(heading1_end: u32, heading2_end: u32, paragraph_end: u32) -> DemoOffsets {
    DemoOffsets {
        heading1: DemoOffset::new(1, heading1_end),
        heading2: DemoOffset::new(1, heading2_end),
        paragraph: DemoOffset::new(1, paragraph_end),
    }
}

/// Five-step layout from phone to wide desktop.
///
/// | range       | max  | cols | gutter | margin | scale |
/// |-------------|------|------|--------|--------|-------|
/// | 0 – 719     | –    | 4    | 16     | 16     | 1     |
/// | 720 – 1023  | 720  | 8    | 16     | 16     | 1     |
/// | 1024 – 1279 | 1024 | 12   | 32     | 16     | 1     |
/// | 1280 – 1599 | 1280 | 12   | 32     | 32     | 1     |
/// | 1600 +      | 1280 | 12   | 32     | 32     | 1.25  |
#[must_use]
pub fn default_snapshot() -> GridSystemSnapshot {
    GridSystemSnapshot {
        grid_preferences_list: vec![
            PreferencesSnapshot {
                breakpoint_range: range(0, Some(719)),
                content_max_width: None,
                columns: 4,
                gutter: 16,
                margin: 16,
                scale: 1.0,
                demo: demo(5, 5, 5),
            },
            PreferencesSnapshot {
                breakpoint_range: range(720, Some(1023)),
                content_max_width: Some(720),
                columns: 8,
                gutter: 16,
                margin: 16,
                scale: 1.0,
                demo: demo(9, 9, 8),
            },
            PreferencesSnapshot {
                breakpoint_range: range(1024, Some(1279)),
                content_max_width: Some(1024),
                columns: 12,
                gutter: 32,
                margin: 16,
                scale: 1.0,
                demo: demo(13, 13, 9),
            },
            PreferencesSnapshot {
                breakpoint_range: range(1280, Some(1599)),
                content_max_width: Some(1280),
                columns: 12,
                gutter: 32,
                margin: 32,
                scale: 1.0,
                demo: demo(13, 13, 7),
            },
            PreferencesSnapshot {
                breakpoint_range: range(1600, None),
                content_max_width: Some(1280),
                columns: 12,
                gutter: 32,
                margin: 32,
                scale: 1.25,
                demo: demo(13, 13, 7),
            },
        ],
    }
}

/// Template for the first entry of an otherwise empty grid system.
#[must_use]
pub fn seed_preferences() -> PreferencesSnapshot {
    let mut seed = default_snapshot().grid_preferences_list.swap_remove(0);
    seed.breakpoint_range = BreakpointRange::full();
    seed
}
