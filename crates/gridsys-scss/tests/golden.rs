//! Golden-file checks for the generated stylesheet.

use gridsys_core::{
    BreakpointRange, DemoOffset, DemoOffsets, GridSystem, GridSystemSnapshot, PreferencesSnapshot,
};
use gridsys_scss::generate_scss;
use proptest::prelude::*;

const TWO_BREAKPOINTS: &str = include_str!("golden/two_breakpoints.scss");
const DEFAULT: &str = include_str!("golden/default.scss");

fn entry(
    min_width: u32,
    max_width: Option<u32>,
    content_max_width: Option<u32>,
    columns: u32,
) -> PreferencesSnapshot {
    PreferencesSnapshot {
        breakpoint_range: BreakpointRange::new(min_width, max_width).expect("valid range"),
        content_max_width,
        columns,
        gutter: 16,
        margin: 16,
        scale: 1.0,
        demo: DemoOffsets::uniform(DemoOffset::new(1, 2)),
    }
}

fn system(entries: Vec<PreferencesSnapshot>) -> GridSystem {
    GridSystem::from_snapshot(&GridSystemSnapshot {
        grid_preferences_list: entries,
    })
    .expect("valid grid system")
}

fn assert_golden(actual: &str, expected: &str) {
    if actual != expected {
        let mismatch = actual
            .lines()
            .zip(expected.lines())
            .position(|(a, e)| a != e)
            .unwrap_or_else(|| actual.lines().count().min(expected.lines().count()));
        panic!(
            "generated scss differs from golden at line {}\n--- actual ---\n{actual}",
            mismatch + 1
        );
    }
}

#[test]
fn two_breakpoints_matches_golden() {
    let two = system(vec![
        entry(0, Some(719), None, 4),
        entry(720, None, Some(720), 8),
    ]);
    assert_golden(&generate_scss(&two), TWO_BREAKPOINTS);
}

#[test]
fn default_system_matches_golden() {
    assert_golden(&generate_scss(&GridSystem::reset()), DEFAULT);
}

#[test]
fn single_changed_property_yields_one_override() {
    let columns_only = system(vec![
        entry(0, Some(719), None, 4),
        entry(720, None, None, 8),
    ]);
    let scss = generate_scss(&columns_only);

    assert_eq!(scss.matches("\"(min-width: ").count(), 1);
    assert!(scss.contains("$grid-columns: 4;\n$mq1\\:grid-columns: 8;\n"));
    for unconditional in [
        "$grid-max-width: none;",
        "$grid-gutter: rem(16);",
        "$grid-margin: rem(16);",
        "$root-font-size: percentage(1);",
    ] {
        assert_eq!(scss.matches(unconditional).count(), 1, "{unconditional}");
    }
    for overridden in ["grid-max-width", "grid-gutter", "grid-margin", "root-font-size"] {
        assert!(!scss.contains(&format!("$mq1\\:{overridden}")), "{overridden}");
    }
}

#[test]
fn snapshot_round_trip_generates_identical_source() {
    let original = GridSystem::reset();
    let json = original.to_snapshot().to_json_string().expect("serialize");
    let decoded = GridSystem::from_snapshot(
        &serde_json::from_str::<GridSystemSnapshot>(&json).expect("parse"),
    )
    .expect("validate");
    assert_eq!(generate_scss(&decoded), generate_scss(&original));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn marker_count_is_bounded_by_boundaries(
        columns in proptest::collection::vec(1u32..=12, 1..8),
    ) {
        let mut entries = Vec::with_capacity(columns.len());
        let last = columns.len() - 1;
        for (index, count) in columns.iter().enumerate() {
            let min_width = index as u32 * 100;
            let max_width = (index != last).then_some(min_width + 99);
            entries.push(entry(min_width, max_width, None, *count));
        }
        let changes = columns.windows(2).filter(|pair| pair[0] != pair[1]).count();
        let runs = changes + 1;

        let grid = system(entries);
        let scss = generate_scss(&grid);
        prop_assert_eq!(scss.matches("\"(min-width: ").count(), changes);
        prop_assert_eq!(scss.matches("@for $denominator").count(), runs * 2);
        prop_assert!(scss.ends_with('\n'));
        prop_assert_eq!(generate_scss(&grid), scss);
    }
}
