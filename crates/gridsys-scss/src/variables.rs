//! Change-point detection and per-property run compression.
//!
//! A *marker* (`mq1`, `mq2`, ...) is assigned to every breakpoint where at
//! least one tracked property differs from the narrower neighbour. Each
//! property then keeps one variable per maximal run of equal values, keyed
//! by the marker at which the run starts ([`RangeKey::Root`] for the first).

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use gridsys_core::{GridPreferences, GridSystem};

use crate::ast::Node;

/// Where a variable applies: unconditionally, or from one marker upwards.
///
/// Ordering puts [`Root`](Self::Root) first, then markers ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RangeKey {
    Root,
    Marker(usize),
}

impl RangeKey {
    /// Variable/selector name prefix, e.g. `mq1\:`.
    #[must_use]
    pub fn prefix(self) -> String {
        match self {
            Self::Root => String::new(),
            Self::Marker(_) => format!("{self}\\:"),
        }
    }

    /// `@media #{$mqN}` prelude, `None` for the root key.
    #[must_use]
    pub fn media_prelude(self) -> Option<String> {
        match self {
            Self::Root => None,
            Self::Marker(_) => Some(format!("@media #{{${self}}}")),
        }
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("root"),
            Self::Marker(n) => write!(f, "mq{n}"),
        }
    }
}

/// Preference fields that drive the generated stylesheet, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedProperty {
    ContentMaxWidth,
    Columns,
    Gutter,
    Margin,
    Scale,
}

impl TrackedProperty {
    pub const ALL: [Self; 5] = [
        Self::ContentMaxWidth,
        Self::Columns,
        Self::Gutter,
        Self::Margin,
        Self::Scale,
    ];

    #[must_use]
    pub const fn variable_name(self) -> &'static str {
        match self {
            Self::ContentMaxWidth => "grid-max-width",
            Self::Columns => "grid-columns",
            Self::Gutter => "grid-gutter",
            Self::Margin => "grid-margin",
            Self::Scale => "root-font-size",
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn value_of(self, prefs: &GridPreferences) -> TrackedValue {
        match self {
            Self::ContentMaxWidth => TrackedValue::Width(prefs.content_max_width()),
            Self::Columns => TrackedValue::Count(prefs.columns()),
            Self::Gutter => TrackedValue::Pixels(prefs.gutter()),
            Self::Margin => TrackedValue::Pixels(prefs.margin()),
            Self::Scale => TrackedValue::Ratio(prefs.scale()),
        }
    }
}

/// Comparable value of one tracked property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackedValue {
    /// Optional pixel cap; unset renders as `none`.
    Width(Option<u32>),
    Pixels(u32),
    Count(u32),
    Ratio(f64),
}

impl TrackedValue {
    /// SCSS expression for this value.
    #[must_use]
    pub fn to_scss(self) -> String {
        match self {
            Self::Width(Some(px)) | Self::Pixels(px) => format!("rem({px})"),
            Self::Width(None) => "none".to_string(),
            Self::Count(n) => n.to_string(),
            Self::Ratio(ratio) => format!("percentage({ratio})"),
        }
    }
}

/// `$mqN: "(min-width: #{em(W)})";`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaQueryVariable {
    pub key: RangeKey,
    pub min_width: u32,
}

impl MediaQueryVariable {
    #[must_use]
    pub fn to_node(self) -> Node {
        Node::variable(
            self.key.to_string(),
            format!("\"(min-width: #{{em({})}})\"", self.min_width),
        )
    }
}

/// Markers in ascending width order.
#[must_use]
pub fn media_query_variables(system: &GridSystem) -> Vec<MediaQueryVariable> {
    let mut markers = Vec::new();
    for pair in system.entries().windows(2) {
        let (narrower, current) = (&pair[0], &pair[1]);
        let changed = TrackedProperty::ALL
            .iter()
            .any(|property| property.value_of(narrower) != property.value_of(current));
        if changed {
            markers.push(MediaQueryVariable {
                key: RangeKey::Marker(markers.len() + 1),
                min_width: current.range().min_width(),
            });
        }
    }
    markers
}

/// One `$name: value;` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridVariable {
    pub name: String,
    pub value: String,
}

impl GridVariable {
    /// `$name`, for use on the right-hand side of a declaration.
    #[must_use]
    pub fn reference(&self) -> String {
        format!("${}", self.name)
    }

    #[must_use]
    pub fn to_node(&self) -> Node {
        Node::variable(self.name.clone(), self.value.clone())
    }
}

/// Run-compressed variables for every tracked property.
#[derive(Debug, Clone, Default)]
pub struct GridVariables {
    runs: [BTreeMap<RangeKey, GridVariable>; 5],
}

impl GridVariables {
    #[must_use]
    pub fn collect(system: &GridSystem, markers: &[MediaQueryVariable]) -> Self {
        let mut variables = Self::default();
        for property in TrackedProperty::ALL {
            let runs = &mut variables.runs[property.slot()];
            let mut previous: Option<TrackedValue> = None;
            for prefs in system {
                let value = property.value_of(prefs);
                let starts_run = prefs.range().is_from_start()
                    || previous.is_some_and(|previous| previous != value);
                if starts_run {
                    let min_width = prefs.range().min_width();
                    let key = markers
                        .iter()
                        .find(|marker| marker.min_width == min_width)
                        .map_or(RangeKey::Root, |marker| marker.key);
                    runs.insert(
                        key,
                        GridVariable {
                            name: format!("{}{}", key.prefix(), property.variable_name()),
                            value: value.to_scss(),
                        },
                    );
                }
                previous = Some(value);
            }
        }
        variables
    }

    #[must_use]
    pub fn get(&self, property: TrackedProperty, key: RangeKey) -> Option<&GridVariable> {
        self.runs[property.slot()].get(&key)
    }

    /// Distinct run keys of `properties`, root first then markers ascending.
    #[must_use]
    pub fn keys(&self, properties: &[TrackedProperty]) -> Vec<RangeKey> {
        properties
            .iter()
            .flat_map(|property| self.runs[property.slot()].keys().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// All variables, property by property, each in run order.
    pub fn iter(&self) -> impl Iterator<Item = &GridVariable> + '_ {
        self.runs.iter().flat_map(BTreeMap::values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsys_core::{
        BreakpointRange, DemoOffset, DemoOffsets, GridSystemSnapshot, PreferencesSnapshot,
    };

    fn entry(
        min_width: u32,
        max_width: Option<u32>,
        content_max_width: Option<u32>,
        columns: u32,
    ) -> PreferencesSnapshot {
        PreferencesSnapshot {
            breakpoint_range: BreakpointRange::new(min_width, max_width).unwrap(),
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
        .unwrap()
    }

    fn rendered(nodes: impl IntoIterator<Item = Node>) -> Vec<String> {
        nodes.into_iter().map(|node| node.to_string()).collect()
    }

    #[test]
    fn no_markers_for_empty_or_single_entry() {
        assert!(media_query_variables(&GridSystem::empty()).is_empty());
        assert!(media_query_variables(&system(vec![entry(0, None, None, 4)])).is_empty());
    }

    #[test]
    fn no_markers_for_identical_neighbours() {
        let same = system(vec![
            entry(0, Some(719), None, 4),
            entry(720, None, None, 4),
        ]);
        assert!(media_query_variables(&same).is_empty());
    }

    #[test]
    fn marker_at_changed_boundary() {
        let changed = system(vec![
            entry(0, Some(719), None, 4),
            entry(720, None, Some(720), 8),
        ]);
        assert_eq!(
            rendered(media_query_variables(&changed).into_iter().map(MediaQueryVariable::to_node)),
            vec![r#"$mq1: "(min-width: #{em(720)})";"#]
        );
    }

    #[test]
    fn runs_are_compressed_per_property() {
        let changed = system(vec![
            entry(0, Some(719), None, 4),
            entry(720, None, Some(720), 8),
        ]);
        let markers = media_query_variables(&changed);
        let variables = GridVariables::collect(&changed, &markers);
        assert_eq!(
            rendered(variables.iter().map(GridVariable::to_node)),
            vec![
                "$grid-max-width: none;",
                "$mq1\\:grid-max-width: rem(720);",
                "$grid-columns: 4;",
                "$mq1\\:grid-columns: 8;",
                "$grid-gutter: rem(16);",
                "$grid-margin: rem(16);",
                "$root-font-size: percentage(1);",
            ]
        );
        assert_eq!(
            variables.keys(&[TrackedProperty::Gutter]),
            vec![RangeKey::Root]
        );
        assert_eq!(
            variables.keys(&[TrackedProperty::Gutter, TrackedProperty::Columns]),
            vec![RangeKey::Root, RangeKey::Marker(1)]
        );
    }

    #[test]
    fn properties_change_at_independent_markers() {
        let staggered = system(vec![
            entry(0, Some(719), None, 4),
            entry(720, Some(1023), None, 8),
            entry(1024, None, Some(1024), 8),
        ]);
        let markers = media_query_variables(&staggered);
        assert_eq!(markers.len(), 2);
        let variables = GridVariables::collect(&staggered, &markers);
        assert_eq!(
            variables.keys(&[TrackedProperty::Columns]),
            vec![RangeKey::Root, RangeKey::Marker(1)]
        );
        assert_eq!(
            variables.keys(&[TrackedProperty::ContentMaxWidth]),
            vec![RangeKey::Root, RangeKey::Marker(2)]
        );
    }

    #[test]
    fn range_key_ordering_and_names() {
        assert!(RangeKey::Root < RangeKey::Marker(1));
        assert!(RangeKey::Marker(2) < RangeKey::Marker(10));
        assert_eq!(RangeKey::Marker(3).prefix(), "mq3\\:");
        assert_eq!(RangeKey::Root.media_prelude(), None);
        assert_eq!(
            RangeKey::Marker(1).media_prelude().as_deref(),
            Some("@media #{$mq1}")
        );
        assert_eq!(TrackedValue::Ratio(1.25).to_scss(), "percentage(1.25)");
    }
}
