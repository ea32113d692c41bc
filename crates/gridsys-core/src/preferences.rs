//! Layout preferences attached to one breakpoint range.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::PreferencesId;
use crate::range::{BreakpointRange, RangePatch};
use crate::snapshot::PreferencesSnapshot;

pub const CONTENT_MAX_WIDTH_BOUNDS: RangeInclusive<u32> = 128..=1920;
pub const COLUMNS_BOUNDS: RangeInclusive<u32> = 1..=12;
pub const GUTTER_BOUNDS: RangeInclusive<u32> = 0..=256;
pub const MARGIN_BOUNDS: RangeInclusive<u32> = 0..=256;
pub const SCALE_BOUNDS: RangeInclusive<f64> = 1.0..=2.0;
/// Lowest column line a demo element can start or end at.
pub const OFFSET_POSITION_MIN: u32 = 1;

/// Demo elements whose column placement is configurable per breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DemoElement {
    Heading1,
    Heading2,
    Paragraph,
}

impl DemoElement {
    pub const ALL: [Self; 3] = [Self::Heading1, Self::Heading2, Self::Paragraph];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Heading1 => "heading1",
            Self::Heading2 => "heading2",
            Self::Paragraph => "paragraph",
        }
    }
}

impl fmt::Display for DemoElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Start or end column line of a demo element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OffsetEdge {
    Start,
    End,
}

impl fmt::Display for OffsetEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::End => "end",
        })
    }
}

/// Column lines `[start, end)` occupied by one demo element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DemoOffset {
    pub start: u32,
    pub end: u32,
}

impl DemoOffset {
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn get(&self, edge: OffsetEdge) -> u32 {
        match edge {
            OffsetEdge::Start => self.start,
            OffsetEdge::End => self.end,
        }
    }

    #[must_use]
    pub const fn with(self, edge: OffsetEdge, value: u32) -> Self {
        match edge {
            OffsetEdge::Start => Self { start: value, ..self },
            OffsetEdge::End => Self { end: value, ..self },
        }
    }
}

/// Offsets of every demo element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DemoOffsets {
    pub heading1: DemoOffset,
    pub heading2: DemoOffset,
    pub paragraph: DemoOffset,
}

impl DemoOffsets {
    /// Same offset for every element.
    #[must_use]
    pub const fn uniform(offset: DemoOffset) -> Self {
        Self {
            heading1: offset,
            heading2: offset,
            paragraph: offset,
        }
    }

    #[must_use]
    pub const fn get(&self, element: DemoElement) -> DemoOffset {
        match element {
            DemoElement::Heading1 => self.heading1,
            DemoElement::Heading2 => self.heading2,
            DemoElement::Paragraph => self.paragraph,
        }
    }

    #[must_use]
    pub fn with(mut self, element: DemoElement, offset: DemoOffset) -> Self {
        match element {
            DemoElement::Heading1 => self.heading1 = offset,
            DemoElement::Heading2 => self.heading2 = offset,
            DemoElement::Paragraph => self.paragraph = offset,
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (DemoElement, DemoOffset)> + '_ {
        DemoElement::ALL
            .into_iter()
            .map(move |element| (element, self.get(element)))
    }
}

/// Replacement for one scalar preference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreferenceField {
    /// `None` removes the content width cap.
    ContentMaxWidth(Option<u32>),
    Columns(u32),
    Gutter(u32),
    Margin(u32),
    Scale(f64),
}

impl PreferenceField {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ContentMaxWidth(_) => "contentMaxWidth",
            Self::Columns(_) => "columns",
            Self::Gutter(_) => "gutter",
            Self::Margin(_) => "margin",
            Self::Scale(_) => "scale",
        }
    }
}

/// Layout configuration for one breakpoint range.
///
/// Immutable: every `with_*` method returns a new value carrying the same
/// [`PreferencesId`], validated through the same constructor.
///
/// # Invariants
///
/// 1. `content_max_width`, when set, lies in `[128, 1920]`.
/// 2. `columns` in `[1, 12]`, `gutter` and `margin` in `[0, 256]`.
/// 3. `scale` is finite and lies in `[1, 2]`.
/// 4. Every demo offset satisfies `1 <= start < end <= columns + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPreferences {
    id: PreferencesId,
    range: BreakpointRange,
    content_max_width: Option<u32>,
    columns: u32,
    gutter: u32,
    margin: u32,
    scale: f64,
    demo: DemoOffsets,
}

impl GridPreferences {
    /// Build and validate preferences from their serializable fields.
    pub fn new(id: PreferencesId, fields: PreferencesSnapshot) -> Result<Self, ValidationError> {
        let preferences = Self {
            id,
            range: fields.breakpoint_range,
            content_max_width: fields.content_max_width,
            columns: fields.columns,
            gutter: fields.gutter,
            margin: fields.margin,
            scale: fields.scale,
            demo: fields.demo,
        };
        preferences.validate()?;
        Ok(preferences)
    }

    /// Same as [`new`](Self::new) with a freshly minted id.
    pub fn with_fresh_id(fields: PreferencesSnapshot) -> Result<Self, ValidationError> {
        Self::new(PreferencesId::mint(), fields)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(value) = self.content_max_width
            && !CONTENT_MAX_WIDTH_BOUNDS.contains(&value)
        {
            return Err(ValidationError::ContentMaxWidthOutOfRange { value });
        }
        if !COLUMNS_BOUNDS.contains(&self.columns) {
            return Err(ValidationError::ColumnsOutOfRange {
                value: self.columns,
            });
        }
        if !GUTTER_BOUNDS.contains(&self.gutter) {
            return Err(ValidationError::GutterOutOfRange { value: self.gutter });
        }
        if !MARGIN_BOUNDS.contains(&self.margin) {
            return Err(ValidationError::MarginOutOfRange { value: self.margin });
        }
        if !self.scale.is_finite() || !SCALE_BOUNDS.contains(&self.scale) {
            return Err(ValidationError::ScaleOutOfRange { value: self.scale });
        }

        let max = self.columns + 1;
        for (element, offset) in self.demo.iter() {
            for edge in [OffsetEdge::Start, OffsetEdge::End] {
                let value = offset.get(edge);
                if !(OFFSET_POSITION_MIN..=max).contains(&value) {
                    return Err(ValidationError::OffsetOutOfRange {
                        element,
                        edge,
                        value,
                        max,
                    });
                }
            }
            if offset.start >= offset.end {
                return Err(ValidationError::OffsetMisordered {
                    element,
                    start: offset.start,
                    end: offset.end,
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn id(&self) -> PreferencesId {
        self.id
    }

    #[must_use]
    pub const fn range(&self) -> &BreakpointRange {
        &self.range
    }

    #[must_use]
    pub const fn content_max_width(&self) -> Option<u32> {
        self.content_max_width
    }

    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    #[must_use]
    pub const fn gutter(&self) -> u32 {
        self.gutter
    }

    #[must_use]
    pub const fn margin(&self) -> u32 {
        self.margin
    }

    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub const fn demo(&self) -> &DemoOffsets {
        &self.demo
    }

    /// Replace one scalar field.
    pub fn with_field(&self, field: PreferenceField) -> Result<Self, ValidationError> {
        let mut next = self.clone();
        match field {
            PreferenceField::ContentMaxWidth(value) => next.content_max_width = value,
            PreferenceField::Columns(value) => next.columns = value,
            PreferenceField::Gutter(value) => next.gutter = value,
            PreferenceField::Margin(value) => next.margin = value,
            PreferenceField::Scale(value) => next.scale = value,
        }
        next.validate()?;
        Ok(next)
    }

    /// Replace one bound of the owned range.
    pub fn with_range(&self, patch: RangePatch) -> Result<Self, ValidationError> {
        Ok(Self {
            range: self.range.patched(patch)?,
            ..self.clone()
        })
    }

    /// Replace one edge of one demo element's offset.
    pub fn with_demo_offset(
        &self,
        element: DemoElement,
        edge: OffsetEdge,
        value: u32,
    ) -> Result<Self, ValidationError> {
        let offset = self.demo.get(element).with(edge, value);
        let next = Self {
            demo: self.demo.with(element, offset),
            ..self.clone()
        };
        next.validate()?;
        Ok(next)
    }

    /// Serializable fields without the id.
    #[must_use]
    pub fn to_snapshot(&self) -> PreferencesSnapshot {
        PreferencesSnapshot {
            breakpoint_range: self.range,
            content_max_width: self.content_max_width,
            columns: self.columns,
            gutter: self.gutter,
            margin: self.margin,
            scale: self.scale,
            demo: self.demo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> PreferencesSnapshot {
        PreferencesSnapshot {
            breakpoint_range: BreakpointRange::full(),
            content_max_width: None,
            columns: 4,
            gutter: 16,
            margin: 16,
            scale: 1.0,
            demo: DemoOffsets::uniform(DemoOffset::new(1, 5)),
        }
    }

    #[test]
    fn constructor_rejects_out_of_bounds_fields() {
        let cases = [
            (
                PreferencesSnapshot {
                    content_max_width: Some(100),
                    ..fields()
                },
                ValidationError::ContentMaxWidthOutOfRange { value: 100 },
            ),
            (
                PreferencesSnapshot {
                    columns: 0,
                    ..fields()
                },
                ValidationError::ColumnsOutOfRange { value: 0 },
            ),
            (
                PreferencesSnapshot {
                    gutter: 257,
                    ..fields()
                },
                ValidationError::GutterOutOfRange { value: 257 },
            ),
            (
                PreferencesSnapshot {
                    margin: 300,
                    ..fields()
                },
                ValidationError::MarginOutOfRange { value: 300 },
            ),
            (
                PreferencesSnapshot {
                    scale: 2.5,
                    ..fields()
                },
                ValidationError::ScaleOutOfRange { value: 2.5 },
            ),
        ];
        for (fields, expected) in cases {
            assert_eq!(
                GridPreferences::with_fresh_id(fields).unwrap_err(),
                expected
            );
        }
    }

    #[test]
    fn nan_scale_is_rejected() {
        let result = GridPreferences::with_fresh_id(PreferencesSnapshot {
            scale: f64::NAN,
            ..fields()
        });
        assert!(matches!(
            result,
            Err(ValidationError::ScaleOutOfRange { .. })
        ));
    }

    #[test]
    fn offsets_are_bounded_by_column_count() {
        let result = GridPreferences::with_fresh_id(PreferencesSnapshot {
            demo: DemoOffsets::uniform(DemoOffset::new(1, 6)),
            ..fields()
        });
        assert_eq!(
            result.unwrap_err(),
            ValidationError::OffsetOutOfRange {
                element: DemoElement::Heading1,
                edge: OffsetEdge::End,
                value: 6,
                max: 5,
            }
        );
    }

    #[test]
    fn with_field_preserves_id() {
        let prefs = GridPreferences::with_fresh_id(fields()).unwrap();
        let wider = prefs.with_field(PreferenceField::Columns(8)).unwrap();
        assert_eq!(wider.id(), prefs.id());
        assert_eq!(wider.columns(), 8);
        assert_eq!(prefs.columns(), 4);
    }

    #[test]
    fn shrinking_columns_below_offsets_is_rejected() {
        let prefs = GridPreferences::with_fresh_id(fields()).unwrap();
        assert!(prefs.with_field(PreferenceField::Columns(2)).is_err());
    }

    #[test]
    fn with_demo_offset_rejects_misordered_pair() {
        let prefs = GridPreferences::with_fresh_id(fields()).unwrap();
        let moved = prefs
            .with_demo_offset(DemoElement::Paragraph, OffsetEdge::Start, 3)
            .unwrap();
        assert_eq!(moved.demo().paragraph, DemoOffset::new(3, 5));
        assert_eq!(
            prefs
                .with_demo_offset(DemoElement::Paragraph, OffsetEdge::Start, 5)
                .unwrap_err(),
            ValidationError::OffsetMisordered {
                element: DemoElement::Paragraph,
                start: 5,
                end: 5,
            }
        );
    }

    #[test]
    fn with_range_replaces_bound() {
        let prefs = GridPreferences::with_fresh_id(fields()).unwrap();
        let clipped = prefs.with_range(RangePatch::MaxWidth(Some(239))).unwrap();
        assert_eq!(clipped.range().max_width(), Some(239));
        assert_eq!(clipped.id(), prefs.id());
    }

    #[test]
    fn snapshot_drops_only_the_id() {
        let prefs = GridPreferences::with_fresh_id(fields()).unwrap();
        assert_eq!(prefs.to_snapshot(), fields());
    }
}
