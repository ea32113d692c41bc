//! The grid system: a gap-free partition of the viewport-width axis.
//!
//! [`GridSystem`] owns an ordered list of [`GridPreferences`] whose ranges
//! cover `[0, ∞)` exactly once. Every edit builds a brand-new system through
//! [`GridSystem::new`], which re-runs all invariants; a failed edit returns an
//! error and the original value stays as it was.
//!
//! # Invariants
//!
//! 1. Empty is valid (no breakpoints configured).
//! 2. The first range starts at 0; the last range is unbounded.
//! 3. For adjacent entries `a`, `b`: `a.max_width + 1 == b.min_width`.
//! 4. Ids are unique.
//!
//! # Failure Modes
//!
//! - Bounds, ordering and coverage violations: [`ValidationError`].
//! - Edits addressing an id that is not present: [`PreconditionError`].

use std::collections::BTreeSet;

use crate::defaults;
use crate::error::{GridError, PreconditionError, ValidationError};
use crate::export::{DesignTool, ExternalLayout};
use crate::id::PreferencesId;
use crate::preferences::{DemoElement, GridPreferences, OffsetEdge, PreferenceField};
use crate::range::{BreakpointRange, RangeEdge, RangePatch};
use crate::snapshot::GridSystemSnapshot;

/// Width of the slice carved off the tail entry by
/// [`GridSystem::add_breakpoint`].
pub const ADDED_BREAKPOINT_SPAN: u32 = 240;

/// Ordered, contiguous set of breakpoint-indexed preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSystem {
    entries: Vec<GridPreferences>,
}

impl GridSystem {
    /// Build and validate a grid system.
    pub fn new(entries: Vec<GridPreferences>) -> Result<Self, ValidationError> {
        validate_entries(&entries)?;
        Ok(Self { entries })
    }

    /// Grid system with no breakpoints.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Rebuild from a snapshot, minting a fresh id for every entry.
    pub fn from_snapshot(snapshot: &GridSystemSnapshot) -> Result<Self, ValidationError> {
        let entries = snapshot
            .grid_preferences_list
            .iter()
            .cloned()
            .map(GridPreferences::with_fresh_id)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    /// Id-free snapshot of the current content.
    #[must_use]
    pub fn to_snapshot(&self) -> GridSystemSnapshot {
        GridSystemSnapshot {
            grid_preferences_list: self.entries.iter().map(GridPreferences::to_snapshot).collect(),
        }
    }

    /// The built-in default grid system with fresh ids.
    #[must_use]
    pub fn reset() -> Self {
        Self::from_snapshot(&defaults::default_snapshot())
            .expect("default grid system satisfies all invariants")
    }

    // -- Queries ------------------------------------------------------------

    #[must_use]
    pub fn entries(&self) -> &[GridPreferences] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GridPreferences> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&GridPreferences> {
        self.entries.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&GridPreferences> {
        self.entries.last()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&GridPreferences> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn find_by_id(&self, id: PreferencesId) -> Option<&GridPreferences> {
        self.entries.iter().find(|prefs| prefs.id() == id)
    }

    #[must_use]
    pub fn index_of(&self, id: PreferencesId) -> Option<usize> {
        self.entries.iter().position(|prefs| prefs.id() == id)
    }

    /// Entry whose range contains `width`.
    ///
    /// Total over `[0, ∞)` for any non-empty system.
    #[must_use]
    pub fn match_for(&self, width: u32) -> Option<&GridPreferences> {
        self.entries.iter().find(|prefs| prefs.range().matches(width))
    }

    /// Neighbour covering the widths just below `id`'s range.
    #[must_use]
    pub fn adjacent_narrower(&self, id: PreferencesId) -> Option<&GridPreferences> {
        let index = self.index_of(id)?;
        index.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Neighbour covering the widths just above `id`'s range.
    #[must_use]
    pub fn adjacent_wider(&self, id: PreferencesId) -> Option<&GridPreferences> {
        let index = self.index_of(id)?;
        self.entries.get(index + 1)
    }

    /// Layout grid for `tool` using the entry that matches `artboard_width`.
    ///
    /// `Ok(None)` when no entry matches (only possible for an empty system).
    pub fn compute_external_layout(
        &self,
        artboard_width: u32,
        tool: DesignTool,
    ) -> Result<Option<ExternalLayout>, PreconditionError> {
        self.match_for(artboard_width)
            .map(|prefs| prefs.compute_external_layout(artboard_width, tool))
            .transpose()
    }

    // -- Edits --------------------------------------------------------------

    fn require_index(&self, id: PreferencesId) -> Result<usize, PreconditionError> {
        self.index_of(id)
            .ok_or(PreconditionError::UnknownId { id })
    }

    /// Move the breakpoint on `edge` of entry `id` to `value`.
    ///
    /// The neighbour sharing that breakpoint is updated in the same step:
    /// moving `min_width` sets the narrower neighbour's `max_width` to
    /// `value - 1`, moving `max_width` sets the wider neighbour's `min_width`
    /// to `value + 1`. The outer ends of the axis cannot be moved.
    pub fn resize_breakpoint(
        &self,
        id: PreferencesId,
        edge: RangeEdge,
        value: u32,
    ) -> Result<Self, GridError> {
        let result = self.try_resize_breakpoint(id, edge, value);
        log_edit("resize_breakpoint", &result);
        result
    }

    fn try_resize_breakpoint(
        &self,
        id: PreferencesId,
        edge: RangeEdge,
        value: u32,
    ) -> Result<Self, GridError> {
        let index = self.require_index(id)?;

        let (patch, neighbour) = match edge {
            RangeEdge::MinWidth => {
                let neighbour = index
                    .checked_sub(1)
                    .ok_or(ValidationError::FixedBoundary { id, edge })?;
                let neighbour_max = value
                    .checked_sub(1)
                    .ok_or(ValidationError::WidthUnderflow { value })?;
                (
                    RangePatch::MinWidth(value),
                    (neighbour, RangePatch::MaxWidth(Some(neighbour_max))),
                )
            }
            RangeEdge::MaxWidth => {
                let neighbour = index + 1;
                if neighbour >= self.entries.len() {
                    return Err(ValidationError::FixedBoundary { id, edge }.into());
                }
                let neighbour_min = value
                    .checked_add(1)
                    .ok_or(ValidationError::MinWidthOutOfRange { value })?;
                (
                    RangePatch::MaxWidth(Some(value)),
                    (neighbour, RangePatch::MinWidth(neighbour_min)),
                )
            }
        };

        let (neighbour_index, neighbour_patch) = neighbour;
        let mut entries = self.entries.clone();
        entries[index] = entries[index].with_range(patch)?;
        entries[neighbour_index] = entries[neighbour_index].with_range(neighbour_patch)?;
        Ok(Self::new(entries)?)
    }

    /// Replace one scalar preference of entry `id`.
    pub fn update_field(&self, id: PreferencesId, field: PreferenceField) -> Result<Self, GridError> {
        let result = self.replace_entry(id, |prefs| prefs.with_field(field));
        log_edit("update_field", &result);
        result
    }

    /// Replace one demo offset edge of entry `id`.
    pub fn update_demo_offset(
        &self,
        id: PreferencesId,
        element: DemoElement,
        edge: OffsetEdge,
        value: u32,
    ) -> Result<Self, GridError> {
        let result = self.replace_entry(id, |prefs| prefs.with_demo_offset(element, edge, value));
        log_edit("update_demo_offset", &result);
        result
    }

    fn replace_entry(
        &self,
        id: PreferencesId,
        edit: impl FnOnce(&GridPreferences) -> Result<GridPreferences, ValidationError>,
    ) -> Result<Self, GridError> {
        let index = self.require_index(id)?;
        let mut entries = self.entries.clone();
        entries[index] = edit(&entries[index])?;
        Ok(Self::new(entries)?)
    }

    /// Append a new unbounded tail entry.
    ///
    /// An empty system is seeded with one `[0, ∞)` entry from the default
    /// template. Otherwise the current tail shrinks to
    /// `[min, min + 239]` and a copy of its preferences, with a fresh id,
    /// takes over `[min + 240, ∞)`.
    pub fn add_breakpoint(&self) -> Result<Self, GridError> {
        let result = self.try_add_breakpoint();
        log_edit("add_breakpoint", &result);
        result
    }

    fn try_add_breakpoint(&self) -> Result<Self, GridError> {
        let Some(tail) = self.entries.last() else {
            let seed = GridPreferences::with_fresh_id(defaults::seed_preferences())?;
            return Ok(Self::new(vec![seed])?);
        };

        let tail_min = tail.range().min_width();
        let shrunk = tail.with_range(RangePatch::MaxWidth(Some(
            tail_min + ADDED_BREAKPOINT_SPAN - 1,
        )))?;

        let mut added = tail.to_snapshot();
        added.breakpoint_range = BreakpointRange::new(tail_min + ADDED_BREAKPOINT_SPAN, None)?;
        let added = GridPreferences::with_fresh_id(added)?;

        let mut entries = self.entries.clone();
        if let Some(last) = entries.last_mut() {
            *last = shrunk;
        }
        entries.push(added);
        Ok(Self::new(entries)?)
    }

    /// Remove entry `id`, letting a neighbour absorb its range.
    ///
    /// The wider neighbour is preferred (its `min_width` moves down); at the
    /// tail the narrower neighbour's `max_width` takes over instead. Removing
    /// the only entry leaves an empty system.
    pub fn remove_breakpoint(&self, id: PreferencesId) -> Result<Self, GridError> {
        let result = self.try_remove_breakpoint(id);
        log_edit("remove_breakpoint", &result);
        result
    }

    fn try_remove_breakpoint(&self, id: PreferencesId) -> Result<Self, GridError> {
        let index = self.require_index(id)?;
        let removed = *self.entries[index].range();

        let mut entries = self.entries.clone();
        entries.remove(index);

        // After removal the wider neighbour (if any) sits at `index`.
        if index < entries.len() {
            entries[index] =
                entries[index].with_range(RangePatch::MinWidth(removed.min_width()))?;
        } else if let Some(narrower) = index.checked_sub(1) {
            entries[narrower] =
                entries[narrower].with_range(RangePatch::MaxWidth(removed.max_width()))?;
        }
        Ok(Self::new(entries)?)
    }
}

impl Default for GridSystem {
    fn default() -> Self {
        Self::reset()
    }
}

impl<'a> IntoIterator for &'a GridSystem {
    type Item = &'a GridPreferences;
    type IntoIter = std::slice::Iter<'a, GridPreferences>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn validate_entries(entries: &[GridPreferences]) -> Result<(), ValidationError> {
    let (Some(first), Some(last)) = (entries.first(), entries.last()) else {
        return Ok(());
    };

    if !first.range().is_from_start() {
        return Err(ValidationError::NotFromStart {
            min_width: first.range().min_width(),
        });
    }
    if let Some(max_width) = last.range().max_width() {
        return Err(ValidationError::NotToEnd { max_width });
    }

    for (index, pair) in entries.windows(2).enumerate() {
        let (current, next) = (pair[0].range(), pair[1].range());
        let contiguous = current
            .max_width()
            .is_some_and(|max| max + 1 == next.min_width());
        if !contiguous {
            return Err(ValidationError::NotContiguous {
                index,
                max_width: current.max_width(),
                next_min_width: next.min_width(),
            });
        }
    }

    let mut seen = BTreeSet::new();
    for prefs in entries {
        if !seen.insert(prefs.id()) {
            return Err(ValidationError::DuplicateId { id: prefs.id() });
        }
    }
    Ok(())
}

fn log_edit(operation: &'static str, result: &Result<GridSystem, GridError>) {
    match result {
        Ok(system) => tracing::debug!(
            operation,
            entries = system.len(),
            "grid system edited"
        ),
        Err(error) => tracing::debug!(
            operation,
            %error,
            "grid system edit rejected"
        ),
    }
}
