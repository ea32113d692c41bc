//! Layout-grid settings for external design tools.
//!
//! Both variants describe the same grid at one artboard width. Sketch wants
//! an explicit column width; Figma uses a stretch grid where the column width
//! is implied by count, gutter and margin.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PreconditionError;
use crate::preferences::GridPreferences;

/// Target design tool for [`GridPreferences::compute_external_layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignTool {
    Sketch,
    #[default]
    Figma,
}

impl fmt::Display for DesignTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sketch => "sketch",
            Self::Figma => "figma",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SketchColumns {
    pub total_width: i64,
    pub offset: i64,
    pub number_of_columns: u32,
    pub gutter_on_outside: bool,
    pub gutter_width: u32,
    pub column_width: i64,
}

/// Sketch "Layout Settings" payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SketchLayoutSettings {
    pub columns: SketchColumns,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FigmaGridType {
    Stretch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigmaColumns {
    pub count: u32,
    #[serde(rename = "type")]
    pub kind: FigmaGridType,
    pub margin: i64,
    pub gutter: u32,
}

/// Figma "Layout Grid" payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigmaLayoutGrid {
    pub columns: FigmaColumns,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExternalLayout {
    Sketch(SketchLayoutSettings),
    Figma(FigmaLayoutGrid),
}

/// `Math.round` semantics: halves round towards positive infinity.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

impl GridPreferences {
    fn check_exportable(&self, artboard_width: u32) -> Result<(), PreconditionError> {
        if !self.range().matches(artboard_width) {
            return Err(PreconditionError::ArtboardOutOfRange {
                artboard_width,
                range: self.range().label(),
            });
        }
        if self.scale() != 1.0 {
            return Err(PreconditionError::ScaledRoot {
                scale: self.scale(),
            });
        }
        Ok(())
    }

    /// Width of the container between the outer margins.
    ///
    /// May be negative when the margins exceed the artboard.
    fn container_width(&self, artboard_width: u32) -> i64 {
        let visible = match self.content_max_width() {
            Some(cap) => artboard_width.min(cap),
            None => artboard_width,
        };
        i64::from(visible) - 2 * i64::from(self.margin())
    }

    pub fn to_sketch_layout_settings(
        &self,
        artboard_width: u32,
    ) -> Result<SketchLayoutSettings, PreconditionError> {
        self.check_exportable(artboard_width)?;

        let container_width = self.container_width(artboard_width);
        let total_gutter_width = i64::from(self.columns() - 1) * i64::from(self.gutter());
        let column_width = round_half_up(
            (container_width - total_gutter_width) as f64 / f64::from(self.columns()),
        );

        Ok(SketchLayoutSettings {
            columns: SketchColumns {
                total_width: container_width,
                offset: 0,
                number_of_columns: self.columns(),
                gutter_on_outside: false,
                gutter_width: self.gutter(),
                column_width,
            },
        })
    }

    pub fn to_figma_layout_grid(
        &self,
        artboard_width: u32,
    ) -> Result<FigmaLayoutGrid, PreconditionError> {
        self.check_exportable(artboard_width)?;

        let container_width = self.container_width(artboard_width);
        Ok(FigmaLayoutGrid {
            columns: FigmaColumns {
                count: self.columns(),
                kind: FigmaGridType::Stretch,
                margin: round_half_up((i64::from(artboard_width) - container_width) as f64 / 2.0),
                gutter: self.gutter(),
            },
        })
    }

    /// Layout grid for `tool` at `artboard_width`.
    ///
    /// Requires `artboard_width` to fall inside this entry's range and the
    /// root scale to be exactly 1.
    pub fn compute_external_layout(
        &self,
        artboard_width: u32,
        tool: DesignTool,
    ) -> Result<ExternalLayout, PreconditionError> {
        match tool {
            DesignTool::Sketch => self
                .to_sketch_layout_settings(artboard_width)
                .map(ExternalLayout::Sketch),
            DesignTool::Figma => self
                .to_figma_layout_grid(artboard_width)
                .map(ExternalLayout::Figma),
        }
    }
}
