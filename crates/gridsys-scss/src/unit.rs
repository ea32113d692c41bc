//! CSS unit conversions at a 16px root, matching the emitted SCSS helpers.

/// Root font size the `rem()`/`em()` helpers divide by.
pub const BASE_FONT_SIZE: f64 = 16.0;

/// Pixels to `rem`: `24.0` becomes `"1.5rem"`.
#[must_use]
pub fn rem(px: f64) -> String {
    format!("{}rem", px / BASE_FONT_SIZE)
}

/// Ratio to a percentage rounded to one decimal: `1.0 / 3.0` becomes `"33.3%"`.
#[must_use]
pub fn percentage(value: f64) -> String {
    let tenths = (value * 100.0 * 10.0 + 0.5).floor();
    format!("{}%", tenths / 10.0)
}
