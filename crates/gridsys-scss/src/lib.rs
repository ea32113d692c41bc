#![forbid(unsafe_code)]

//! SCSS generation for [`gridsys_core::GridSystem`].
//!
//! [`generate_scss`] turns a grid system into a standalone stylesheet that
//! declares one media query marker per breakpoint where anything changes and
//! one variable per run of equal property values.

pub mod ast;
pub mod emit;
pub mod unit;
pub mod variables;

pub use ast::{Node, Stylesheet};
pub use emit::{build_stylesheet, generate_scss};
pub use unit::{percentage, rem};
pub use variables::{RangeKey, TrackedProperty};
