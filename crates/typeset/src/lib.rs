//! Typeset Crate - Layout and drawing of math expressions
//!
//! This crate provides a miniature typesetting engine for math expressions:
//! - An owned element tree (text, fractions, super/subscripts, radicals, matrices)
//! - Pure measurement of each element's bounding box
//! - Drawing onto a host-supplied 2D surface with scoped scale transforms
//! - A recording surface that captures draw calls as render primitives
//! - A display slot that centers the current expression in a viewport

pub mod display;
pub mod element;
pub mod error;
pub mod font;
pub mod geometry;
pub mod render;
pub mod surface;

pub use display::Display;
pub use element::{
    combine, DrawContext, Element, Fraction, HorizontalGroup, Matrix, Radical, Subscript,
    Superscript, Text,
};
pub use error::*;
pub use font::{has_descender, FontMetrics, DESCENDERS};
pub use geometry::{Point, Rect, Size};
pub use render::{
    RecordingSurface, RenderConfig, RenderOutput, RenderPrimitive, TextStyle, Transform,
};
pub use surface::{
    with_scale, Color, PathCommand, ScaleGuard, Surface, TextMeasure, TextMetrics,
};
