//! Drawing surface contract
//!
//! Elements never paint pixels themselves. They issue text, line and path
//! calls against a [`Surface`] owned by the host, and ask a [`TextMeasure`]
//! for glyph-run metrics while measuring. Scaled sub-frames are entered
//! through [`ScaleGuard`] so the ambient frame is always restored, even when
//! the nested draw unwinds.

use crate::geometry::{Point, Size};
use serde::{Deserialize, Serialize};

// =============================================================================
// Paint Types
// =============================================================================

/// A color in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Path drawing commands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
}

impl PathCommand {
    pub fn point(&self) -> Point {
        match self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => *p,
        }
    }

    /// The same command with its point mapped through `f`
    pub fn map(&self, f: impl Fn(Point) -> Point) -> Self {
        match self {
            PathCommand::MoveTo(p) => PathCommand::MoveTo(f(*p)),
            PathCommand::LineTo(p) => PathCommand::LineTo(f(*p)),
        }
    }
}

/// Metrics of a rendered glyph run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextMetrics {
    /// Tight ink width
    pub width: f32,
    /// Tight ink height, descenders included
    pub height: f32,
    /// The font's descent below the baseline
    pub descent: f32,
}

// =============================================================================
// Traits
// =============================================================================

/// Synchronous, read-only text metrics service
pub trait TextMeasure {
    fn measure_text(&self, content: &str, font_size: f32) -> TextMetrics;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn measure_text(&self, content: &str, font_size: f32) -> TextMetrics {
        (**self).measure_text(content, font_size)
    }
}

/// A 2D drawing surface supplied by the host
pub trait Surface: TextMeasure {
    /// Total size of the surface in its unscaled frame
    fn size(&self) -> Size;

    /// Draw a glyph run with its baseline starting at `position`
    fn draw_text(&mut self, content: &str, position: Point, font_size: f32, color: Color);

    fn draw_line(&mut self, start: Point, end: Point, stroke_width: f32, color: Color);

    fn draw_path(&mut self, path: &[PathCommand], stroke_width: f32, color: Color);

    /// Enter a frame scaled by `factor` about `pivot`
    ///
    /// Prefer [`ScaleGuard`] or [`with_scale`], which pair this with
    /// [`Surface::pop_transform`].
    fn push_scale(&mut self, factor: f32, pivot: Point);

    /// Leave the innermost frame entered with [`Surface::push_scale`]
    fn pop_transform(&mut self);
}

// =============================================================================
// Scoped Scaling
// =============================================================================

/// A scaled frame on a surface, left again when the guard drops
///
/// The guard dereferences to the underlying surface, so nested draws go
/// through it unchanged.
pub struct ScaleGuard<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> ScaleGuard<'a, S> {
    pub fn new(surface: &'a mut S, factor: f32, pivot: Point) -> Self {
        tracing::trace!(factor, pivot_x = pivot.x, pivot_y = pivot.y, "enter scale scope");
        surface.push_scale(factor, pivot);
        Self { surface }
    }
}

impl<S: Surface + ?Sized> std::ops::Deref for ScaleGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> std::ops::DerefMut for ScaleGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for ScaleGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.pop_transform();
        tracing::trace!("leave scale scope");
    }
}

/// Run `block` inside a frame scaled by `factor` about `pivot`
pub fn with_scale<S, R>(
    surface: &mut S,
    factor: f32,
    pivot: Point,
    block: impl FnOnce(&mut S) -> R,
) -> R
where
    S: Surface + ?Sized,
{
    let mut guard = ScaleGuard::new(surface, factor, pivot);
    block(&mut *guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts scope depth and paint calls per depth
    #[derive(Default)]
    struct DepthSurface {
        depth: usize,
        max_depth: usize,
        lines_at_depth: Vec<usize>,
    }

    impl TextMeasure for DepthSurface {
        fn measure_text(&self, _content: &str, _font_size: f32) -> TextMetrics {
            TextMetrics::default()
        }
    }

    impl Surface for DepthSurface {
        fn size(&self) -> Size {
            Size::new(100.0, 100.0)
        }

        fn draw_text(&mut self, _: &str, _: Point, _: f32, _: Color) {}

        fn draw_line(&mut self, _: Point, _: Point, _: f32, _: Color) {
            self.lines_at_depth.push(self.depth);
        }

        fn draw_path(&mut self, _: &[PathCommand], _: f32, _: Color) {}

        fn push_scale(&mut self, _: f32, _: Point) {
            self.depth += 1;
            self.max_depth = self.max_depth.max(self.depth);
        }

        fn pop_transform(&mut self) {
            self.depth -= 1;
        }
    }

    fn line(surface: &mut DepthSurface) {
        surface.draw_line(Point::origin(), Point::new(1.0, 0.0), 1.0, Color::BLACK);
    }

    #[test]
    fn test_color_creation() {
        let c = Color::rgb(255, 128, 64);
        assert_eq!(c.r, 255);
        assert_eq!(c.g, 128);
        assert_eq!(c.b, 64);
        assert_eq!(c.a, 255);
        assert_eq!(Color::default(), Color::BLACK);
    }

    #[test]
    fn test_with_scale_restores_frame() {
        let mut surface = DepthSurface::default();
        line(&mut surface);
        with_scale(&mut surface, 0.5, Point::origin(), |s| {
            line(s);
            with_scale(s, 0.5, Point::origin(), line);
        });
        line(&mut surface);

        assert_eq!(surface.depth, 0);
        assert_eq!(surface.max_depth, 2);
        assert_eq!(surface.lines_at_depth, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_guard_restores_frame_on_unwind() {
        let mut surface = DepthSurface::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = ScaleGuard::new(&mut surface, 2.0, Point::origin());
            panic!("nested draw failed");
        }));

        assert!(result.is_err());
        assert_eq!(surface.depth, 0);
        assert_eq!(surface.max_depth, 1);
    }

    #[test]
    fn test_path_command_map() {
        let cmd = PathCommand::LineTo(Point::new(2.0, 3.0));
        let mapped = cmd.map(|p| Point::new(p.x * 2.0, p.y * 2.0));
        assert_eq!(mapped, PathCommand::LineTo(Point::new(4.0, 6.0)));
        assert_eq!(mapped.point(), Point::new(4.0, 6.0));
    }
}
