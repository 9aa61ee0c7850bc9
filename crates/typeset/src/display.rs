//! Display - The host's current-expression slot and per-frame draw pass
//!
//! A [`Display`] holds the expression currently shown and the viewport it
//! is centered in. Each frame measures the root once, centers it in the
//! viewport, and draws it with a root [`DrawContext`]. Expressions are
//! replaced wholesale, never edited in place.

use crate::element::{DrawContext, Element};
use crate::error::{MathError, MathResult};
use crate::geometry::{Point, Size};
use crate::render::{RecordingSurface, RenderConfig, RenderOutput};
use crate::surface::{Surface, TextMeasure};

/// Viewport plus the expression currently displayed in it
#[derive(Debug, Clone)]
pub struct Display {
    viewport: Size,
    expression: Option<Element>,
    config: RenderConfig,
}

impl Display {
    pub fn new(viewport: Size) -> Self {
        Self::with_config(viewport, RenderConfig::default())
    }

    pub fn with_config(viewport: Size, config: RenderConfig) -> Self {
        Self {
            viewport,
            expression: None,
            config,
        }
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn expression(&self) -> Option<&Element> {
        self.expression.as_ref()
    }

    /// Replace the displayed expression, returning the previous one
    pub fn set_expression(&mut self, expression: Element) -> Option<Element> {
        self.expression.replace(expression)
    }

    pub fn clear(&mut self) -> Option<Element> {
        self.expression.take()
    }

    /// Top-left offset that centers the current expression in the viewport
    pub fn centering_offset<M: TextMeasure + ?Sized>(&self, fonts: &M) -> Option<Point> {
        self.expression
            .as_ref()
            .map(|expression| center_in(self.viewport, expression.measure(fonts)))
    }

    /// Draw the current expression centered on `surface`
    ///
    /// Returns the top-left offset it was drawn at.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) -> MathResult<Point> {
        let expression = self
            .expression
            .as_ref()
            .ok_or_else(|| MathError::Render("no expression to display".to_string()))?;

        Ok(self.draw_centered(expression, surface))
    }

    /// Record one frame of the current expression; an empty slot yields an empty frame
    pub fn render_frame<F: TextMeasure>(&self, fonts: F) -> RenderOutput {
        let mut surface = RecordingSurface::with_fonts(self.viewport, fonts, self.config.clone());
        if let Some(expression) = &self.expression {
            self.draw_centered(expression, &mut surface);
        }
        surface.finish()
    }

    fn draw_centered<S: Surface + ?Sized>(&self, expression: &Element, surface: &mut S) -> Point {
        let size = expression.measure(&*surface);
        let offset = center_in(self.viewport, size);
        tracing::debug!(
            width = size.width,
            height = size.height,
            x = offset.x,
            y = offset.y,
            "rendering expression"
        );

        let ctx = DrawContext::root(surface.size()).with_ink(self.config.color);
        expression.draw(surface, offset, &ctx);
        offset
    }
}

fn center_in(viewport: Size, content: Size) -> Point {
    Point::new(
        (viewport.width - content.width) / 2.0,
        (viewport.height - content.height) / 2.0,
    )
}
