use super::DrawContext;
use crate::font::has_descender;
use crate::geometry::{Point, Size};
use crate::surface::{Surface, TextMeasure};

/// Default font size of text runs
pub const DEFAULT_FONT_SIZE: f32 = 80.0;

/// A leaf run of glyphs in the single display font
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
    pub font_size: f32,
    /// Added to the tight ink height, split evenly above and below
    pub vertical_padding: f32,
    /// Added to the tight ink width, split evenly left and right
    pub horizontal_padding: f32,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_size: DEFAULT_FONT_SIZE,
            vertical_padding: 0.0,
            horizontal_padding: 0.0,
        }
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_vertical_padding(mut self, padding: f32) -> Self {
        self.vertical_padding = padding;
        self
    }

    pub fn with_horizontal_padding(mut self, padding: f32) -> Self {
        self.horizontal_padding = padding;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn measure<M: TextMeasure + ?Sized>(&self, fonts: &M) -> Size {
        if self.is_empty() {
            return Size::zero();
        }
        let metrics = fonts.measure_text(&self.content, self.font_size);
        Size::new(
            metrics.width + self.horizontal_padding,
            metrics.height + self.vertical_padding,
        )
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, top_left: Point, ctx: &DrawContext) {
        if self.is_empty() {
            return;
        }

        let metrics = surface.measure_text(&self.content, self.font_size);
        let height = metrics.height + self.vertical_padding;

        // Tight bounds include the descent when a glyph hangs below the baseline
        let mut baseline = top_left.y + height - self.vertical_padding / 2.0;
        if has_descender(&self.content) {
            baseline -= metrics.descent;
        }

        let origin = Point::new(top_left.x + self.horizontal_padding / 2.0, baseline);
        surface.draw_text(&self.content, origin, self.font_size, ctx.ink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontMetrics;
    use crate::render::{RecordingSurface, RenderPrimitive};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_measure_matches_font_bounds() {
        let fonts = FontMetrics::default();
        let metrics = fonts.measure_text("x", DEFAULT_FONT_SIZE);
        let size = Text::new("x").measure(&fonts);
        assert_eq!(size, Size::new(metrics.width, metrics.height));
    }

    #[test]
    fn test_measure_adds_padding() {
        let fonts = FontMetrics::default();
        let plain = Text::new("ab").measure(&fonts);
        let padded = Text::new("ab")
            .with_vertical_padding(10.0)
            .with_horizontal_padding(6.0)
            .measure(&fonts);
        assert!(approx(padded.width, plain.width + 6.0));
        assert!(approx(padded.height, plain.height + 10.0));
    }

    #[test]
    fn test_empty_text_is_zero_area_no_op() {
        let fonts = FontMetrics::default();
        let empty = Text::new("").with_vertical_padding(10.0);
        assert_eq!(empty.measure(&fonts), Size::zero());

        let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
        let ctx = DrawContext::root(surface.size());
        empty.draw(&mut surface, Point::origin(), &ctx);
        assert!(surface.finish().primitives.is_empty());
    }

    #[test]
    fn test_baseline_without_descender() {
        let mut surface = RecordingSurface::new(Size::new(500.0, 500.0));
        let text = Text::new("x")
            .with_vertical_padding(10.0)
            .with_horizontal_padding(8.0);
        let size = text.measure(&surface);
        let ctx = DrawContext::root(surface.size());
        text.draw(&mut surface, Point::new(20.0, 30.0), &ctx);

        let output = surface.finish();
        match &output.primitives[0] {
            RenderPrimitive::Text {
                text,
                position,
                style,
            } => {
                assert_eq!(text, "x");
                assert!(approx(position.x, 24.0));
                assert!(approx(position.y, 30.0 + size.height - 5.0));
                assert_eq!(style.font_size, DEFAULT_FONT_SIZE);
            }
            other => panic!("Expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_baseline_with_descender_and_padding() {
        let mut surface = RecordingSurface::new(Size::new(500.0, 500.0));
        let text = Text::new("gy").with_vertical_padding(10.0);
        let size = text.measure(&surface);
        let descent = surface.measure_text("gy", DEFAULT_FONT_SIZE).descent;
        assert!(descent > 0.0);

        let ctx = DrawContext::root(surface.size());
        text.draw(&mut surface, Point::new(0.0, 30.0), &ctx);

        let (_, position, _) = surface.finish().text_runs().remove(0);
        assert!(approx(position.y, 30.0 + size.height - descent - 5.0));
    }

    #[test]
    fn test_baseline_lifts_for_descender() {
        let mut surface = RecordingSurface::new(Size::new(500.0, 500.0));
        let text = Text::new("Y");
        let size = text.measure(&surface);
        let descent = surface.measure_text("Y", DEFAULT_FONT_SIZE).descent;
        let ctx = DrawContext::root(surface.size());
        text.draw(&mut surface, Point::origin(), &ctx);

        let (_, position, _) = surface.finish().text_runs().remove(0);
        assert!(approx(position.y, size.height - descent));
    }
}
