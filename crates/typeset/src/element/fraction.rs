use super::{DrawContext, Element};
use crate::geometry::{Point, Size};
use crate::surface::{Color, Surface, TextMeasure};

/// Gap between each operand and the divider
pub const DEFAULT_VERTICAL_PADDING: f32 = 20.0;
/// Divider thickness
pub const DEFAULT_LINE_WIDTH: f32 = 3.0;

/// Numerator stacked over denominator, separated by a divider line
#[derive(Debug, Clone, PartialEq)]
pub struct Fraction {
    pub numerator: Box<Element>,
    pub denominator: Box<Element>,
    pub vertical_padding: f32,
    pub line_width: f32,
    pub line_color: Color,
}

impl Fraction {
    pub fn new(numerator: Element, denominator: Element) -> Self {
        Self {
            numerator: Box::new(numerator),
            denominator: Box::new(denominator),
            vertical_padding: DEFAULT_VERTICAL_PADDING,
            line_width: DEFAULT_LINE_WIDTH,
            line_color: Color::BLACK,
        }
    }

    pub fn with_vertical_padding(mut self, padding: f32) -> Self {
        self.vertical_padding = padding;
        self
    }

    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_line_color(mut self, color: Color) -> Self {
        self.line_color = color;
        self
    }

    pub fn measure<M: TextMeasure + ?Sized>(&self, fonts: &M) -> Size {
        let num = self.numerator.measure(fonts);
        let den = self.denominator.measure(fonts);
        Size::new(
            num.width.max(den.width),
            num.height + 2.0 * self.vertical_padding + self.line_width + den.height,
        )
    }

    /// Draws the fraction; as the display root it centers on the surface midline
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, top_left: Point, ctx: &DrawContext) {
        let size = self.measure(&*surface);
        let num = self.numerator.measure(&*surface);
        let den = self.denominator.measure(&*surface);
        let child = ctx.child();

        let num_top = if ctx.main {
            ctx.surface_size.height / 2.0 - num.height - self.vertical_padding
        } else {
            top_left.y
        };

        let num_origin = Point::new(top_left.x + (size.width - num.width) / 2.0, num_top);
        self.numerator.draw(surface, num_origin, &child);

        // Divider centered between numerator bottom and denominator top
        let line_y = num_top + num.height + self.vertical_padding + self.line_width / 2.0;
        surface.draw_line(
            Point::new(top_left.x, line_y),
            Point::new(top_left.x + size.width, line_y),
            self.line_width,
            self.line_color,
        );

        let den_top = num_top + num.height + 2.0 * self.vertical_padding + self.line_width;
        let den_origin = Point::new(top_left.x + (size.width - den.width) / 2.0, den_top);
        self.denominator.draw(surface, den_origin, &child);
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

    fn divider(primitives: &[RenderPrimitive]) -> (Point, Point, f32) {
        primitives
            .iter()
            .find_map(|p| match p {
                RenderPrimitive::Line {
                    start,
                    end,
                    thickness,
                    ..
                } => Some((*start, *end, *thickness)),
                _ => None,
            })
            .expect("divider line drawn")
    }

    #[test]
    fn test_measure_height_stacks_operands() {
        let fonts = FontMetrics::default();
        let num = Element::text("x");
        let den = Element::text("2");
        let (n, d) = (num.measure(&fonts), den.measure(&fonts));

        let size = Fraction::new(num, den).measure(&fonts);
        assert!(approx(size.height, n.height + 40.0 + 3.0 + d.height));
        assert_eq!(size.width, n.width.max(d.width));
    }

    #[test]
    fn test_nested_draw_uses_passed_offset() {
        let mut surface = RecordingSurface::new(Size::new(800.0, 800.0));
        let fraction = Fraction::new(Element::text("x"), Element::text("zz"));
        let num = fraction.numerator.measure(&surface);
        let den = fraction.denominator.measure(&surface);
        let size = fraction.measure(&surface);

        let ctx = DrawContext::nested(surface.size());
        fraction.draw(&mut surface, Point::new(50.0, 60.0), &ctx);
        let output = surface.finish();

        let (start, end, thickness) = divider(&output.primitives);
        assert_eq!(thickness, 3.0);
        assert!(approx(start.x, 50.0));
        assert!(approx(end.x - start.x, size.width));
        assert!(approx(start.y, 60.0 + num.height + 20.0 + 1.5));

        let runs = output.text_runs();
        // Narrower numerator is centered over the wider denominator
        assert!(approx(runs[0].1.x, 50.0 + (den.width - num.width) / 2.0));
        assert!(approx(runs[1].1.x, 50.0));
        assert!(approx(runs[1].1.y, 60.0 + size.height));
    }

    #[test]
    fn test_main_fraction_centers_on_surface() {
        let mut surface = RecordingSurface::new(Size::new(800.0, 600.0));
        let fraction = Fraction::new(Element::text("x"), Element::text("z"));

        let ctx = DrawContext::root(surface.size());
        fraction.draw(&mut surface, Point::new(0.0, 0.0), &ctx);
        let output = surface.finish();

        let (start, _, _) = divider(&output.primitives);
        assert!(approx(start.y, 300.0 + 1.5));
        let runs = output.text_runs();
        assert!(approx(runs[0].1.y, 300.0 - 20.0));
    }

    #[test]
    fn test_main_flag_is_not_inherited() {
        let mut surface = RecordingSurface::new(Size::new(800.0, 600.0));
        let inner = Element::fraction(Element::text("a"), Element::text("b"));
        let outer = Fraction::new(inner, Element::text("c"));

        let ctx = DrawContext::root(surface.size());
        outer.draw(&mut surface, Point::origin(), &ctx);
        let output = surface.finish();

        // Outer divider lies below the inner one
        let lines: Vec<f32> = output
            .primitives
            .iter()
            .filter_map(|p| match p {
                RenderPrimitive::Line { start, .. } => Some(start.y),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0] < lines[1]);
    }
}
