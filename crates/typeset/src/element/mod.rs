//! Element Tree - Composable math elements that measure and draw themselves
//!
//! An expression is an owned tree of [`Element`] values. Every element can
//! report the bounding box it needs ([`Element::measure`]) and paint itself
//! with its top-left corner at a given point ([`Element::draw`]). Composite
//! elements own their children outright; cloning a subtree duplicates it.
//!
//! Measurement is pure: it only reads the element's own fields and the
//! text metrics service, so it may be repeated freely during a draw pass.

mod fraction;
mod group;
mod matrix;
mod radical;
mod script;
mod text;

pub use fraction::Fraction;
pub use group::HorizontalGroup;
pub use matrix::Matrix;
pub use radical::Radical;
pub use script::{Subscript, Superscript};
pub use text::Text;

use crate::error::MathResult;
use crate::geometry::{Point, Size};
use crate::surface::{Color, Surface, TextMeasure};
use std::ops::Add;

// =============================================================================
// Draw Context
// =============================================================================

/// Display context handed down through a draw pass
///
/// `main` marks the display root. The first [`Fraction`] or [`Superscript`]
/// reached from the root consumes it and centers itself against the surface
/// instead of the passed offset. [`HorizontalGroup`] forwards it unchanged;
/// every other element clears it for its children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawContext {
    /// Size of the surface in its unscaled frame
    pub surface_size: Size,
    /// Whether the element being drawn is the display root
    pub main: bool,
    /// Color used for text
    pub ink: Color,
}

impl DrawContext {
    /// Context for the root of a displayed expression
    pub fn root(surface_size: Size) -> Self {
        Self {
            surface_size,
            main: true,
            ink: Color::BLACK,
        }
    }

    /// Context that never recenters against the surface
    pub fn nested(surface_size: Size) -> Self {
        Self {
            main: false,
            ..Self::root(surface_size)
        }
    }

    pub fn with_ink(self, ink: Color) -> Self {
        Self { ink, ..self }
    }

    /// Context for the children of an element that is not transparent to `main`
    pub fn child(&self) -> Self {
        Self {
            main: false,
            ..*self
        }
    }
}

// =============================================================================
// Element
// =============================================================================

/// A node in the expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A run of glyphs
    Text(Text),
    /// Children laid out left to right; produced by [`combine`]
    Group(HorizontalGroup),
    /// Numerator over denominator with a divider line
    Fraction(Fraction),
    /// Base with a scaled power to its upper right
    Superscript(Superscript),
    /// Base with a scaled subscript to its lower right
    Subscript(Subscript),
    /// Radical sign over a radicand, with an optional index
    Radical(Radical),
    /// Bracketed grid of cells
    Matrix(Matrix),
}

impl Element {
    /// Text with default font size and no padding
    pub fn text(content: impl Into<String>) -> Self {
        Element::Text(Text::new(content))
    }

    pub fn fraction(numerator: Element, denominator: Element) -> Self {
        Element::Fraction(Fraction::new(numerator, denominator))
    }

    pub fn superscript(base: Element, power: Element) -> Self {
        Element::Superscript(Superscript::new(base, power))
    }

    pub fn subscript(base: Element, sub: Element) -> Self {
        Element::Subscript(Subscript::new(base, sub))
    }

    /// Square root
    pub fn sqrt(radicand: Element) -> Self {
        Element::Radical(Radical::new(radicand))
    }

    /// Radical with an index, e.g. a cube root
    pub fn root(index: Element, radicand: Element) -> Self {
        Element::Radical(Radical::new(radicand).with_index(index))
    }

    /// Matrix from a row-major cell grid
    pub fn matrix(rows: usize, columns: usize, cells: Vec<Vec<Element>>) -> MathResult<Self> {
        Matrix::new(rows, columns, cells).map(Element::Matrix)
    }

    /// Bounding box this element needs
    pub fn measure<M: TextMeasure + ?Sized>(&self, fonts: &M) -> Size {
        match self {
            Element::Text(e) => e.measure(fonts),
            Element::Group(e) => e.measure(fonts),
            Element::Fraction(e) => e.measure(fonts),
            Element::Superscript(e) => e.measure(fonts),
            Element::Subscript(e) => e.measure(fonts),
            Element::Radical(e) => e.measure(fonts),
            Element::Matrix(e) => e.measure(fonts),
        }
    }

    /// Paint this element with its top-left corner at `top_left`
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, top_left: Point, ctx: &DrawContext) {
        match self {
            Element::Text(e) => e.draw(surface, top_left, ctx),
            Element::Group(e) => e.draw(surface, top_left, ctx),
            Element::Fraction(e) => e.draw(surface, top_left, ctx),
            Element::Superscript(e) => e.draw(surface, top_left, ctx),
            Element::Subscript(e) => e.draw(surface, top_left, ctx),
            Element::Radical(e) => e.draw(surface, top_left, ctx),
            Element::Matrix(e) => e.draw(surface, top_left, ctx),
        }
    }

    /// Paint this element as the root of the display
    pub fn draw_root<S: Surface + ?Sized>(&self, surface: &mut S, top_left: Point) {
        let ctx = DrawContext::root(surface.size());
        self.draw(surface, top_left, &ctx);
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Element::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&HorizontalGroup> {
        match self {
            Element::Group(group) => Some(group),
            _ => None,
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Element {
                fn from(value: $variant) -> Self {
                    Element::$variant(value)
                }
            }
        )*
    };
}

impl_from_variant!(Text, Fraction, Superscript, Subscript, Radical, Matrix);

// =============================================================================
// Combinator
// =============================================================================

/// Place `b` to the right of `a`
///
/// Two texts merge into one text carrying `a`'s font size and padding.
/// Every other pairing yields a two-child [`HorizontalGroup`]; existing
/// groups are not flattened.
pub fn combine(a: Element, b: Element) -> Element {
    match (a, b) {
        (Element::Text(mut a), Element::Text(b)) => {
            a.content.push_str(&b.content);
            Element::Text(a)
        }
        (a, b) => Element::Group(HorizontalGroup::pair(a, b)),
    }
}

impl Add for Element {
    type Output = Element;

    fn add(self, rhs: Element) -> Element {
        combine(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontMetrics;
    use crate::render::RecordingSurface;
    use proptest::prelude::*;

    fn leaf() -> impl Strategy<Value = Element> {
        ("[a-z0-9+=-]{0,4}", 10.0f32..100.0, 0.0f32..20.0, 0.0f32..20.0).prop_map(
            |(content, size, vpad, hpad)| {
                Element::Text(
                    Text::new(content)
                        .with_font_size(size)
                        .with_vertical_padding(vpad)
                        .with_horizontal_padding(hpad),
                )
            },
        )
    }

    fn element() -> impl Strategy<Value = Element> {
        leaf().prop_recursive(4, 24, 4, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(a, b)| a + b),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Element::fraction(a, b)),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Element::superscript(a, b)),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Element::subscript(a, b)),
                inner.clone().prop_map(Element::sqrt),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Element::root(a, b)),
                (inner.clone(), inner.clone(), inner.clone(), inner).prop_map(|(a, b, c, d)| {
                    Element::matrix(2, 2, vec![vec![a, b], vec![c, d]])
                        .expect("2x2 grid is well formed")
                }),
            ]
        })
    }

    #[test]
    fn test_text_merge_law() {
        let merged = Element::text("a") + Element::text("b");
        assert_eq!(merged, Element::text("ab"));
    }

    #[test]
    fn test_merge_keeps_left_fields() {
        let left = Element::Text(
            Text::new("a")
                .with_font_size(40.0)
                .with_vertical_padding(6.0),
        );
        let right = Element::Text(Text::new("b").with_font_size(10.0));

        let merged = combine(left, right);
        let text = merged.as_text().expect("texts merge");
        assert_eq!(text.content, "ab");
        assert_eq!(text.font_size, 40.0);
        assert_eq!(text.vertical_padding, 6.0);
    }

    #[test]
    fn test_mixed_pair_makes_group() {
        let frac = Element::fraction(Element::text("1"), Element::text("2"));
        let combined = Element::text("a") + frac.clone();

        let group = combined.as_group().expect("mixed pair groups");
        assert_eq!(group.children().len(), 2);
        assert_eq!(group.children()[0], Element::text("a"));
        assert_eq!(group.children()[1], frac);
    }

    #[test]
    fn test_left_to_right_chaining() {
        let frac = Element::fraction(Element::text("1"), Element::text("2"));
        let chained = Element::text("a") + Element::text("b") + frac + Element::text("c");

        // ((a + b) + frac) + c: the inner group is kept, not flattened
        let outer = chained.as_group().expect("outer group");
        assert_eq!(outer.children().len(), 2);
        assert_eq!(outer.children()[1], Element::text("c"));

        let inner = outer.children()[0].as_group().expect("inner group");
        assert_eq!(inner.children()[0], Element::text("ab"));
    }

    #[test]
    fn test_draw_context_child_clears_main() {
        let ctx = DrawContext::root(Size::new(800.0, 600.0)).with_ink(Color::BLUE);
        assert!(ctx.main);

        let child = ctx.child();
        assert!(!child.main);
        assert_eq!(child.ink, Color::BLUE);
        assert_eq!(child.surface_size, ctx.surface_size);
        assert!(!DrawContext::nested(Size::zero()).main);
    }

    #[test]
    fn test_draw_root_uses_surface_size() {
        let mut surface = RecordingSurface::new(Size::new(400.0, 400.0));
        let frac = Element::fraction(Element::text("x"), Element::text("z"));
        frac.draw_root(&mut surface, Point::origin());

        let output = surface.finish();
        let (content, baseline, _) = output
            .text_runs()
            .into_iter()
            .next()
            .expect("numerator drawn");
        assert_eq!(content, "x");
        // Numerator bottom sits one padding above the midline
        assert!((baseline.y - (200.0 - 20.0)).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_measure_is_deterministic(e in element()) {
            let fonts = FontMetrics::default();
            prop_assert_eq!(e.measure(&fonts), e.measure(&fonts));
        }

        #[test]
        fn prop_fraction_width_is_max(a in element(), b in element()) {
            let fonts = FontMetrics::default();
            let wa = a.measure(&fonts).width;
            let wb = b.measure(&fonts).width;
            let frac = Element::fraction(a, b);
            prop_assert_eq!(frac.measure(&fonts).width, wa.max(wb));
        }

        #[test]
        fn prop_group_is_additive(a in element(), b in element()) {
            let fonts = FontMetrics::default();
            let sa = a.measure(&fonts);
            let sb = b.measure(&fonts);
            let combined = a.clone() + b.clone();
            prop_assume!(combined.as_group().is_some());
            let size = combined.measure(&fonts);
            prop_assert_eq!(size.width, sa.width + sb.width);
            prop_assert_eq!(size.height, sa.height.max(sb.height));
        }

        #[test]
        fn prop_sizes_are_non_negative(e in element()) {
            let fonts = FontMetrics::default();
            let size = e.measure(&fonts);
            prop_assert!(size.width >= 0.0);
            prop_assert!(size.height >= 0.0);
        }
    }
}
