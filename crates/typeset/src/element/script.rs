use super::{DrawContext, Element};
use crate::geometry::{Point, Size};
use crate::surface::{with_scale, Surface, TextMeasure};

/// Scale applied to powers and subscripts
pub const DEFAULT_SCRIPT_SCALE: f32 = 0.5;
/// Gap between a superscript's base and its power
pub const DEFAULT_SUPERSCRIPT_PADDING: f32 = 15.0;
/// Vertical gap between a subscript's base bottom and the subscript
pub const DEFAULT_SUBSCRIPT_TOP_PADDING: f32 = 20.0;
/// Horizontal gap between a subscript's base and the subscript
pub const DEFAULT_SUBSCRIPT_START_PADDING: f32 = 20.0;

// =============================================================================
// Superscript
// =============================================================================

/// Base with a scaled power raised to its right
#[derive(Debug, Clone, PartialEq)]
pub struct Superscript {
    pub base: Box<Element>,
    pub power: Box<Element>,
    pub power_scale: f32,
    pub vertical_padding: f32,
}

impl Superscript {
    pub fn new(base: Element, power: Element) -> Self {
        Self {
            base: Box::new(base),
            power: Box::new(power),
            power_scale: DEFAULT_SCRIPT_SCALE,
            vertical_padding: DEFAULT_SUPERSCRIPT_PADDING,
        }
    }

    pub fn with_power_scale(mut self, scale: f32) -> Self {
        self.power_scale = scale;
        self
    }

    pub fn with_vertical_padding(mut self, padding: f32) -> Self {
        self.vertical_padding = padding;
        self
    }

    pub fn measure<M: TextMeasure + ?Sized>(&self, fonts: &M) -> Size {
        let base = self.base.measure(fonts);
        let power = self.power.measure(fonts).scaled(self.power_scale);
        Size::new(
            base.width + power.width,
            base.height + power.height + self.vertical_padding,
        )
    }

    /// Draws the power in a frame scaled about its own top-left corner
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, top_left: Point, ctx: &DrawContext) {
        let base = self.base.measure(&*surface);
        let power = self.power.measure(&*surface).scaled(self.power_scale);
        let child = ctx.child();

        let top = if ctx.main {
            top_left.y - base.height / 2.0
        } else {
            top_left.y
        };

        let power_origin = Point::new(top_left.x + base.width, top);
        with_scale(surface, self.power_scale, power_origin, |scaled| {
            self.power.draw(scaled, power_origin, &child);
        });

        let base_origin = Point::new(top_left.x, top + power.height + self.vertical_padding);
        self.base.draw(surface, base_origin, &child);
    }
}

// =============================================================================
// Subscript
// =============================================================================

/// Base with a scaled subscript lowered to its right
///
/// The measured size adds the scaled subscript to the base component-wise
/// and does not account for the paddings used when drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscript {
    pub base: Box<Element>,
    pub sub: Box<Element>,
    pub sub_scale: f32,
    pub top_padding: f32,
    pub start_padding: f32,
}

impl Subscript {
    pub fn new(base: Element, sub: Element) -> Self {
        Self {
            base: Box::new(base),
            sub: Box::new(sub),
            sub_scale: DEFAULT_SCRIPT_SCALE,
            top_padding: DEFAULT_SUBSCRIPT_TOP_PADDING,
            start_padding: DEFAULT_SUBSCRIPT_START_PADDING,
        }
    }

    pub fn with_sub_scale(mut self, scale: f32) -> Self {
        self.sub_scale = scale;
        self
    }

    pub fn with_top_padding(mut self, padding: f32) -> Self {
        self.top_padding = padding;
        self
    }

    pub fn with_start_padding(mut self, padding: f32) -> Self {
        self.start_padding = padding;
        self
    }

    pub fn measure<M: TextMeasure + ?Sized>(&self, fonts: &M) -> Size {
        let base = self.base.measure(fonts);
        let sub = self.sub.measure(fonts).scaled(self.sub_scale);
        Size::new(base.width + sub.width, base.height + sub.height)
    }

    /// Draws the subscript in a frame scaled about the surface origin
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, top_left: Point, ctx: &DrawContext) {
        let base = self.base.measure(&*surface);
        let child = ctx.child();

        self.base.draw(surface, top_left, &child);

        let sub_origin = Point::new(
            top_left.x + base.width + self.start_padding,
            top_left.y + base.height + self.top_padding,
        );
        with_scale(surface, self.sub_scale, Point::origin(), |scaled| {
            self.sub.draw(scaled, sub_origin, &child);
        });
    }
}
