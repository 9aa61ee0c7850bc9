use super::{DrawContext, Element};
use crate::geometry::{Point, Size};
use crate::surface::{with_scale, Color, PathCommand, Surface, TextMeasure};

/// Radical symbol width as a fraction of the radicand height
pub const SYMBOL_WIDTH_RATIO: f32 = 0.7;
/// Depth of the hook lead-in as a fraction of the radicand box height
pub const HOOK_DEPTH_RATIO: f32 = 0.15;
/// Horizontal position of the hook's bottom point within the symbol
pub const HOOK_KNEE_RATIO: f32 = 0.3;
pub const DEFAULT_INDEX_SCALE: f32 = 0.5;
pub const DEFAULT_LINE_WIDTH: f32 = 2.5;
pub const RADICAND_HORIZONTAL_PADDING: f32 = 10.0;
pub const RADICAND_VERTICAL_PADDING: f32 = 10.0;
pub const INDEX_HORIZONTAL_PADDING: f32 = 5.0;
pub const INDEX_VERTICAL_PADDING: f32 = 5.0;
/// Vinculum overhang past the radicand's right padding
pub const TOP_LINE_EXTENSION: f32 = 10.0;

/// Radical sign over a radicand, with an optional scaled index in the hook
#[derive(Debug, Clone, PartialEq)]
pub struct Radical {
    pub radicand: Box<Element>,
    pub index: Option<Box<Element>>,
    pub index_scale: f32,
    pub line_color: Color,
    pub line_width: f32,
}

/// Geometry shared by measure and draw, relative to the element's top-left
#[derive(Debug, Clone, Copy, PartialEq)]
struct RadicalLayout {
    radicand: Size,
    /// Scaled index size, if any
    index: Option<Size>,
    symbol_width: f32,
    /// Radicand plus its vertical padding
    box_height: f32,
    /// Distance from the bottom edge up to where the hook lead-in starts
    hook_rise: f32,
    /// Horizontal shift of the symbol to make room for the index
    shift: f32,
    size: Size,
}

impl Radical {
    pub fn new(radicand: Element) -> Self {
        Self {
            radicand: Box::new(radicand),
            index: None,
            index_scale: DEFAULT_INDEX_SCALE,
            line_color: Color::BLACK,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }

    pub fn with_index(mut self, index: Element) -> Self {
        self.index = Some(Box::new(index));
        self
    }

    pub fn with_index_scale(mut self, scale: f32) -> Self {
        self.index_scale = scale;
        self
    }

    pub fn with_line_color(mut self, color: Color) -> Self {
        self.line_color = color;
        self
    }

    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    fn layout<M: TextMeasure + ?Sized>(&self, fonts: &M) -> RadicalLayout {
        let radicand = self.radicand.measure(fonts);
        let index = self
            .index
            .as_ref()
            .map(|index| index.measure(fonts).scaled(self.index_scale));

        let symbol_width = radicand.height * SYMBOL_WIDTH_RATIO;
        let knee = symbol_width * HOOK_KNEE_RATIO;
        let box_height = radicand.height + 2.0 * RADICAND_VERTICAL_PADDING;
        let hook_rise = box_height * (0.5 - HOOK_DEPTH_RATIO);

        let (index_width, index_height, shift) = match index {
            Some(index) => (
                (index.width - knee).max(0.0) + INDEX_HORIZONTAL_PADDING,
                hook_rise + index.height + INDEX_VERTICAL_PADDING,
                (index.width + INDEX_HORIZONTAL_PADDING - knee).max(0.0),
            ),
            None => (0.0, 0.0, 0.0),
        };

        let width = index_width
            + symbol_width
            + 2.0 * RADICAND_HORIZONTAL_PADDING
            + radicand.width
            + TOP_LINE_EXTENSION;

        RadicalLayout {
            radicand,
            index,
            symbol_width,
            box_height,
            hook_rise,
            shift,
            size: Size::new(width, box_height.max(index_height)),
        }
    }

    pub fn measure<M: TextMeasure + ?Sized>(&self, fonts: &M) -> Size {
        self.layout(fonts).size
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, top_left: Point, ctx: &DrawContext) {
        let layout = self.layout(&*surface);
        let child = ctx.child();

        let x = top_left.x + layout.shift;
        let bottom = top_left.y + layout.size.height;
        let vinculum_y = bottom - layout.box_height;
        let hook_start = Point::new(x, bottom - layout.hook_rise);
        let knee_x = x + layout.symbol_width * HOOK_KNEE_RATIO;

        let path = [
            PathCommand::MoveTo(hook_start),
            PathCommand::LineTo(Point::new(knee_x, bottom)),
            PathCommand::LineTo(Point::new(x + layout.symbol_width, vinculum_y)),
            PathCommand::LineTo(Point::new(
                x + layout.symbol_width
                    + 2.0 * RADICAND_HORIZONTAL_PADDING
                    + layout.radicand.width
                    + TOP_LINE_EXTENSION,
                vinculum_y,
            )),
        ];
        surface.draw_path(&path, self.line_width, self.line_color);

        if let (Some(index), Some(index_size)) = (&self.index, layout.index) {
            let index_origin = Point::new(
                knee_x - INDEX_HORIZONTAL_PADDING - index_size.width,
                hook_start.y - INDEX_VERTICAL_PADDING - index_size.height,
            );
            with_scale(surface, self.index_scale, index_origin, |scaled| {
                index.draw(scaled, index_origin, &child);
            });
        }

        let radicand_origin = Point::new(
            x + layout.symbol_width + RADICAND_HORIZONTAL_PADDING,
            vinculum_y + RADICAND_VERTICAL_PADDING,
        );
        self.radicand.draw(surface, radicand_origin, &child);
    }
}
