//! Rendering - Record draw calls as render primitives
//!
//! [`RecordingSurface`] implements [`Surface`] by capturing every paint call
//! as a [`RenderPrimitive`]. Scale scopes become nested
//! [`RenderPrimitive::Group`]s carrying their [`Transform`], so a backend can
//! replay them with its own transform stack, or call
//! [`RenderOutput::flattened`] to get absolute coordinates.

use crate::font::FontMetrics;
use crate::geometry::{Point, Rect, Size};
use crate::surface::{Color, PathCommand, Surface, TextMeasure, TextMetrics};
use serde::{Deserialize, Serialize};

// =============================================================================
// Render Primitives
// =============================================================================

/// Text styling for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f32,
    pub color: Color,
}

/// A render primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderPrimitive {
    /// Draw text with its baseline starting at `position`
    Text {
        text: String,
        position: Point,
        style: TextStyle,
    },
    /// Draw a line (fraction dividers)
    Line {
        start: Point,
        end: Point,
        thickness: f32,
        color: Color,
    },
    /// Stroke an open path (radicals, brackets)
    Path {
        commands: Vec<PathCommand>,
        stroke_width: f32,
        color: Color,
    },
    /// A group of primitives with a transform
    Group {
        transform: Transform,
        children: Vec<RenderPrimitive>,
    },
}

/// Uniform-or-not scale followed by a translation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl Transform {
    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            ..Default::default()
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            scale_x: sx,
            scale_y: sy,
            ..Default::default()
        }
    }

    /// Uniform scale that keeps `pivot` fixed
    pub fn scale_about(factor: f32, pivot: Point) -> Self {
        Self {
            translate_x: pivot.x * (1.0 - factor),
            translate_y: pivot.y * (1.0 - factor),
            scale_x: factor,
            scale_y: factor,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.translate_x == 0.0
            && self.translate_y == 0.0
            && self.scale_x == 1.0
            && self.scale_y == 1.0
    }

    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            point.x * self.scale_x + self.translate_x,
            point.y * self.scale_y + self.translate_y,
        )
    }

    /// `self` applied first, then `outer`
    pub fn then(&self, outer: &Transform) -> Transform {
        Transform {
            translate_x: self.translate_x * outer.scale_x + outer.translate_x,
            translate_y: self.translate_y * outer.scale_y + outer.translate_y,
            scale_x: self.scale_x * outer.scale_x,
            scale_y: self.scale_y * outer.scale_y,
        }
    }

    /// Factor applied to lengths such as font sizes and stroke widths
    fn length_scale(&self) -> f32 {
        (self.scale_x * self.scale_y).abs().sqrt()
    }
}

// =============================================================================
// Render Output
// =============================================================================

/// A recorded frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOutput {
    /// Top-level primitives in paint order
    pub primitives: Vec<RenderPrimitive>,
    /// Size of the surface the frame was recorded on
    pub surface_size: Size,
    /// Color a backend clears the surface to before replaying
    pub background: Color,
}

impl RenderOutput {
    pub fn new(primitives: Vec<RenderPrimitive>, surface_size: Size) -> Self {
        Self {
            primitives,
            surface_size,
            background: Color::WHITE,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Primitives with every group resolved into absolute coordinates
    pub fn flattened(&self) -> Vec<RenderPrimitive> {
        let mut out = Vec::new();
        flatten_into(&self.primitives, &Transform::default(), &mut out);
        out
    }

    /// Bounding box of every anchor point in the frame, or `None` if empty
    ///
    /// Text contributes its baseline origin only.
    pub fn bounds(&self) -> Option<Rect> {
        let mut points = self.flattened().into_iter().flat_map(|p| match p {
            RenderPrimitive::Text { position, .. } => vec![position],
            RenderPrimitive::Line { start, end, .. } => vec![start, end],
            RenderPrimitive::Path { commands, .. } => {
                commands.iter().map(|c| c.point()).collect()
            }
            RenderPrimitive::Group { .. } => Vec::new(),
        });
        let first = points.next()?;
        let start = Rect::from_origin_size(first, Size::zero());
        Some(points.fold(start, |rect, p| rect.include(p)))
    }

    /// Text runs as `(content, baseline origin, font size)` in paint order,
    /// in the coordinates of the frame each was drawn in
    pub fn text_runs(&self) -> Vec<(String, Point, f32)> {
        let mut runs = Vec::new();
        collect_text_runs(&self.primitives, &mut runs);
        runs
    }

    /// Text runs in absolute coordinates
    pub fn flattened_text_runs(&self) -> Vec<(String, Point, f32)> {
        let mut runs = Vec::new();
        collect_text_runs(&self.flattened(), &mut runs);
        runs
    }
}

fn collect_text_runs(primitives: &[RenderPrimitive], runs: &mut Vec<(String, Point, f32)>) {
    for primitive in primitives {
        match primitive {
            RenderPrimitive::Text {
                text,
                position,
                style,
            } => {
                runs.push((text.clone(), *position, style.font_size));
            }
            RenderPrimitive::Group { children, .. } => collect_text_runs(children, runs),
            RenderPrimitive::Line { .. } | RenderPrimitive::Path { .. } => {}
        }
    }
}

fn flatten_into(
    primitives: &[RenderPrimitive],
    transform: &Transform,
    out: &mut Vec<RenderPrimitive>,
) {
    let lengths = transform.length_scale();
    for primitive in primitives {
        match primitive {
            RenderPrimitive::Text {
                text,
                position,
                style,
            } => out.push(RenderPrimitive::Text {
                text: text.clone(),
                position: transform.apply(*position),
                style: TextStyle {
                    font_size: style.font_size * lengths,
                    ..style.clone()
                },
            }),
            RenderPrimitive::Line {
                start,
                end,
                thickness,
                color,
            } => out.push(RenderPrimitive::Line {
                start: transform.apply(*start),
                end: transform.apply(*end),
                thickness: thickness * lengths,
                color: *color,
            }),
            RenderPrimitive::Path {
                commands,
                stroke_width,
                color,
            } => out.push(RenderPrimitive::Path {
                commands: commands
                    .iter()
                    .map(|c| c.map(|p| transform.apply(p)))
                    .collect(),
                stroke_width: stroke_width * lengths,
                color: *color,
            }),
            RenderPrimitive::Group {
                transform: inner,
                children,
            } => {
                flatten_into(children, &inner.then(transform), out);
            }
        }
    }
}

// =============================================================================
// Recording Surface
// =============================================================================

/// Configuration for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Font family recorded on text primitives
    pub font_family: String,
    /// Default text color
    pub color: Color,
    /// Surface clear color
    pub background: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_family: "Cambria Math".to_string(),
            color: Color::BLACK,
            background: Color::WHITE,
        }
    }
}

/// A frame on the transform stack
#[derive(Debug)]
struct Frame {
    transform: Transform,
    primitives: Vec<RenderPrimitive>,
}

/// A [`Surface`] that records paint calls instead of rasterizing them
#[derive(Debug)]
pub struct RecordingSurface<F = FontMetrics> {
    size: Size,
    fonts: F,
    config: RenderConfig,
    /// Root frame first; never empty
    frames: Vec<Frame>,
}

impl RecordingSurface<FontMetrics> {
    /// Recording surface using the default font metrics
    pub fn new(size: Size) -> Self {
        Self::with_fonts(size, FontMetrics::default(), RenderConfig::default())
    }
}

impl<F: TextMeasure> RecordingSurface<F> {
    pub fn with_fonts(size: Size, fonts: F, config: RenderConfig) -> Self {
        Self {
            size,
            fonts,
            config,
            frames: vec![Frame {
                transform: Transform::default(),
                primitives: Vec::new(),
            }],
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Number of open scale scopes
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    fn current(&mut self) -> &mut Vec<RenderPrimitive> {
        let last = self.frames.len() - 1;
        &mut self.frames[last].primitives
    }

    fn close_frame(&mut self) {
        if let Some(frame) = self.frames.pop() {
            self.current().push(RenderPrimitive::Group {
                transform: frame.transform,
                children: frame.primitives,
            });
        }
    }

    /// Stop recording and return the frame
    pub fn finish(mut self) -> RenderOutput {
        if self.depth() > 0 {
            tracing::warn!(open = self.depth(), "finishing recording with open scale scopes");
        }
        while self.depth() > 0 {
            self.close_frame();
        }
        let primitives = self
            .frames
            .pop()
            .map(|frame| frame.primitives)
            .unwrap_or_default();
        RenderOutput::new(primitives, self.size).with_background(self.config.background)
    }
}

impl<F: TextMeasure> TextMeasure for RecordingSurface<F> {
    fn measure_text(&self, content: &str, font_size: f32) -> TextMetrics {
        self.fonts.measure_text(content, font_size)
    }
}

impl<F: TextMeasure> Surface for RecordingSurface<F> {
    fn size(&self) -> Size {
        self.size
    }

    fn draw_text(&mut self, content: &str, position: Point, font_size: f32, color: Color) {
        let style = TextStyle {
            font_family: self.config.font_family.clone(),
            font_size,
            color,
        };
        self.current().push(RenderPrimitive::Text {
            text: content.to_string(),
            position,
            style,
        });
    }

    fn draw_line(&mut self, start: Point, end: Point, stroke_width: f32, color: Color) {
        self.current().push(RenderPrimitive::Line {
            start,
            end,
            thickness: stroke_width,
            color,
        });
    }

    fn draw_path(&mut self, path: &[PathCommand], stroke_width: f32, color: Color) {
        if path.is_empty() {
            return;
        }
        self.current().push(RenderPrimitive::Path {
            commands: path.to_vec(),
            stroke_width,
            color,
        });
    }

    fn push_scale(&mut self, factor: f32, pivot: Point) {
        self.frames.push(Frame {
            transform: Transform::scale_about(factor, pivot),
            primitives: Vec::new(),
        });
    }

    fn pop_transform(&mut self) {
        if self.depth() == 0 {
            tracing::warn!("pop_transform without a matching push_scale");
            return;
        }
        self.close_frame();
    }
}

// =============================================================================
// Tests
// =============================================================================
