//! Font Metrics - Deterministic single-font text metrics
//!
//! Ratios are fractions of the em (the font size). Glyph classes are coarse:
//! x-height glyphs, tall glyphs (capitals, digits, ascenders) and descenders.
//! Hosts with a real rasterizer implement [`TextMeasure`] themselves; this
//! model backs [`RecordingSurface`](crate::render::RecordingSurface) and tests.

use crate::surface::{TextMeasure, TextMetrics};
use serde::{Deserialize, Serialize};

/// Characters whose ink extends below the baseline, compared case-insensitively
pub const DESCENDERS: &[char] = &['g', 'j', 'p', 'q', 'y', ',', ';', '_'];

/// Glyphs whose ink top sits at the x-height
const X_HEIGHT_GLYPHS: &str = "acegmnopqrsuvwxyz+-=*<>~";

/// Glyphs drawn with the narrow advance
const NARROW_GLYPHS: &str = " .,;:!'|il";

/// Whether any character of `content` has a descender
pub fn has_descender(content: &str) -> bool {
    content
        .chars()
        .flat_map(char::to_lowercase)
        .any(|c| DESCENDERS.contains(&c))
}

/// Em-relative metrics of the single display font
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontMetrics {
    /// Advance of a regular glyph
    pub advance: f32,
    /// Advance of spaces, punctuation and thin letters
    pub narrow_advance: f32,
    /// Ink height of capitals, digits and ascenders
    pub cap_height: f32,
    /// Ink height of lowercase glyphs without ascenders
    pub x_height: f32,
    /// Depth below the baseline
    pub descent: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            advance: 0.6,
            narrow_advance: 0.3,
            cap_height: 0.72,
            x_height: 0.45,
            descent: 0.2,
        }
    }
}

impl FontMetrics {
    fn glyph_advance(&self, c: char) -> f32 {
        if NARROW_GLYPHS.contains(c) {
            self.narrow_advance
        } else {
            self.advance
        }
    }

    fn glyph_height(&self, c: char) -> f32 {
        if c.is_whitespace() {
            0.0
        } else if X_HEIGHT_GLYPHS.contains(c) || matches!(c, ',' | '.' | '_') {
            self.x_height
        } else {
            self.cap_height
        }
    }
}

impl TextMeasure for FontMetrics {
    fn measure_text(&self, content: &str, font_size: f32) -> TextMetrics {
        let descent = self.descent * font_size;
        if content.is_empty() {
            return TextMetrics {
                width: 0.0,
                height: 0.0,
                descent,
            };
        }

        let width: f32 = content.chars().map(|c| self.glyph_advance(c)).sum();
        let ascent = content
            .chars()
            .map(|c| self.glyph_height(c))
            .fold(0.0f32, f32::max);

        let height = if ascent > 0.0 && has_descender(content) {
            ascent * font_size + descent
        } else {
            ascent * font_size
        };

        TextMetrics {
            width: width * font_size,
            height,
            descent,
        }
    }
}
