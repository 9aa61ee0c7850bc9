use super::{DrawContext, Element};
use crate::geometry::{Point, Size};
use crate::surface::{Surface, TextMeasure};

/// Children laid out left to right, each centered vertically against the
/// tallest sibling
///
/// Only [`combine`](super::combine) builds groups.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalGroup {
    children: Vec<Element>,
}

impl HorizontalGroup {
    pub(super) fn pair(left: Element, right: Element) -> Self {
        Self {
            children: vec![left, right],
        }
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn measure<M: TextMeasure + ?Sized>(&self, fonts: &M) -> Size {
        self.children
            .iter()
            .map(|child| child.measure(fonts))
            .fold(Size::zero(), |acc, size| {
                Size::new(acc.width + size.width, acc.height.max(size.height))
            })
    }

    /// Draws children left to right; `ctx` is forwarded unchanged
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, top_left: Point, ctx: &DrawContext) {
        let sizes: Vec<Size> = self
            .children
            .iter()
            .map(|child| child.measure(&*surface))
            .collect();
        let max_height = sizes.iter().map(|s| s.height).fold(0.0f32, f32::max);

        let mut x = top_left.x;
        for (child, size) in self.children.iter().zip(&sizes) {
            let y = top_left.y + (max_height - size.height) / 2.0;
            child.draw(surface, Point::new(x, y), ctx);
            x += size.width;
        }
    }
}
