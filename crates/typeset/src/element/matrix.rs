use super::{DrawContext, Element};
use crate::error::{MathError, MathResult};
use crate::geometry::{Point, Size};
use crate::surface::{Color, PathCommand, Surface, TextMeasure};

pub const HORIZONTAL_CELL_PADDING: f32 = 40.0;
pub const VERTICAL_CELL_PADDING: f32 = 20.0;
/// Length of a bracket's horizontal ticks
pub const BRACKET_WIDTH: f32 = 15.0;
/// Gap between a bracket and the cell grid
pub const BRACKET_PADDING: f32 = 10.0;
pub const BRACKET_STROKE: f32 = 3.0;

/// A bracketed grid of cells, each centered in its column/row box
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<Element>>,
}

/// Column widths and row heights of the cell grid
struct GridLayout {
    column_widths: Vec<f32>,
    row_heights: Vec<f32>,
    cell_sizes: Vec<Vec<Size>>,
}

impl GridLayout {
    /// Cell grid width without brackets
    fn inner_width(&self) -> f32 {
        self.column_widths.iter().sum::<f32>()
            + gaps(self.column_widths.len()) * HORIZONTAL_CELL_PADDING
    }

    fn inner_height(&self) -> f32 {
        self.row_heights.iter().sum::<f32>() + gaps(self.row_heights.len()) * VERTICAL_CELL_PADDING
    }
}

fn gaps(count: usize) -> f32 {
    count.saturating_sub(1) as f32
}

impl Matrix {
    /// Build a `rows` x `columns` matrix from a row-major grid
    pub fn new(rows: usize, columns: usize, cells: Vec<Vec<Element>>) -> MathResult<Self> {
        let invalid = |detail: String| {
            tracing::debug!(rows, columns, %detail, "rejected matrix shape");
            MathError::InvalidMatrixShape {
                rows,
                columns,
                detail,
            }
        };

        if rows == 0 || columns == 0 {
            return Err(invalid("dimensions must be non-zero".to_string()));
        }
        if cells.len() != rows {
            return Err(invalid(format!("got {} rows", cells.len())));
        }
        if let Some((index, row)) = cells
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns)
        {
            return Err(invalid(format!("row {} has {} cells", index, row.len())));
        }

        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Element> {
        self.cells.get(row).and_then(|cells| cells.get(column))
    }

    fn layout<M: TextMeasure + ?Sized>(&self, fonts: &M) -> GridLayout {
        let cell_sizes: Vec<Vec<Size>> = self
            .cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.measure(fonts)).collect())
            .collect();

        let mut column_widths = vec![0.0f32; self.columns];
        let mut row_heights = vec![0.0f32; self.rows];
        for (r, row) in cell_sizes.iter().enumerate() {
            for (c, size) in row.iter().enumerate() {
                column_widths[c] = column_widths[c].max(size.width);
                row_heights[r] = row_heights[r].max(size.height);
            }
        }

        GridLayout {
            column_widths,
            row_heights,
            cell_sizes,
        }
    }

    pub fn measure<M: TextMeasure + ?Sized>(&self, fonts: &M) -> Size {
        let grid = self.layout(fonts);
        Size::new(
            grid.inner_width() + 2.0 * BRACKET_WIDTH + 2.0 * BRACKET_PADDING,
            grid.inner_height() + 2.0 * BRACKET_PADDING,
        )
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, top_left: Point, ctx: &DrawContext) {
        let grid = self.layout(&*surface);
        let child = ctx.child();
        let top = top_left.y;
        let bottom = top + grid.inner_height() + 2.0 * BRACKET_PADDING;

        let left = top_left.x;
        let left_bracket = [
            PathCommand::MoveTo(Point::new(left + BRACKET_WIDTH, top)),
            PathCommand::LineTo(Point::new(left, top)),
            PathCommand::LineTo(Point::new(left, bottom)),
            PathCommand::LineTo(Point::new(left + BRACKET_WIDTH, bottom)),
        ];
        surface.draw_path(&left_bracket, BRACKET_STROKE, Color::BLACK);

        // Placed independently of the left bracket; relies on equal bracket widths
        let right =
            top_left.x + grid.inner_width() + 2.0 * BRACKET_WIDTH + HORIZONTAL_CELL_PADDING;
        let right_bracket = [
            PathCommand::MoveTo(Point::new(right - BRACKET_WIDTH, top)),
            PathCommand::LineTo(Point::new(right, top)),
            PathCommand::LineTo(Point::new(right, bottom)),
            PathCommand::LineTo(Point::new(right - BRACKET_WIDTH, bottom)),
        ];
        surface.draw_path(&right_bracket, BRACKET_STROKE, Color::BLACK);

        let mut y = top + BRACKET_PADDING;
        for (r, row) in self.cells.iter().enumerate() {
            let row_height = grid.row_heights[r];
            let mut x = left + BRACKET_WIDTH + BRACKET_PADDING;
            for (c, cell) in row.iter().enumerate() {
                let column_width = grid.column_widths[c];
                let size = grid.cell_sizes[r][c];
                let origin = Point::new(
                    x + (column_width - size.width) / 2.0,
                    y + (row_height - size.height) / 2.0,
                );
                cell.draw(surface, origin, &child);
                x += column_width + HORIZONTAL_CELL_PADDING;
            }
            y += row_height + VERTICAL_CELL_PADDING;
        }
    }
}
