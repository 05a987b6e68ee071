//! Pixel geometry of the visible grid, in panel-local coordinates.

use egui::{pos2, Pos2, Rect, Vec2};

pub const DEFAULT_EDGE_WIDTH: f32 = 3.0;

/// Half-open containment: the right and bottom borders belong to the next
/// rectangle over.
pub fn rect_contains(rect: Rect, pos: Pos2) -> bool {
    pos.x >= rect.min.x && pos.x < rect.max.x && pos.y >= rect.min.y && pos.y < rect.max.y
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    /// Cumulative x of every column boundary, `columns + 1` entries.
    column_edges: Vec<f32>,
    /// y of every slot boundary, top first, `visible_rows + 1` entries.
    row_edges: Vec<f32>,
    size: Vec2,
    edge_width: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(&[0], 1, Vec2::ZERO, DEFAULT_EDGE_WIDTH)
    }
}

impl GridLayout {
    pub fn new(widths: &[i32], visible_rows: usize, size: Vec2, edge_width: f32) -> Self {
        let mut column_edges = Vec::with_capacity(widths.len() + 1);
        let mut x = 0;
        column_edges.push(0.0);
        for width in widths {
            x += width;
            column_edges.push(x as f32);
        }

        let slots = visible_rows.max(1);
        let row_edges = (0..=slots)
            .map(|slot| (slot as f32 * size.y / slots as f32).round())
            .collect();

        Self { column_edges, row_edges, size, edge_width }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn columns(&self) -> usize {
        self.column_edges.len() - 1
    }

    pub fn slots(&self) -> usize {
        self.row_edges.len() - 1
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        rect_contains(Rect::from_min_size(Pos2::ZERO, self.size), pos)
    }

    /// Visible slot and column under `pos`.
    pub fn hit(&self, pos: Pos2) -> Option<(usize, usize)> {
        if !self.contains(pos) {
            return None;
        }
        let slot = self.row_edges.windows(2).position(|e| pos.y >= e[0] && pos.y < e[1])?;
        let column = self.column_edges.windows(2).position(|e| pos.x >= e[0] && pos.x < e[1])?;
        Some((slot, column))
    }

    pub fn cell_rect(&self, slot: usize, column: usize) -> Option<Rect> {
        let (top, bottom) = (self.row_edges.get(slot)?, self.row_edges.get(slot + 1)?);
        let (left, right) = (self.column_edges.get(column)?, self.column_edges.get(column + 1)?);
        Some(Rect::from_min_max(pos2(*left, *top), pos2(*right, *bottom)))
    }

    pub fn column_midpoint(&self, column: usize) -> Option<f32> {
        let left = self.column_edges.get(column)?;
        let right = self.column_edges.get(column + 1)?;
        Some((left + right) / 2.0)
    }

    /// The outer columns get a doubled grab area since their outer border
    /// sits on the panel edge.
    fn edge_width_of(&self, column: usize) -> f32 {
        if column == 0 || column + 1 == self.columns() {
            self.edge_width * 2.0
        } else {
            self.edge_width
        }
    }

    pub fn left_edge_rect(&self, slot: usize, column: usize) -> Option<Rect> {
        let cell = self.cell_rect(slot, column)?;
        let width = self.edge_width_of(column).min(cell.width());
        Some(Rect::from_min_max(cell.min, pos2(cell.min.x + width, cell.max.y)))
    }

    pub fn right_edge_rect(&self, slot: usize, column: usize) -> Option<Rect> {
        let cell = self.cell_rect(slot, column)?;
        let width = self.edge_width_of(column).min(cell.width());
        Some(Rect::from_min_max(pos2(cell.max.x - width, cell.min.y), cell.max))
    }
}
