use egui::{pos2, Rect};

use crate::cell::Cell;
use crate::pattern::distribute_error;

/// A single row of equally wide cells, shown alongside the panel as a
/// column-count reference.
#[derive(Clone, Debug, PartialEq)]
pub struct SequencerStrip {
    cells: Vec<Cell>,
}

impl SequencerStrip {
    pub fn new(columns: usize) -> Self {
        Self { cells: vec![Cell::default(); columns.max(1)] }
    }

    pub fn columns(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Grows or shrinks the strip. Returns false when nothing changes.
    pub fn set_columns(&mut self, columns: usize) -> bool {
        if columns < 1 || columns == self.cells.len() {
            return false;
        }
        tracing::debug!(from = self.cells.len(), to = columns, "strip columns set");
        self.cells.resize(columns, Cell::default());
        true
    }

    /// Cell rectangles inside `bounds`, left to right, covering its whole
    /// width in whole pixels.
    pub fn cell_rects(&self, bounds: Rect) -> Vec<Rect> {
        let columns = self.columns();
        let width = bounds.width().round() as i32;
        let mut widths = vec![(width as f32 / columns as f32).round() as i32; columns];
        distribute_error(&mut widths, width.max(0));

        let mut x = bounds.min.x;
        widths
            .into_iter()
            .map(|w| {
                let rect = Rect::from_min_max(pos2(x, bounds.min.y), pos2(x + w as f32, bounds.max.y));
                x += w as f32;
                rect
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_columns_resizes() {
        let mut strip = SequencerStrip::new(3);
        assert!(!strip.set_columns(3));
        assert!(!strip.set_columns(0));
        assert!(strip.set_columns(5));
        assert_eq!(strip.columns(), 5);
        assert!(strip.set_columns(2));
        assert_eq!(strip.cells().len(), 2);
    }

    #[test]
    fn rects_cover_the_bounds() {
        let strip = SequencerStrip::new(3);
        let bounds = Rect::from_min_max(pos2(10.0, 0.0), pos2(110.0, 20.0));
        let rects = strip.cell_rects(bounds);
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0].min.x, 10.0);
        assert_eq!(rects[2].max.x, 110.0);
        assert!(rects.windows(2).all(|pair| pair[0].max.x == pair[1].min.x));
    }
}
