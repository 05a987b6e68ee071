use crate::cell::Cell;
use crate::error::PatternError;
use crate::pattern::span::{self, Span};

/// Frozen copy of one pattern row, taken when an edge drag starts.
///
/// Span bounds looked up here stay stable while the live row is rewritten
/// on every drag step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowSnapshot {
    row: usize,
    cells: Vec<Cell>,
}

impl RowSnapshot {
    pub fn capture(row: usize, cells: &[Cell]) -> Self {
        Self {
            row,
            cells: cells.iter().map(Cell::settled).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }

    pub fn left_bound(&self, column: usize) -> Result<usize, PatternError> {
        span::left_bound(&self.cells, self.row, column)
    }

    pub fn right_bound(&self, column: usize) -> Result<usize, PatternError> {
        span::right_bound(&self.cells, self.row, column)
    }

    pub fn span_at(&self, column: usize) -> Result<Span, PatternError> {
        span::span_at(&self.cells, self.row, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_drops_presentation_flags() {
        let mut cells = vec![Cell::on(), Cell::default()];
        cells[0].set_hovered(true).set_selected(true);
        let snapshot = RowSnapshot::capture(4, &cells);
        assert_eq!(snapshot.len(), 2);
        let cell = snapshot.cell(0).unwrap();
        assert!(cell.is_on());
        assert!(!cell.is_hovered());
        assert!(!cell.is_selected());
    }

    #[test]
    fn bounds_ignore_later_live_edits() {
        let mut cells = vec![Cell::default(); 5];
        cells[1] = Cell::on();
        cells[1].set_right_connected(true);
        cells[2] = Cell::on();
        cells[2].set_left_connected(true);
        let snapshot = RowSnapshot::capture(0, &cells);

        cells[2].turn_off();
        cells[1].set_right_connected(false);

        assert_eq!(snapshot.span_at(2), Ok(Span::new(1, 3)));
        assert!(snapshot.cell(5).is_none());
    }
}
