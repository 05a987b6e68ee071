//! Row rewrites used while a greater cell's edge is dragged. Each one starts
//! from the row snapshot taken at mouse-down so a drag step never depends on
//! the steps before it.

use super::span::{self, Span};
use super::Pattern;
use crate::cell::{Cell, CellState};
use crate::error::PatternError;
use crate::snapshot::RowSnapshot;

impl Pattern {
    fn row_mut(&mut self, row: usize) -> &mut [Cell] {
        self.rows.get_mut(row).map(Vec::as_mut_slice).unwrap_or_default()
    }

    /// Turns `row` into one note connected all the way round. Span lookups on
    /// the row fail until [`Pattern::clear_boundary`] opens it somewhere.
    pub fn connect_whole_row(&mut self, row: usize) {
        for cell in self.row_mut(row) {
            cell.set_state(CellState::On)
                .set_left_connected(true)
                .set_right_connected(true);
        }
    }

    /// Breaks the connection between `start` and its left neighbour.
    pub fn clear_boundary(&mut self, row: usize, start: usize) {
        let cells = self.row_mut(row);
        let columns = cells.len();
        if start >= columns {
            return;
        }
        cells[start].set_left_connected(false);
        cells[span::left_column(start, 1, columns)].set_right_connected(false);
    }

    /// Rewrites `row` so the note ending at `right` (exclusive) starts at
    /// `new_left`. Cells of the original note left outside are turned off,
    /// notes the new span runs into are cut.
    pub fn set_span_left_bound(
        &mut self,
        row: usize,
        snapshot: &RowSnapshot,
        right: usize,
        new_left: usize,
    ) -> Result<(), PatternError> {
        let columns = snapshot.len();
        let last = span::left_column(right, 1, columns);
        let original = snapshot.span_at(last)?;
        let outside_left = span::left_column(new_left, 1, columns);
        self.rewrite_span(row, snapshot, original, Span::new(new_left, right), |column, cell| {
            if column == outside_left {
                cell.set_right_connected(false);
            }
        });
        Ok(())
    }

    /// Rewrites `row` so the note starting at `left` ends at `new_right`
    /// (exclusive).
    pub fn set_span_right_bound(
        &mut self,
        row: usize,
        snapshot: &RowSnapshot,
        left: usize,
        new_right: usize,
    ) -> Result<(), PatternError> {
        let original = snapshot.span_at(left)?;
        self.rewrite_span(row, snapshot, original, Span::new(left, new_right), |column, cell| {
            if column == new_right {
                cell.set_left_connected(false);
            }
        });
        Ok(())
    }

    /// Shrinks the snapshot note containing `column` down to that one cell.
    pub fn collapse_to_cell(
        &mut self,
        row: usize,
        snapshot: &RowSnapshot,
        column: usize,
    ) -> Result<(), PatternError> {
        let columns = snapshot.len();
        let original = snapshot.span_at(column)?;
        let right = span::right_column(column, 1, columns);
        let outside_left = span::left_column(column, 1, columns);
        self.rewrite_span(row, snapshot, original, Span::new(column, right), |index, cell| {
            if index == outside_left {
                cell.set_right_connected(false);
            }
            if index == right {
                cell.set_left_connected(false);
            }
        });
        Ok(())
    }

    /// Writes `target` as one note, turns off what is left of `original`
    /// and restores everything else from `snapshot`, letting `trim` cut the
    /// restored cells that touch the new note.
    fn rewrite_span(
        &mut self,
        row: usize,
        snapshot: &RowSnapshot,
        original: Span,
        target: Span,
        trim: impl Fn(usize, &mut Cell),
    ) {
        let columns = snapshot.len();
        let last = span::left_column(target.right, 1, columns);
        let whole = target.len(columns) == columns;
        for (column, cell) in self.row_mut(row).iter_mut().enumerate() {
            if whole || target.contains(column) {
                cell.set_state(CellState::On)
                    .set_left_connected(column != target.left)
                    .set_right_connected(column != last);
            } else if original.contains(column) {
                cell.turn_off();
            } else if let Some(saved) = snapshot.cell(column) {
                cell.assign(saved);
                trim(column, cell);
            }
        }
    }
}
