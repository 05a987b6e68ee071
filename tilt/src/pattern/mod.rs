//! The note grid: one row per MIDI pitch, a repeating column layout, and the
//! window of rows currently on screen.

mod columns;
mod resize;
pub mod span;

pub use columns::{distribute_error, start_positions_are_valid};
pub use span::Span;

use crate::cell::{Cell, CellState};
use crate::error::PatternError;
use crate::snapshot::RowSnapshot;

pub const MIDI_PITCHES: usize = 128;

/// Middle C sits at the bottom of the window by default.
pub const DEFAULT_REFERENCE_ROW: usize = 60;

/// Absolute position of a cell: pitch row and column across all repeats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub row: usize,
    pub column: usize,
}

impl CellCoord {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

#[derive(Debug)]
pub struct Pattern {
    rows: Vec<Vec<Cell>>,
    /// Start of each base column inside one repeat, ascending in [0, 1).
    start_positions: Vec<f32>,
    repeats: usize,
    reference_row: usize,
    visible_rows: usize,
    /// Absolute row shown in each visible slot, top slot first.
    visible_slots: Vec<usize>,
}

impl Default for Pattern {
    fn default() -> Self {
        Self::new(8)
    }
}

/// Copies carry state and connections only; hover and selection start clean.
impl Clone for Pattern {
    fn clone(&self) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(Cell::settled).collect())
                .collect(),
            start_positions: self.start_positions.clone(),
            repeats: self.repeats,
            reference_row: self.reference_row,
            visible_rows: self.visible_rows,
            visible_slots: self.visible_slots.clone(),
        }
    }
}

impl Pattern {
    pub fn new(visible_rows: usize) -> Self {
        Self::with_rows(MIDI_PITCHES, DEFAULT_REFERENCE_ROW, visible_rows)
    }

    /// A single-column pattern. The window is clamped to fit above
    /// `reference_row`.
    pub fn with_rows(row_count: usize, reference_row: usize, visible_rows: usize) -> Self {
        assert!(row_count > 0, "a pattern needs at least one row");
        assert!(
            reference_row < row_count,
            "reference row {reference_row} outside 0..{row_count}"
        );
        let visible_rows = visible_rows.clamp(1, row_count - reference_row);

        let mut pattern = Self {
            rows: vec![vec![Cell::default()]; row_count],
            start_positions: vec![0.0],
            repeats: 1,
            reference_row,
            visible_rows,
            visible_slots: Vec::new(),
        };
        pattern.rebuild_visible_slots();
        pattern
    }

    pub fn rows_size(&self) -> usize {
        self.rows.len()
    }

    pub fn columns_size(&self) -> usize {
        self.start_positions.len() * self.repeats
    }

    pub fn base_columns_size(&self) -> usize {
        self.start_positions.len()
    }

    pub fn repeats(&self) -> usize {
        self.repeats
    }

    pub fn start_positions(&self) -> &[f32] {
        &self.start_positions
    }

    /// Lowest visible row (inclusive).
    pub fn reference_row(&self) -> usize {
        self.reference_row
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// Highest visible row (inclusive).
    pub fn visible_rows_max(&self) -> usize {
        self.reference_row + self.visible_rows - 1
    }

    pub fn visible_slots(&self) -> &[usize] {
        &self.visible_slots
    }

    pub fn is_row_visible(&self, row: usize) -> bool {
        row >= self.reference_row && row <= self.visible_rows_max()
    }

    /// Absolute row drawn in visible slot `slot` (slot 0 is the top).
    pub fn row_for_slot(&self, slot: usize) -> Option<usize> {
        self.visible_slots.get(slot).copied()
    }

    pub fn slot_for_row(&self, row: usize) -> Option<usize> {
        self.is_row_visible(row).then(|| self.visible_rows_max() - row)
    }

    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.rows.get(coord.row)?.get(coord.column)
    }

    pub fn cell_mut(&mut self, coord: CellCoord) -> Option<&mut Cell> {
        self.rows.get_mut(coord.row)?.get_mut(coord.column)
    }

    pub fn left_column(&self, column: usize, steps: usize) -> usize {
        span::left_column(column, steps, self.columns_size())
    }

    pub fn right_column(&self, column: usize, steps: usize) -> usize {
        span::right_column(column, steps, self.columns_size())
    }

    fn rebuild_visible_slots(&mut self) {
        let top = self.visible_rows_max();
        self.visible_slots = (0..self.visible_rows).map(|slot| top - slot).collect();
    }

    // ── Visible window ────────────────────────────────────────

    /// Resizes the window upwards from the reference row. Returns false when
    /// the request is out of range or changes nothing.
    pub fn set_visible_rows(&mut self, visible_rows: usize) -> bool {
        if visible_rows < 1
            || self.reference_row + visible_rows - 1 >= self.rows_size()
            || visible_rows == self.visible_rows
        {
            tracing::debug!(visible_rows, current = self.visible_rows, "visible rows unchanged");
            return false;
        }
        self.visible_rows = visible_rows;
        self.rebuild_visible_slots();
        tracing::debug!(visible_rows, reference_row = self.reference_row, "visible rows set");
        true
    }

    /// Moves the window by `delta` rows, shortening the move at either end of
    /// the pitch range. Returns the shift actually applied.
    pub fn shift_visible_rows(&mut self, delta: isize) -> isize {
        let lowest = -(self.reference_row as isize);
        let highest = (self.rows_size() - 1 - self.visible_rows_max()) as isize;
        let delta = delta.clamp(lowest, highest);
        if delta == 0 {
            return 0;
        }

        for slot in &mut self.visible_slots {
            *slot = (*slot as isize + delta) as usize;
        }
        self.reference_row = (self.reference_row as isize + delta) as usize;
        tracing::debug!(delta, reference_row = self.reference_row, "visible rows shifted");
        delta
    }

    // ── Column structure ──────────────────────────────────────

    /// Tiles the base layout `repeats` times. Returns false for `repeats < 1`
    /// or no change.
    pub fn set_repeats(&mut self, repeats: usize) -> bool {
        if repeats < 1 || repeats == self.repeats {
            tracing::debug!(repeats, current = self.repeats, "repeats unchanged");
            return false;
        }

        let columns = self.start_positions.len() * repeats;
        for row in &mut self.rows {
            if repeats < self.repeats {
                row.truncate(columns);
            }
            // the old wrap-around neighbours are no longer adjacent
            if let Some(first) = row.first_mut() {
                first.set_left_connected(false);
            }
            if let Some(last) = row.last_mut() {
                last.set_right_connected(false);
            }
            row.resize(columns, Cell::default());
        }

        tracing::debug!(from = self.repeats, to = repeats, columns, "repeats set");
        self.repeats = repeats;
        true
    }

    /// Inserts a column at `start_position` in every repeat and returns its
    /// base index.
    ///
    /// # Panics
    ///
    /// If `start_position` is not strictly inside `(0, repeats)` or its
    /// fractional part coincides with an existing column start.
    pub fn insert_column(&mut self, start_position: f32) -> usize {
        assert!(
            start_position > 0.0 && start_position < self.repeats as f32,
            "start position {start_position} outside (0, {})",
            self.repeats
        );
        // every repeat shares the layout of the first
        let position = start_position.fract();
        let index = self.insertion_index(position).unwrap_or_else(|| {
            panic!("start position {start_position} coincides with an existing column start")
        });

        let new_base = self.base_columns_size() + 1;
        for row in &mut self.rows {
            for repeat in 0..self.repeats {
                insert_cell(row, index + repeat * new_base);
            }
        }
        self.start_positions.insert(index, position);

        tracing::debug!(position, index, columns = self.columns_size(), "column inserted");
        index
    }

    /// Base index a start position inside [0, 1) would take.
    fn insertion_index(&self, position: f32) -> Option<usize> {
        let base = self.base_columns_size();
        (1..=base).find(|&index| {
            let previous = self.start_positions[index - 1];
            let next = self.start_positions.get(index).copied().unwrap_or(1.0);
            position > previous && position < next
        })
    }

    /// Removes column `index` and its counterparts in every other repeat.
    ///
    /// # Panics
    ///
    /// If `index` is outside `(0, columns_size())` or names a first base column.
    pub fn remove_column(&mut self, index: usize) {
        let columns = self.columns_size();
        let base = self.base_columns_size();
        assert!(index > 0 && index < columns, "column {index} outside (0, {columns})");
        assert!(index % base != 0, "column {index} is a first base column");

        let base_index = index % base;
        let new_base = base - 1;
        for row in &mut self.rows {
            for repeat in 0..self.repeats {
                remove_cell(row, base_index + repeat * new_base);
            }
        }
        self.start_positions.remove(base_index);

        tracing::debug!(index, base_index, columns = self.columns_size(), "column removed");
    }

    /// Replaces every start position but the fixed leading 0.
    ///
    /// # Panics
    ///
    /// If `positions` does not hold `base_columns_size() - 1` strictly
    /// ascending values inside (0, 1).
    pub fn shift_start_positions(&mut self, positions: &[f32]) {
        assert_eq!(
            positions.len(),
            self.base_columns_size() - 1,
            "expected {} start positions",
            self.base_columns_size() - 1
        );
        assert!(
            start_positions_are_valid(positions),
            "start positions {positions:?} must ascend strictly inside (0, 1)"
        );
        self.start_positions.truncate(1);
        self.start_positions.extend_from_slice(positions);
        tracing::debug!(?positions, "start positions shifted");
    }

    // ── Cell state ────────────────────────────────────────────

    /// Sets a cell's state. Turning it off also breaks the connections on
    /// both sides, neighbour included.
    pub fn set_cell_state(&mut self, coord: CellCoord, state: CellState) {
        let columns = self.columns_size();
        let Some(row) = self.rows.get_mut(coord.row) else {
            return;
        };
        let Some(cell) = row.get_mut(coord.column) else {
            return;
        };
        cell.set_state(state);
        if state == CellState::On {
            return;
        }

        if cell.is_left_connected() {
            cell.set_left_connected(false);
            row[span::left_column(coord.column, 1, columns)].set_right_connected(false);
        }
        let cell = &mut row[coord.column];
        if cell.is_right_connected() {
            cell.set_right_connected(false);
            row[span::right_column(coord.column, 1, columns)].set_left_connected(false);
        }
    }

    /// Flips a cell and returns its new state.
    pub fn toggle_cell(&mut self, coord: CellCoord) -> Option<CellState> {
        let state = self.cell(coord)?.state().toggled();
        self.set_cell_state(coord, state);
        Some(state)
    }

    // ── Greater cells ─────────────────────────────────────────

    pub fn left_bound(&self, coord: CellCoord) -> Result<usize, PatternError> {
        span::left_bound(self.row_cells(coord.row), coord.row, coord.column)
    }

    pub fn right_bound(&self, coord: CellCoord) -> Result<usize, PatternError> {
        span::right_bound(self.row_cells(coord.row), coord.row, coord.column)
    }

    pub fn span_at(&self, coord: CellCoord) -> Result<Span, PatternError> {
        span::span_at(self.row_cells(coord.row), coord.row, coord.column)
    }

    fn row_cells(&self, row: usize) -> &[Cell] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn row_is_valid(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|cells| span::row_is_valid(cells, row))
    }

    pub fn is_valid(&self) -> bool {
        (0..self.rows_size()).all(|row| self.row_is_valid(row))
    }

    pub fn snapshot_row(&self, row: usize) -> Option<RowSnapshot> {
        self.rows.get(row).map(|cells| RowSnapshot::capture(row, cells))
    }
}

/// Inserts an off cell at `column` (never 0), extending the note on its left
/// through it when there is one.
fn insert_cell(row: &mut Vec<Cell>, column: usize) {
    let left = &mut row[column - 1];
    let mut inserted = Cell::default();
    if left.is_on() {
        inserted
            .set_state(CellState::On)
            .set_left_connected(true)
            .set_right_connected(left.is_right_connected());
        left.set_right_connected(true);
    }
    row.insert(column, inserted);
}

/// Removes the cell at `column`; the cells that become neighbours are left
/// unconnected to each other.
fn remove_cell(row: &mut Vec<Cell>, column: usize) {
    row.remove(column);
    let columns = row.len();
    if columns == 0 {
        return;
    }
    let right = column % columns;
    let left = span::left_column(right, 1, columns);
    row[left].set_right_connected(false);
    row[right].set_left_connected(false);
}
