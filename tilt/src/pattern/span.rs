//! Greater cells: runs of connected cells inside one circular row.

use crate::cell::Cell;
use crate::error::PatternError;

/// Column bounds of a greater cell. `left` is inclusive, `right` exclusive,
/// both taken modulo the row length. `left == right` is a span covering the
/// whole row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub left: usize,
    pub right: usize,
}

impl Span {
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    pub fn is_full_row(&self) -> bool {
        self.left == self.right
    }

    pub fn contains(&self, column: usize) -> bool {
        if self.left < self.right {
            column >= self.left && column < self.right
        } else if self.left > self.right {
            column >= self.left || column < self.right
        } else {
            true
        }
    }

    /// Number of columns covered in a row of `columns` cells.
    pub fn len(&self, columns: usize) -> usize {
        match rightward_distance(self.left, self.right, columns) {
            0 => columns,
            distance => distance,
        }
    }
}

pub fn left_column(column: usize, steps: usize, columns: usize) -> usize {
    (column + columns - steps % columns) % columns
}

pub fn right_column(column: usize, steps: usize, columns: usize) -> usize {
    (column + steps) % columns
}

/// Steps needed to walk right from `origin` to `destination`.
pub fn rightward_distance(origin: usize, destination: usize, columns: usize) -> usize {
    (destination + columns - origin) % columns
}

fn check_column(cells: &[Cell], column: usize) -> Result<(), PatternError> {
    if column < cells.len() {
        Ok(())
    } else {
        Err(PatternError::ColumnOutOfRange { column, columns: cells.len() })
    }
}

/// Inclusive left bound of the greater cell containing `column`.
pub fn left_bound(cells: &[Cell], row: usize, column: usize) -> Result<usize, PatternError> {
    check_column(cells, column)?;
    let columns = cells.len();
    let mut current = column;
    for _ in 0..columns {
        if !cells[current].is_left_connected() {
            return Ok(current);
        }
        current = left_column(current, 1, columns);
    }
    Err(PatternError::UnterminatedSpan { row, column })
}

/// Exclusive right bound of the greater cell containing `column`.
pub fn right_bound(cells: &[Cell], row: usize, column: usize) -> Result<usize, PatternError> {
    check_column(cells, column)?;
    let columns = cells.len();
    let mut current = column;
    for _ in 0..columns {
        if !cells[current].is_right_connected() {
            return Ok(right_column(current, 1, columns));
        }
        current = right_column(current, 1, columns);
    }
    Err(PatternError::UnterminatedSpan { row, column })
}

pub fn span_at(cells: &[Cell], row: usize, column: usize) -> Result<Span, PatternError> {
    Ok(Span::new(left_bound(cells, row, column)?, right_bound(cells, row, column)?))
}

/// A row is valid when every connection is mirrored by the neighbour and off
/// cells carry no connections.
pub fn row_is_valid(cells: &[Cell], row: usize) -> bool {
    let columns = cells.len();
    for (column, cell) in cells.iter().enumerate() {
        if cell.is_on() {
            let left = &cells[left_column(column, 1, columns)];
            if cell.is_left_connected() && !left.is_right_connected() {
                tracing::debug!(row, column, "cell is left-connected but its neighbour is not");
                return false;
            }
            let right = &cells[right_column(column, 1, columns)];
            if cell.is_right_connected() && !right.is_left_connected() {
                tracing::debug!(row, column, "cell is right-connected but its neighbour is not");
                return false;
            }
        } else if cell.is_left_connected() || cell.is_right_connected() {
            tracing::debug!(row, column, "cell is off but connected");
            return false;
        }
    }
    true
}
