use crate::pattern::{span, CellCoord, Span};

/// Part of the panel that needs painting again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repaint {
    Cell(CellCoord),
    /// Columns of `span` in one row.
    Region { row: usize, span: Span },
    Row(usize),
    All,
}

impl Repaint {
    /// A cell together with both neighbours, whose connection edges change
    /// whenever the cell does.
    pub fn neighbourhood(coord: CellCoord, columns: usize) -> Self {
        if columns < 4 {
            return Repaint::Row(coord.row);
        }
        Repaint::Region {
            row: coord.row,
            span: Span::new(
                span::left_column(coord.column, 1, columns),
                span::right_column(coord.column, 2, columns),
            ),
        }
    }
}

/// Requests collected between two frames.
#[derive(Debug, Default)]
pub struct RepaintQueue {
    pending: Vec<Repaint>,
}

impl RepaintQueue {
    pub fn push(&mut self, repaint: Repaint) {
        if self.pending.contains(&Repaint::All) || self.pending.contains(&repaint) {
            return;
        }
        if repaint == Repaint::All {
            self.pending.clear();
        }
        self.pending.push(repaint);
    }

    pub fn pending(&self) -> &[Repaint] {
        &self.pending
    }

    pub fn take(&mut self) -> Vec<Repaint> {
        std::mem::take(&mut self.pending)
    }
}
