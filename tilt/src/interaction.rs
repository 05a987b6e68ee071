//! Pointer state machine of the sequencer panel.
//!
//! In paint mode a press toggles a cell and a drag paints the same state over
//! every cell it enters, unless the press lands on the open edge of a note:
//! then the drag moves that edge. In selection mode presses and drags only
//! collect cells into the selection.

use egui::{pos2, Pos2};

use crate::cell::CellState;
use crate::error::PatternError;
use crate::layout::{rect_contains, GridLayout};
use crate::pattern::{span, CellCoord, Pattern, Span};
use crate::repaint::{Repaint, RepaintQueue};
use crate::snapshot::RowSnapshot;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SequencerMode {
    #[default]
    Paint,
    Selection,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MouseCursor {
    #[default]
    Normal,
    LeftRightResize,
}

/// Which border of a note is being dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragEdge {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug)]
enum ExitHook {
    LeavePaint,
    LeaveSelection,
}

#[derive(Clone, Copy, Debug)]
enum EnterHook {
    EnterPaint,
    EnterSelection,
}

const MODE_TRANSITIONS: [(SequencerMode, SequencerMode, ExitHook, EnterHook); 2] = [
    (SequencerMode::Paint, SequencerMode::Selection, ExitHook::LeavePaint, EnterHook::EnterSelection),
    (SequencerMode::Selection, SequencerMode::Paint, ExitHook::LeaveSelection, EnterHook::EnterPaint),
];

fn mode_transition(from: SequencerMode, to: SequencerMode) -> Option<(ExitHook, EnterHook)> {
    MODE_TRANSITIONS
        .iter()
        .find(|(f, t, _, _)| *f == from && *t == to)
        .map(|&(_, _, exit, enter)| (exit, enter))
}

/// Borrowed view of what the controller works on.
pub struct Canvas<'a> {
    pub pattern: &'a mut Pattern,
    pub layout: &'a GridLayout,
    pub repaints: &'a mut RepaintQueue,
}

impl Canvas<'_> {
    pub fn cell_at(&self, pos: Pos2) -> Option<CellCoord> {
        let (slot, column) = self.layout.hit(pos)?;
        let row = self.pattern.row_for_slot(slot)?;
        Some(CellCoord::new(row, column))
    }

    fn slot_of(&self, coord: CellCoord) -> Option<usize> {
        self.pattern.slot_for_row(coord.row)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct MouseDown {
    coord: CellCoord,
    pos: Pos2,
}

#[derive(Debug, Default)]
pub struct Interaction {
    mode: SequencerMode,
    last_state_change: CellState,
    last_over: Option<CellCoord>,
    mouse_down: Option<MouseDown>,
    drag_edge: Option<DragEdge>,
    row_snapshot: Option<RowSnapshot>,
    selected: Vec<CellCoord>,
    cursor: MouseCursor,
}

impl Interaction {
    /// Fresh controller state for a copied panel; only the mode and the
    /// paint state carry over.
    pub fn carried_over(&self) -> Self {
        Self {
            mode: self.mode,
            last_state_change: self.last_state_change,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> SequencerMode {
        self.mode
    }

    pub fn cursor(&self) -> MouseCursor {
        self.cursor
    }

    pub fn last_state_change(&self) -> CellState {
        self.last_state_change
    }

    pub fn hovered(&self) -> Option<CellCoord> {
        self.last_over
    }

    pub fn selected(&self) -> &[CellCoord] {
        &self.selected
    }

    pub fn drag_edge(&self) -> Option<DragEdge> {
        self.drag_edge
    }

    pub fn is_dragging_edge(&self) -> bool {
        self.drag_edge.is_some()
    }

    pub fn mouse_down_position(&self) -> Option<Pos2> {
        self.mouse_down.map(|down| down.pos)
    }

    pub fn set_mode(&mut self, canvas: &mut Canvas<'_>, mode: SequencerMode) {
        let Some((exit, enter)) = mode_transition(self.mode, mode) else {
            return;
        };
        match exit {
            ExitHook::LeavePaint => {
                self.reset_gesture();
                self.exit_hover(canvas);
                self.last_state_change = CellState::Off;
            }
            ExitHook::LeaveSelection => self.clear_selection(canvas),
        }
        match enter {
            EnterHook::EnterPaint => tracing::trace!("entering paint mode"),
            EnterHook::EnterSelection => tracing::trace!("entering selection mode"),
        }
        tracing::debug!(from = ?self.mode, to = ?mode, "sequencer mode switched");
        self.mode = mode;
        canvas.repaints.push(Repaint::All);
    }

    /// Ends any press or edge drag in progress.
    pub fn reset_gesture(&mut self) {
        if self.drag_edge.is_some() {
            tracing::trace!("edge drag cancelled");
        }
        self.mouse_down = None;
        self.drag_edge = None;
        self.row_snapshot = None;
        self.cursor = MouseCursor::Normal;
    }

    /// Drops every cell reference before the pattern changes shape, while
    /// the referenced coordinates still exist.
    pub fn invalidate_references(&mut self, canvas: &mut Canvas<'_>) {
        self.reset_gesture();
        self.exit_hover(canvas);
        self.clear_selection(canvas);
    }

    // ── Hover and selection ───────────────────────────────────

    fn set_hover(&mut self, canvas: &mut Canvas<'_>, coord: CellCoord) {
        if self.last_over == Some(coord) {
            return;
        }
        self.exit_hover(canvas);
        if let Some(cell) = canvas.pattern.cell_mut(coord) {
            cell.set_hovered(true);
            canvas.repaints.push(Repaint::Cell(coord));
            self.last_over = Some(coord);
        }
    }

    pub fn exit_hover(&mut self, canvas: &mut Canvas<'_>) {
        if let Some(coord) = self.last_over.take() {
            if let Some(cell) = canvas.pattern.cell_mut(coord) {
                cell.set_hovered(false);
            }
            canvas.repaints.push(Repaint::Cell(coord));
        }
    }

    fn select(&mut self, canvas: &mut Canvas<'_>, coord: CellCoord) {
        if self.selected.contains(&coord) {
            return;
        }
        if let Some(cell) = canvas.pattern.cell_mut(coord) {
            cell.set_selected(true);
            self.selected.push(coord);
            canvas.repaints.push(Repaint::Cell(coord));
        }
    }

    pub fn clear_selection(&mut self, canvas: &mut Canvas<'_>) {
        for coord in self.selected.drain(..) {
            if let Some(cell) = canvas.pattern.cell_mut(coord) {
                cell.set_selected(false);
            }
            canvas.repaints.push(Repaint::Cell(coord));
        }
    }

    /// The open edge of an on cell under `pos`, if any. The left edge wins
    /// when both grab areas overlap.
    fn draggable_edge(canvas: &Canvas<'_>, coord: CellCoord, pos: Pos2) -> Option<DragEdge> {
        let cell = canvas.pattern.cell(coord)?;
        if !cell.is_on() {
            return None;
        }
        let slot = canvas.slot_of(coord)?;
        let on_edge = |rect: Option<egui::Rect>| rect.is_some_and(|rect| rect_contains(rect, pos));
        if !cell.is_left_connected() && on_edge(canvas.layout.left_edge_rect(slot, coord.column)) {
            Some(DragEdge::Left)
        } else if !cell.is_right_connected()
            && on_edge(canvas.layout.right_edge_rect(slot, coord.column))
        {
            Some(DragEdge::Right)
        } else {
            None
        }
    }

    // ── Pointer events ────────────────────────────────────────

    pub fn mouse_down(&mut self, canvas: &mut Canvas<'_>, pos: Pos2) {
        let Some(coord) = canvas.cell_at(pos) else {
            return;
        };
        self.mouse_down = Some(MouseDown { coord, pos });

        if self.mode == SequencerMode::Selection {
            self.clear_selection(canvas);
            self.select(canvas, coord);
            self.set_hover(canvas, coord);
            return;
        }

        if let Some(edge) = Self::draggable_edge(canvas, coord, pos) {
            self.row_snapshot = canvas.pattern.snapshot_row(coord.row);
            self.drag_edge = Some(edge);
            self.cursor = MouseCursor::LeftRightResize;
            tracing::trace!(row = coord.row, column = coord.column, ?edge, "edge drag started");
        } else if let Some(state) = canvas.pattern.toggle_cell(coord) {
            self.last_state_change = state;
            canvas
                .repaints
                .push(Repaint::neighbourhood(coord, canvas.pattern.columns_size()));
        }
        self.set_hover(canvas, coord);
    }

    pub fn mouse_drag(&mut self, canvas: &mut Canvas<'_>, pos: Pos2) {
        let Some(down) = self.mouse_down else {
            return;
        };
        // an edge drag stays on its row and wraps around horizontally
        let pos = if self.drag_edge.is_some() {
            pos2(pos.x.rem_euclid(canvas.layout.width()), down.pos.y)
        } else {
            pos
        };
        let Some(coord) = canvas.cell_at(pos) else {
            self.exit_hover(canvas);
            return;
        };

        if self.mode == SequencerMode::Selection {
            self.select(canvas, coord);
        } else if let Some(edge) = self.drag_edge {
            if let Err(err) = self.drag_edge_step(canvas, edge, down.coord, coord.column, pos.x) {
                tracing::warn!(%err, "edge drag step skipped");
            }
        } else if self.last_over != Some(coord) {
            canvas.pattern.set_cell_state(coord, self.last_state_change);
            canvas
                .repaints
                .push(Repaint::neighbourhood(coord, canvas.pattern.columns_size()));
        }
        self.set_hover(canvas, coord);
    }

    /// Moves the dragged edge to the column boundary nearest `x`, which lies
    /// in `column` of the dragged row.
    fn drag_edge_step(
        &self,
        canvas: &mut Canvas<'_>,
        edge: DragEdge,
        down: CellCoord,
        column: usize,
        x: f32,
    ) -> Result<(), PatternError> {
        let Some(snapshot) = self.row_snapshot.as_ref() else {
            return Ok(());
        };
        let Some(midpoint) = canvas.layout.column_midpoint(column) else {
            return Ok(());
        };
        let row = down.row;
        let columns = canvas.pattern.columns_size();
        let pattern = &mut *canvas.pattern;

        let repaint = match edge {
            DragEdge::Left => {
                let right = snapshot.right_bound(down.column)?;
                let last = span::left_column(right, 1, columns);
                let live_left = pattern.left_bound(CellCoord::new(row, last))?;
                let new_left = if x < midpoint { column } else { span::right_column(column, 1, columns) };

                if new_left == right {
                    if x >= midpoint {
                        pattern.collapse_to_cell(row, snapshot, last)?;
                    } else {
                        pattern.connect_whole_row(row);
                        pattern.clear_boundary(row, right);
                    }
                    Repaint::Row(row)
                } else {
                    pattern.set_span_left_bound(row, snapshot, right, new_left)?;
                    let reach = Span::new(live_left, right)
                        .len(columns)
                        .max(Span::new(new_left, right).len(columns));
                    if reach + 1 >= columns {
                        Repaint::Row(row)
                    } else {
                        let span = Span::new(span::left_column(right, reach + 1, columns), right);
                        Repaint::Region { row, span }
                    }
                }
            }
            DragEdge::Right => {
                let left = snapshot.left_bound(down.column)?;
                let live_right = pattern.right_bound(CellCoord::new(row, left))?;
                let new_right = if x > midpoint { span::right_column(column, 1, columns) } else { column };

                if new_right == left {
                    if x <= midpoint {
                        pattern.collapse_to_cell(row, snapshot, left)?;
                    } else {
                        pattern.connect_whole_row(row);
                        pattern.clear_boundary(row, left);
                    }
                    Repaint::Row(row)
                } else {
                    pattern.set_span_right_bound(row, snapshot, left, new_right)?;
                    let reach = Span::new(left, live_right)
                        .len(columns)
                        .max(Span::new(left, new_right).len(columns));
                    if reach + 1 >= columns {
                        Repaint::Row(row)
                    } else {
                        let span = Span::new(left, span::right_column(left, reach + 1, columns));
                        Repaint::Region { row, span }
                    }
                }
            }
        };
        canvas.repaints.push(repaint);
        Ok(())
    }

    pub fn mouse_up(&mut self, canvas: &mut Canvas<'_>, pos: Pos2) {
        let row = self.mouse_down.map(|down| down.coord.row);
        if self.drag_edge.is_some() {
            tracing::trace!(?row, "edge drag finished");
        }
        self.reset_gesture();
        self.mouse_move(canvas, pos);

        if let Some(row) = row {
            if !canvas.pattern.row_is_valid(row) {
                tracing::warn!(row, "row left in an invalid state after gesture");
            }
        }
    }

    pub fn mouse_move(&mut self, canvas: &mut Canvas<'_>, pos: Pos2) {
        if self.drag_edge.is_some() {
            self.cursor = MouseCursor::LeftRightResize;
            return;
        }
        let Some(coord) = canvas.cell_at(pos) else {
            self.cursor = MouseCursor::Normal;
            self.exit_hover(canvas);
            return;
        };

        let on_edge = self.mode == SequencerMode::Paint
            && Self::draggable_edge(canvas, coord, pos).is_some();
        self.cursor = if on_edge { MouseCursor::LeftRightResize } else { MouseCursor::Normal };
        self.set_hover(canvas, coord);
    }

    pub fn mouse_exit(&mut self, canvas: &mut Canvas<'_>) {
        self.exit_hover(canvas);
    }
}
