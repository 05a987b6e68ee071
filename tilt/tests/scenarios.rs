use egui::{pos2, vec2};
use tilt::{CellCoord, CellState, MouseCursor, Pattern, SequencerMode, SequencerPanel, Span};

/// 4 columns of 100 px and 8 rows of 50 px; row 60 is the bottom slot.
fn panel() -> SequencerPanel {
    let mut panel = SequencerPanel::new(8);
    for position in [0.25, 0.5, 0.75] {
        panel.insert_column(position);
    }
    panel.resized(vec2(400.0, 400.0));
    panel
}

const ROW: usize = 60;
const ROW_Y: f32 = 375.0;

fn click(panel: &mut SequencerPanel, x: f32) {
    panel.mouse_down(pos2(x, ROW_Y));
    panel.mouse_up(pos2(x, ROW_Y));
}

fn cell(panel: &SequencerPanel, column: usize) -> tilt::Cell {
    *panel.pattern().cell(CellCoord::new(ROW, column)).unwrap()
}

#[test]
fn insert_then_remove_restores_one_column() {
    let mut pattern = Pattern::default();
    assert_eq!(pattern.start_positions(), &[0.0]);

    pattern.insert_column(0.5);
    assert_eq!(pattern.start_positions(), &[0.0, 0.5]);
    assert_eq!(pattern.columns_size(), 2);

    pattern.remove_column(1);
    assert_eq!(pattern.start_positions(), &[0.0]);
    assert_eq!(pattern.columns_size(), 1);
}

#[test]
fn toggling_off_clears_the_neighbours_connection() {
    let mut pattern = Pattern::default();
    for position in [0.25, 0.5, 0.75] {
        pattern.insert_column(position);
    }
    let left = CellCoord::new(ROW, 2);
    let right = CellCoord::new(ROW, 3);
    pattern.cell_mut(left).unwrap().set_state(CellState::On).set_right_connected(true);
    pattern.cell_mut(right).unwrap().set_state(CellState::On).set_left_connected(true);
    assert!(pattern.row_is_valid(ROW));

    assert_eq!(pattern.toggle_cell(left), Some(CellState::Off));

    let cell = pattern.cell(right).unwrap();
    assert!(!cell.is_left_connected());
    assert_eq!(cell.state(), CellState::On);
    assert!(pattern.row_is_valid(ROW));
}

#[test]
fn shifting_the_window_clamps_at_the_top() {
    let mut pattern = Pattern::default();
    assert_eq!(pattern.shift_visible_rows(5), 5);
    assert_eq!(pattern.reference_row(), 65);

    assert_eq!(pattern.shift_visible_rows(60), 55);
    assert_eq!(pattern.reference_row(), 120);
    assert_eq!(pattern.visible_rows_max(), 127);
}

#[test]
fn right_edge_drag_merges_then_splits() {
    let mut panel = panel();
    click(&mut panel, 150.0);
    click(&mut panel, 250.0);
    assert!(cell(&panel, 1).is_on() && cell(&panel, 2).is_on());

    panel.mouse_down(pos2(199.0, ROW_Y));
    assert_eq!(panel.cursor(), MouseCursor::LeftRightResize);

    panel.mouse_drag(pos2(260.0, ROW_Y));
    assert!(cell(&panel, 1).is_right_connected());
    assert!(cell(&panel, 2).is_left_connected());
    assert_eq!(panel.pattern().span_at(CellCoord::new(ROW, 2)), Ok(Span::new(1, 3)));

    panel.mouse_drag(pos2(240.0, ROW_Y));
    assert!(!cell(&panel, 1).is_right_connected());
    let restored = cell(&panel, 2);
    assert!(restored.is_on());
    assert!(!restored.is_left_connected() && !restored.is_right_connected());

    panel.mouse_up(pos2(240.0, ROW_Y));
    assert_eq!(panel.cursor(), MouseCursor::Normal);
    assert!(panel.pattern().row_is_valid(ROW));
}

#[test]
fn right_edge_drag_into_an_empty_cell() {
    let mut panel = panel();
    click(&mut panel, 150.0);

    panel.mouse_down(pos2(199.0, ROW_Y));
    panel.mouse_drag(pos2(251.0, ROW_Y));
    assert_eq!(panel.pattern().span_at(CellCoord::new(ROW, 1)), Ok(Span::new(1, 3)));

    panel.mouse_drag(pos2(249.0, ROW_Y));
    assert!(!cell(&panel, 2).is_on());
    assert_eq!(panel.pattern().span_at(CellCoord::new(ROW, 1)), Ok(Span::new(1, 2)));
    panel.mouse_up(pos2(249.0, ROW_Y));
}

#[test]
fn edge_drag_ignores_vertical_movement() {
    let mut panel = panel();
    click(&mut panel, 150.0);
    panel.mouse_down(pos2(199.0, ROW_Y));
    panel.mouse_drag(pos2(260.0, 25.0));
    panel.mouse_up(pos2(260.0, 25.0));

    assert!(cell(&panel, 2).is_on());
    assert!(!panel.pattern().cell(CellCoord::new(67, 2)).unwrap().is_on());
}

#[test]
fn releasing_outside_ends_the_gesture() {
    let mut panel = panel();
    click(&mut panel, 150.0);
    panel.mouse_down(pos2(199.0, ROW_Y));
    panel.mouse_drag(pos2(260.0, ROW_Y));
    panel.mouse_up(pos2(900.0, 900.0));

    assert!(!panel.is_dragging_edge());
    assert_eq!(panel.hovered(), None);
    panel.mouse_drag(pos2(350.0, ROW_Y));
    assert!(!cell(&panel, 3).is_on());
}

#[test]
fn selection_never_edits_notes() {
    let mut panel = panel();
    panel.set_mode(SequencerMode::Selection);
    panel.mouse_down(pos2(50.0, ROW_Y));
    panel.mouse_drag(pos2(150.0, ROW_Y));
    panel.mouse_drag(pos2(250.0, ROW_Y));
    panel.mouse_up(pos2(250.0, ROW_Y));

    assert_eq!(panel.selected().len(), 3);
    assert!((0..4).all(|column| !cell(&panel, column).is_on()));
}

#[test]
fn structural_changes_keep_notes_valid() {
    let mut panel = panel();
    click(&mut panel, 50.0);
    panel.mouse_down(pos2(99.0, ROW_Y));
    panel.mouse_drag(pos2(375.0, ROW_Y));
    panel.mouse_up(pos2(375.0, ROW_Y));
    assert_eq!(panel.pattern().span_at(CellCoord::new(ROW, 0)), Ok(Span::new(0, 0)));

    panel.set_repeats(2);
    assert!(panel.pattern().is_valid());
    panel.insert_column(1.1);
    assert!(panel.pattern().is_valid());
    panel.remove_column(2);
    assert!(panel.pattern().is_valid());
    panel.set_repeats(1);
    assert!(panel.pattern().is_valid());
}
