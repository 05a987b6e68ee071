use egui::{vec2, Pos2, Rect, Vec2};

use crate::cell::Cell;
use crate::config::EditorConfig;
use crate::interaction::{Canvas, Interaction, MouseCursor, SequencerMode};
use crate::layout::{GridLayout, DEFAULT_EDGE_WIDTH};
use crate::pattern::{CellCoord, Pattern, DEFAULT_REFERENCE_ROW, MIDI_PITCHES};
use crate::repaint::{Repaint, RepaintQueue};

/// The sequencer grid as a widget: pattern, geometry and pointer state.
///
/// Every structural change goes through this type so that cell references
/// held by the controller are dropped first and the layout is rebuilt after.
#[derive(Debug)]
pub struct SequencerPanel {
    pattern: Pattern,
    layout: GridLayout,
    interaction: Interaction,
    repaints: RepaintQueue,
    size: Vec2,
    edge_width: f32,
    enabled: bool,
    visible: bool,
    blocked: bool,
}

impl Default for SequencerPanel {
    fn default() -> Self {
        Self::new(8)
    }
}

/// Copies share cell state and connections but start with a fresh gesture.
impl Clone for SequencerPanel {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            layout: self.layout.clone(),
            interaction: self.interaction.carried_over(),
            repaints: RepaintQueue::default(),
            size: self.size,
            edge_width: self.edge_width,
            enabled: self.enabled,
            visible: self.visible,
            blocked: self.blocked,
        }
    }
}

impl SequencerPanel {
    pub fn new(visible_rows: usize) -> Self {
        Self::with_pattern(
            Pattern::with_rows(MIDI_PITCHES, DEFAULT_REFERENCE_ROW, visible_rows),
            DEFAULT_EDGE_WIDTH,
        )
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        let mut pattern = Pattern::with_rows(MIDI_PITCHES, config.reference_row, config.visible_rows);
        for &position in &config.start_positions {
            pattern.insert_column(position);
        }
        pattern.set_repeats(config.repeats);
        Self::with_pattern(pattern, config.edge_width)
    }

    fn with_pattern(pattern: Pattern, edge_width: f32) -> Self {
        let mut panel = Self {
            pattern,
            layout: GridLayout::default(),
            interaction: Interaction::default(),
            repaints: RepaintQueue::default(),
            size: Vec2::ZERO,
            edge_width,
            enabled: true,
            visible: true,
            blocked: false,
        };
        panel.relayout();
        panel
    }

    fn parts(&mut self) -> (&mut Interaction, Canvas<'_>) {
        (
            &mut self.interaction,
            Canvas {
                pattern: &mut self.pattern,
                layout: &self.layout,
                repaints: &mut self.repaints,
            },
        )
    }

    fn relayout(&mut self) {
        let widths = self.pattern.column_widths(self.size.x as i32);
        self.layout = GridLayout::new(&widths, self.pattern.visible_rows(), self.size, self.edge_width);
    }

    fn restructure<R>(&mut self, change: impl FnOnce(&mut Pattern) -> R) -> R {
        let (interaction, mut canvas) = self.parts();
        interaction.invalidate_references(&mut canvas);
        let result = change(&mut self.pattern);
        self.relayout();
        self.repaints.push(Repaint::All);
        result
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn mode(&self) -> SequencerMode {
        self.interaction.mode()
    }

    pub fn cursor(&self) -> MouseCursor {
        self.interaction.cursor()
    }

    pub fn selected(&self) -> &[CellCoord] {
        self.interaction.selected()
    }

    pub fn hovered(&self) -> Option<CellCoord> {
        self.interaction.hovered()
    }

    pub fn is_dragging_edge(&self) -> bool {
        self.interaction.is_dragging_edge()
    }

    pub fn column_widths(&self) -> Vec<i32> {
        self.pattern.column_widths(self.size.x as i32)
    }

    /// Every visible cell with its panel-local rectangle, top row first.
    pub fn visible_cells(&self) -> impl Iterator<Item = (CellCoord, Rect, &Cell)> + '_ {
        self.pattern
            .visible_slots()
            .iter()
            .enumerate()
            .flat_map(move |(slot, &row)| {
                (0..self.pattern.columns_size()).filter_map(move |column| {
                    let coord = CellCoord::new(row, column);
                    Some((coord, self.layout.cell_rect(slot, column)?, self.pattern.cell(coord)?))
                })
            })
    }

    pub fn take_repaints(&mut self) -> Vec<Repaint> {
        self.repaints.take()
    }

    // ── Structure ─────────────────────────────────────────────

    pub fn set_visible_rows(&mut self, visible_rows: usize) -> bool {
        self.restructure(|pattern| pattern.set_visible_rows(visible_rows))
    }

    pub fn shift_visible_rows(&mut self, delta: isize) -> isize {
        self.restructure(|pattern| pattern.shift_visible_rows(delta))
    }

    pub fn set_repeats(&mut self, repeats: usize) -> bool {
        self.restructure(|pattern| pattern.set_repeats(repeats))
    }

    pub fn insert_column(&mut self, start_position: f32) -> usize {
        self.restructure(|pattern| pattern.insert_column(start_position))
    }

    pub fn remove_column(&mut self, index: usize) {
        self.restructure(|pattern| pattern.remove_column(index));
    }

    pub fn shift_start_positions(&mut self, positions: &[f32]) {
        self.restructure(|pattern| pattern.shift_start_positions(positions));
    }

    pub fn set_mode(&mut self, mode: SequencerMode) {
        let (interaction, mut canvas) = self.parts();
        interaction.set_mode(&mut canvas, mode);
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn resized(&mut self, size: Vec2) {
        let size = vec2(size.x.round().max(0.0), size.y.round().max(0.0));
        if size == self.size {
            return;
        }
        self.size = size;
        self.relayout();
        self.repaints.push(Repaint::All);
    }

    pub fn is_active(&self) -> bool {
        self.enabled && self.visible && !self.blocked
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.deactivated();
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.deactivated();
    }

    /// Modal blocking, e.g. while a dialog owns the pointer.
    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
        self.deactivated();
    }

    fn deactivated(&mut self) {
        if self.is_active() {
            return;
        }
        let (interaction, mut canvas) = self.parts();
        interaction.reset_gesture();
        interaction.exit_hover(&mut canvas);
    }

    // ── Pointer ───────────────────────────────────────────────

    fn accepts(&self, pos: Pos2) -> bool {
        self.is_active() && self.layout.contains(pos)
    }

    pub fn mouse_down(&mut self, pos: Pos2) {
        if !self.accepts(pos) {
            return;
        }
        let (interaction, mut canvas) = self.parts();
        interaction.mouse_down(&mut canvas, pos);
    }

    /// `pos` may lie outside the panel; the press that started the drag
    /// must not.
    pub fn mouse_drag(&mut self, pos: Pos2) {
        let Some(origin) = self.interaction.mouse_down_position() else {
            return;
        };
        if !self.accepts(origin) {
            return;
        }
        let (interaction, mut canvas) = self.parts();
        interaction.mouse_drag(&mut canvas, pos);
    }

    pub fn mouse_up(&mut self, pos: Pos2) {
        if !self.is_active() {
            return;
        }
        let (interaction, mut canvas) = self.parts();
        interaction.mouse_up(&mut canvas, pos);
    }

    pub fn mouse_move(&mut self, pos: Pos2) {
        if !self.accepts(pos) {
            return;
        }
        let (interaction, mut canvas) = self.parts();
        interaction.mouse_move(&mut canvas, pos);
    }

    pub fn mouse_exit(&mut self) {
        let (interaction, mut canvas) = self.parts();
        interaction.mouse_exit(&mut canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellState;
    use egui::pos2;

    fn panel() -> SequencerPanel {
        let mut panel = SequencerPanel::new(4);
        panel.insert_column(0.5);
        panel.resized(vec2(200.0, 200.0));
        panel.take_repaints();
        panel
    }

    #[test]
    fn layout_follows_structure() {
        let mut panel = panel();
        assert_eq!(panel.layout().columns(), 2);
        panel.set_repeats(3);
        assert_eq!(panel.layout().columns(), 6);
        assert_eq!(panel.column_widths().iter().sum::<i32>(), 200);
        assert_eq!(panel.take_repaints(), vec![Repaint::All]);
        panel.set_visible_rows(5);
        assert_eq!(panel.layout().slots(), 5);
    }

    #[test]
    fn structural_change_drops_hover_and_selection() {
        let mut panel = panel();
        panel.mouse_move(pos2(50.0, 175.0));
        assert_eq!(panel.hovered(), Some(CellCoord::new(60, 0)));
        panel.shift_visible_rows(1);
        assert_eq!(panel.hovered(), None);
        assert!(!panel.pattern().cell(CellCoord::new(60, 0)).unwrap().is_hovered());
    }

    #[test]
    fn inactive_panel_ignores_the_pointer() {
        let mut panel = panel();
        panel.set_enabled(false);
        panel.mouse_down(pos2(50.0, 175.0));
        assert!(!panel.pattern().cell(CellCoord::new(60, 0)).unwrap().is_on());
        panel.set_enabled(true);
        panel.set_blocked(true);
        panel.mouse_down(pos2(50.0, 175.0));
        assert!(!panel.pattern().cell(CellCoord::new(60, 0)).unwrap().is_on());
    }

    #[test]
    fn blocking_cancels_an_edge_drag() {
        let mut panel = panel();
        panel.mouse_down(pos2(50.0, 175.0));
        panel.mouse_up(pos2(50.0, 175.0));
        panel.mouse_down(pos2(99.0, 175.0));
        assert!(panel.is_dragging_edge());
        panel.set_blocked(true);
        assert!(!panel.is_dragging_edge());
        assert_eq!(panel.cursor(), MouseCursor::Normal);
    }

    fn start_edge_drag(panel: &mut SequencerPanel) {
        panel.mouse_down(pos2(50.0, 175.0));
        panel.mouse_up(pos2(50.0, 175.0));
        panel.mouse_down(pos2(99.0, 175.0));
        assert!(panel.is_dragging_edge());
    }

    fn assert_single_note(panel: &SequencerPanel) {
        let first = panel.pattern().cell(CellCoord::new(60, 0)).unwrap();
        assert!(first.is_on());
        assert!(!first.is_left_connected() && !first.is_right_connected());
        assert!(!panel.pattern().cell(CellCoord::new(60, 1)).unwrap().is_on());
    }

    #[test]
    fn leaving_paint_mode_cancels_an_edge_drag() {
        let mut panel = panel();
        start_edge_drag(&mut panel);

        panel.set_mode(SequencerMode::Selection);
        assert!(!panel.is_dragging_edge());
        assert_eq!(panel.cursor(), MouseCursor::Normal);

        panel.mouse_drag(pos2(190.0, 175.0));
        panel.set_mode(SequencerMode::Paint);
        panel.mouse_drag(pos2(190.0, 175.0));

        assert!(!panel.is_dragging_edge());
        assert!(panel.selected().is_empty());
        assert_single_note(&panel);
    }

    #[test]
    fn hiding_or_disabling_cancels_an_edge_drag() {
        let mut panel = panel();
        start_edge_drag(&mut panel);
        panel.set_visible(false);
        assert!(!panel.is_dragging_edge());
        panel.set_visible(true);
        panel.mouse_drag(pos2(190.0, 175.0));
        assert_single_note(&panel);

        panel.mouse_down(pos2(99.0, 175.0));
        assert!(panel.is_dragging_edge());
        panel.set_enabled(false);
        assert!(!panel.is_dragging_edge());
        assert_eq!(panel.cursor(), MouseCursor::Normal);
        panel.set_enabled(true);
        panel.mouse_drag(pos2(190.0, 175.0));
        assert!(!panel.is_dragging_edge());
        assert_single_note(&panel);
    }

    #[test]
    fn press_outside_is_ignored() {
        let mut panel = panel();
        panel.mouse_down(pos2(250.0, 175.0));
        panel.mouse_drag(pos2(50.0, 175.0));
        assert!(!panel.pattern().cell(CellCoord::new(60, 0)).unwrap().is_on());
    }

    #[test]
    fn copies_keep_notes_but_not_gestures() {
        let mut panel = panel();
        panel.mouse_down(pos2(150.0, 175.0));
        panel.set_mode(SequencerMode::Selection);
        panel.mouse_down(pos2(50.0, 175.0));

        let copy = panel.clone();
        assert_eq!(copy.mode(), SequencerMode::Selection);
        assert!(copy.selected().is_empty());
        let cell = copy.pattern().cell(CellCoord::new(60, 1)).unwrap();
        assert_eq!(cell.state(), CellState::On);
        assert!(!copy.pattern().cell(CellCoord::new(60, 0)).unwrap().is_selected());
    }

    #[test]
    fn visible_cells_run_top_down() {
        let panel = panel();
        let cells: Vec<_> = panel.visible_cells().collect();
        assert_eq!(cells.len(), 8);
        assert_eq!(cells[0].0, CellCoord::new(63, 0));
        assert_eq!(cells[0].1.min, pos2(0.0, 0.0));
        assert_eq!(cells[7].0, CellCoord::new(60, 1));
    }
}
