use std::sync::Arc;

use parking_lot::RwLock;
use rand::Rng;

use crate::config::EditorConfig;
use crate::interaction::SequencerMode;
use crate::panel::SequencerPanel;
use crate::pattern::start_positions_are_valid;
use crate::strip::SequencerStrip;

pub mod style;
pub mod view;

/// Repeat count applied by the "Repeat ×12" button.
pub const REPEATS_PRESET: usize = 12;

/// Pointer bookkeeping across frames, used to turn egui's polled pointer
/// state into press, drag, release, move and exit events.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct PointerTracker {
    pub(crate) pressed_in_panel: bool,
    pub(crate) inside_panel: bool,
    pub(crate) last_pos: Option<eframe::egui::Pos2>,
}

pub struct AppState {
    pub panel: Arc<RwLock<SequencerPanel>>,
    /// Alpha above the panel, beta below it.
    pub strips: Arc<RwLock<[SequencerStrip; 2]>>,
    pub status: Arc<RwLock<String>>,
    pub(crate) pointer: PointerTracker,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl AppState {
    pub fn from_config(config: &EditorConfig) -> Self {
        let [alpha, beta] = config.strip_columns;
        Self {
            panel: Arc::new(RwLock::new(SequencerPanel::from_config(config))),
            strips: Arc::new(RwLock::new([SequencerStrip::new(alpha), SequencerStrip::new(beta)])),
            status: Arc::new(RwLock::new("Click a cell to add a note".to_string())),
            pointer: PointerTracker::default(),
        }
    }

    fn report(&self, message: String) {
        tracing::debug!("{}", message);
        *self.status.write() = message;
    }

    // ─────────────────────────────────────────────────────────
    //  Editor actions
    // ─────────────────────────────────────────────────────────

    pub fn add_visible_row(&self) {
        let mut panel = self.panel.write();
        let rows = panel.pattern().visible_rows() + 1;
        if panel.set_visible_rows(rows) {
            self.report(format!("Showing {} rows", rows));
        } else {
            self.report("No room for another row".to_string());
        }
    }

    pub fn remove_visible_row(&self) {
        let mut panel = self.panel.write();
        let rows = panel.pattern().visible_rows();
        if rows > 1 && panel.set_visible_rows(rows - 1) {
            self.report(format!("Showing {} rows", rows - 1));
        }
    }

    pub fn apply_repeats(&self, repeats: usize) {
        if self.panel.write().set_repeats(repeats) {
            self.report(format!("Pattern repeats {}×", repeats));
        }
    }

    /// Inserts a column somewhere in the middle third of the pattern.
    pub fn insert_random_column(&self, rng: &mut impl Rng) {
        let mut panel = self.panel.write();
        let repeats = panel.pattern().repeats() as f32;
        let position = (1.0 + rng.random::<f32>()) / 3.0 * repeats;
        if panel.pattern().start_positions().contains(&position.fract()) {
            self.report(format!("A column already starts at {:.3}", position));
            return;
        }
        let index = panel.insert_column(position);
        self.report(format!("Inserted base column {} at {:.3}", index, position));
    }

    /// Removes a random base column other than the first, picking the copy
    /// in a random repeat.
    pub fn remove_random_column(&self, rng: &mut impl Rng) {
        let mut panel = self.panel.write();
        let base = panel.pattern().base_columns_size();
        if base < 2 {
            self.report("Only the first column is left".to_string());
            return;
        }
        let repeat = rng.random_range(0..panel.pattern().repeats());
        let index = repeat * base + rng.random_range(1..base);
        panel.remove_column(index);
        self.report(format!("Removed column {}", index));
    }

    /// Moves every base column but the first to a new random start in the
    /// middle third of a repeat.
    pub fn respread_start_positions(&self, rng: &mut impl Rng) {
        let mut panel = self.panel.write();
        let count = panel.pattern().base_columns_size() - 1;
        let mut positions: Vec<f32> = (0..count).map(|_| (1.0 + rng.random::<f32>()) / 3.0).collect();
        positions.sort_by(f32::total_cmp);
        if !start_positions_are_valid(&positions) {
            self.report("Drew two equal start positions, try again".to_string());
            return;
        }
        panel.shift_start_positions(&positions);
        self.report(format!("Spread {} columns", count));
    }

    pub fn toggle_mode(&self) {
        let mut panel = self.panel.write();
        let mode = match panel.mode() {
            SequencerMode::Paint => SequencerMode::Selection,
            SequencerMode::Selection => SequencerMode::Paint,
        };
        panel.set_mode(mode);
        self.report(format!("{:?} mode", mode));
    }

    pub fn shift_rows(&self, delta: isize) {
        let mut panel = self.panel.write();
        if panel.shift_visible_rows(delta) != 0 {
            let bottom = panel.pattern().reference_row();
            self.report(format!("Rows {}–{}", bottom, panel.pattern().visible_rows_max()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn row_buttons_stop_at_one_row() {
        let app = AppState::default();
        app.panel.write().set_visible_rows(1);
        app.remove_visible_row();
        assert_eq!(app.panel.read().pattern().visible_rows(), 1);
        app.add_visible_row();
        assert_eq!(app.panel.read().pattern().visible_rows(), 2);
    }

    #[test]
    fn random_columns_keep_the_pattern_valid() {
        let app = AppState::default();
        let mut rng = StdRng::seed_from_u64(7);
        app.apply_repeats(REPEATS_PRESET);
        for _ in 0..10 {
            app.insert_random_column(&mut rng);
        }
        app.respread_start_positions(&mut rng);
        for _ in 0..4 {
            app.remove_random_column(&mut rng);
        }
        let panel = app.panel.read();
        assert_eq!(panel.pattern().repeats(), REPEATS_PRESET);
        assert!(panel.pattern().base_columns_size() >= 1);
        assert!(panel.pattern().is_valid());
        assert!(start_positions_are_valid(&panel.pattern().start_positions()[1..]));
    }

    #[test]
    fn remove_keeps_the_first_column() {
        let app = AppState::default();
        let mut rng = StdRng::seed_from_u64(1);
        app.remove_random_column(&mut rng);
        assert_eq!(app.panel.read().pattern().columns_size(), 1);
    }

    #[test]
    fn mode_toggles_back_and_forth() {
        let app = AppState::default();
        app.toggle_mode();
        assert_eq!(app.panel.read().mode(), SequencerMode::Selection);
        app.toggle_mode();
        assert_eq!(app.panel.read().mode(), SequencerMode::Paint);
    }

    #[test]
    fn shifting_rows_reports_the_window() {
        let app = AppState::default();
        app.shift_rows(-3);
        assert_eq!(app.panel.read().pattern().reference_row(), 57);
        assert_eq!(app.status.read().as_str(), "Rows 57–64");
    }
}
