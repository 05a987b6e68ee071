use eframe::egui;

use super::style::cell_visual;
use super::{AppState, PointerTracker, REPEATS_PRESET};
use crate::interaction::{MouseCursor, SequencerMode};
use crate::panel::SequencerPanel;

const STRIP_ALPHA: usize = 0;
const STRIP_BETA: usize = 1;

fn cursor_icon(cursor: MouseCursor) -> egui::CursorIcon {
    match cursor {
        MouseCursor::Normal => egui::CursorIcon::Default,
        MouseCursor::LeftRightResize => egui::CursorIcon::ResizeHorizontal,
    }
}

fn paint_cell(painter: &egui::Painter, bounds: egui::Rect, cell: &crate::cell::Cell) {
    let visual = cell_visual(cell, bounds);
    painter.rect(visual.rect, visual.rounding, visual.fill, visual.stroke);
}

impl eframe::App for AppState {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Controls ──────────────────────────────────────────
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                if ui.button("➕ Row").clicked() { self.add_visible_row(); }
                if ui.button("➖ Row").clicked() { self.remove_visible_row(); }
                if ui.button(format!("Repeat ×{}", REPEATS_PRESET)).clicked() { self.apply_repeats(REPEATS_PRESET); }
                if ui.button("Insert Column").clicked() { self.insert_random_column(&mut rand::rng()); }
                let can_remove = self.panel.read().pattern().base_columns_size() > 1;
                if ui.add_enabled(can_remove, egui::Button::new("Remove Column")).clicked() {
                    self.remove_random_column(&mut rand::rng());
                }
                if ui.add_enabled(can_remove, egui::Button::new("Shuffle Columns")).clicked() {
                    self.respread_start_positions(&mut rand::rng());
                }
                ui.separator();
                let selecting = self.panel.read().mode() == SequencerMode::Selection;
                if ui.selectable_label(selecting, "Select").clicked() { self.toggle_mode(); }
            });
            ui.label(self.status.read().as_str());
        });

        // ── Row window keys ───────────────────────────────────
        let (up, down) = ctx.input(|i| (i.key_pressed(egui::Key::ArrowUp), i.key_pressed(egui::Key::ArrowDown)));
        if up { self.shift_rows(1); }
        if down { self.shift_rows(-1); }

        // ── Grid ──────────────────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            let area = ui.available_rect_before_wrap();
            let band = |top: f32, height: f32| {
                egui::Rect::from_min_size(
                    egui::pos2(area.min.x, area.min.y + area.height() * top),
                    egui::vec2(area.width(), area.height() * height),
                )
            };
            self.draw_strip(ui, STRIP_ALPHA, band(1.0 / 6.0, 1.0 / 6.0));
            self.draw_panel(ui, band(1.0 / 3.0, 1.0 / 3.0));
            self.draw_strip(ui, STRIP_BETA, band(2.0 / 3.0, 1.0 / 6.0));
        });
    }
}

impl AppState {
    fn draw_strip(&self, ui: &mut egui::Ui, index: usize, rect: egui::Rect) {
        let strips = self.strips.read();
        let Some(strip) = strips.get(index) else { return };
        let painter = ui.painter_at(rect);
        for (bounds, cell) in strip.cell_rects(rect).into_iter().zip(strip.cells()) {
            paint_cell(&painter, bounds, cell);
        }
    }

    fn draw_panel(&mut self, ui: &mut egui::Ui, rect: egui::Rect) {
        let response = ui.interact(rect, ui.id().with("sequencer_panel"), egui::Sense::click_and_drag());
        let mut panel = self.panel.write();
        panel.resized(rect.size());
        let rect = egui::Rect::from_min_size(rect.min, panel.size());

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                panel.shift_visible_rows(scroll.signum() as isize);
            }
        }

        forward_pointer(&mut self.pointer, ui, rect, &mut panel);

        let painter = ui.painter_at(rect);
        let offset = rect.min.to_vec2();
        for (_, bounds, cell) in panel.visible_cells() {
            paint_cell(&painter, bounds.translate(offset), cell);
        }

        if response.hovered() || panel.is_dragging_edge() {
            ui.ctx().set_cursor_icon(cursor_icon(panel.cursor()));
        }
        // egui repaints the whole frame, so the regions only decide whether
        // another frame is needed.
        let repaints = panel.take_repaints();
        if !repaints.is_empty() {
            tracing::trace!(?repaints, "panel repaint requested");
            ui.ctx().request_repaint();
        }
    }
}

/// Feeds this frame's pointer state to the panel in panel-local
/// coordinates.
fn forward_pointer(tracker: &mut PointerTracker, ui: &egui::Ui, rect: egui::Rect, panel: &mut SequencerPanel) {
    let (pos, pressed, down, released) = ui.input(|i| {
        (
            i.pointer.latest_pos(),
            i.pointer.primary_pressed(),
            i.pointer.primary_down(),
            i.pointer.primary_released(),
        )
    });
    let Some(pos) = pos else {
        if tracker.inside_panel {
            panel.mouse_exit();
            tracker.inside_panel = false;
        }
        return;
    };
    let local = (pos - rect.min).to_pos2();
    let moved = tracker.last_pos != Some(pos);
    tracker.last_pos = Some(pos);

    if pressed && rect.contains(pos) {
        panel.mouse_down(local);
        tracker.pressed_in_panel = true;
    } else if down && tracker.pressed_in_panel && moved {
        panel.mouse_drag(local);
    }
    if released && tracker.pressed_in_panel {
        panel.mouse_up(local);
        tracker.pressed_in_panel = false;
    }

    if tracker.pressed_in_panel {
        return;
    }
    if rect.contains(pos) {
        if moved {
            panel.mouse_move(local);
        }
        tracker.inside_panel = true;
    } else if tracker.inside_panel {
        panel.mouse_exit();
        tracker.inside_panel = false;
    }
}
