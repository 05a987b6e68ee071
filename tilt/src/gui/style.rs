use eframe::egui::{Color32, Rect, Rounding, Stroke};

use crate::cell::Cell;

const SELECTED_FILL: Color32 = Color32::from_rgb(250, 235, 215);
const ON_FILL: Color32 = Color32::from_rgb(240, 128, 128);
const OFF_FILL: Color32 = Color32::from_rgb(169, 169, 169);
const OUTLINE: Stroke = Stroke { width: 1.0, color: Color32::WHITE };
const CORNER_RADIUS: f32 = 3.0;
const INSET: f32 = 2.0;
const OVERLAP: f32 = 1.0;

/// How one cell is drawn inside its layout rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellVisual {
    pub rect: Rect,
    pub rounding: Rounding,
    pub fill: Color32,
    pub stroke: Stroke,
}

/// Connected sides reach into the neighbour so a note reads as one block.
pub fn cell_visual(cell: &Cell, bounds: Rect) -> CellVisual {
    let mut rect = bounds.shrink2(eframe::egui::vec2(0.0, INSET));
    rect.min.x += if cell.is_left_connected() { -OVERLAP } else { INSET };
    rect.max.x += if cell.is_right_connected() { OVERLAP } else { -INSET };

    let left = if cell.is_left_connected() { 0.0 } else { CORNER_RADIUS };
    let right = if cell.is_right_connected() { 0.0 } else { CORNER_RADIUS };
    let rounding = Rounding { nw: left, sw: left, ne: right, se: right };

    let fill = if cell.is_selected() {
        SELECTED_FILL
    } else if cell.is_on() {
        ON_FILL
    } else {
        OFF_FILL
    };
    let fill = if cell.is_hovered() && !cell.is_selected() { brighter(fill) } else { fill };

    CellVisual { rect, rounding, fill, stroke: OUTLINE }
}

fn brighter(color: Color32) -> Color32 {
    let lift = |channel: u8| 255 - ((255 - channel) as f32 / 1.4).round() as u8;
    Color32::from_rgb(lift(color.r()), lift(color.g()), lift(color.b()))
}
