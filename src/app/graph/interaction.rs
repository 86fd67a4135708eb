use eframe::egui::{self, Pos2, Rect, Ui};

use super::super::ViewModel;
use super::super::render_utils::screen_to_world;

const ZOOM_MIN: f32 = 0.5;
const ZOOM_MAX: f32 = 5.0;

impl ViewModel {
    /// Scroll zoom about the pointer, bounded to [0.5, 5.0]; camera only,
    /// node physics never sees it.
    pub(in crate::app) fn handle_zoom(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_step = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_step).clamp(ZOOM_MIN, ZOOM_MAX);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    /// Pan with the secondary or middle button; primary is reserved for
    /// dragging nodes.
    pub(in crate::app) fn handle_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    pub(in crate::app) fn hovered_index(
        &self,
        ui: &Ui,
        rect: Rect,
        screen_positions: &[Pos2],
        screen_radii: &[f32],
    ) -> Option<(usize, f32)> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        if !rect.contains(pointer) {
            return None;
        }

        screen_positions
            .iter()
            .enumerate()
            .filter_map(|(index, position)| {
                let distance = position.distance(pointer);
                // Give tiny nodes a minimum hit target.
                (distance <= screen_radii[index].max(4.0)).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}
