use std::time::Instant;

use eframe::egui::{self, Ui, Vec2};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui, now: Instant) {
        ui.heading("Force Controls");
        ui.separator();
        ui.add_space(4.0);

        let mut changed = false;

        changed |= ui
            .add(
                egui::Slider::new(&mut self.params.charge_strength, -300.0..=0.0)
                    .text("Charge strength"),
            )
            .on_hover_text("Many-body repulsion between authors; more negative pushes harder.")
            .changed();

        changed |= ui
            .add(
                egui::Slider::new(&mut self.params.collision_radius, 0.0..=48.0)
                    .text("Collision radius"),
            )
            .on_hover_text("Collision footprint per node; 24 equals twice the node radius.")
            .changed();

        changed |= ui
            .add(egui::Slider::new(&mut self.params.link_strength, 0.0..=1.0).text("Link strength"))
            .on_hover_text("How firmly co-authorship links hold their target length.")
            .changed();

        if changed {
            self.update_forces(now);
        }

        ui.separator();

        ui.label("Search authors")
            .on_hover_text("Fuzzy-highlight authors by name or affiliation.");
        ui.text_edit_singleline(&mut self.search);

        ui.separator();

        if ui.button("Reset view").clicked() {
            self.pan = Vec2::ZERO;
            self.zoom = 1.0;
        }
    }
}
