use std::path::Path;
use std::time::Instant;

use eframe::egui::{self, Align, Color32, Context, Layout};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        data_path: &Path,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        let now = Instant::now();

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("author-atlas");
                    ui.separator();
                    ui.label(format!("data: {}", data_path.display()));
                    ui.label(format!("authors: {}", self.network.author_count()));
                    ui.label(format!("links: {}", self.network.link_count()));
                    if self.network.dropped_links > 0 {
                        ui.colored_label(
                            Color32::from_rgb(200, 120, 40),
                            format!("dropped links: {}", self.network.dropped_links),
                        );
                    }

                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload data"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!("energy: {:.3}", self.sim.alpha()));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_controls(ui, now));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading collaboration network...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_graph(ui, now);
            }
        });

        self.draw_tooltips(ctx, now);
    }
}
