use std::collections::HashSet;
use std::time::Instant;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::render_utils::{draw_background, screen_to_world, world_to_screen};
use super::super::ui::tooltip::TOOLTIP_OFFSET;
use super::super::{DRAG_ALPHA_TARGET, DragState, ViewModel};

const DIMMED_OPACITY: f32 = 0.2;
const SEARCH_DIM: f32 = 0.35;
const SEARCH_RING: Color32 = Color32::from_rgb(103, 196, 255);

/// Hover emphasis: full opacity for nodes sharing the hovered affiliation
/// (the hovered node included), dimmed for everyone else.
fn hover_opacity(affiliation: &str, hovered_affiliation: Option<&str>) -> f32 {
    match hovered_affiliation {
        None => 1.0,
        Some(hovered) if affiliation == hovered => 1.0,
        Some(_) => DIMMED_OPACITY,
    }
}

impl ViewModel {
    fn search_matches(&self) -> Option<HashSet<usize>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        Some(
            self.network
                .authors
                .iter()
                .enumerate()
                .filter_map(|(index, author)| {
                    let hit = matcher.fuzzy_match(&author.id, query).is_some()
                        || matcher.fuzzy_match(&author.affiliation, query).is_some();
                    hit.then_some(index)
                })
                .collect(),
        )
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui, now: Instant) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect);
        self.handle_zoom(ui, rect, &response);
        self.handle_pan(&response);
        self.poll_relax_timer(now);

        let params = self.params;
        if self.sim.active() {
            self.sim.tick(&params);
            ui.ctx().request_repaint();
        }

        let pan = self.pan;
        let zoom = self.zoom;
        let mut screen_positions = Vec::with_capacity(self.sim.nodes().len());
        let mut screen_radii = Vec::with_capacity(self.sim.nodes().len());
        for node in self.sim.nodes() {
            screen_positions.push(world_to_screen(rect, pan, zoom, node.pos));
            screen_radii.push((node.radius * zoom).max(1.5));
        }

        let hovered = self.hovered_index(ui, rect, &screen_positions, &screen_radii);
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some((index, _)) = hovered
            && let Some(pointer) = response.interact_pointer_pos()
        {
            if self.sim.alpha_target() < DRAG_ALPHA_TARGET {
                self.sim.set_alpha_target(DRAG_ALPHA_TARGET);
            }
            let node_pos = self.sim.nodes()[index].pos;
            self.sim.pin(index, node_pos);
            self.dragged = Some(DragState {
                index,
                grab_offset: node_pos - screen_to_world(rect, pan, zoom, pointer),
            });
        }

        if let Some(drag) = &self.dragged {
            let (index, grab_offset) = (drag.index, drag.grab_offset);
            if response.dragged_by(egui::PointerButton::Primary)
                && let Some(pointer) = response.interact_pointer_pos()
            {
                let target = screen_to_world(rect, pan, zoom, pointer) + grab_offset;
                self.sim.pin(index, target);
            }

            if response.drag_stopped_by(egui::PointerButton::Primary) {
                self.sim.set_alpha_target(0.0);
                self.sim.unpin(index);
                self.dragged = None;
            }
            ui.ctx().request_repaint();
        }

        let search_matches = self.search_matches();
        let hovered_affiliation =
            hovered.map(|(index, _)| self.network.authors[index].affiliation.clone());

        let edge_stroke = Stroke::new((1.0 * zoom).clamp(0.4, 3.0), Color32::GRAY);
        for &(source, target) in &self.network.links {
            painter.line_segment(
                [screen_positions[source], screen_positions[target]],
                edge_stroke,
            );
        }

        for (index, author) in self.network.authors.iter().enumerate() {
            let opacity = hover_opacity(&author.affiliation, hovered_affiliation.as_deref());
            let mut color = self.node_colors[index];
            let is_search_match = search_matches
                .as_ref()
                .is_some_and(|matches| matches.contains(&index));
            if search_matches.is_some() && !is_search_match {
                color = color.gamma_multiply(SEARCH_DIM);
            }

            painter.circle_filled(
                screen_positions[index],
                screen_radii[index],
                color.gamma_multiply(opacity),
            );
            if is_search_match {
                painter.circle_stroke(
                    screen_positions[index],
                    screen_radii[index] + 2.0,
                    Stroke::new(1.5, SEARCH_RING),
                );
            }
        }

        if let Some((index, _)) = hovered {
            let author = &self.network.authors[index];
            let status = format!(
                "{}  |  {}  |  {}",
                author.id,
                author.affiliation,
                author.country.as_deref().unwrap_or("unknown country"),
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                status,
                FontId::proportional(13.0),
                Color32::from_gray(70),
            );
        }

        if response.clicked_by(egui::PointerButton::Primary)
            && let Some((index, _)) = hovered
            && let Some(pointer) = response.interact_pointer_pos()
        {
            self.spawn_tooltip(index, pointer + TOOLTIP_OFFSET, now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DIMMED_OPACITY, hover_opacity};

    #[test]
    fn no_hover_leaves_everything_at_full_opacity() {
        assert_eq!(hover_opacity("MIT", None), 1.0);
        assert_eq!(hover_opacity("ENS", None), 1.0);
    }

    #[test]
    fn hover_partitions_nodes_by_affiliation() {
        // The hovered node shares its own affiliation, so it stays at 1.0.
        assert_eq!(hover_opacity("MIT", Some("MIT")), 1.0);
        assert_eq!(hover_opacity("ENS", Some("MIT")), DIMMED_OPACITY);
    }
}
