use std::time::{Duration, Instant};

use eframe::egui::{self, Context, Pos2, Vec2};

use super::super::ViewModel;
use crate::network::Author;
use crate::util::ellipsize;

/// Panels spawn at the pointer, nudged right and up.
pub(in crate::app) const TOOLTIP_OFFSET: Vec2 = Vec2::new(5.0, -28.0);

const FADE_IN: Duration = Duration::from_millis(200);
const HOLD_UNTIL: Duration = Duration::from_millis(3000);
const FADE_OUT: Duration = Duration::from_millis(500);
const MAX_OPACITY: f32 = 0.9;
const TITLE_MAX_CHARS: usize = 90;

/// One click-spawned floating panel with its own fade schedule. Panels are
/// never deduplicated; every click gets an independent timer.
pub(in crate::app) struct Tooltip {
    serial: u64,
    anchor: Pos2,
    text: String,
    spawned: Instant,
}

/// Opacity ramps 0 -> 0.9 over the first 200 ms, holds, then fades out over
/// 500 ms starting at the 3000 ms mark. `None` means the panel is done.
fn opacity_at(elapsed: Duration) -> Option<f32> {
    if elapsed < FADE_IN {
        return Some(MAX_OPACITY * (elapsed.as_secs_f32() / FADE_IN.as_secs_f32()));
    }
    if elapsed < HOLD_UNTIL {
        return Some(MAX_OPACITY);
    }

    let fade = elapsed - HOLD_UNTIL;
    if fade < FADE_OUT {
        Some(MAX_OPACITY * (1.0 - fade.as_secs_f32() / FADE_OUT.as_secs_f32()))
    } else {
        None
    }
}

fn tooltip_text(author: &Author) -> String {
    let titles = if author.titles.is_empty() {
        "No titles available".to_string()
    } else {
        author
            .titles
            .iter()
            .map(|title| ellipsize(title, TITLE_MAX_CHARS))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Author: {}\nAffiliation: {}\nCountry: {}\nPublications: {}\nTitles:\n{}",
        author.id,
        author.affiliation,
        author.country.as_deref().unwrap_or("unknown"),
        author.publications,
        titles,
    )
}

impl ViewModel {
    pub(in crate::app) fn spawn_tooltip(&mut self, index: usize, anchor: Pos2, now: Instant) {
        let Some(author) = self.network.authors.get(index) else {
            return;
        };

        self.tooltip_serial += 1;
        self.tooltips.push(Tooltip {
            serial: self.tooltip_serial,
            anchor,
            text: tooltip_text(author),
            spawned: now,
        });
    }

    pub(in crate::app) fn draw_tooltips(&mut self, ctx: &Context, now: Instant) {
        self.tooltips
            .retain(|tooltip| opacity_at(now.duration_since(tooltip.spawned)).is_some());

        for tooltip in &self.tooltips {
            let Some(opacity) = opacity_at(now.duration_since(tooltip.spawned)) else {
                continue;
            };

            egui::Area::new(egui::Id::new(("author-tooltip", tooltip.serial)))
                .fixed_pos(tooltip.anchor)
                .order(egui::Order::Tooltip)
                .interactable(false)
                .show(ctx, |ui| {
                    ui.set_opacity(opacity);
                    egui::Frame::popup(&ctx.style()).show(ui, |ui| {
                        ui.label(&tooltip.text);
                    });
                });
        }

        if !self.tooltips.is_empty() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{MAX_OPACITY, opacity_at, tooltip_text};
    use crate::network::Author;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn opacity_follows_the_fade_schedule() {
        assert_eq!(opacity_at(ms(0)), Some(0.0));

        let mid_fade_in = opacity_at(ms(100)).expect("still visible");
        assert!((mid_fade_in - MAX_OPACITY * 0.5).abs() < 1e-4);

        assert_eq!(opacity_at(ms(200)), Some(MAX_OPACITY));
        assert_eq!(opacity_at(ms(2_999)), Some(MAX_OPACITY));

        let mid_fade_out = opacity_at(ms(3_250)).expect("still visible");
        assert!((mid_fade_out - MAX_OPACITY * 0.5).abs() < 1e-4);

        assert_eq!(opacity_at(ms(3_500)), None);
        assert_eq!(opacity_at(ms(10_000)), None);
    }

    #[test]
    fn panels_spawned_apart_expire_independently() {
        let first_spawn = ms(0);
        let second_spawn = ms(1_000);
        let probe = ms(3_700);

        assert_eq!(opacity_at(probe - first_spawn), None);
        assert!(opacity_at(probe - second_spawn).is_some());
    }

    #[test]
    fn text_includes_titles_or_the_placeholder() {
        let mut author = Author {
            id: "a. turing".to_string(),
            affiliation: "Cambridge".to_string(),
            country: Some("UK".to_string()),
            publications: 4,
            titles: vec!["On computable numbers".to_string()],
        };

        let text = tooltip_text(&author);
        assert!(text.contains("Author: a. turing"));
        assert!(text.contains("On computable numbers"));

        author.titles.clear();
        author.country = None;
        let text = tooltip_text(&author);
        assert!(text.contains("No titles available"));
        assert!(text.contains("Country: unknown"));
    }
}
