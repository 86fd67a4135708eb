use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use eframe::egui::{self, Color32, Context, Vec2};

use crate::network::{CollabNetwork, load_network};

mod graph;
mod physics;
mod render_utils;
mod scale;
mod ui;

use physics::Simulation;
use scale::{RadiusScale, country_color};
use ui::tooltip::Tooltip;

/// Energy target held while a node is dragged.
const DRAG_ALPHA_TARGET: f32 = 0.3;
/// Idle delay after a slider change before motion is allowed to damp out.
const RELAX_AFTER: Duration = Duration::from_secs(3);

pub struct AuthorAtlasApp {
    data_path: PathBuf,
    state: AppState,
    reload_rx: Option<Receiver<Result<CollabNetwork, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<CollabNetwork, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

/// Live tuning knobs mirrored by the control sliders; read every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ForceParams {
    pub charge_strength: f32,
    pub collision_radius: f32,
    pub link_strength: f32,
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            charge_strength: -100.0,
            collision_radius: 24.0,
            link_strength: 0.3,
        }
    }
}

struct DragState {
    index: usize,
    /// Offset from the pointer to the node center at grab time, so the node
    /// does not jump under the cursor.
    grab_offset: Vec2,
}

struct ViewModel {
    network: CollabNetwork,
    sim: Simulation,
    node_colors: Vec<Color32>,
    params: ForceParams,
    pan: Vec2,
    zoom: f32,
    search: String,
    dragged: Option<DragState>,
    relax_deadline: Option<Instant>,
    tooltips: Vec<Tooltip>,
    tooltip_serial: u64,
}

impl ViewModel {
    fn new(network: CollabNetwork) -> Self {
        let radius_scale = RadiusScale::from_degrees(&network.degrees);
        let radii = (0..network.author_count())
            .map(|index| radius_scale.radius(network.degree(index)))
            .collect::<Vec<_>>();
        let node_colors = network
            .authors
            .iter()
            .map(|author| country_color(&network.top_countries, author.country.as_deref()))
            .collect();
        let sim = Simulation::new(radii, &network.links);

        Self {
            network,
            sim,
            node_colors,
            params: ForceParams::default(),
            pan: Vec2::ZERO,
            zoom: 1.0,
            search: String::new(),
            dragged: None,
            relax_deadline: None,
            tooltips: Vec::new(),
            tooltip_serial: 0,
        }
    }

    /// Slider change: forces pick up the new parameters, motion restarts at
    /// full energy, and a fresh relax deadline replaces any pending one.
    fn update_forces(&mut self, now: Instant) {
        self.sim.restart();
        self.relax_deadline = Some(now + RELAX_AFTER);
    }

    fn poll_relax_timer(&mut self, now: Instant) {
        if let Some(deadline) = self.relax_deadline
            && now >= deadline
        {
            self.sim.set_alpha_target(0.0);
            self.relax_deadline = None;
        }
    }
}

impl AuthorAtlasApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, data_path: String) -> Self {
        let data_path = PathBuf::from(data_path);
        let state = Self::start_load(data_path.clone());
        Self {
            data_path,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(data_path: PathBuf) -> Receiver<Result<CollabNetwork, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_network(&data_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(data_path: PathBuf) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(data_path),
        }
    }
}

impl eframe::App for AuthorAtlasApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(network) => AppState::Ready(Box::new(ViewModel::new(network))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading collaboration network...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load collaboration network");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.data_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.data_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.data_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(network) => AppState::Ready(Box::new(ViewModel::new(network))),
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(AppState::Error("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{RELAX_AFTER, ViewModel};
    use crate::network::{Author, CollabNetwork};

    fn small_network() -> CollabNetwork {
        let authors = vec![
            Author {
                id: "a".to_string(),
                affiliation: "MIT".to_string(),
                country: Some("US".to_string()),
                publications: 2,
                titles: Vec::new(),
            },
            Author {
                id: "b".to_string(),
                affiliation: "ENS".to_string(),
                country: Some("FR".to_string()),
                publications: 1,
                titles: Vec::new(),
            },
        ];
        CollabNetwork {
            authors,
            links: vec![(0, 1)],
            degrees: vec![1, 1],
            top_countries: vec!["US".to_string(), "FR".to_string()],
            dropped_links: 0,
        }
    }

    #[test]
    fn slider_change_restarts_motion_and_arms_relax_timer() {
        let mut model = ViewModel::new(small_network());
        let now = Instant::now();

        model.update_forces(now);
        assert_eq!(model.sim.alpha(), 1.0);
        assert_eq!(model.relax_deadline, Some(now + RELAX_AFTER));
    }

    #[test]
    fn newer_relax_timer_replaces_the_pending_one() {
        let mut model = ViewModel::new(small_network());
        model.sim.set_alpha_target(0.3);
        let start = Instant::now();

        model.update_forces(start);
        model.update_forces(start + Duration::from_secs(1));

        // The first deadline has passed but was superseded, so the target
        // must not relax yet.
        model.poll_relax_timer(start + RELAX_AFTER);
        assert_eq!(model.sim.alpha_target(), 0.3);
        assert!(model.relax_deadline.is_some());

        model.poll_relax_timer(start + Duration::from_secs(1) + RELAX_AFTER);
        assert_eq!(model.sim.alpha_target(), 0.0);
        assert!(model.relax_deadline.is_none());
    }
}
