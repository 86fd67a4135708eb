mod forces;
mod quadtree;

use eframe::egui::{Vec2, vec2};

use super::ForceParams;
use forces::{ChargeParams, CollideParams, accumulate_charge, collide_pairs, separation_axis};
use quadtree::QuadNode;

pub(in crate::app) const ALPHA_MIN: f32 = 0.001;
const ALPHA_RELAXATION_TICKS: f32 = 300.0;
const VELOCITY_DECAY: f32 = 0.6;
const THETA_SQ: f32 = 0.81;
const CHARGE_DISTANCE_MIN_SQ: f32 = 1.0;
const CHARGE_DISTANCE_MAX: f32 = 300.0;
const LINK_DISTANCE: f32 = 50.0;
const CENTER_STRENGTH: f32 = 0.1;

// Phyllotaxis seeding, so the layout starts identical across runs.
const SEED_RADIUS: f32 = 10.0;
const SEED_ANGLE: f32 = std::f32::consts::PI * (3.0 - 2.236_068);

/// Slider value at which the collision radius equals twice the node radius,
/// matching the initial force configuration.
pub(in crate::app) const COLLISION_RADIUS_BASELINE: f32 = 12.0;

pub(in crate::app) struct SimNode {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Pin set during drag; while present the solver writes this position
    /// and zero velocity instead of integrating.
    pub pinned: Option<Vec2>,
    pub radius: f32,
}

struct SpringLink {
    source: usize,
    target: usize,
    /// Share of the correction the target absorbs, from the endpoints'
    /// incident-link counts.
    bias: f32,
}

#[derive(Default)]
struct TickScratch {
    positions: Vec<Vec2>,
    predicted: Vec<Vec2>,
    velocities: Vec<Vec2>,
    collide_radii: Vec<f32>,
}

/// Velocity-based force solver with a decaying energy schedule: each tick
/// moves `alpha` toward `alpha_target`, applies the collision, centering,
/// charge, and link forces scaled by `alpha`, then integrates velocities
/// into positions. The solver idles once `alpha` falls below `ALPHA_MIN`
/// and no target holds it up.
pub(in crate::app) struct Simulation {
    nodes: Vec<SimNode>,
    links: Vec<SpringLink>,
    alpha: f32,
    alpha_target: f32,
    alpha_decay: f32,
    scratch: TickScratch,
}

impl Simulation {
    pub fn new(radii: Vec<f32>, links: &[(usize, usize)]) -> Self {
        let node_count = radii.len();
        let nodes = radii
            .into_iter()
            .enumerate()
            .map(|(index, radius)| {
                let ring = SEED_RADIUS * (0.5 + index as f32).sqrt();
                let angle = index as f32 * SEED_ANGLE;
                SimNode {
                    pos: vec2(ring * angle.cos(), ring * angle.sin()),
                    vel: Vec2::ZERO,
                    pinned: None,
                    radius,
                }
            })
            .collect::<Vec<_>>();

        let mut incident = vec![0usize; node_count];
        for &(source, target) in links {
            if source < node_count && target < node_count {
                incident[source] += 1;
                incident[target] += 1;
            }
        }

        let links = links
            .iter()
            .filter(|(source, target)| {
                source != target && *source < node_count && *target < node_count
            })
            .map(|&(source, target)| SpringLink {
                source,
                target,
                bias: incident[source] as f32 / (incident[source] + incident[target]) as f32,
            })
            .collect();

        Self {
            nodes,
            links,
            alpha: 1.0,
            alpha_target: 0.0,
            alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / ALPHA_RELAXATION_TICKS),
            scratch: TickScratch::default(),
        }
    }

    pub fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn alpha_target(&self) -> f32 {
        self.alpha_target
    }

    pub fn set_alpha_target(&mut self, target: f32) {
        self.alpha_target = target.max(0.0);
    }

    /// Full restart of motion: energy back to 1.0.
    pub fn restart(&mut self) {
        self.alpha = 1.0;
    }

    pub fn active(&self) -> bool {
        self.alpha >= ALPHA_MIN || self.alpha_target >= ALPHA_MIN
    }

    pub fn pin(&mut self, index: usize, position: Vec2) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.pinned = Some(position);
        }
    }

    pub fn unpin(&mut self, index: usize) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.pinned = None;
        }
    }

    pub fn tick(&mut self, params: &ForceParams) {
        let node_count = self.nodes.len();
        if node_count == 0 {
            return;
        }

        self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

        let scratch = &mut self.scratch;
        scratch.positions.clear();
        scratch.predicted.clear();
        scratch.velocities.clear();
        scratch.collide_radii.clear();

        let collide_factor = (params.collision_radius / COLLISION_RADIUS_BASELINE).max(0.0);
        let mut max_collide_radius = 0.0_f32;
        for node in &self.nodes {
            scratch.positions.push(node.pos);
            scratch.predicted.push(node.pos + node.vel);
            scratch.velocities.push(node.vel);
            let collide_radius = node.radius * collide_factor;
            scratch.collide_radii.push(collide_radius);
            max_collide_radius = max_collide_radius.max(collide_radius);
        }

        // Collision works on predicted positions and ignores alpha, like the
        // reference solver.
        if max_collide_radius > 0.0
            && let Some(tree) = QuadNode::build(&scratch.predicted)
        {
            let reach = max_collide_radius * 2.0;
            collide_pairs(
                &tree,
                &tree,
                true,
                &scratch.predicted,
                &scratch.collide_radii,
                CollideParams {
                    strength: 1.0,
                    max_pair_distance_sq: reach * reach,
                },
                &mut scratch.velocities,
            );
        }

        // Weak axis centering toward the origin.
        for (velocity, position) in scratch.velocities.iter_mut().zip(&scratch.positions) {
            *velocity -= *position * (CENTER_STRENGTH * self.alpha);
        }

        if params.charge_strength.abs() > 0.0
            && let Some(tree) = QuadNode::build(&scratch.positions)
        {
            let charge = ChargeParams {
                strength: params.charge_strength,
                alpha: self.alpha,
                theta_sq: THETA_SQ,
                distance_min_sq: CHARGE_DISTANCE_MIN_SQ,
                distance_max_sq: CHARGE_DISTANCE_MAX * CHARGE_DISTANCE_MAX,
            };
            for (index, velocity) in scratch.velocities.iter_mut().enumerate() {
                accumulate_charge(&tree, index, &scratch.positions, charge, velocity);
            }
        }

        for link in &self.links {
            let mut delta = (scratch.positions[link.target] + scratch.velocities[link.target])
                - (scratch.positions[link.source] + scratch.velocities[link.source]);
            if delta.length_sq() <= 0.000_001 {
                delta = separation_axis(link.source, link.target) * 0.001;
            }

            let distance = delta.length();
            let correction =
                delta * ((distance - LINK_DISTANCE) / distance * self.alpha * params.link_strength);
            scratch.velocities[link.target] -= correction * link.bias;
            scratch.velocities[link.source] += correction * (1.0 - link.bias);
        }

        for (index, node) in self.nodes.iter_mut().enumerate() {
            if let Some(pinned) = node.pinned {
                node.pos = pinned;
                node.vel = Vec2::ZERO;
            } else {
                node.vel = scratch.velocities[index] * VELOCITY_DECAY;
                node.pos += node.vel;
            }
        }
    }
}
