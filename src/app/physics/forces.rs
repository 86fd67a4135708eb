use eframe::egui::{Vec2, vec2};

use super::quadtree::QuadNode;

/// Deterministic stand-in for the random jiggle the reference solvers apply
/// when two points coincide exactly.
pub(super) fn separation_axis(a: usize, b: usize) -> Vec2 {
    let angle = ((a as f32) * 0.618_034 + (b as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

#[derive(Clone, Copy)]
pub(super) struct ChargeParams {
    pub(super) strength: f32,
    pub(super) alpha: f32,
    pub(super) theta_sq: f32,
    pub(super) distance_min_sq: f32,
    pub(super) distance_max_sq: f32,
}

/// Many-body charge on one node, approximating far cells by their barycenter
/// when `side^2 < theta^2 * distance^2` holds.
pub(super) fn accumulate_charge(
    node: &QuadNode,
    index: usize,
    positions: &[Vec2],
    params: ChargeParams,
    velocity: &mut Vec2,
) {
    if node.count == 0 {
        return;
    }

    let point = positions[index];
    let mut delta = node.barycenter - point;
    let mut distance_sq = delta.length_sq();

    let side = node.bounds.side_length();
    if !node.is_leaf() && side * side < params.theta_sq * distance_sq {
        if distance_sq < params.distance_max_sq {
            if distance_sq <= 0.0001 {
                delta = separation_axis(index, node.count) * 0.001;
                distance_sq = delta.length_sq();
            }
            if distance_sq < params.distance_min_sq {
                distance_sq = (params.distance_min_sq * distance_sq).sqrt();
            }
            *velocity += delta * (params.strength * node.count as f32 * params.alpha / distance_sq);
        }
        return;
    }

    if node.is_leaf() {
        for &other in &node.members {
            if other == index {
                continue;
            }

            let mut delta = positions[other] - point;
            let mut distance_sq = delta.length_sq();
            if distance_sq >= params.distance_max_sq {
                continue;
            }
            if distance_sq <= 0.0001 {
                delta = separation_axis(index, other) * 0.001;
                distance_sq = delta.length_sq();
            }
            if distance_sq < params.distance_min_sq {
                distance_sq = (params.distance_min_sq * distance_sq).sqrt();
            }
            *velocity += delta * (params.strength * params.alpha / distance_sq);
        }
        return;
    }

    for child in node.children.iter().flatten() {
        accumulate_charge(child, index, positions, params, velocity);
    }
}

#[derive(Clone, Copy)]
pub(super) struct CollideParams {
    pub(super) strength: f32,
    pub(super) max_pair_distance_sq: f32,
}

fn resolve_overlap(
    from: usize,
    to: usize,
    predicted: &[Vec2],
    radii: &[f32],
    strength: f32,
    velocities: &mut [Vec2],
) {
    let combined = radii[from] + radii[to];
    if combined <= 0.0 {
        return;
    }

    let mut delta = predicted[from] - predicted[to];
    let mut distance_sq = delta.length_sq();
    if distance_sq >= combined * combined {
        return;
    }

    if distance_sq <= 0.000_001 {
        delta = separation_axis(from, to) * 0.001;
        distance_sq = delta.length_sq();
    }

    let distance = distance_sq.sqrt();
    let push = (combined - distance) / distance * strength;
    let weight = (radii[to] * radii[to]) / (radii[from] * radii[from] + radii[to] * radii[to]);

    velocities[from] += delta * (push * weight);
    velocities[to] -= delta * (push * (1.0 - weight));
}

/// Pairwise collision resolution over the quadtree, skipping cell pairs whose
/// bounding squares are farther apart than any two radii could reach.
pub(super) fn collide_pairs(
    node_a: &QuadNode,
    node_b: &QuadNode,
    same_node: bool,
    predicted: &[Vec2],
    radii: &[f32],
    params: CollideParams,
    velocities: &mut [Vec2],
) {
    if node_a.bounds.gap_sq(node_b.bounds) > params.max_pair_distance_sq {
        return;
    }

    if node_a.is_leaf() && node_b.is_leaf() {
        if same_node {
            for i in 0..node_a.members.len() {
                for j in (i + 1)..node_a.members.len() {
                    resolve_overlap(
                        node_a.members[i],
                        node_a.members[j],
                        predicted,
                        radii,
                        params.strength,
                        velocities,
                    );
                }
            }
        } else {
            for &from in &node_a.members {
                for &to in &node_b.members {
                    resolve_overlap(from, to, predicted, radii, params.strength, velocities);
                }
            }
        }
        return;
    }

    if same_node {
        for first in 0..4 {
            let Some(child_a) = node_a.children[first].as_ref() else {
                continue;
            };
            collide_pairs(child_a, child_a, true, predicted, radii, params, velocities);
            for second in (first + 1)..4 {
                if let Some(child_b) = node_a.children[second].as_ref() {
                    collide_pairs(child_a, child_b, false, predicted, radii, params, velocities);
                }
            }
        }
        return;
    }

    // Descend the larger cell so the recursion keeps shrinking.
    let split_a = if node_a.is_leaf() {
        false
    } else if node_b.is_leaf() {
        true
    } else {
        node_a.bounds.half_extent >= node_b.bounds.half_extent
    };

    if split_a {
        for child in node_a.children.iter().flatten() {
            collide_pairs(child, node_b, false, predicted, radii, params, velocities);
        }
    } else {
        for child in node_b.children.iter().flatten() {
            collide_pairs(node_a, child, false, predicted, radii, params, velocities);
        }
    }
}
