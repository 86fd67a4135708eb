use eframe::egui::{Vec2, vec2};

const LEAF_CAPACITY: usize = 8;
const MAX_DEPTH: usize = 12;

#[derive(Clone, Copy)]
pub(super) struct QuadBounds {
    pub(super) center: Vec2,
    pub(super) half_extent: f32,
}

impl QuadBounds {
    fn around(points: &[Vec2]) -> Option<Self> {
        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for point in points {
            min = min.min(*point);
            max = max.max(*point);
        }

        if !min.x.is_finite() || !min.y.is_finite() || !max.x.is_finite() || !max.y.is_finite() {
            return None;
        }

        let span = (max.x - min.x).max(max.y - min.y).max(1.0);
        Some(Self {
            center: (min + max) * 0.5,
            half_extent: (span * 0.5) + 1.0,
        })
    }

    pub(super) fn side_length(self) -> f32 {
        self.half_extent * 2.0
    }

    fn quadrant_for(self, point: Vec2) -> usize {
        ((point.x >= self.center.x) as usize) | (((point.y >= self.center.y) as usize) << 1)
    }

    fn child(self, quadrant: usize) -> Self {
        let quarter = self.half_extent * 0.5;
        let sx = if quadrant & 1 == 0 { -quarter } else { quarter };
        let sy = if quadrant & 2 == 0 { -quarter } else { quarter };
        Self {
            center: self.center + vec2(sx, sy),
            half_extent: quarter,
        }
    }

    /// Squared gap between two cells, zero when they touch or overlap.
    pub(super) fn gap_sq(self, other: Self) -> f32 {
        let reach = self.half_extent + other.half_extent;
        let dx = ((self.center.x - other.center.x).abs() - reach).max(0.0);
        let dy = ((self.center.y - other.center.y).abs() - reach).max(0.0);
        (dx * dx) + (dy * dy)
    }
}

/// Barnes-Hut partition over node positions. Internal cells keep the member
/// count and barycenter so distant regions can act as a single charge.
pub(super) struct QuadNode {
    pub(super) bounds: QuadBounds,
    pub(super) barycenter: Vec2,
    pub(super) count: usize,
    pub(super) members: Vec<usize>,
    pub(super) children: [Option<Box<QuadNode>>; 4],
}

impl QuadNode {
    pub(super) fn build(positions: &[Vec2]) -> Option<Self> {
        let bounds = QuadBounds::around(positions)?;
        let members = (0..positions.len()).collect::<Vec<_>>();
        Some(Self::subdivide(bounds, members, positions, 0))
    }

    fn subdivide(bounds: QuadBounds, members: Vec<usize>, positions: &[Vec2], depth: usize) -> Self {
        let mut barycenter = Vec2::ZERO;
        for &index in &members {
            barycenter += positions[index];
        }
        let count = members.len();
        if count > 0 {
            barycenter /= count as f32;
        }

        let mut node = Self {
            bounds,
            barycenter,
            count,
            members,
            children: std::array::from_fn(|_| None),
        };

        if depth >= MAX_DEPTH || node.members.len() <= LEAF_CAPACITY {
            return node;
        }

        let mut buckets: [Vec<usize>; 4] = std::array::from_fn(|_| Vec::new());
        for &index in &node.members {
            buckets[bounds.quadrant_for(positions[index])].push(index);
        }

        // All members in one quadrant means further splitting cannot separate
        // them; keep the node as a leaf.
        if buckets.iter().filter(|bucket| !bucket.is_empty()).count() <= 1 {
            return node;
        }

        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if !bucket.is_empty() {
                node.children[quadrant] = Some(Box::new(Self::subdivide(
                    bounds.child(quadrant),
                    bucket,
                    positions,
                    depth + 1,
                )));
            }
        }
        node.members.clear();
        node
    }

    pub(super) fn is_leaf(&self) -> bool {
        self.children.iter().all(|child| child.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::QuadNode;
    use eframe::egui::vec2;

    #[test]
    fn empty_input_builds_nothing() {
        assert!(QuadNode::build(&[]).is_none());
    }

    #[test]
    fn cells_account_for_every_point() {
        let positions = (0..40)
            .map(|i| vec2((i % 7) as f32 * 13.0, (i / 7) as f32 * 9.0))
            .collect::<Vec<_>>();
        let tree = QuadNode::build(&positions).expect("tree builds");

        fn count(node: &super::QuadNode) -> usize {
            if node.is_leaf() {
                node.members.len()
            } else {
                node.children
                    .iter()
                    .flatten()
                    .map(|child| count(child))
                    .sum()
            }
        }

        assert_eq!(count(&tree), positions.len());
        assert_eq!(tree.count, positions.len());
    }

    #[test]
    fn coincident_points_stay_in_one_leaf() {
        let positions = vec![vec2(3.0, 3.0); 32];
        let tree = QuadNode::build(&positions).expect("tree builds");
        assert!(tree.is_leaf());
        assert_eq!(tree.members.len(), 32);
    }
}
