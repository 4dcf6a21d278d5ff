use crate::rng::Mulberry32;
use crate::types::{NodeId, Seed};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Branches shorter than this are not created; their parent becomes a leaf.
pub const MIN_BRANCH_LEN: f64 = 0.6;

/// Documented safe maximum for recursion depth (node count is O(2^levels)).
pub const MAX_TREE_LEVELS: usize = 16;

/// How length-decay jitter is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthJitter {
    /// Independent draw for every node.
    PerNode,
    /// One draw per recursion level, shared by every node at that level.
    PerLevel,
}

/// How angular jitter is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngleJitter {
    /// Independent draw for every node.
    PerNode,
    /// One draw per recursion level, shared by every node at that level.
    PerLevel,
    /// A single draw reused by every node in the tree.
    Uniform,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    pub origin: DVec2,
    pub base_len: f64,
    pub levels: usize,
    /// Length decay per level; the effective factor is this plus jitter.
    pub len_scale: f64,
    pub len_rand: f64,
    /// Angular half-spread between a node and each child, in degrees.
    pub spread_deg: f64,
    pub angle_rand: f64,
    pub length_jitter: LengthJitter,
    pub angle_jitter: AngleJitter,
    /// Stroke width of the root branch; generation does not consume these
    /// two fields, they are carried so consumers can derive per-level
    /// widths as `base_width * width_scale^level`.
    pub base_width: f64,
    pub width_scale: f64,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            origin: DVec2::ZERO,
            base_len: 100.0,
            levels: 8,
            len_scale: 0.68,
            len_rand: 0.0,
            spread_deg: 25.0,
            angle_rand: 0.0,
            length_jitter: LengthJitter::PerNode,
            angle_jitter: AngleJitter::PerNode,
            base_width: 12.0,
            width_scale: 0.68,
        }
    }
}

/// One branch in the generated forest.
///
/// `parent` is `None` for a root; children are registered after both
/// recursive calls return, so a node's child list is complete (and its
/// leaf status decidable) once generation finishes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BranchNode {
    pub level: usize,
    pub length: f64,
    pub base_angle: f64,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub start: DVec2,
    pub end: DVec2,
}

/// Arena of branch nodes. Acyclic by construction: a node is only created
/// by recursing forward from its parent's endpoint, so every parent index
/// refers to an earlier node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BranchTree {
    pub nodes: Vec<BranchNode>,
}

impl BranchTree {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes with no children; eligible for blossom decoration.
    pub fn leaves(&self) -> impl Iterator<Item = (NodeId, &BranchNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.children.is_empty())
    }

    pub fn roots(&self) -> impl Iterator<Item = (NodeId, &BranchNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent.is_none())
    }
}

/// Builds a recursive branching tree from the seed and parameters.
///
/// Per-level and uniform jitter draws are consumed from the stream before
/// recursion starts, so switching jitter modes does not change how many
/// draws the shared maps consume per level.
pub fn build_tree(seed: Seed, params: &TreeParams) -> BranchTree {
    let levels = params.levels.min(MAX_TREE_LEVELS);
    let mut rng = Mulberry32::new(seed);

    let len_rand_by_level: Vec<f64> = match params.length_jitter {
        LengthJitter::PerLevel => (0..levels)
            .map(|_| (rng.next() - 0.5) * params.len_rand)
            .collect(),
        LengthJitter::PerNode => Vec::new(),
    };
    let angle_rand_by_level: Vec<f64> = match params.angle_jitter {
        AngleJitter::PerLevel => (0..levels)
            .map(|_| (rng.next() - 0.5) * params.angle_rand * 0.15)
            .collect(),
        _ => Vec::new(),
    };
    let uniform_jitter = match params.angle_jitter {
        AngleJitter::Uniform => Some((rng.next() - 0.5) * params.angle_rand * 0.15),
        _ => None,
    };

    let mut builder = TreeBuilder {
        params,
        rng,
        len_rand_by_level,
        angle_rand_by_level,
        uniform_jitter,
        nodes: Vec::new(),
    };
    let _ = builder.branch(
        params.origin,
        params.base_len,
        std::f64::consts::FRAC_PI_2,
        levels,
        0,
        None,
    );
    BranchTree {
        nodes: builder.nodes,
    }
}

struct TreeBuilder<'a> {
    params: &'a TreeParams,
    rng: Mulberry32,
    len_rand_by_level: Vec<f64>,
    angle_rand_by_level: Vec<f64>,
    uniform_jitter: Option<f64>,
    nodes: Vec<BranchNode>,
}

impl TreeBuilder<'_> {
    fn branch(
        &mut self,
        start: DVec2,
        len: f64,
        angle: f64,
        depth: usize,
        level: usize,
        parent: Option<NodeId>,
    ) -> Option<NodeId> {
        if depth == 0 || len < MIN_BRANCH_LEN {
            return None;
        }

        let end = DVec2::new(start.x + len * angle.cos(), start.y - len * angle.sin());
        let id = self.nodes.len();
        self.nodes.push(BranchNode {
            level,
            length: len,
            base_angle: angle,
            parent,
            children: Vec::new(),
            start,
            end,
        });

        let len_jitter = match self.params.length_jitter {
            LengthJitter::PerLevel => self.len_rand_by_level.get(level).copied().unwrap_or(0.0),
            LengthJitter::PerNode => (self.rng.next() - 0.5) * self.params.len_rand,
        };
        let next_len = len * (self.params.len_scale + len_jitter);

        let angle_jitter = match self.params.angle_jitter {
            AngleJitter::Uniform => self.uniform_jitter.unwrap_or(0.0),
            AngleJitter::PerLevel => self.angle_rand_by_level.get(level).copied().unwrap_or(0.0),
            AngleJitter::PerNode => (self.rng.next() - 0.5) * self.params.angle_rand * 0.15,
        };
        let spread = self.params.spread_deg.to_radians();

        let left = self.branch(
            end,
            next_len,
            angle - spread + angle_jitter,
            depth - 1,
            level + 1,
            Some(id),
        );
        let right = self.branch(
            end,
            next_len,
            angle + spread + angle_jitter,
            depth - 1,
            level + 1,
            Some(id),
        );
        // Post-order registration: both subtrees exist before the parent
        // records them.
        if let Some(l) = left {
            self.nodes[id].children.push(l);
        }
        if let Some(r) = right {
            self.nodes[id].children.push(r);
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> TreeParams {
        TreeParams {
            origin: DVec2::new(0.0, 0.0),
            base_len: 60.0,
            levels: 6,
            len_rand: 0.1,
            angle_rand: 10.0,
            ..TreeParams::default()
        }
    }

    #[test]
    fn tree_is_deterministic() {
        let a = build_tree(42, &params());
        let b = build_tree(42, &params());
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_give_different_trees() {
        let a = build_tree(1, &params());
        let b = build_tree(2, &params());
        assert_ne!(a, b);
    }

    #[test]
    fn parents_are_created_before_children_and_tree_is_acyclic() {
        let tree = build_tree(7, &params());
        assert!(!tree.is_empty());
        for (id, node) in tree.nodes.iter().enumerate() {
            if let Some(p) = node.parent {
                assert!(p < id, "parent {p} not created before node {id}");
            }
            for &c in &node.children {
                assert!(c > id, "child {c} created before parent {id}");
                assert_eq!(tree.nodes[c].parent, Some(id));
            }
        }
        // Walking parent links always terminates at a root.
        for (id, _) in tree.nodes.iter().enumerate() {
            let mut cur = id;
            let mut hops = 0;
            while let Some(p) = tree.nodes[cur].parent {
                cur = p;
                hops += 1;
                assert!(hops <= tree.nodes.len(), "cycle through node {id}");
            }
        }
    }

    #[test]
    fn leaves_have_empty_child_lists() {
        let tree = build_tree(3, &params());
        let leaf_count = tree.leaves().count();
        let empty_children = tree
            .nodes
            .iter()
            .filter(|n| n.children.is_empty())
            .count();
        assert_eq!(leaf_count, empty_children);
        assert!(leaf_count > 0);
    }

    #[test]
    fn children_follow_the_parent_endpoint() {
        let tree = build_tree(11, &params());
        for node in &tree.nodes {
            for &c in &node.children {
                assert_eq!(tree.nodes[c].start, node.end);
            }
        }
    }

    #[test]
    fn per_level_jitter_shares_decay_across_a_level() {
        let mut p = params();
        p.length_jitter = LengthJitter::PerLevel;
        p.len_rand = 0.2;
        let tree = build_tree(5, &p);
        // All nodes of one level share the same length.
        for level in 0..p.levels {
            let lengths: Vec<f64> = tree
                .nodes
                .iter()
                .filter(|n| n.level == level)
                .map(|n| n.length)
                .collect();
            for w in lengths.windows(2) {
                assert_eq!(w[0], w[1]);
            }
        }
    }

    #[test]
    fn uniform_jitter_reuses_one_perturbation() {
        let mut p = params();
        p.angle_jitter = AngleJitter::Uniform;
        p.angle_rand = 20.0;
        let tree = build_tree(9, &p);
        let spread = p.spread_deg.to_radians();
        // For every parent with two children the two child headings are
        // parent ± spread shifted by the same jitter, so their midpoint
        // offset from the parent angle is constant across the tree.
        let mut jitters = Vec::new();
        for node in &tree.nodes {
            if node.children.len() == 2 {
                let l = tree.nodes[node.children[0]].base_angle;
                let r = tree.nodes[node.children[1]].base_angle;
                assert!((r - l - 2.0 * spread).abs() < 1e-12);
                jitters.push((l + r) / 2.0 - node.base_angle);
            }
        }
        for w in jitters.windows(2) {
            assert!((w[0] - w[1]).abs() < 1e-9);
        }
    }

    #[test]
    fn degenerate_base_length_yields_empty_tree() {
        let mut p = params();
        p.base_len = 0.1;
        let tree = build_tree(42, &p);
        assert!(tree.is_empty());
    }

    #[test]
    fn levels_above_the_cap_are_clamped() {
        let mut p = params();
        p.levels = 64;
        p.len_scale = 0.95;
        p.len_rand = 0.0;
        let tree = build_tree(1, &p);
        let max_level = tree.nodes.iter().map(|n| n.level).max().unwrap_or(0);
        assert!(max_level < MAX_TREE_LEVELS);
    }
}
