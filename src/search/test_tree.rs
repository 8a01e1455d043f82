//! Explicit game trees for exercising the search on hand-picked shapes.

use std::sync::Arc;

use rand::Rng;

use crate::isolation::{GameState, Player};

struct TreeNode {
    children: Vec<usize>,

    // first player's payoff, only for terminal nodes
    utility: Option<f64>,

    mobility: [usize; 2],
}

/// Position in an explicit tree. Actions are child indices; each player's "location" is the player itself, with
/// as many liberties as the node's mobility entry says.
#[derive(Clone)]
pub struct TreeGame {
    nodes: Arc<Vec<TreeNode>>,
    current: usize,
    ply_count: u32,
}

impl GameState for TreeGame {
    type Action = usize;
    type Loc = Player;

    fn ply_count(&self) -> u32 {
        self.ply_count
    }

    fn loc(&self, player: Player) -> Option<Player> {
        Some(player)
    }

    fn actions(&self) -> Vec<usize> {
        (0..self.nodes[self.current].children.len()).collect()
    }

    fn result(&self, action: usize) -> Self {
        TreeGame {
            nodes: Arc::clone(&self.nodes),
            current: self.nodes[self.current].children[action],
            ply_count: self.ply_count + 1,
        }
    }

    fn terminal_test(&self) -> bool {
        self.nodes[self.current].utility.is_some()
    }

    fn utility(&self, player: Player) -> f64 {
        match (self.nodes[self.current].utility, player) {
            (Some(utility), Player::First) => utility,
            (Some(utility), Player::Second) => -utility,
            (None, _) => 0.0,
        }
    }

    fn liberties(&self, loc: Option<Player>) -> Vec<Player> {
        match loc {
            Some(player) => vec![player; self.nodes[self.current].mobility[player.index()]],
            None => Vec::new(),
        }
    }
}

/*====================================================================================================================*/

#[derive(Default)]
pub struct TreeBuilder {
    nodes: Vec<TreeNode>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder::default()
    }

    pub fn node(&mut self, mobility: [usize; 2]) -> usize {
        self.nodes.push(TreeNode {
            children: Vec::new(),
            utility: None,
            mobility,
        });
        self.nodes.len() - 1
    }

    /// terminal node worth `utility` to the first player
    pub fn terminal(&mut self, utility: f64) -> usize {
        self.terminal_with_mobility(utility, [0, 0])
    }

    pub fn terminal_with_mobility(&mut self, utility: f64, mobility: [usize; 2]) -> usize {
        let id = self.node(mobility);
        self.nodes[id].utility = Some(utility);
        id
    }

    /// `len` single-child nodes in a row, all with the same mobility; returns the head
    pub fn chain(&mut self, mobility: [usize; 2], len: usize) -> usize {
        assert!(len > 0);

        let head = self.node(mobility);
        let mut last = head;
        for _ in 1..len {
            let next = self.node(mobility);
            self.edge(last, next);
            last = next;
        }
        head
    }

    pub fn edge(&mut self, parent: usize, child: usize) {
        self.nodes[parent].children.push(child);
    }

    pub fn build(self, root: usize) -> TreeGame {
        TreeGame {
            nodes: Arc::new(self.nodes),
            current: root,
            ply_count: 0,
        }
    }
}

/// Random tree whose non-terminal nodes above `height` all have children, so any search of depth `<= height`
/// only ever stops at terminals or at the depth cutoff.
pub fn random_tree(rng: &mut impl Rng, height: u32) -> TreeGame {
    fn grow(tree: &mut TreeBuilder, rng: &mut impl Rng, level: u32, height: u32) -> usize {
        let mobility = [rng.gen_range(0..9), rng.gen_range(0..9)];

        if level > 0 && rng.gen_bool(0.15) {
            let utility = match rng.gen_range(0..3) {
                0 => f64::INFINITY,
                1 => f64::NEG_INFINITY,
                _ => rng.gen_range(-20..=20) as f64,
            };
            return tree.terminal_with_mobility(utility, mobility);
        }

        let id = tree.node(mobility);

        if level < height {
            for _ in 0..rng.gen_range(1..=3) {
                let child = grow(tree, rng, level + 1, height);
                tree.edge(id, child);
            }
        }

        id
    }

    let mut tree = TreeBuilder::new();
    let root = grow(&mut tree, rng, 0, height);
    tree.build(root)
}
