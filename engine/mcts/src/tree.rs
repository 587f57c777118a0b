//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices; children point back to their parent
//! by index, so the tree owns every node outright.

use engine_core::Game;

use crate::node::{MctsNode, NodeId};

/// Visit statistics for one root move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildStats<M> {
    pub action: M,
    pub visits: u32,
    pub reward_sum: f64,
}

impl<M> ChildStats<M> {
    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward_sum / self.visits as f64
        }
    }
}

/// Robust-child choice: most visits, then higher mean reward, then the
/// earliest move in move order.
pub fn robust_child<M: Ord + Copy>(children: &[ChildStats<M>]) -> Option<ChildStats<M>> {
    let mut best: Option<ChildStats<M>> = None;
    for &child in children {
        let better = match best {
            None => true,
            Some(current) => {
                child.visits > current.visits
                    || (child.visits == current.visits
                        && (child.mean_reward() > current.mean_reward()
                            || (child.mean_reward() == current.mean_reward()
                                && child.action < current.action)))
            }
        };
        if better {
            best = Some(child);
        }
    }
    best
}

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<G: Game> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<G>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<G: Game> MctsTree<G> {
    /// Create a new tree holding only the root.
    pub fn new(root_state: G::State, untried: Vec<G::Move>, is_terminal: bool) -> Self {
        let root_node = MctsNode::new_root(root_state, untried, is_terminal);
        Self {
            nodes: vec![root_node],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<G> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<G> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: MctsNode<G>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Select the child with the highest UCB1 score.
    /// Ties keep the earliest child.
    pub fn select_child(&self, node_id: NodeId, exploration: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        // Pre-compute ln once instead of per-child comparison
        let ln_visits = (node.visit_count.max(1) as f64).ln();

        let mut best: Option<(NodeId, f64)> = None;
        for &(_, child_id) in &node.children {
            let score = self.get(child_id).ucb1(ln_visits, exploration);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child_id, score)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Add a child to a parent node.
    /// Returns the new child's NodeId.
    pub fn add_child(
        &mut self,
        parent_id: NodeId,
        action: G::Move,
        mover: G::Player,
        state: G::State,
        untried: Vec<G::Move>,
        is_terminal: bool,
    ) -> NodeId {
        let child = MctsNode::new_child(parent_id, action, mover, state, untried, is_terminal);
        let child_id = self.allocate(child);

        // Add to parent's children
        self.get_mut(parent_id).children.push((action, child_id));

        child_id
    }

    /// Backpropagate a reward from a leaf to the root.
    /// `reward` is for the player who moved into the leaf and is negated at
    /// each level on the way up.
    pub fn backpropagate(&mut self, leaf_id: NodeId, reward: f64) {
        let mut current_id = leaf_id;
        let mut current_reward = reward;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visit_count += 1;
            node.reward_sum += current_reward;

            // Negate for opponent's perspective
            current_reward = -current_reward;

            current_id = node.parent;
        }
    }

    /// Visit statistics for every root child, in creation order.
    pub fn root_children(&self) -> Vec<ChildStats<G::Move>> {
        self.get(self.root)
            .children
            .iter()
            .map(|&(action, id)| {
                let node = self.get(id);
                ChildStats {
                    action,
                    visits: node.visit_count,
                    reward_sum: node.reward_sum,
                }
            })
            .collect()
    }

    /// Robust child of the root, or None if the root has no children.
    pub fn best_child(&self) -> Option<ChildStats<G::Move>> {
        robust_child(&self.root_children())
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            max_depth: self.compute_max_depth(),
        }
    }

    fn compute_max_depth(&self) -> u32 {
        // Parents are always allocated before their children.
        let mut depth = vec![0u32; self.nodes.len()];
        let mut max_depth = 0;
        for (index, node) in self.nodes.iter().enumerate().skip(1) {
            depth[index] = depth[node.parent.0 as usize] + 1;
            max_depth = max_depth.max(depth[index]);
        }
        max_depth
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub max_depth: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_hadron::{Coord, Hadron, Player};

    fn c(x: usize, y: usize) -> Coord {
        Coord::new(x, y)
    }

    fn new_tree() -> (Hadron, MctsTree<Hadron>) {
        let game = Hadron::new(3, 3).unwrap();
        let root = game.initial();
        let moves = game.actions(&root);
        (game, MctsTree::new(root, moves, false))
    }

    #[test]
    fn test_new_tree() {
        let (_, tree) = new_tree();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), NodeId(0));

        let root = tree.get(tree.root());
        assert!(root.parent.is_none());
        assert_eq!(root.untried.len(), 9);
    }

    #[test]
    fn test_add_child() {
        let (game, mut tree) = new_tree();
        let state = game.apply_unchecked(&game.initial(), c(1, 1));

        let child_id = tree.add_child(tree.root(), c(1, 1), Player::Red, state, vec![], false);

        assert_eq!(tree.len(), 2);
        assert_eq!(child_id, NodeId(1));

        let root = tree.get(tree.root());
        assert_eq!(root.children, vec![(c(1, 1), NodeId(1))]);

        let child = tree.get(child_id);
        assert_eq!(child.parent, tree.root());
        assert_eq!(child.action, Some(c(1, 1)));
        assert_eq!(child.mover, Some(Player::Red));
    }

    #[test]
    fn test_backpropagate() {
        let (game, mut tree) = new_tree();
        let s1 = game.apply_unchecked(&game.initial(), c(0, 0));
        let s2 = game.apply_unchecked(&s1, c(2, 2));

        // Create a chain: root -> child -> grandchild
        let child_id = tree.add_child(tree.root(), c(0, 0), Player::Red, s1, vec![], false);
        let grandchild_id = tree.add_child(child_id, c(2, 2), Player::Blue, s2, vec![], false);

        // Blue, who moved into the grandchild, won the rollout
        tree.backpropagate(grandchild_id, 1.0);

        // Check visits
        assert_eq!(tree.get(grandchild_id).visit_count, 1);
        assert_eq!(tree.get(child_id).visit_count, 1);
        assert_eq!(tree.get(tree.root()).visit_count, 1);

        // Check rewards (negated at each level)
        assert!((tree.get(grandchild_id).reward_sum - 1.0).abs() < 1e-12);
        assert!((tree.get(child_id).reward_sum + 1.0).abs() < 1e-12);
        assert!((tree.get(tree.root()).reward_sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_select_child_prefers_unvisited_then_first() {
        let (game, mut tree) = new_tree();
        let root_state = game.initial();
        let a = tree.add_child(
            tree.root(),
            c(0, 0),
            Player::Red,
            game.apply_unchecked(&root_state, c(0, 0)),
            vec![],
            false,
        );
        let b = tree.add_child(
            tree.root(),
            c(1, 0),
            Player::Red,
            game.apply_unchecked(&root_state, c(1, 0)),
            vec![],
            false,
        );
        let d = tree.add_child(
            tree.root(),
            c(2, 0),
            Player::Red,
            game.apply_unchecked(&root_state, c(2, 0)),
            vec![],
            false,
        );

        tree.backpropagate(a, 1.0);
        // b and d unvisited: the earlier one wins the tie
        assert_eq!(tree.select_child(tree.root(), 1.4), Some(b));

        tree.backpropagate(b, -1.0);
        assert_eq!(tree.select_child(tree.root(), 1.4), Some(d));

        tree.backpropagate(d, 1.0);
        // a and d now score identically; a was created first
        assert_eq!(tree.select_child(tree.root(), 1.4), Some(a));
    }

    #[test]
    fn test_robust_child_ordering() {
        let stats = |x: usize, visits: u32, reward_sum: f64| ChildStats {
            action: c(x, 0),
            visits,
            reward_sum,
        };

        // Most visits wins outright
        let best = robust_child(&[stats(0, 5, 5.0), stats(1, 9, -3.0)]).unwrap();
        assert_eq!(best.action, c(1, 0));

        // Equal visits: higher mean
        let best = robust_child(&[stats(0, 9, 1.0), stats(1, 9, 3.0)]).unwrap();
        assert_eq!(best.action, c(1, 0));

        // Full tie: earliest move, regardless of creation order
        let best = robust_child(&[stats(2, 9, 3.0), stats(1, 9, 3.0)]).unwrap();
        assert_eq!(best.action, c(1, 0));

        assert!(robust_child::<Coord>(&[]).is_none());
    }

    #[test]
    fn test_tree_stats() {
        let (game, mut tree) = new_tree();
        let s1 = game.apply_unchecked(&game.initial(), c(0, 0));
        let s2 = game.apply_unchecked(&s1, c(2, 2));
        let child = tree.add_child(tree.root(), c(0, 0), Player::Red, s1, vec![], false);
        tree.add_child(child, c(2, 2), Player::Blue, s2, vec![], false);

        let stats = tree.stats();
        assert_eq!(stats.total_nodes, 3);
        assert_eq!(stats.max_depth, 2);
    }
}
