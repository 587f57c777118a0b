//! MCTS tree node representation.
//!
//! Each node holds the position reached by playing `action` from its parent.
//! Rewards are accumulated from the point of view of the player who made
//! that move, so a parent picks the child with the best mean reward directly.

use engine_core::Game;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug)]
pub struct MctsNode<G: Game> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Move that led here from the parent (None for root)
    pub action: Option<G::Move>,

    /// Player who made `action` (None for root)
    pub mover: Option<G::Player>,

    /// Position at this node
    pub state: G::State,

    /// Legal moves not yet expanded into children
    pub untried: Vec<G::Move>,

    /// Expanded children in creation order
    pub children: Vec<(G::Move, NodeId)>,

    /// Number of simulations that passed through this node
    pub visit_count: u32,

    /// Sum of rewards for `mover` over those simulations
    pub reward_sum: f64,

    /// Whether the position is game over
    pub is_terminal: bool,
}

impl<G: Game> MctsNode<G> {
    /// Create a new root node.
    pub fn new_root(state: G::State, untried: Vec<G::Move>, is_terminal: bool) -> Self {
        Self {
            parent: NodeId::NONE,
            action: None,
            mover: None,
            state,
            untried,
            children: Vec::new(),
            visit_count: 0,
            reward_sum: 0.0,
            is_terminal,
        }
    }

    /// Create a new child node.
    pub fn new_child(
        parent: NodeId,
        action: G::Move,
        mover: G::Player,
        state: G::State,
        untried: Vec<G::Move>,
        is_terminal: bool,
    ) -> Self {
        Self {
            parent,
            action: Some(action),
            mover: Some(mover),
            state,
            untried,
            children: Vec::new(),
            visit_count: 0,
            reward_sum: 0.0,
            is_terminal,
        }
    }

    /// Mean reward for `mover`. Returns 0.0 if never visited.
    #[inline]
    pub fn mean_reward(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.reward_sum / self.visit_count as f64
        }
    }

    /// UCB1 score used by the parent when choosing among its children:
    /// `mean + c * sqrt(ln(N_parent) / n)`.
    ///
    /// Unvisited nodes score infinity so every child is tried once.
    /// Takes a pre-computed `ln(N_parent)` so siblings share one logarithm.
    #[inline]
    pub fn ucb1(&self, ln_parent_visits: f64, exploration: f64) -> f64 {
        if self.visit_count == 0 {
            return f64::INFINITY;
        }
        let n = self.visit_count as f64;
        self.mean_reward() + exploration * (ln_parent_visits / n).sqrt()
    }

    /// Every legal move has a child.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// Selection stops here: the node is terminal or still has untried moves.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.is_terminal || !self.is_fully_expanded()
    }
}
