//! Observer port - the engine's output boundary.
//!
//! Every externally visible search event flows through this trait. The
//! engine calls observers synchronously from its loop and never reads
//! anything back; a display, a log collector, and a test recorder are
//! all just different implementations.

use crate::board::Board;
use crate::moves::Move;

/// Summary of one child produced during an expansion.
#[derive(Debug, Clone, Copy)]
pub struct ChildSummary {
    pub moved: Move,
    pub f: u32,
    pub g: u32,
    pub h: u32,
    pub board: Board,
    /// Whether the child entered the frontier. A child whose board was
    /// already expanded is reported but not enqueued.
    pub enqueued: bool,
}

/// Summary of one pending node in the frontier snapshot.
#[derive(Debug, Clone, Copy)]
pub struct NodeSummary {
    pub f: u32,
    pub g: u32,
    pub h: u32,
    pub depth: usize,
    pub board: Board,
    /// Move that produced the node; `None` for the root.
    pub moved: Option<Move>,
}

/// Observer for search events.
///
/// Per expansion the engine calls `on_node_expanded`, then either
/// `on_goal_reached` (and the run ends) or `on_children_generated`
/// followed by `on_frontier_snapshot`. `on_search_exhausted` fires
/// once when the run ends without reaching the goal.
pub trait SearchObserver {
    /// A node was popped and expanded; `index` is 1-based.
    fn on_node_expanded(&mut self, _index: usize, _board: &Board) {}

    /// The expanded board equals the goal; `total_cost` is its
    /// cumulative move cost from the start.
    fn on_goal_reached(&mut self, _total_cost: u32) {}

    /// Children produced for the turn's tile, in direction order.
    /// Empty when the tile had no legal move.
    fn on_children_generated(&mut self, _children: &[ChildSummary]) {}

    /// Ordered snapshot of generated-but-unexpanded nodes, emitted
    /// after every non-terminal expansion.
    fn on_frontier_snapshot(&mut self, _entries: &[NodeSummary]) {}

    /// The frontier drained or the expansion limit was hit.
    fn on_search_exhausted(&mut self) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SearchObserver for NullObserver {}
