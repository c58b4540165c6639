//! Bounded best-first search over turn-cycled tile moves.
//!
//! Each round the engine pops the lowest-f frontier node, compares it
//! against the goal, and expands it by moving the tile whose turn it
//! is (1, 2, 3, cycling). The run ends when an expanded board matches
//! the goal or after a fixed number of expansions, whichever comes
//! first.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::time::Instant;

use crate::board::{Board, Tile};
use crate::error::Result;
use crate::heuristic::manhattan;
use crate::moves::{expand, Move};
use crate::observer::{ChildSummary, NodeSummary, SearchObserver};

/// Index of a node in the engine's arena.
pub type NodeId = usize;

/// When a generated child may enter the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupPolicy {
    /// Push any child whose board has not been expanded yet, even if
    /// an equal board is already waiting in the frontier. The default;
    /// the emitted event log depends on this looseness.
    #[default]
    ExploredOnly,
    /// Additionally skip a child whose board is already pending in
    /// the frontier.
    ExploredAndFrontier,
}

/// Configuration for a search run.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Hard cap on expansions; the engine never expands past it.
    pub expansion_limit: usize,
    pub dedup: DedupPolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            expansion_limit: 10,
            dedup: DedupPolicy::ExploredOnly,
        }
    }
}

/// Terminal state of a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// An expanded board matched the goal.
    Succeeded,
    /// The frontier drained or the expansion limit was reached.
    ExpansionLimitReached,
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    /// Number of expansions performed.
    pub expansions: usize,
    /// Cumulative move cost of the goal node, when reached.
    pub total_cost: Option<u32>,
    pub time_elapsed_ms: u64,
}

impl SearchReport {
    pub fn goal_reached(&self) -> bool {
        self.outcome == SearchOutcome::Succeeded
    }
}

/// A node in the search tree. Created once, never mutated.
#[derive(Debug, Clone)]
struct SearchNode {
    board: Board,
    /// Arena index of the node this was expanded from. Kept for path
    /// reconstruction; success reporting does not read it.
    #[allow(dead_code)]
    parent: Option<NodeId>,
    /// Move that produced the node; `None` for the root.
    moved: Option<Move>,
    depth: usize,
    g: u32,
    h: u32,
    f: u32,
    /// Creation order, used as the frontier tie-break.
    seq: u64,
}

/// Frontier entry ordered by (f, seq): lowest f first, FIFO on equal f.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    f: u32,
    seq: u64,
    id: NodeId,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, the search wants min-f.
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Search state for a single run.
///
/// Owns the node arena, frontier, explored set, and snapshot; build
/// one per (start, goal) pair and discard it after `run`.
pub struct SearchEngine {
    goal: Board,
    config: SolverConfig,
    nodes: Vec<SearchNode>,
    frontier: BinaryHeap<FrontierEntry>,
    /// Generated-but-unexpanded nodes in generation order. Mirrors the
    /// frontier for display, except that a child withheld by the dedup
    /// policy stays listed (it is never popped).
    snapshot: Vec<NodeId>,
    explored: HashSet<Board>,
    expansions: usize,
    next_seq: u64,
}

impl SearchEngine {
    /// Root the search at `start`.
    pub fn new(start: Board, goal: Board, config: SolverConfig) -> Result<Self> {
        let h = manhattan(&start, &goal)?;
        let root = SearchNode {
            board: start,
            parent: None,
            moved: None,
            depth: 0,
            g: 0,
            h,
            f: h,
            seq: 0,
        };
        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierEntry { f: h, seq: 0, id: 0 });
        Ok(Self {
            goal,
            config,
            nodes: vec![root],
            frontier,
            snapshot: vec![0],
            explored: HashSet::new(),
            expansions: 0,
            next_seq: 1,
        })
    }

    /// Number of expansions performed so far.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Ordered summaries of every node still listed as pending.
    pub fn frontier_snapshot(&self) -> Vec<NodeSummary> {
        self.snapshot.iter().map(|&id| self.summarize(id)).collect()
    }

    /// Run the search to a terminal state.
    pub fn run(&mut self, observer: &mut dyn SearchObserver) -> Result<SearchReport> {
        let start_time = Instant::now();

        while let Some(id) = self.pop_next() {
            let (board, g, depth) = {
                let node = &self.nodes[id];
                (node.board, node.g, node.depth)
            };
            self.explored.insert(board);
            self.expansions += 1;
            observer.on_node_expanded(self.expansions, &board);

            if board == self.goal {
                observer.on_goal_reached(g);
                return Ok(SearchReport {
                    outcome: SearchOutcome::Succeeded,
                    expansions: self.expansions,
                    total_cost: Some(g),
                    time_elapsed_ms: start_time.elapsed().as_millis() as u64,
                });
            }

            let tile = turn_tile(self.expansions);
            let children = expand(&board, &self.goal, tile)?;

            let mut reports = Vec::with_capacity(children.len());
            for child in children {
                let g_child = g + child.cost;
                let f_child = g_child + child.heuristic;
                let moved = Move {
                    tile,
                    direction: child.direction,
                };
                let child_id = self.nodes.len();
                self.nodes.push(SearchNode {
                    board: child.board,
                    parent: Some(id),
                    moved: Some(moved),
                    depth: depth + 1,
                    g: g_child,
                    h: child.heuristic,
                    f: f_child,
                    seq: self.next_seq,
                });
                self.next_seq += 1;
                self.snapshot.push(child_id);
                let enqueued = self.admit(child_id);
                reports.push(ChildSummary {
                    moved,
                    f: f_child,
                    g: g_child,
                    h: child.heuristic,
                    board: child.board,
                    enqueued,
                });
            }
            observer.on_children_generated(&reports);
            observer.on_frontier_snapshot(&self.frontier_snapshot());
        }

        observer.on_search_exhausted();
        Ok(SearchReport {
            outcome: SearchOutcome::ExpansionLimitReached,
            expansions: self.expansions,
            total_cost: None,
            time_elapsed_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    /// Pop the next node to expand, or `None` at a termination point.
    ///
    /// The limit check comes first: once the cap is hit nothing more is
    /// popped no matter what the frontier still holds. There is no
    /// explored-check on pop, so a board that entered the frontier
    /// twice is expanded twice.
    fn pop_next(&mut self) -> Option<NodeId> {
        if self.expansions >= self.config.expansion_limit {
            return None;
        }
        let entry = self.frontier.pop()?;
        if let Some(pos) = self.snapshot.iter().position(|&id| id == entry.id) {
            self.snapshot.remove(pos);
        }
        Some(entry.id)
    }

    /// Apply the dedup policy; returns whether the child was enqueued.
    fn admit(&mut self, id: NodeId) -> bool {
        let board = self.nodes[id].board;
        if self.explored.contains(&board) {
            return false;
        }
        if self.config.dedup == DedupPolicy::ExploredAndFrontier
            && self
                .frontier
                .iter()
                .any(|entry| self.nodes[entry.id].board == board)
        {
            return false;
        }
        let (f, seq) = (self.nodes[id].f, self.nodes[id].seq);
        self.frontier.push(FrontierEntry { f, seq, id });
        true
    }

    fn summarize(&self, id: NodeId) -> NodeSummary {
        let node = &self.nodes[id];
        NodeSummary {
            f: node.f,
            g: node.g,
            h: node.h,
            depth: node.depth,
            board: node.board,
            moved: node.moved,
        }
    }
}

/// Tile whose turn it is on the given 1-based expansion index: the
/// first expansion always moves tile 1.
fn turn_tile(expansion_index: usize) -> Tile {
    Tile::ALL[(expansion_index - 1) % Tile::ALL.len()]
}

/// Run a full search from `start` toward `goal` under `config`.
pub fn solve(
    start: Board,
    goal: Board,
    config: SolverConfig,
    observer: &mut dyn SearchObserver,
) -> Result<SearchReport> {
    SearchEngine::new(start, goal, config)?.run(observer)
}
