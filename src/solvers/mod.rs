use std::time::Duration;

mod astar;
mod bfs;
mod dfs;
mod heuristic;

pub use astar::{solve_astar, solve_astar_with};
pub use bfs::solve_bfs;
pub use dfs::solve_dfs;
pub use heuristic::{Heuristic, euclidean, manhattan};

use crate::maze::{Cell, Maze};

/// Outcome of one frontier search over a maze.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// Cells from start to goal inclusive. Empty when the goal is unreachable.
    pub path: Vec<Cell>,
    /// Number of cells taken off the frontier and expanded.
    pub nodes_expanded: usize,
    /// Largest frontier size seen during the search.
    pub peak_frontier: usize,
    /// Cells in the order they were expanded, for animation consumers.
    pub closed_order: Vec<Cell>,
    pub runtime: Duration,
}

impl SearchResult {
    /// Number of moves along the path.
    pub fn moves(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn is_solved(&self) -> bool {
        !self.path.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Dfs,
    Bfs,
    AStar(Heuristic),
}

impl Solver {
    pub const ALL: [Solver; 4] = [
        Solver::Dfs,
        Solver::Bfs,
        Solver::AStar(Heuristic::Manhattan),
        Solver::AStar(Heuristic::Euclidean),
    ];
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::AStar(heuristic) => write!(f, "A* Search ({})", heuristic),
        }
    }
}

pub fn solve_maze(maze: &Maze, solver: Solver) -> SearchResult {
    let result = match solver {
        Solver::Dfs => solve_dfs(maze),
        Solver::Bfs => solve_bfs(maze),
        Solver::AStar(heuristic) => solve_astar(maze, heuristic),
    };
    tracing::debug!(
        "[solve] {}: {} moves, {} expanded, peak frontier {}",
        solver,
        result.moves(),
        result.nodes_expanded,
        result.peak_frontier
    );
    result
}

/// Walks parent pointers back from the goal and reverses them into a start-to-goal path.
/// Returns an empty path if the goal was never reached.
fn reconstruct_path(maze: &Maze, parents: &[Option<Cell>], goal_reached: bool) -> Vec<Cell> {
    if !goal_reached {
        return Vec::new();
    }
    let mut path = vec![maze.goal()];
    let mut current = maze.goal();
    while current != maze.start() {
        match parents[maze.ravel_index(current)] {
            Some(parent) => {
                path.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
