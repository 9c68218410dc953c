use std::{cmp::Reverse, collections::BinaryHeap, time::Instant};

use ordered_float::OrderedFloat;

use super::{Heuristic, SearchResult, reconstruct_path};
use crate::maze::{Cell, Maze};

/// Entry in the open set. Ordered by `f = g + h`, then by push order, and never by cell.
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    priority: OrderedFloat<f64>,
    sequence: u64,
    cell: Cell,
}

impl OpenEntry {
    fn key(&self) -> (OrderedFloat<f64>, u64) {
        (self.priority, self.sequence)
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

pub fn solve_astar(maze: &Maze, heuristic: Heuristic) -> SearchResult {
    solve_astar_with(maze, |cell, goal| heuristic.estimate(cell, goal))
}

/// A* search guided by `heuristic(cell, goal)`, which must be non-negative and should be
/// admissible for the path to be optimal.
///
/// Improving a cell's cost pushes a fresh entry instead of updating the old one in place.
/// Stale entries are skipped when popped, since the cell was already closed through a
/// cheaper or equal route.
pub fn solve_astar_with<H>(maze: &Maze, heuristic: H) -> SearchResult
where
    H: Fn(Cell, Cell) -> f64,
{
    let timer = Instant::now();
    let (start, goal) = (maze.start(), maze.goal());

    // Using Reverse to turn the max-heap into a min-heap
    let mut open: BinaryHeap<Reverse<OpenEntry>> = BinaryHeap::new();
    let mut sequence = 0;
    // Best-known cost from start to each cell
    let mut costs: Vec<Option<usize>> = vec![None; maze.len()];
    let mut parents = vec![None; maze.len()];
    let mut closed = vec![false; maze.len()];

    costs[maze.ravel_index(start)] = Some(0);
    open.push(Reverse(OpenEntry {
        priority: OrderedFloat(heuristic(start, goal)),
        sequence,
        cell: start,
    }));

    let mut nodes_expanded = 0;
    let mut peak_frontier = 1;
    let mut closed_order = Vec::new();

    while let Some(Reverse(entry)) = open.pop() {
        let current = entry.cell;
        let current_idx = maze.ravel_index(current);
        if closed[current_idx] {
            continue;
        }
        closed[current_idx] = true;
        nodes_expanded += 1;
        closed_order.push(current);
        // Stop only once the goal is popped, not when it is first discovered
        if current == goal {
            break;
        }

        let Some(current_cost) = costs[current_idx] else {
            continue;
        };
        let new_cost = current_cost + 1; // Uniform cost for each step

        for next in maze.neighbors(current) {
            let idx = maze.ravel_index(next);
            let is_cheaper = match costs[idx] {
                Some(existing_cost) => new_cost < existing_cost,
                None => true,
            };
            if is_cheaper {
                costs[idx] = Some(new_cost);
                parents[idx] = Some(current);
                sequence += 1;
                open.push(Reverse(OpenEntry {
                    priority: OrderedFloat(new_cost as f64 + heuristic(next, goal)),
                    sequence,
                    cell: next,
                }));
            }
        }
        peak_frontier = peak_frontier.max(open.len());
    }

    let path = reconstruct_path(maze, &parents, closed[maze.ravel_index(goal)]);
    SearchResult {
        path,
        nodes_expanded,
        peak_frontier,
        closed_order,
        runtime: timer.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::{fixtures, solve_bfs};

    #[test]
    fn test_ties_break_by_insertion_order() {
        let a = OpenEntry {
            priority: OrderedFloat(3.0),
            sequence: 1,
            cell: (9, 9),
        };
        let b = OpenEntry {
            priority: OrderedFloat(3.0),
            sequence: 2,
            cell: (0, 0),
        };
        let mut heap = BinaryHeap::from([Reverse(b), Reverse(a)]);
        assert_eq!(heap.pop().map(|Reverse(e)| e.cell), Some((9, 9)));
        assert_eq!(heap.pop().map(|Reverse(e)| e.cell), Some((0, 0)));
    }

    #[test]
    fn test_manhattan_expands_less_than_bfs_on_open_grid() {
        let maze = fixtures::open_walls(Maze::with_endpoints(8, 8, (0, 0), (0, 7)).unwrap());
        let bfs = solve_bfs(&maze);
        let astar = solve_astar(&maze, Heuristic::Manhattan);
        assert_eq!(astar.moves(), 7);
        assert_eq!(astar.moves(), bfs.moves());
        // Only the top row has f = 7
        assert_eq!(astar.nodes_expanded, 8);
        assert!(astar.nodes_expanded < bfs.nodes_expanded);
    }

    #[test]
    fn test_zero_heuristic_is_uniform_cost() {
        let maze = fixtures::snake();
        let result = solve_astar_with(&maze, |_, _| 0.0);
        assert_eq!(result.moves(), 8);
        assert_eq!(result.nodes_expanded, 9);
    }

    #[test]
    fn test_closed_cells_are_expanded_once() {
        let maze = fixtures::open_grid(5, 5);
        let result = solve_astar(&maze, Heuristic::Euclidean);
        let mut seen = result.closed_order.clone();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), result.closed_order.len());
        assert_eq!(result.moves(), 8);
    }
}
