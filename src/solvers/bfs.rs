use std::{collections::VecDeque, time::Instant};

use super::{SearchResult, reconstruct_path};
use crate::maze::Maze;

/// Breadth-first search. Every move costs the same, so the returned path has the
/// fewest possible moves.
pub fn solve_bfs(maze: &Maze) -> SearchResult {
    let timer = Instant::now();
    let (start, goal) = (maze.start(), maze.goal());

    let mut visited = vec![false; maze.len()];
    let mut parents = vec![None; maze.len()];
    visited[maze.ravel_index(start)] = true;

    let mut queue = VecDeque::from([start]);
    let mut nodes_expanded = 0;
    let mut peak_frontier = 1;
    let mut closed_order = Vec::new();

    while let Some(current) = queue.pop_front() {
        nodes_expanded += 1;
        closed_order.push(current);
        if current == goal {
            break;
        }

        for next in maze.neighbors(current) {
            let idx = maze.ravel_index(next);
            if !visited[idx] {
                visited[idx] = true;
                parents[idx] = Some(current);
                queue.push_back(next);
            }
        }
        peak_frontier = peak_frontier.max(queue.len());
    }

    let path = reconstruct_path(maze, &parents, visited[maze.ravel_index(goal)]);
    SearchResult {
        path,
        nodes_expanded,
        peak_frontier,
        closed_order,
        runtime: timer.elapsed(),
    }
}
