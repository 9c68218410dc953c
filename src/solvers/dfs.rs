use std::time::Instant;

use super::{SearchResult, reconstruct_path};
use crate::maze::Maze;

/// Depth-first search with an explicit stack. Finds *a* path, not necessarily the shortest.
pub fn solve_dfs(maze: &Maze) -> SearchResult {
    let timer = Instant::now();
    let (start, goal) = (maze.start(), maze.goal());

    // Cells are marked visited when pushed, so the stack never holds duplicates
    let mut visited = vec![false; maze.len()];
    let mut parents = vec![None; maze.len()];
    visited[maze.ravel_index(start)] = true;

    let mut stack = vec![start];
    let mut nodes_expanded = 0;
    let mut peak_frontier = 1;
    let mut closed_order = Vec::new();

    while let Some(current) = stack.pop() {
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
                stack.push(next);
            }
        }
        peak_frontier = peak_frontier.max(stack.len());
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
