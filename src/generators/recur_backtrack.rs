use rand::Rng;

use crate::{error::ConstraintViolation, maze::Maze};

/// Carves a spanning tree into a fully walled maze with iterative recursive backtracking,
/// starting from the maze's start cell.
///
/// Returns the number of passages carved, which is always `height * width - 1`.
pub fn recursive_backtrack<R: Rng>(
    maze: &mut Maze,
    rng: &mut R,
) -> Result<usize, ConstraintViolation> {
    let start = maze.start();
    let mut visited = vec![false; maze.len()];
    visited[maze.ravel_index(start)] = true;

    // The stack will keep only carved cells
    let mut stack = vec![start];
    let mut carved = 0;

    while let Some(&cell) = stack.last() {
        let options = maze
            .adjacent(cell)
            .filter(|&(_, next)| !visited[maze.ravel_index(next)])
            .collect::<Vec<_>>();

        if options.is_empty() {
            // Dead end, backtrack
            stack.pop();
            continue;
        }

        let (direction, next) = options[rng.random_range(0..options.len())];
        maze.remove_wall(cell, direction)?;
        carved += 1;
        visited[maze.ravel_index(next)] = true;
        // Carve the maze in that neighbor's direction
        stack.push(next);
    }

    Ok(carved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Direction;
    use rand::{SeedableRng, rngs::StdRng};

    fn reachable_count(maze: &Maze) -> usize {
        let mut seen = vec![false; maze.len()];
        let mut stack = vec![maze.start()];
        seen[maze.ravel_index(maze.start())] = true;
        let mut count = 1;
        while let Some(cell) = stack.pop() {
            for next in maze.neighbors(cell) {
                let idx = maze.ravel_index(next);
                if !seen[idx] {
                    seen[idx] = true;
                    count += 1;
                    stack.push(next);
                }
            }
        }
        count
    }

    #[test]
    fn test_carves_spanning_tree() {
        for seed in 0..10 {
            let mut maze = Maze::new(7, 9).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let carved = recursive_backtrack(&mut maze, &mut rng).unwrap();
            assert_eq!(carved, 7 * 9 - 1);
            assert_eq!(maze.open_passages(), 7 * 9 - 1);
            assert_eq!(reachable_count(&maze), 7 * 9);
        }
    }

    #[test]
    fn test_carves_from_custom_start() {
        let mut maze = Maze::with_endpoints(4, 4, (2, 3), (0, 0)).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        recursive_backtrack(&mut maze, &mut rng).unwrap();
        assert_eq!(reachable_count(&maze), 16);
    }

    #[test]
    fn test_single_cell_and_corridor() {
        let mut maze = Maze::new(1, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(recursive_backtrack(&mut maze, &mut rng), Ok(0));

        // A one-row maze has only one spanning tree
        let mut maze = Maze::new(1, 5).unwrap();
        recursive_backtrack(&mut maze, &mut rng).unwrap();
        for col in 0..4 {
            assert!(!maze.has_wall((0, col), Direction::East));
        }
    }
}
