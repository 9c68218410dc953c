use rand::{Rng, seq::SliceRandom};

use crate::{
    error::ConstraintViolation,
    maze::{Cell, Direction, Maze},
};

/// Interior wall between two adjacent cells, named from the cell above or to the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edge {
    cell: Cell,
    direction: Direction,
}

/// Opens a fraction of the remaining interior walls to introduce cycles.
///
/// Each standing wall between two in-bounds cells is listed once, the list is shuffled,
/// and the first `floor(openness * count)` entries are removed. Walls are only ever
/// removed, so connectivity of the carved tree is preserved.
///
/// Returns the number of walls removed.
pub fn inject_loops<R: Rng>(
    maze: &mut Maze,
    openness: f64,
    rng: &mut R,
) -> Result<usize, ConstraintViolation> {
    // Only look East and South so the symmetric side of each wall is not listed twice
    let mut edges: Vec<Edge> = maze
        .all_cells()
        .flat_map(|cell| {
            [Direction::East, Direction::South]
                .into_iter()
                .map(move |direction| Edge { cell, direction })
        })
        .filter(|edge| {
            maze.step(edge.cell, edge.direction).is_some()
                && maze.has_wall(edge.cell, edge.direction)
        })
        .collect();

    edges.shuffle(rng);

    let quota = (openness * edges.len() as f64).floor() as usize;
    let mut removed = 0;
    for edge in edges.into_iter().take(quota) {
        if maze.has_wall(edge.cell, edge.direction) {
            maze.remove_wall(edge.cell, edge.direction)?;
            removed += 1;
        }
    }
    Ok(removed)
}
