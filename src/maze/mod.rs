pub mod cell;
mod direction;

pub use cell::{Cell, Walls};
pub use direction::Direction;

use crate::error::{ConfigError, ConstraintViolation, Endpoint};

/// A rectangular maze of `height` x `width` cells with a wall on each side of every cell.
///
/// Walls are stored as one 4-bit mask per cell in a flat row-major array. Removing a wall
/// always clears both sides of the shared edge, so the two masks of adjacent cells agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    walls: Box<[Walls]>,
    height: usize,
    width: usize,
    start: Cell,
    goal: Cell,
}

impl Maze {
    /// Creates a fully walled maze with the start at the top-left corner and the goal
    /// at the bottom-right corner.
    pub fn new(height: usize, width: usize) -> Result<Self, ConfigError> {
        let goal = (height.saturating_sub(1), width.saturating_sub(1));
        Maze::with_endpoints(height, width, (0, 0), goal)
    }

    /// Creates a fully walled maze with explicit start and goal cells.
    pub fn with_endpoints(
        height: usize,
        width: usize,
        start: Cell,
        goal: Cell,
    ) -> Result<Self, ConfigError> {
        if height == 0 || width == 0 {
            return Err(ConfigError::InvalidDimensions { height, width });
        }
        let walls = vec![Walls::CLOSED; height * width].into_boxed_slice();
        let maze = Maze {
            walls,
            height,
            width,
            start,
            goal,
        };
        for (endpoint, cell) in [(Endpoint::Start, start), (Endpoint::Goal, goal)] {
            if !maze.is_in_bounds(cell) {
                return Err(ConfigError::EndpointOutOfBounds {
                    endpoint,
                    cell,
                    height,
                    width,
                });
            }
        }
        Ok(maze)
    }

    /// Returns the height of the maze in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the width of the maze in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    /// Always false: a maze has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// Linear row-major index of an in-bounds cell.
    pub fn ravel_index(&self, cell: Cell) -> usize {
        cell.0 * self.width + cell.1
    }

    /// Inverse of [`Maze::ravel_index`].
    pub fn unravel_index(&self, index: usize) -> Cell {
        (index / self.width, index % self.width)
    }

    /// Checks if the given cell is within the bounds of the maze.
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.0 < self.height && cell.1 < self.width
    }

    /// The cell one step away in `direction`, if it lies inside the maze.
    /// Walls are ignored.
    pub fn step(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        let (dr, dc) = direction.delta();
        let next = (
            cell.0.checked_add_signed(dr)?,
            cell.1.checked_add_signed(dc)?,
        );
        self.is_in_bounds(next).then_some(next)
    }

    /// Checks whether the wall on the `direction` side of `cell` is present.
    /// Out-of-bounds cells are treated as solid.
    pub fn has_wall(&self, cell: Cell, direction: Direction) -> bool {
        if !self.is_in_bounds(cell) {
            return true;
        }
        self.walls[self.ravel_index(cell)].has(direction)
    }

    /// Removes the wall on the `direction` side of `cell`, and the opposite wall of the
    /// neighboring cell.
    ///
    /// Returns `true` if a wall was removed, `false` if the passage was already open.
    ///
    /// # Errors
    /// * `CellOutOfBounds` if `cell` is outside the maze
    /// * `NeighborOutOfBounds` if the edge lies on the maze boundary
    pub fn remove_wall(
        &mut self,
        cell: Cell,
        direction: Direction,
    ) -> Result<bool, ConstraintViolation> {
        if !self.is_in_bounds(cell) {
            return Err(ConstraintViolation::CellOutOfBounds { cell });
        }
        let neighbor = self
            .step(cell, direction)
            .ok_or(ConstraintViolation::NeighborOutOfBounds { cell, direction })?;

        let (idx, neighbor_idx) = (self.ravel_index(cell), self.ravel_index(neighbor));
        let was_present = self.walls[idx].has(direction);
        self.walls[idx].remove(direction);
        self.walls[neighbor_idx].remove(direction.opposite());
        Ok(was_present)
    }

    /// Open sides of a cell paired with the cell on the other side, in N, E, S, W order.
    pub fn open_directions(&self, cell: Cell) -> impl Iterator<Item = (Direction, Cell)> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            if self.has_wall(cell, direction) {
                None
            } else {
                self.step(cell, direction).map(|next| (direction, next))
            }
        })
    }

    /// Cells reachable from `cell` in one move, in N, E, S, W order.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        self.open_directions(cell).map(|(_, next)| next)
    }

    /// In-bounds cells one step away from `cell`, regardless of walls.
    pub fn adjacent(&self, cell: Cell) -> impl Iterator<Item = (Direction, Cell)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.step(cell, direction).map(|next| (direction, next)))
    }

    /// Every cell in row-major order. Call again to restart.
    pub fn all_cells(&self) -> AllCells {
        AllCells {
            width: self.width,
            next: 0,
            end: self.len(),
        }
    }

    /// Number of open passages between pairs of cells.
    pub fn open_passages(&self) -> usize {
        self.all_cells()
            .map(|cell| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(|&d| self.step(cell, d).is_some() && !self.has_wall(cell, d))
                    .count()
            })
            .sum()
    }
}

impl std::ops::Index<Cell> for Maze {
    type Output = Walls;

    fn index(&self, cell: Cell) -> &Self::Output {
        &self.walls[self.ravel_index(cell)]
    }
}

/// Row-major iterator over the cells of a maze, returned by [`Maze::all_cells`].
#[derive(Debug, Clone)]
pub struct AllCells {
    width: usize,
    next: usize,
    end: usize,
}

impl Iterator for AllCells {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let idx = self.next;
        self.next += 1;
        Some((idx / self.width, idx % self.width))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AllCells {}
