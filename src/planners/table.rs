use crate::maze::{Cell, Direction, Maze};

/// Dense row-major table holding one value per maze cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellTable<T> {
    data: Box<[T]>,
    height: usize,
    width: usize,
}

impl<T: Clone> CellTable<T> {
    pub fn new(height: usize, width: usize, fill: T) -> Self {
        CellTable {
            data: vec![fill; height * width].into_boxed_slice(),
            height,
            width,
        }
    }

    /// Table shaped like `maze`, every entry set to `fill`.
    pub fn for_maze(maze: &Maze, fill: T) -> Self {
        CellTable::new(maze.height(), maze.width(), fill)
    }
}

impl<T> CellTable<T> {
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.0 < self.height && cell.1 < self.width
    }

    pub fn get(&self, cell: Cell) -> Option<&T> {
        if self.contains(cell) {
            self.data.get(self.ravel_index(cell))
        } else {
            None
        }
    }

    /// Entries in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn ravel_index(&self, cell: Cell) -> usize {
        cell.0 * self.width + cell.1
    }
}

impl<T> std::ops::Index<Cell> for CellTable<T> {
    type Output = T;

    fn index(&self, cell: Cell) -> &Self::Output {
        &self.data[self.ravel_index(cell)]
    }
}

impl<T> std::ops::IndexMut<Cell> for CellTable<T> {
    fn index_mut(&mut self, cell: Cell) -> &mut Self::Output {
        let idx = self.ravel_index(cell);
        &mut self.data[idx]
    }
}

/// Action prescribed for each cell. `None` marks the goal, or a cell with no moves.
pub type Policy = CellTable<Option<Direction>>;

/// State value for each cell.
pub type ValueTable = CellTable<f64>;

impl Policy {
    /// The cell the policy moves to from `cell`, or `None` at a terminal or out of bounds.
    pub fn next_cell(&self, cell: Cell) -> Option<Cell> {
        let direction = (*self.get(cell)?)?;
        let (dr, dc) = direction.delta();
        let next = (
            cell.0.checked_add_signed(dr)?,
            cell.1.checked_add_signed(dc)?,
        );
        self.contains(next).then_some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_and_get() {
        let mut table = CellTable::new(2, 3, 0.0);
        table[(1, 2)] = 4.5;
        assert_eq!(table[(1, 2)], 4.5);
        assert_eq!(table.get((1, 2)), Some(&4.5));
        assert_eq!(table.get((2, 0)), None);
        assert_eq!(table.as_slice()[5], 4.5);
    }

    #[test]
    fn test_policy_next_cell() {
        let mut policy = Policy::new(2, 2, None);
        policy[(0, 0)] = Some(Direction::East);
        policy[(0, 1)] = Some(Direction::North);
        assert_eq!(policy.next_cell((0, 0)), Some((0, 1)));
        // Pointing off the grid resolves to nothing
        assert_eq!(policy.next_cell((0, 1)), None);
        assert_eq!(policy.next_cell((1, 1)), None);
        assert_eq!(policy.next_cell((5, 5)), None);
    }
}
