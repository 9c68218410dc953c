use super::Direction;

/// A grid position as `(row, col)`.
pub type Cell = (usize, usize);

/// Wall state of one cell: one bit per cardinal direction, set when the wall is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Walls(u8);

impl Walls {
    /// All four walls standing.
    pub const CLOSED: Walls = Walls(0b1111);
    /// No walls at all.
    pub const OPEN: Walls = Walls(0);

    pub fn has(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub fn remove(&mut self, direction: Direction) {
        self.0 &= !direction.bit();
    }

    /// Number of walls still standing around the cell.
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl Default for Walls {
    fn default() -> Self {
        Walls::CLOSED
    }
}
