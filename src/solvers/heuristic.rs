use crate::maze::Cell;

/// Distance estimates used to guide A*. Both are admissible and consistent on a
/// 4-connected grid with unit step cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// L1 distance. Exact on an open grid.
    Manhattan,
    /// L2 distance. Admissible but looser than Manhattan.
    Euclidean,
}

impl Heuristic {
    pub const ALL: [Heuristic; 2] = [Heuristic::Manhattan, Heuristic::Euclidean];

    /// Estimated number of moves from `cell` to `goal`.
    pub fn estimate(self, cell: Cell, goal: Cell) -> f64 {
        match self {
            Heuristic::Manhattan => manhattan(cell, goal),
            Heuristic::Euclidean => euclidean(cell, goal),
        }
    }
}

impl std::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Heuristic::Manhattan => write!(f, "Manhattan"),
            Heuristic::Euclidean => write!(f, "Euclidean"),
        }
    }
}

pub fn manhattan(a: Cell, b: Cell) -> f64 {
    (a.0.abs_diff(b.0) + a.1.abs_diff(b.1)) as f64
}

pub fn euclidean(a: Cell, b: Cell) -> f64 {
    let dr = a.0.abs_diff(b.0) as f64;
    let dc = a.1.abs_diff(b.1) as f64;
    dr.hypot(dc)
}
