use std::fmt;

use thiserror::Error;

use crate::maze::{Cell, Direction};

/// Which end of the maze an endpoint check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// Invalid input detected while building a maze or configuring a solver.
/// Always raised up front, never recovered from internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("maze dimensions must be positive, got {height}x{width}")]
    InvalidDimensions { height: usize, width: usize },

    #[error("{endpoint} cell {cell:?} is out of bounds for a {height}x{width} maze")]
    EndpointOutOfBounds {
        endpoint: Endpoint,
        cell: Cell,
        height: usize,
        width: usize,
    },

    #[error("openness must be within [0, 1], got {0}")]
    InvalidOpenness(f64),

    #[error("discount factor must be within (0, 1), got {0}")]
    InvalidDiscount(f64),

    #[error("convergence threshold must be positive and finite, got {0}")]
    InvalidEpsilon(f64),
}

/// An illegal mutation or lookup against a maze.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintViolation {
    #[error("cell {cell:?} is out of bounds")]
    CellOutOfBounds { cell: Cell },

    #[error("cannot remove wall {direction} from {cell:?}: neighbor is out of bounds")]
    NeighborOutOfBounds { cell: Cell, direction: Direction },

    #[error("unrecognized direction tag {0:?}")]
    UnknownDirection(String),
}

/// Any error the crate can return.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),
}
