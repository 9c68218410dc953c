//! Grid maze generation and solving.
//!
//! A [`Maze`] is generated once with [`generate`] and then shared read-only by any
//! number of solvers: frontier searches in [`solvers`] and MDP planners in [`planners`].

pub mod error;
pub mod generators;
pub mod maze;
pub mod planners;
pub mod solvers;

pub use error::{ConfigError, ConstraintViolation, Error};
pub use generators::{GenerationConfig, generate, generate_with};
pub use maze::{Cell, Direction, Maze};
pub use planners::{MdpConfig, MdpResult, Planner, RewardModel, extract_path, plan};
pub use solvers::{Heuristic, SearchResult, Solver, solve_maze};
