//! Markov-decision-process planners over a maze.
//!
//! Every non-goal cell is a state, every open side of a cell is a deterministic action,
//! and the goal is absorbing. Sweeps are synchronous: each sweep reads the previous
//! sweep's table and writes a fresh one. Cells are visited in row-major order and actions
//! in N, E, S, W order, so the first best action found wins ties.

use std::time::Duration;

mod extract;
mod policy_iter;
mod table;
mod value_iter;

pub use extract::extract_path;
pub use policy_iter::policy_iteration;
pub use table::{CellTable, Policy, ValueTable};
pub use value_iter::value_iteration;

use crate::{
    error::ConfigError,
    maze::{Cell, Direction, Maze},
};

/// Rewards handed out per transition. Shared by both planners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardModel {
    /// Reward of a move into any non-goal cell.
    pub step_cost: f64,
    /// Reward of the move that enters the goal.
    pub goal_reward: f64,
}

impl RewardModel {
    pub fn reward(&self, next: Cell, goal: Cell) -> f64 {
        if next == goal {
            self.goal_reward
        } else {
            self.step_cost
        }
    }
}

impl Default for RewardModel {
    fn default() -> Self {
        Self {
            step_cost: -1.0,
            goal_reward: -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MdpConfig {
    /// Discount factor, within `(0, 1)`.
    pub gamma: f64,
    /// Sweeps stop once the largest value change falls below this.
    pub epsilon: f64,
    pub rewards: RewardModel,
}

impl Default for MdpConfig {
    fn default() -> Self {
        Self {
            gamma: 0.9,
            epsilon: 1e-4,
            rewards: RewardModel::default(),
        }
    }
}

impl MdpConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.gamma > 0.0 && self.gamma < 1.0) {
            return Err(ConfigError::InvalidDiscount(self.gamma));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        Ok(())
    }

    /// One-step lookahead value of moving into `next`.
    fn q_value(&self, maze: &Maze, values: &ValueTable, next: Cell) -> f64 {
        self.rewards.reward(next, maze.goal()) + self.gamma * values[next]
    }

    /// Best action out of `cell` under `values`, with its lookahead value.
    /// `None` if the cell has no open side.
    fn greedy_action(
        &self,
        maze: &Maze,
        values: &ValueTable,
        cell: Cell,
    ) -> Option<(Direction, f64)> {
        let mut best: Option<(Direction, f64)> = None;
        for (direction, next) in maze.open_directions(cell) {
            let value = self.q_value(maze, values, next);
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((direction, value)),
            }
        }
        best
    }
}

/// How a planner got to its answer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Convergence {
    /// Value-iteration sweeps, or policy-iteration improvement rounds.
    pub iterations: usize,
    /// Policy-evaluation sweeps across all rounds. Always 0 for value iteration.
    pub evaluation_sweeps: usize,
    /// Number of per-state Bellman backups performed.
    pub state_updates: usize,
    /// Largest value change in the last sweep.
    pub final_delta: f64,
}

#[derive(Debug, Clone)]
pub struct MdpResult {
    pub policy: Policy,
    pub values: ValueTable,
    pub convergence: Convergence,
    pub runtime: Duration,
}

impl MdpResult {
    /// Follows the policy from `start`. See [`extract_path`].
    pub fn path(&self, start: Cell, goal: Cell) -> Vec<Cell> {
        extract_path(&self.policy, start, goal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Planner {
    ValueIteration,
    PolicyIteration,
}

impl Planner {
    pub const ALL: [Planner; 2] = [Planner::ValueIteration, Planner::PolicyIteration];
}

impl std::fmt::Display for Planner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Planner::ValueIteration => write!(f, "Value Iteration"),
            Planner::PolicyIteration => write!(f, "Policy Iteration"),
        }
    }
}

pub fn plan(maze: &Maze, planner: Planner, config: &MdpConfig) -> Result<MdpResult, ConfigError> {
    match planner {
        Planner::ValueIteration => value_iteration(maze, config),
        Planner::PolicyIteration => policy_iteration(maze, config),
    }
}

/// Greedy policy with respect to `values`. The goal gets no action.
fn greedy_policy(maze: &Maze, values: &ValueTable, config: &MdpConfig) -> Policy {
    let mut policy = Policy::for_maze(maze, None);
    for cell in maze.all_cells() {
        if cell == maze.goal() {
            continue;
        }
        policy[cell] = config
            .greedy_action(maze, values, cell)
            .map(|(direction, _)| direction);
    }
    policy
}
