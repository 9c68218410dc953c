use std::time::Instant;

use super::{Convergence, MdpConfig, MdpResult, ValueTable, greedy_policy};
use crate::{error::ConfigError, maze::Maze};

/// Value iteration: repeat synchronous Bellman optimality backups from an all-zero table
/// until the largest change drops below `epsilon`, then act greedily on the result.
///
/// Cells without an open side keep their value and get no action.
pub fn value_iteration(maze: &Maze, config: &MdpConfig) -> Result<MdpResult, ConfigError> {
    config.validate()?;
    let timer = Instant::now();
    let goal = maze.goal();

    let mut values = ValueTable::for_maze(maze, 0.0);
    let mut sweeps = 0;
    let mut state_updates = 0;

    let final_delta = loop {
        let mut next_values = values.clone();
        let mut delta: f64 = 0.0;

        for cell in maze.all_cells() {
            // The goal is absorbing
            if cell == goal {
                continue;
            }
            let Some((_, best_value)) = config.greedy_action(maze, &values, cell) else {
                continue;
            };
            next_values[cell] = best_value;
            state_updates += 1;
            delta = delta.max((best_value - values[cell]).abs());
        }

        values = next_values;
        sweeps += 1;
        if delta < config.epsilon {
            break delta;
        }
    };

    let policy = greedy_policy(maze, &values, config);
    tracing::debug!(
        "[value iteration] converged after {} sweeps ({} backups), delta {:e}",
        sweeps,
        state_updates,
        final_delta
    );

    Ok(MdpResult {
        policy,
        values,
        convergence: Convergence {
            iterations: sweeps,
            evaluation_sweeps: 0,
            state_updates,
            final_delta,
        },
        runtime: timer.elapsed(),
    })
}
