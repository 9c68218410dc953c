use std::time::Instant;

use super::{Convergence, MdpConfig, MdpResult, Policy, ValueTable};
use crate::{error::ConfigError, maze::Maze, solvers::manhattan};

/// Starting policy: from each cell, step to the open neighbor closest to the goal by
/// Manhattan distance. The first such neighbor in N, E, S, W order wins ties.
fn initial_policy(maze: &Maze) -> Policy {
    let goal = maze.goal();
    let mut policy = Policy::for_maze(maze, None);
    for cell in maze.all_cells() {
        if cell == goal {
            continue;
        }
        policy[cell] = maze
            .open_directions(cell)
            .min_by_key(|&(_, next)| manhattan(next, goal) as usize)
            .map(|(direction, _)| direction);
    }
    policy
}

/// Policy iteration: alternate policy evaluation (synchronous sweeps under the fixed
/// policy until the largest change drops below `epsilon`) with greedy improvement, and
/// stop once an improvement pass leaves every action unchanged.
pub fn policy_iteration(maze: &Maze, config: &MdpConfig) -> Result<MdpResult, ConfigError> {
    config.validate()?;
    let timer = Instant::now();
    let goal = maze.goal();

    let mut policy = initial_policy(maze);
    let mut values = ValueTable::for_maze(maze, 0.0);
    let mut rounds = 0;
    let mut evaluation_sweeps = 0;
    let mut state_updates = 0;

    let final_delta = loop {
        // Policy evaluation
        let delta = loop {
            let mut next_values = values.clone();
            let mut delta: f64 = 0.0;

            for cell in maze.all_cells() {
                if cell == goal {
                    continue;
                }
                let Some(next) = policy.next_cell(cell) else {
                    continue;
                };
                let value = config.q_value(maze, &values, next);
                next_values[cell] = value;
                state_updates += 1;
                delta = delta.max((value - values[cell]).abs());
            }

            values = next_values;
            evaluation_sweeps += 1;
            if delta < config.epsilon {
                break delta;
            }
        };

        // Policy improvement
        let mut stable = true;
        for cell in maze.all_cells() {
            if cell == goal {
                continue;
            }
            let best = config
                .greedy_action(maze, &values, cell)
                .map(|(direction, _)| direction);
            if best != policy[cell] {
                stable = false;
                policy[cell] = best;
            }
        }
        rounds += 1;

        if stable {
            break delta;
        }
        tracing::trace!("[policy iteration] round {} changed the policy", rounds);
    };

    tracing::debug!(
        "[policy iteration] stable after {} rounds ({} evaluation sweeps, {} backups), delta {:e}",
        rounds,
        evaluation_sweeps,
        state_updates,
        final_delta
    );

    Ok(MdpResult {
        policy,
        values,
        convergence: Convergence {
            iterations: rounds,
            evaluation_sweeps,
            state_updates,
            final_delta,
        },
        runtime: timer.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        maze::Direction,
        planners::{RewardModel, value_iteration},
        solvers::fixtures,
    };

    #[test]
    fn test_initial_policy_points_toward_goal() {
        let maze = fixtures::open_grid(3, 3);
        let policy = initial_policy(&maze);
        // East and South tie from the corner; East comes first
        assert_eq!(policy[(0, 0)], Some(Direction::East));
        assert_eq!(policy[(0, 2)], Some(Direction::South));
        assert_eq!(policy[(2, 0)], Some(Direction::East));
        assert_eq!(policy[(2, 2)], None);
    }

    #[test]
    fn test_initial_policy_can_point_into_dead_ends() {
        let maze = fixtures::snake();
        let policy = initial_policy(&maze);
        // (1,2) is closer to the goal by distance but leads back up the corridor
        assert_eq!(policy[(1, 1)], Some(Direction::East));
    }

    #[test]
    fn test_policy_iteration_on_snake() {
        let maze = fixtures::snake();
        let result = policy_iteration(&maze, &MdpConfig::default()).unwrap();
        assert_eq!(result.path((0, 0), (2, 2)).len(), 9);
        assert_eq!(result.policy[(1, 1)], Some(Direction::West));
        assert!(result.convergence.iterations >= 2);
        assert!(result.convergence.evaluation_sweeps >= result.convergence.iterations);
        assert!(result.convergence.final_delta < 1e-4);
    }

    #[test]
    fn test_agrees_with_value_iteration() {
        let maze = fixtures::open_grid(4, 5);
        let config = MdpConfig {
            rewards: RewardModel {
                step_cost: -1.0,
                goal_reward: 10.0,
            },
            ..Default::default()
        };
        let pi = policy_iteration(&maze, &config).unwrap();
        let vi = value_iteration(&maze, &config).unwrap();
        assert_eq!(pi.path((0, 0), (3, 4)).len(), 8);
        assert_eq!(vi.path((0, 0), (3, 4)).len(), 8);
        for cell in maze.all_cells() {
            assert!((pi.values[cell] - vi.values[cell]).abs() < 1e-2);
        }
    }

    #[test]
    fn test_counts_backups_per_evaluated_state() {
        let maze = fixtures::open_grid(2, 2);
        let result = policy_iteration(&maze, &MdpConfig::default()).unwrap();
        // Three non-goal states per evaluation sweep
        assert_eq!(
            result.convergence.state_updates,
            3 * result.convergence.evaluation_sweeps
        );
    }
}
