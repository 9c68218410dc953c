use std::str::FromStr;

use mazest::{GenerationConfig, MdpConfig, Planner, Solver, generate_with, plan, solve_maze};

const USAGE: &str = "Usage: mazest <height> <width> [seed|-] [openness] [gamma] [epsilon]";

/// Parse the optional positional argument at `idx`, falling back to `default` when absent.
fn parse_arg<T: FromStr>(args: &[String], idx: usize, default: T) -> Option<T> {
    match args.get(idx) {
        None => Some(default),
        Some(s) => s.parse::<T>().ok(),
    }
}

fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let level = std::env::var("MAZEST_LOG")
        .ok()
        .and_then(|s| tracing::Level::from_str(&s).ok())
        .unwrap_or(tracing::Level::INFO);
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .init();
    guard
}

fn main() -> std::io::Result<()> {
    // Keep the guard alive so buffered log lines are flushed on exit
    let _guard = init_tracing();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if args.len() < 2 {
        eprintln!("{}", USAGE);
        return Ok(());
    }

    let dims = args
        .iter()
        .take(2)
        .filter_map(|s| s.parse::<usize>().ok())
        .collect::<Vec<_>>();
    if dims.len() != 2 {
        eprintln!("Please enter two valid numbers for height and width.");
        return Ok(());
    }
    let (height, width) = (dims[0], dims[1]);

    // "-" or a missing seed means a fresh random maze
    let seed = match args.get(2).map(String::as_str) {
        None | Some("-") => None,
        Some(s) => match s.parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(_) => {
                eprintln!("Invalid seed {:?}.\n{}", s, USAGE);
                return Ok(());
            }
        },
    };

    let defaults = MdpConfig::default();
    let (Some(openness), Some(gamma), Some(epsilon)) = (
        parse_arg(&args, 3, 0.0),
        parse_arg(&args, 4, defaults.gamma),
        parse_arg(&args, 5, defaults.epsilon),
    ) else {
        eprintln!("Openness, gamma and epsilon must be numbers.\n{}", USAGE);
        return Ok(());
    };

    let generation = GenerationConfig {
        height,
        width,
        seed,
        openness,
        ..Default::default()
    };
    let maze = match generate_with(&generation) {
        Ok(maze) => maze,
        Err(e) => {
            eprintln!("Cannot generate maze: {}", e);
            return Ok(());
        }
    };
    tracing::info!(
        "Generated {}x{} maze with {} open passages",
        maze.height(),
        maze.width(),
        maze.open_passages()
    );

    for solver in Solver::ALL {
        let result = solve_maze(&maze, solver);
        println!(
            "{:<32} moves {:>6}  work {:>9}  memory {:>7}  runtime {:?}",
            solver.to_string(),
            result.moves(),
            result.nodes_expanded,
            result.peak_frontier,
            result.runtime
        );
        if !result.is_solved() {
            tracing::warn!("{} found no path to the goal", solver);
        }
    }

    let mdp_config = MdpConfig {
        gamma,
        epsilon,
        ..defaults
    };
    for planner in Planner::ALL {
        let result = match plan(&maze, planner, &mdp_config) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Cannot run {}: {}", planner, e);
                return Ok(());
            }
        };
        let path = result.path(maze.start(), maze.goal());
        println!(
            "{:<32} moves {:>6}  work {:>9}  memory {:>7}  runtime {:?}  iterations {} (evaluation sweeps {}, delta {:e})",
            planner.to_string(),
            path.len().saturating_sub(1),
            result.convergence.state_updates,
            maze.len(),
            result.runtime,
            result.convergence.iterations,
            result.convergence.evaluation_sweeps,
            result.convergence.final_delta
        );
        if path.last() != Some(&maze.goal()) {
            tracing::warn!("{} policy does not reach the goal", planner);
        }
    }

    Ok(())
}
