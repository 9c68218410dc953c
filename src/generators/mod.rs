use rand::{SeedableRng, rngs::StdRng};

mod loops;
mod recur_backtrack;

pub use loops::inject_loops;
pub use recur_backtrack::recursive_backtrack;

use crate::{
    error::{ConfigError, Error},
    maze::{Cell, Maze},
};

/// Get a random number generator, optionally seeded for reproducibility.
fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Parameters for building one maze.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub height: usize,
    pub width: usize,
    /// `None` draws a fresh generator from OS entropy.
    pub seed: Option<u64>,
    /// Fraction of the walls left after carving that get opened, within `[0, 1]`.
    pub openness: f64,
    /// Defaults to the top-left corner.
    pub start: Option<Cell>,
    /// Defaults to the bottom-right corner.
    pub goal: Option<Cell>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            height: 10,
            width: 10,
            seed: None,
            openness: 0.0,
            start: None,
            goal: None,
        }
    }
}

/// Generates a reproducible maze: identical arguments give an identical wall layout.
pub fn generate(height: usize, width: usize, seed: u64, openness: f64) -> Result<Maze, Error> {
    generate_with(&GenerationConfig {
        height,
        width,
        seed: Some(seed),
        openness,
        ..Default::default()
    })
}

/// Generates a maze by carving a spanning tree from the start cell and then opening
/// `openness` of the remaining walls. The goal is always reachable.
pub fn generate_with(config: &GenerationConfig) -> Result<Maze, Error> {
    if !(0.0..=1.0).contains(&config.openness) {
        return Err(ConfigError::InvalidOpenness(config.openness).into());
    }
    let start = config.start.unwrap_or((0, 0));
    let goal = config.goal.unwrap_or((
        config.height.saturating_sub(1),
        config.width.saturating_sub(1),
    ));
    let mut maze = Maze::with_endpoints(config.height, config.width, start, goal)?;

    // One stream feeds carving and then loop injection, in that order
    let mut rng = get_rng(config.seed);
    let carved = recursive_backtrack(&mut maze, &mut rng)?;
    let opened = inject_loops(&mut maze, config.openness, &mut rng)?;

    tracing::debug!(
        "[generate] {}x{} maze, seed {:?}: carved {} passages, opened {} extra",
        config.height,
        config.width,
        config.seed,
        carved,
        opened
    );
    Ok(maze)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate(12, 9, 42, 0.2).unwrap();
        let b = generate(12, 9, 42, 0.2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate(12, 12, 1, 0.0).unwrap();
        let b = generate(12, 12, 2, 0.0).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_perfect_maze_edge_count() {
        let maze = generate(6, 8, 5, 0.0).unwrap();
        assert_eq!(maze.open_passages(), 6 * 8 - 1);
    }

    #[test]
    fn test_openness_adds_passages() {
        // 6x8 grid has 5 * 8 + 6 * 7 = 82 interior edges, 47 of them carved
        let maze = generate(6, 8, 5, 0.5).unwrap();
        assert_eq!(maze.open_passages(), 47 + (0.5 * 35.0_f64).floor() as usize);
    }

    #[test]
    fn test_openness_keeps_carved_tree() {
        let perfect = generate(6, 8, 5, 0.0).unwrap();
        let open = generate(6, 8, 5, 0.3).unwrap();
        // Loop injection only ever removes walls on top of the same carved tree
        for cell in perfect.all_cells() {
            for (dir, _) in perfect.open_directions(cell) {
                assert!(!open.has_wall(cell, dir));
            }
        }
    }

    #[test]
    fn test_invalid_config() {
        assert_eq!(
            generate(0, 4, 1, 0.0),
            Err(Error::Config(ConfigError::InvalidDimensions {
                height: 0,
                width: 4
            }))
        );
        assert!(matches!(
            generate(4, 4, 1, 1.5),
            Err(Error::Config(ConfigError::InvalidOpenness(_)))
        ));
        assert!(matches!(
            generate(4, 4, 1, f64::NAN),
            Err(Error::Config(ConfigError::InvalidOpenness(_)))
        ));
        let config = GenerationConfig {
            height: 4,
            width: 4,
            seed: Some(1),
            goal: Some((4, 4)),
            ..Default::default()
        };
        assert!(matches!(
            generate_with(&config),
            Err(Error::Config(ConfigError::EndpointOutOfBounds { .. }))
        ));
    }

    #[test]
    fn test_custom_endpoints() {
        let config = GenerationConfig {
            height: 5,
            width: 5,
            seed: Some(3),
            start: Some((2, 2)),
            goal: Some((0, 4)),
            ..Default::default()
        };
        let maze = generate_with(&config).unwrap();
        assert_eq!(maze.start(), (2, 2));
        assert_eq!(maze.goal(), (0, 4));
        assert_eq!(maze.open_passages(), 24);
    }

    #[test]
    fn test_unseeded_generation_is_valid() {
        let config = GenerationConfig {
            height: 5,
            width: 7,
            ..Default::default()
        };
        let maze = generate_with(&config).unwrap();
        assert_eq!(maze.open_passages(), 34);
    }
}
