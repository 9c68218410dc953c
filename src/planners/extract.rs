use super::Policy;
use crate::maze::Cell;

/// Follows `policy` from `start` and collects the cells visited, up to and including
/// `goal`.
///
/// A policy that never reaches the goal yields a truncated path: the walk stops at a
/// cell with no action, or right before it would revisit a cell. An out-of-bounds
/// `start` yields an empty path.
pub fn extract_path(policy: &Policy, start: Cell, goal: Cell) -> Vec<Cell> {
    if !policy.contains(start) {
        return Vec::new();
    }

    let mut visited = vec![false; policy.height() * policy.width()];
    let ravel = |cell: Cell| cell.0 * policy.width() + cell.1;

    let mut path = Vec::new();
    let mut current = start;
    loop {
        path.push(current);
        visited[ravel(current)] = true;
        if current == goal {
            break;
        }
        match policy.next_cell(current) {
            Some(next) if !visited[ravel(next)] => current = next,
            // Terminal cell, or a cycle in a broken policy
            _ => break,
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Direction;

    #[test]
    fn test_follows_policy_to_goal() {
        let mut policy = Policy::new(2, 2, None);
        policy[(0, 0)] = Some(Direction::South);
        policy[(1, 0)] = Some(Direction::East);
        assert_eq!(
            extract_path(&policy, (0, 0), (1, 1)),
            vec![(0, 0), (1, 0), (1, 1)]
        );
    }

    #[test]
    fn test_two_cycle_terminates() {
        let mut policy = Policy::new(2, 2, None);
        policy[(0, 0)] = Some(Direction::East);
        policy[(0, 1)] = Some(Direction::West);
        let path = extract_path(&policy, (0, 0), (1, 1));
        assert_eq!(path, vec![(0, 0), (0, 1)]);
    }

    #[test]
    fn test_longer_cycle_terminates() {
        let mut policy = Policy::new(2, 2, None);
        policy[(0, 0)] = Some(Direction::East);
        policy[(0, 1)] = Some(Direction::South);
        policy[(1, 1)] = Some(Direction::West);
        policy[(1, 0)] = Some(Direction::North);
        let path = extract_path(&policy, (0, 0), (5, 5));
        assert_eq!(path.len(), 4);
        assert_ne!(path.last(), Some(&(5, 5)));
    }

    #[test]
    fn test_stops_at_missing_action() {
        let mut policy = Policy::new(1, 3, None);
        policy[(0, 0)] = Some(Direction::East);
        assert_eq!(extract_path(&policy, (0, 0), (0, 2)), vec![(0, 0), (0, 1)]);
    }

    #[test]
    fn test_start_is_goal() {
        let policy = Policy::new(1, 1, None);
        assert_eq!(extract_path(&policy, (0, 0), (0, 0)), vec![(0, 0)]);
        assert!(extract_path(&policy, (3, 0), (0, 0)).is_empty());
    }
}
