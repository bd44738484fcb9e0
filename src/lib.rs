//! # facility_pathfinding
//!
//! Weighted pathfinding on character grid maps of a facility. Each terrain symbol carries a
//! traversal cost (see [TerrainTable]), walls are impassable and entity markers cost as much
//! as plain floor. Routes are found with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) guided by a breadth-first
//! hop-count table computed from the destination, which also rules out unreachable goals
//! before any search is attempted. A [Tour] chains such searches over an ordered list of
//! targets, replaying every step onto the map and handing it to a [Renderer].
mod astar;
pub mod cost_matrix;
pub mod facility_map;
pub mod heuristic;
pub mod overlay;
pub mod solver;
pub mod terrain;
pub mod tour;

pub use cost_matrix::{CostCell, CostMatrix};
pub use facility_map::{FacilityMap, MapError};
pub use grid_util::point::Point;
pub use heuristic::HeuristicTable;
pub use overlay::Overlay;
pub use solver::astar::{AstarSolver, HeuristicKind};
pub use solver::dijkstra::DijkstraSolver;
pub use solver::{PathSolver, Route, SearchError};
pub use terrain::{Terrain, TerrainTable, TraversalCost};
pub use tour::{Frame, Leg, NoRender, Renderer, Target, Tour, TourError, TourReport, Unreached};

/// Symbol of the mover whose tour is being planned.
pub const MOVER: char = 'E';
/// Symbol written onto cells the mover has left.
pub const VISITED: char = 'V';
/// Impassable terrain.
pub const WALL: char = '#';
/// Exit door, usually the last target of a tour.
pub const EXIT: char = '!';
/// Friends the mover has to reach, in the order the default tour visits them.
pub const FRIENDS: [char; 4] = ['D', 'L', 'M', 'W'];

/// Upper bound of successors of a cell on a 4-connected grid.
const N_SMALLVEC_SIZE: usize = 4;

/// A grid position. `x` is the zero-based column and `y` the zero-based row.
pub type Position = Point;

/// Builds a [Position] from a row and a column.
pub fn position(row: usize, column: usize) -> Position {
    Point::new(column as i32, row as i32)
}

/// Row-major ordering key of a position.
pub(crate) fn row_major(p: &Point) -> (i32, i32) {
    (p.y, p.x)
}

/// Number of unit steps between two positions on a 4-connected grid, ignoring obstacles.
pub fn manhattan_distance(p1: &Point, p2: &Point) -> u32 {
    (p1.x - p2.x).unsigned_abs() + (p1.y - p2.y).unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_is_row_then_column() {
        let p = position(2, 5);
        assert_eq!(p.y, 2);
        assert_eq!(p.x, 5);
        assert!(row_major(&position(0, 9)) < row_major(&position(1, 0)));
    }

    #[test]
    fn manhattan_is_symmetric() {
        let a = position(0, 0);
        let b = position(3, 4);
        assert_eq!(manhattan_distance(&a, &b), 7);
        assert_eq!(manhattan_distance(&b, &a), 7);
    }
}
