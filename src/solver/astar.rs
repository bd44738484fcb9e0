use grid_util::point::Point;

use crate::{cost_matrix::CostMatrix, heuristic::HeuristicTable, solver::PathSolver};

/// Which estimate guides an [AstarSolver].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeuristicKind {
    /// Breadth-first hop count from the goal. Detects unreachable goals up front.
    #[default]
    Reachability,
    /// Manhattan distance, cheaper to build but blind to walls.
    Manhattan,
}

#[derive(Clone, Debug, Default)]
pub struct AstarSolver {
    pub heuristic: HeuristicKind,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic: HeuristicKind::Reachability,
        }
    }
    pub fn manhattan() -> AstarSolver {
        AstarSolver {
            heuristic: HeuristicKind::Manhattan,
        }
    }
}

impl PathSolver for AstarSolver {
    fn heuristic_table(&self, costs: &CostMatrix, goal: Point) -> HeuristicTable {
        match self.heuristic {
            HeuristicKind::Reachability => HeuristicTable::reachability(costs, goal),
            HeuristicKind::Manhattan => HeuristicTable::manhattan(costs, goal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{position, FacilityMap, SearchError, TerrainTable};

    fn costs(map: &str) -> CostMatrix {
        let map: FacilityMap = map.parse().unwrap();
        CostMatrix::from_map(&map, &TerrainTable::facility())
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let costs = costs(" ");
        for solver in [AstarSolver::new(), AstarSolver::manhattan()] {
            let route = solver
                .search(&costs, position(0, 0), position(0, 0))
                .unwrap();
            assert_eq!(route.path, vec![position(0, 0)]);
            assert_eq!(route.cost, 0);
        }
    }

    /// Asserts that the optimal 4 step solution is found on an open 3x3 grid.
    #[test]
    fn solve_simple_problem() {
        let costs = costs("   \n   \n   \n");
        let route = AstarSolver::new()
            .search(&costs, position(0, 0), position(2, 2))
            .unwrap();
        assert_eq!(route.path.len(), 5);
        assert_eq!(route.cost, 4);
    }

    /// Loose wires cost 6, so a longer dry detour is cheaper than cutting across them.
    #[test]
    fn prefers_cheap_terrain() {
        //  ___
        // |S-G|
        // |   |
        //  ___
        let costs = costs(" - \n   \n");
        let route = AstarSolver::new()
            .search(&costs, position(0, 0), position(0, 2))
            .unwrap();
        assert_eq!(route.cost, 4);
        assert_eq!(
            route.path,
            vec![
                position(0, 0),
                position(1, 0),
                position(1, 1),
                position(1, 2),
                position(0, 2)
            ]
        );
    }

    /// Both endpoints have to be enterable.
    #[test]
    fn wall_endpoints() {
        let costs = costs(" #\n  \n");
        let solver = AstarSolver::new();
        assert_eq!(
            solver.search(&costs, position(0, 1), position(1, 1)),
            Err(SearchError::InvalidEndpoint(position(0, 1)))
        );
        assert_eq!(
            solver.search(&costs, position(1, 1), position(0, 1)),
            Err(SearchError::InvalidEndpoint(position(0, 1)))
        );
        assert_eq!(
            solver.search(&costs, position(0, 0), position(4, 4)),
            Err(SearchError::InvalidEndpoint(position(4, 4)))
        );
    }

    /// The Manhattan estimate cannot see the enclosure, so the search itself has to fail.
    #[test]
    fn enclosed_goal() {
        let costs = costs("    \n ###\n #  \n ## \n");
        let start = position(0, 0);
        let goal = position(2, 2);
        for solver in [AstarSolver::new(), AstarSolver::manhattan()] {
            assert_eq!(
                solver.search(&costs, start, goal),
                Err(SearchError::Unreachable { start, goal })
            );
        }
    }
}
