use grid_util::point::Point;
use log::{debug, info};
use thiserror::Error;

use crate::astar::astar;
use crate::cost_matrix::CostMatrix;
use crate::heuristic::HeuristicTable;
use crate::row_major;

pub mod astar;
pub mod dijkstra;

/// Why a search produced no route. Either way there is no path and the cost is infinite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("endpoint {0:?} is a wall or lies outside the map")]
    InvalidEndpoint(Point),
    #[error("no route from {start:?} to {goal:?}")]
    Unreachable { start: Point, goal: Point },
}

/// One completed leg: the positions from start to goal, both included, and the summed cost
/// of entering every position after the start. Routes returned by a [PathSolver] are never
/// empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub path: Vec<Point>,
    pub cost: u32,
}

impl Route {
    pub fn start(&self) -> Option<Point> {
        self.path.first().copied()
    }
    pub fn goal(&self) -> Option<Point> {
        self.path.last().copied()
    }
    /// Number of moves, one less than the number of positions.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// A cost-optimal search over a [CostMatrix]. Implementors only decide which estimate guides
/// the search; the guards and the search itself are shared.
pub trait PathSolver {
    /// Estimate-to-go table for `goal`. It must never overestimate the remaining cost, and a
    /// cell marked unreachable must really be unable to reach `goal`.
    fn heuristic_table(&self, costs: &CostMatrix, goal: Point) -> HeuristicTable;

    /// Cheapest route from `start` to `goal`, moving between 4-connected non-wall cells.
    /// Entering a cell costs its terrain cost, or 1 for cells without terrain.
    fn search(&self, costs: &CostMatrix, start: Point, goal: Point) -> Result<Route, SearchError> {
        for endpoint in [start, goal] {
            if costs.is_wall(endpoint) {
                debug!("{:?} is a wall, not searching", endpoint);
                return Err(SearchError::InvalidEndpoint(endpoint));
            }
        }
        let heuristic = self.heuristic_table(costs, goal);
        if !heuristic.is_reachable(start) || !heuristic.is_reachable(goal) {
            debug!("{:?} is not reachable from {:?}", goal, start);
            return Err(SearchError::Unreachable { start, goal });
        }
        let (path, cost) = astar(
            &start,
            |node| costs.neighborhood_points_and_cost(node),
            // Expanded nodes share the goal's component, so the fallback is never used.
            |node| heuristic.get(*node).unwrap_or(0),
            row_major,
            |node| *node == goal,
        )
        .ok_or(SearchError::Unreachable { start, goal })?;
        info!(
            "Found route {:?} -> {:?} with {} steps and cost {}",
            start,
            goal,
            path.len() - 1,
            cost
        );
        Ok(Route { path, cost })
    }

    /// The cost of [search](Self::search), [None] standing for an infinite cost.
    fn cost(&self, costs: &CostMatrix, start: Point, goal: Point) -> Option<u32> {
        self.search(costs, start, goal).ok().map(|route| route.cost)
    }
}
