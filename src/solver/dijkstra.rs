use grid_util::point::Point;

use crate::{cost_matrix::CostMatrix, heuristic::HeuristicTable, solver::PathSolver};

/// Uniform-cost search: A* without an estimate. Expands more cells than [AstarSolver](super::astar::AstarSolver)
/// but needs no precomputation.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl PathSolver for DijkstraSolver {
    fn heuristic_table(&self, costs: &CostMatrix, goal: Point) -> HeuristicTable {
        HeuristicTable::zero(costs, goal)
    }
}
