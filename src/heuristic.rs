use core::fmt;
use std::collections::VecDeque;

use grid_util::point::Point;
use itertools::Itertools;

use crate::cost_matrix::CostMatrix;
use crate::manhattan_distance;

/// Estimated number of steps from every cell to one destination. [None] marks a cell from
/// which the destination cannot be reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeuristicTable {
    destination: Point,
    distances: Vec<Option<u32>>,
    width: usize,
}

impl HeuristicTable {
    /// Breadth-first hop count from `destination` over the non-wall cells of `costs`, ignoring
    /// terrain cost. Every step costs at least 1, so the hop count never overestimates the true
    /// cost and is a consistent A* heuristic. Cells outside the destination's component are
    /// [None], as is everything if the destination is out of bounds.
    pub fn reachability(costs: &CostMatrix, destination: Point) -> HeuristicTable {
        let mut distances = vec![None; costs.width() * costs.height()];
        let mut queue = VecDeque::new();
        if let Some(ix) = costs.ix(destination) {
            distances[ix] = Some(0);
            queue.push_back(destination);
        }
        while let Some(current) = queue.pop_front() {
            let next_distance = costs
                .ix(current)
                .and_then(|ix| distances[ix])
                .map_or(0, |d| d + 1);
            for n in costs.neighborhood_points(&current) {
                if costs.is_wall(n) {
                    continue;
                }
                if let Some(ix) = costs.ix(n) {
                    if distances[ix].is_none() {
                        distances[ix] = Some(next_distance);
                        queue.push_back(n);
                    }
                }
            }
        }
        HeuristicTable {
            destination,
            distances,
            width: costs.width(),
        }
    }

    /// Plain Manhattan distance to `destination` for every cell. Walls are not taken into
    /// account, so no cell is ever marked unreachable.
    pub fn manhattan(costs: &CostMatrix, destination: Point) -> HeuristicTable {
        let distances = (0..costs.width() * costs.height())
            .map(|ix| Some(manhattan_distance(&costs.point(ix), &destination)))
            .collect();
        HeuristicTable {
            destination,
            distances,
            width: costs.width(),
        }
    }

    /// No estimate at all, which turns A* into uniform-cost search.
    pub fn zero(costs: &CostMatrix, destination: Point) -> HeuristicTable {
        HeuristicTable {
            destination,
            distances: vec![Some(0); costs.width() * costs.height()],
            width: costs.width(),
        }
    }

    pub fn destination(&self) -> Point {
        self.destination
    }

    /// Estimate at `p`; [None] if unreachable or out of bounds.
    pub fn get(&self, p: Point) -> Option<u32> {
        if p.x < 0 || p.y < 0 || p.x as usize >= self.width {
            return None;
        }
        self.distances
            .get(p.y as usize * self.width + p.x as usize)
            .copied()
            .flatten()
    }

    pub fn is_reachable(&self, p: Point) -> bool {
        self.get(p).is_some()
    }
}

impl fmt::Display for HeuristicTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.distances.chunks(self.width.max(1)) {
            let line = row
                .iter()
                .map(|d| d.map_or_else(|| "inf".to_owned(), |d| d.to_string()))
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{position, FacilityMap, TerrainTable};

    fn costs(map: &str) -> CostMatrix {
        let map: FacilityMap = map.parse().unwrap();
        CostMatrix::from_map(&map, &TerrainTable::facility())
    }

    /// Distances ignore terrain cost and route around walls.
    #[test]
    fn hop_count_around_walls() {
        let costs = costs("  -\n ##\n  *\n");
        let h = HeuristicTable::reachability(&costs, position(2, 2));
        assert_eq!(h.get(position(2, 2)), Some(0));
        assert_eq!(h.get(position(2, 1)), Some(1));
        assert_eq!(h.get(position(0, 0)), Some(4));
        assert_eq!(h.get(position(0, 2)), Some(6));
        assert_eq!(h.get(position(1, 1)), None);
    }

    #[test]
    fn enclosed_cells_are_unreachable() {
        let costs = costs("   \n # \n#D#\n");
        let h = HeuristicTable::reachability(&costs, position(2, 1));
        assert!(h.is_reachable(position(2, 1)));
        assert!(!h.is_reachable(position(0, 0)));
        assert!(!h.is_reachable(position(1, 0)));
    }

    #[test]
    fn out_of_bounds_destination() {
        let costs = costs("  \n  \n");
        let h = HeuristicTable::reachability(&costs, position(5, 5));
        assert!(!h.is_reachable(position(0, 0)));
        assert_eq!(h.get(Point::new(-1, 0)), None);
    }

    #[test]
    fn manhattan_and_zero() {
        let costs = costs("#  \n # \n   \n");
        let m = HeuristicTable::manhattan(&costs, position(2, 2));
        assert_eq!(m.get(position(0, 0)), Some(4));
        assert_eq!(m.get(position(1, 1)), Some(2));
        let z = HeuristicTable::zero(&costs, position(2, 2));
        assert_eq!(z.get(position(0, 0)), Some(0));
    }

    #[test]
    fn display() {
        let costs = costs(" #\n  \n");
        let h = HeuristicTable::reachability(&costs, position(1, 1));
        assert_eq!(h.to_string(), "2 inf\n1 0\n");
    }
}
