use core::fmt;

use grid_util::point::Point;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::facility_map::FacilityMap;
use crate::terrain::{TerrainTable, TraversalCost};
use crate::{manhattan_distance, N_SMALLVEC_SIZE};

/// Cost of entering a cell whose symbol has no terrain of its own.
pub const UNMAPPED_COST: u32 = 1;

/// One entry of a [CostMatrix].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CostCell {
    /// Finite terrain cost.
    Cost(u32),
    /// Impassable.
    Wall,
    /// A symbol without terrain (an entity or the visited marker), entered like plain floor.
    Unmapped(char),
}

impl CostCell {
    pub fn is_wall(&self) -> bool {
        matches!(self, CostCell::Wall)
    }
    /// Cost of stepping into the cell, [None] for walls.
    pub fn step_cost(&self) -> Option<u32> {
        match *self {
            CostCell::Cost(c) => Some(c),
            CostCell::Wall => None,
            CostCell::Unmapped(_) => Some(UNMAPPED_COST),
        }
    }
}

/// Per-cell traversal costs of a [FacilityMap], captured once when a run starts. Later
/// changes to the map are not reflected here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostMatrix {
    cells: Vec<CostCell>,
    width: usize,
    height: usize,
}

impl CostMatrix {
    /// Looks up every symbol of `map` in `table`. Symbols without terrain are kept as
    /// [CostCell::Unmapped].
    pub fn from_map(map: &FacilityMap, table: &TerrainTable) -> CostMatrix {
        let cells = map
            .rows()
            .flatten()
            .map(|&symbol| match table.cost(symbol) {
                Some(TraversalCost::Finite(c)) => CostCell::Cost(c.get()),
                Some(TraversalCost::Impassable) => CostCell::Wall,
                None => CostCell::Unmapped(symbol),
            })
            .collect();
        CostMatrix {
            cells,
            width: map.width(),
            height: map.height(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }
    /// Row-major index of an in-bounds position.
    pub(crate) fn ix(&self, p: Point) -> Option<usize> {
        self.in_bounds(p).then(|| p.y as usize * self.width + p.x as usize)
    }
    pub(crate) fn point(&self, ix: usize) -> Point {
        Point::new((ix % self.width) as i32, (ix / self.width) as i32)
    }
    pub fn get(&self, p: Point) -> Option<CostCell> {
        self.ix(p).map(|ix| self.cells[ix])
    }
    /// Out of bounds positions count as walls.
    pub fn is_wall(&self, p: Point) -> bool {
        self.get(p).map_or(true, |cell| cell.is_wall())
    }
    pub fn step_cost(&self, p: Point) -> Option<u32> {
        self.get(p).and_then(|cell| cell.step_cost())
    }

    /// The 4-neighbourhood of a position, up, down, left, right.
    pub fn neighborhood_points(&self, p: &Point) -> [Point; 4] {
        [
            Point::new(p.x, p.y - 1),
            Point::new(p.x, p.y + 1),
            Point::new(p.x - 1, p.y),
            Point::new(p.x + 1, p.y),
        ]
    }

    /// Neighbours that can be entered from `p`, with the cost of entering them.
    pub fn neighborhood_points_and_cost(
        &self,
        p: &Point,
    ) -> SmallVec<[(Point, u32); N_SMALLVEC_SIZE]> {
        self.neighborhood_points(p)
            .into_iter()
            .filter_map(|n| self.step_cost(n).map(|c| (n, c)))
            .collect()
    }

    /// Sum of the entry costs of every step after the first position. [None] if the path
    /// jumps, leaves the map or crosses a wall.
    pub fn path_cost(&self, path: &[Point]) -> Option<u32> {
        if path
            .iter()
            .tuple_windows()
            .any(|(a, b)| manhattan_distance(a, b) != 1)
        {
            return None;
        }
        if path.first().is_some_and(|p| self.is_wall(*p)) {
            return None;
        }
        path.iter()
            .skip(1)
            .map(|p| self.step_cost(*p))
            .sum::<Option<u32>>()
    }
}

impl fmt::Display for CostMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            let line = row
                .iter()
                .map(|cell| match cell {
                    CostCell::Cost(c) => c.to_string(),
                    CostCell::Wall => "#".to_owned(),
                    CostCell::Unmapped(s) => s.to_string(),
                })
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
