//! Visiting an ordered list of targets one leg at a time.
//!
//! Every leg is an independent search from wherever the previous leg ended. The first target
//! that cannot be reached ends the tour; the targets after it are never attempted.
use core::fmt;

use grid_util::point::Point;
use itertools::Itertools;
use log::{info, warn};
use thiserror::Error;

use crate::cost_matrix::CostMatrix;
use crate::facility_map::FacilityMap;
use crate::overlay::Overlay;
use crate::solver::{PathSolver, Route, SearchError};
use crate::{EXIT, FRIENDS, MOVER};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TourError {
    #[error("marker {symbol:?} does not occur on the map")]
    MissingMarker { symbol: char },
}

/// A position to visit, remembering the marker it was found by, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    pub position: Point,
    pub symbol: Option<char>,
}

impl Target {
    pub fn at(position: Point) -> Target {
        Target {
            position,
            symbol: None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.symbol {
            Some(symbol) => write!(f, "{:?} at ({}, {})", symbol, self.position.y, self.position.x),
            None => write!(f, "({}, {})", self.position.y, self.position.x),
        }
    }
}

/// A leg that was completed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leg {
    pub target: Target,
    pub route: Route,
}

/// The target a tour stopped at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unreached {
    /// Index of the target in the tour.
    pub index: usize,
    pub target: Target,
    pub error: SearchError,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TourReport {
    pub legs: Vec<Leg>,
    /// Sum of the costs of all completed legs.
    pub total_cost: u32,
    pub unreached: Option<Unreached>,
    /// Where the mover ended up.
    pub final_position: Point,
}

impl TourReport {
    pub fn is_complete(&self) -> bool {
        self.unreached.is_none()
    }
}

/// What a [Renderer] gets to see.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub map: &'a FacilityMap,
    /// Route of the current leg. After the tour, the last route, or [None] if the tour stopped
    /// at an unreachable target.
    pub path: Option<&'a [Point]>,
    /// Cost walked so far in the current leg, [None] once the tour is over.
    pub leg_cost: Option<u32>,
    /// Total cost of the tour, [None] while it is still running.
    pub total_cost: Option<u32>,
}

/// Receives one frame per step of the mover and one final frame after the tour. Calls are
/// synchronous; the tour waits for each draw to return.
pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>);
}

/// Draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRender;

impl Renderer for NoRender {
    fn draw(&mut self, _: &Frame<'_>) {}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tour {
    start: Point,
    targets: Vec<Target>,
    overlay: Overlay,
}

impl Tour {
    pub fn new<I: IntoIterator<Item = Point>>(start: Point, targets: I) -> Tour {
        Tour {
            start,
            targets: targets.into_iter().map(Target::at).collect(),
            overlay: Overlay::default(),
        }
    }

    /// Locates the mover and every target by their marker symbol. Has to be called before the
    /// map is marked, as markers get overwritten along the way.
    pub fn from_markers(
        map: &FacilityMap,
        mover: char,
        targets: &[char],
    ) -> Result<Tour, TourError> {
        let locate = |symbol: char| {
            map.find_position(symbol)
                .ok_or(TourError::MissingMarker { symbol })
        };
        let start = locate(mover)?;
        let targets = targets
            .iter()
            .map(|&symbol| {
                locate(symbol).map(|position| Target {
                    position,
                    symbol: Some(symbol),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        info!("Mover {:?} starts at {:?}", mover, start);
        Ok(Tour {
            start,
            targets,
            overlay: Overlay::default(),
        })
    }

    /// The rescue tour of the laboratory: from the mover to every friend, then the exit.
    pub fn facility(map: &FacilityMap) -> Result<Tour, TourError> {
        let mut targets = FRIENDS.to_vec();
        targets.push(EXIT);
        Tour::from_markers(map, MOVER, &targets)
    }

    pub fn with_overlay(mut self, overlay: Overlay) -> Tour {
        self.overlay = overlay;
        self
    }

    pub fn start(&self) -> Point {
        self.start
    }
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Searches every leg without touching a map.
    pub fn plan<S: PathSolver>(&self, solver: &S, costs: &CostMatrix) -> TourReport {
        self.drive(solver, costs, |_| {})
    }

    /// Searches every leg and walks each found route on `map`, drawing a frame per step.
    /// `costs` is expected to have been built from `map` before it was marked.
    pub fn run<S: PathSolver, R: Renderer>(
        &self,
        solver: &S,
        costs: &CostMatrix,
        map: &mut FacilityMap,
        renderer: &mut R,
    ) -> TourReport {
        let overlay = self.overlay;
        let report = self.drive(solver, costs, |route| {
            let mut leg_cost = 0;
            for (&current, &next) in route.path.iter().tuple_windows() {
                overlay.advance(map, current, next);
                if let Some(c) = costs.step_cost(next) {
                    leg_cost += c;
                }
                renderer.draw(&Frame {
                    map: &*map,
                    path: Some(route.path.as_slice()),
                    leg_cost: Some(leg_cost),
                    total_cost: None,
                });
            }
        });
        let last_path = match report.unreached {
            Some(_) => None,
            None => report.legs.last().map(|leg| leg.route.path.as_slice()),
        };
        renderer.draw(&Frame {
            map: &*map,
            path: last_path,
            leg_cost: None,
            total_cost: Some(report.total_cost),
        });
        report
    }

    fn drive<S, F>(&self, solver: &S, costs: &CostMatrix, mut replay: F) -> TourReport
    where
        S: PathSolver,
        F: FnMut(&Route),
    {
        let mut mover = self.start;
        let mut total_cost = 0;
        let mut legs = Vec::with_capacity(self.targets.len());
        for (index, target) in self.targets.iter().enumerate() {
            info!("Leg {}: {:?} -> {}", index + 1, mover, target);
            match solver.search(costs, mover, target.position) {
                Ok(route) => {
                    total_cost += route.cost;
                    mover = target.position;
                    replay(&route);
                    legs.push(Leg {
                        target: *target,
                        route,
                    });
                }
                Err(error) => {
                    warn!("Cannot reach {}: {}. Stopping the tour", target, error);
                    return TourReport {
                        legs,
                        total_cost,
                        unreached: Some(Unreached {
                            index,
                            target: *target,
                            error,
                        }),
                        final_position: mover,
                    };
                }
            }
        }
        info!("Tour complete, total cost {}", total_cost);
        TourReport {
            legs,
            total_cost,
            unreached: None,
            final_position: mover,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{position, AstarSolver, TerrainTable};

    #[derive(Default)]
    struct FrameLog {
        maps: Vec<String>,
        leg_costs: Vec<Option<u32>>,
        total_costs: Vec<Option<u32>>,
        had_path: Vec<bool>,
    }

    impl Renderer for FrameLog {
        fn draw(&mut self, frame: &Frame<'_>) {
            self.maps.push(frame.map.to_string());
            self.leg_costs.push(frame.leg_cost);
            self.total_costs.push(frame.total_cost);
            self.had_path.push(frame.path.is_some());
        }
    }

    #[test]
    fn missing_marker() {
        let map: FacilityMap = "E D\n".parse().unwrap();
        assert_eq!(
            Tour::from_markers(&map, 'E', &['D', 'L']),
            Err(TourError::MissingMarker { symbol: 'L' })
        );
        assert_eq!(
            Tour::from_markers(&map, 'X', &['D']),
            Err(TourError::MissingMarker { symbol: 'X' })
        );
    }

    #[test]
    fn facility_targets_in_order() {
        let map: FacilityMap = "E W\nL!M\nD  \n".parse().unwrap();
        let tour = Tour::facility(&map).unwrap();
        assert_eq!(tour.start(), position(0, 0));
        let symbols = tour
            .targets()
            .iter()
            .map(|t| t.symbol.unwrap())
            .collect::<String>();
        assert_eq!(symbols, "DLMW!");
    }

    /// Frames show the leg cost growing step by step, then the total.
    #[test]
    fn run_draws_every_step() {
        let mut map: FacilityMap = "E*D\n".parse().unwrap();
        let costs = CostMatrix::from_map(&map, &TerrainTable::facility());
        let tour = Tour::from_markers(&map, 'E', &['D']).unwrap();
        let mut log = FrameLog::default();
        let report = tour.run(&AstarSolver::new(), &costs, &mut map, &mut log);
        assert!(report.is_complete());
        assert_eq!(report.total_cost, 4);
        assert_eq!(log.maps, vec!["VED\n", "VVE\n", "VVE\n"]);
        assert_eq!(log.leg_costs, vec![Some(3), Some(4), None]);
        assert_eq!(log.total_costs, vec![None, None, Some(4)]);
        assert_eq!(log.had_path, vec![true, true, true]);
    }

    /// Visited cells keep the cost captured before the run.
    #[test]
    fn revisited_cells_keep_original_cost() {
        let mut map: FacilityMap = "D-E-L\n".parse().unwrap();
        let costs = CostMatrix::from_map(&map, &TerrainTable::facility());
        let tour = Tour::from_markers(&map, 'E', &['D', 'L']).unwrap();
        let report = tour.run(&AstarSolver::new(), &costs, &mut map, &mut NoRender);
        // E -> D: '-' then D (1). D -> L: '-', E (1), '-', L (1).
        assert_eq!(report.legs[0].route.cost, 7);
        assert_eq!(report.legs[1].route.cost, 6 + 1 + 6 + 1);
        assert_eq!(report.total_cost, 21);
        assert_eq!(map.to_string(), "VVVVE\n");
    }

    #[test]
    fn halted_tour_has_no_final_path() {
        let mut map: FacilityMap = "E D#L\n".parse().unwrap();
        let costs = CostMatrix::from_map(&map, &TerrainTable::facility());
        let tour = Tour::from_markers(&map, 'E', &['D', 'L']).unwrap();
        let mut log = FrameLog::default();
        let report = tour.run(&AstarSolver::new(), &costs, &mut map, &mut log);
        let unreached = report.unreached.unwrap();
        assert_eq!(unreached.index, 1);
        assert_eq!(unreached.target.symbol, Some('L'));
        assert_eq!(report.final_position, position(0, 2));
        assert_eq!(report.total_cost, 2);
        assert_eq!(log.had_path.last(), Some(&false));
        assert_eq!(log.total_costs.last(), Some(&Some(2)));
    }

    #[test]
    fn plan_leaves_map_alone() {
        let map: FacilityMap = "E  \n # \nD  \n".parse().unwrap();
        let costs = CostMatrix::from_map(&map, &TerrainTable::facility());
        let tour = Tour::new(position(0, 0), [position(2, 0), position(2, 2)]);
        let report = tour.plan(&AstarSolver::new(), &costs);
        assert!(report.is_complete());
        assert_eq!(report.total_cost, 2 + 2);
        assert_eq!(report.final_position, position(2, 2));
        assert_eq!(map.find_position('E'), Some(position(0, 0)));
    }

    #[test]
    fn target_display() {
        let target = Target {
            position: position(3, 7),
            symbol: Some('D'),
        };
        assert_eq!(target.to_string(), "'D' at (3, 7)");
        assert_eq!(Target::at(position(1, 2)).to_string(), "(1, 2)");
    }
}
