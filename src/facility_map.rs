use core::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use grid_util::point::Point;
use log::info;
use thiserror::Error;

/// Reasons a map cannot be loaded.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("could not read map file: {0}")]
    Io(#[from] std::io::Error),
    #[error("map has no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// [FacilityMap] holds the symbol of every cell of a rectangular facility map in row-major
/// order. It is the mutable picture of a run: the [Overlay](crate::Overlay) writes markers into
/// it, so the terrain under a marker is lost here and only survives in the
/// [CostMatrix](crate::CostMatrix) built before the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacilityMap {
    cells: Vec<char>,
    width: usize,
    height: usize,
}

impl FacilityMap {
    pub fn new(width: usize, height: usize, symbol: char) -> FacilityMap {
        FacilityMap {
            cells: vec![symbol; width * height],
            width,
            height,
        }
    }

    /// Builds a map from rows of symbols. All rows must have the same, non-zero length.
    pub fn from_rows<I, R>(rows: I) -> Result<FacilityMap, MapError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = char>,
    {
        let mut cells = Vec::new();
        let mut width = 0;
        let mut height = 0;
        for (row, symbols) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(symbols);
            let found = cells.len() - before;
            if row == 0 {
                width = found;
            } else if found != width {
                return Err(MapError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            height += 1;
        }
        if width == 0 {
            return Err(MapError::Empty);
        }
        Ok(FacilityMap {
            cells,
            width,
            height,
        })
    }

    /// Reads a map from a text file, one row per line.
    pub fn read_map<P: AsRef<Path>>(path: P) -> Result<FacilityMap, MapError> {
        let text = fs::read_to_string(path.as_ref())?;
        let map = text.parse::<FacilityMap>()?;
        info!(
            "Loaded {}x{} map from {}",
            map.width,
            map.height,
            path.as_ref().display()
        );
        Ok(map)
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
    fn ix(&self, p: Point) -> Option<usize> {
        self.in_bounds(p).then(|| p.y as usize * self.width + p.x as usize)
    }
    pub fn get(&self, p: Point) -> Option<char> {
        self.ix(p).map(|ix| self.cells[ix])
    }
    /// Overwrites the symbol at `p`. Out of bounds writes are ignored.
    pub fn set(&mut self, p: Point, symbol: char) {
        if let Some(ix) = self.ix(p) {
            self.cells[ix] = symbol;
        }
    }

    /// First occurrence of `symbol` in row-major order.
    pub fn find_position(&self, symbol: char) -> Option<Point> {
        self.cells.iter().position(|&c| c == symbol).map(|ix| {
            Point::new((ix % self.width) as i32, (ix / self.width) as i32)
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> + '_ {
        self.cells.chunks(self.width.max(1))
    }
}

impl FromStr for FacilityMap {
    type Err = MapError;

    /// Parses one row per line. Spaces are floor, so only line endings are stripped; trailing
    /// empty lines are dropped.
    fn from_str(s: &str) -> Result<FacilityMap, MapError> {
        let mut lines = s
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect::<Vec<_>>();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        FacilityMap::from_rows(lines.into_iter().map(str::chars))
    }
}

impl fmt::Display for FacilityMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", row.iter().collect::<String>())?;
        }
        Ok(())
    }
}
