//! Symbol configuration: what each character of a facility map costs to enter and how it is
//! drawn. A [TerrainTable] is built once and passed to whoever needs it.
use std::num::NonZeroU32;

use fxhash::FxHashMap;

use crate::{EXIT, MOVER, VISITED, WALL};

/// Colour used for symbols the table knows nothing about.
pub const UNKNOWN_COLOR: [u8; 3] = [0, 0, 0];

/// Cost of entering a cell. Finite costs are at least 1, which keeps the hop count an
/// admissible estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraversalCost {
    Finite(NonZeroU32),
    Impassable,
}

const fn nonzero(cost: u32) -> NonZeroU32 {
    match NonZeroU32::new(cost) {
        Some(cost) => cost,
        None => panic!("terrain cost must be at least 1"),
    }
}

const DRY_FLOOR: TraversalCost = TraversalCost::Finite(nonzero(1));
const WET_FLOOR: TraversalCost = TraversalCost::Finite(nonzero(3));
const DOOR: TraversalCost = TraversalCost::Finite(nonzero(4));
const WIRES: TraversalCost = TraversalCost::Finite(nonzero(6));

impl TraversalCost {
    /// A finite cost, [None] for 0.
    pub const fn finite(cost: u32) -> Option<TraversalCost> {
        match NonZeroU32::new(cost) {
            Some(cost) => Some(TraversalCost::Finite(cost)),
            None => None,
        }
    }

    pub fn is_impassable(&self) -> bool {
        matches!(self, TraversalCost::Impassable)
    }
}

/// A terrain symbol's cost and display colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Terrain {
    pub cost: TraversalCost,
    pub color: [u8; 3],
}

impl Terrain {
    pub const fn new(cost: TraversalCost, color: [u8; 3]) -> Terrain {
        Terrain { cost, color }
    }
}

/// Immutable mapping from map symbols to terrain and marker attributes.
///
/// Terrain symbols have a cost. Marker symbols (entities, visited cells) only have a colour; the
/// cost matrix keeps them as unmapped cells.
#[derive(Clone, Debug)]
pub struct TerrainTable {
    terrains: FxHashMap<char, Terrain>,
    markers: FxHashMap<char, [u8; 3]>,
}

impl Default for TerrainTable {
    fn default() -> TerrainTable {
        TerrainTable::facility()
    }
}

impl TerrainTable {
    /// A table without any terrain or marker.
    pub fn empty() -> TerrainTable {
        TerrainTable {
            terrains: FxHashMap::default(),
            markers: FxHashMap::default(),
        }
    }

    /// The laboratory facility: dry and wet floor, doors, loose wires and walls, plus the
    /// mover, the four friends to rescue and the visited marker.
    pub fn facility() -> TerrainTable {
        TerrainTable::empty()
            .with_terrain(' ', Terrain::new(DRY_FLOOR, [200, 200, 200]))
            .with_terrain('*', Terrain::new(WET_FLOOR, [0, 0, 120]))
            .with_terrain('|', Terrain::new(DOOR, [139, 69, 19]))
            .with_terrain(EXIT, Terrain::new(DOOR, [139, 69, 19]))
            .with_terrain('-', Terrain::new(WIRES, [120, 0, 0]))
            .with_terrain(WALL, Terrain::new(TraversalCost::Impassable, [50, 50, 50]))
            .with_marker(MOVER, [0, 255, 0])
            .with_marker('D', [255, 255, 0])
            .with_marker('M', [255, 165, 0])
            .with_marker('L', [128, 0, 128])
            .with_marker('W', [0, 255, 255])
            .with_marker(VISITED, [100, 100, 100])
    }

    /// Adds or replaces a terrain symbol. A symbol is either terrain or marker, never both.
    pub fn with_terrain(mut self, symbol: char, terrain: Terrain) -> TerrainTable {
        self.markers.remove(&symbol);
        self.terrains.insert(symbol, terrain);
        self
    }

    /// Adds or replaces a marker symbol.
    pub fn with_marker(mut self, symbol: char, color: [u8; 3]) -> TerrainTable {
        self.terrains.remove(&symbol);
        self.markers.insert(symbol, color);
        self
    }

    pub fn terrain(&self, symbol: char) -> Option<&Terrain> {
        self.terrains.get(&symbol)
    }

    /// Traversal cost of a terrain symbol, [None] for markers and unknown symbols.
    pub fn cost(&self, symbol: char) -> Option<TraversalCost> {
        self.terrains.get(&symbol).map(|t| t.cost)
    }

    pub fn is_marker(&self, symbol: char) -> bool {
        self.markers.contains_key(&symbol)
    }

    /// Display colour of any symbol, [UNKNOWN_COLOR] if the table does not know it.
    pub fn color(&self, symbol: char) -> [u8; 3] {
        self.terrains
            .get(&symbol)
            .map(|t| t.color)
            .or_else(|| self.markers.get(&symbol).copied())
            .unwrap_or(UNKNOWN_COLOR)
    }
}
