use grid_util::point::Point;

use crate::facility_map::FacilityMap;
use crate::{MOVER, VISITED};

/// Marks the mover's trail on a [FacilityMap].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Overlay {
    pub visited: char,
    pub mover: char,
}

impl Default for Overlay {
    fn default() -> Overlay {
        Overlay {
            visited: VISITED,
            mover: MOVER,
        }
    }
}

impl Overlay {
    /// Moves the mover from `previous` to `next`: `previous` becomes visited, then `next` gets
    /// the mover. Both cells lose their terrain symbol for good.
    pub fn advance(&self, map: &mut FacilityMap, previous: Point, next: Point) {
        map.set(previous, self.visited);
        map.set(next, self.mover);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position;

    #[test]
    fn advance_marks_trail() {
        let mut map: FacilityMap = "E*-\n".parse().unwrap();
        let overlay = Overlay::default();
        overlay.advance(&mut map, position(0, 0), position(0, 1));
        overlay.advance(&mut map, position(0, 1), position(0, 2));
        assert_eq!(map.to_string(), "VVE\n");
    }

    /// Advancing in place leaves the mover on the cell, as the mover is written last.
    #[test]
    fn advance_in_place() {
        let mut map: FacilityMap = "E \n".parse().unwrap();
        Overlay::default().advance(&mut map, position(0, 0), position(0, 0));
        assert_eq!(map.get(position(0, 0)), Some('E'));
    }
}
