//! Board state: placed ships, missed attacks, placement validation and
//! attack resolution.

use alloc::vec::Vec;
use log::{debug, trace};
use rand::Rng;

use crate::common::{AttackResult, PlacementError};
use crate::config::{Fleet, Rules, BOARD_SIZE};
use crate::grid::{CellSet, Coord};
use crate::ship::{Orientation, Ship};

/// Attempts per ship before random placement gives up.
const PLACEMENT_ATTEMPTS: usize = 200;
/// Whole-fleet restarts before `place_fleet_randomly` gives up.
const FLEET_ATTEMPTS: usize = 50;

/// A ship together with the cells it covers. `coords[i]` is segment `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct PlacedShip {
    ship: Ship,
    coords: Vec<Coord>,
}

impl PlacedShip {
    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    /// Covered cells in segment order.
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    /// Segment index covering `coord`, if any.
    pub fn segment_at(&self, coord: Coord) -> Option<usize> {
        self.coords.iter().position(|&c| c == coord)
    }
}

/// What a renderer should show for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum CellView {
    Water,
    Ship,
    Hit,
    Miss,
}

/// One side's 10×10 grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    ships: Vec<PlacedShip>,
    missed: Vec<Coord>,
    adjacency: bool,
}

impl Board {
    /// Create an empty board that enforces the adjacency rule.
    pub fn new() -> Self {
        Self::with_adjacency(true)
    }

    /// Create an empty board, choosing whether ships may touch.
    pub fn with_adjacency(adjacency: bool) -> Self {
        Board {
            ships: Vec::new(),
            missed: Vec::new(),
            adjacency,
        }
    }

    /// Create an empty board configured from match rules.
    pub fn with_rules(rules: &Rules) -> Self {
        Self::with_adjacency(rules.adjacency)
    }

    /// Whether placements touching another ship are refused.
    pub fn enforces_adjacency(&self) -> bool {
        self.adjacency
    }

    /// Placed ships in placement order.
    pub fn ships(&self) -> &[PlacedShip] {
        &self.ships
    }

    /// Missed attacks in the order they landed.
    pub fn missed_attacks(&self) -> &[Coord] {
        &self.missed
    }

    /// Every cell covered by a ship.
    pub fn occupied(&self) -> CellSet {
        let mut set = CellSet::new();
        for coord in self.ships.iter().flat_map(|e| e.coords.iter()) {
            // placed coordinates passed validation, so they are on the grid
            let _ = set.insert(*coord);
        }
        set
    }

    /// Cells touching a placed ship that are not themselves occupied.
    fn halo(&self, occupied: &CellSet) -> CellSet {
        let mut set = CellSet::new();
        for coord in occupied.iter() {
            for n in coord.surrounding() {
                if !occupied.contains(n) {
                    let _ = set.insert(n);
                }
            }
        }
        set
    }

    /// Validate a candidate placement, reporting the first rule it breaks.
    /// Never mutates the board.
    pub fn check_placement(&self, coords: &[Coord]) -> Result<(), PlacementError> {
        if coords.is_empty() {
            return Err(PlacementError::Empty);
        }
        let mut seen = CellSet::new();
        for &coord in coords {
            let fresh = seen
                .insert(coord)
                .map_err(|_| PlacementError::OutOfBounds)?;
            if !fresh {
                return Err(PlacementError::Duplicate);
            }
        }
        let occupied = self.occupied();
        if !(occupied & seen).is_empty() {
            return Err(PlacementError::Overlap);
        }
        if self.adjacency && !(self.halo(&occupied) & seen).is_empty() {
            return Err(PlacementError::Adjacent);
        }
        Ok(())
    }

    /// `true` when `coords` may be committed with [`Board::place_ship`].
    pub fn can_place_ship(&self, coords: &[Coord]) -> bool {
        self.check_placement(coords).is_ok()
    }

    /// Append a ship of `length` covering `coords`, in the given order.
    ///
    /// Does not re-validate: call [`Board::can_place_ship`] first.
    ///
    /// # Panics
    /// When `length` is zero or does not match `coords.len()`.
    pub fn place_ship(&mut self, length: usize, coords: &[Coord]) {
        assert_eq!(
            coords.len(),
            length,
            "ship of length {} given {} coordinates",
            length,
            coords.len()
        );
        debug!("placing ship of length {} at {:?}", length, coords);
        self.ships.push(PlacedShip {
            ship: Ship::new(length),
            coords: coords.to_vec(),
        });
    }

    /// Undo the most recent placement.
    pub fn remove_last_ship(&mut self) -> Option<PlacedShip> {
        self.ships.pop()
    }

    /// Resolve an attack at `coord` against this board's ships.
    ///
    /// Repeats are not rejected here: a repeated hit is harmless, a repeated
    /// miss is recorded twice. Callers must not attack resolved cells.
    pub fn receive_attack(&mut self, coord: Coord) -> AttackResult {
        for entry in self.ships.iter_mut() {
            if let Some(segment) = entry.segment_at(coord) {
                entry.ship.hit(segment);
                let sunk = entry.ship.is_sunk();
                trace!("attack at {} hit segment {} (sunk: {})", coord, segment, sunk);
                return AttackResult::Hit { sunk };
            }
        }
        trace!("attack at {} missed", coord);
        self.missed.push(coord);
        AttackResult::Miss
    }

    /// Returns `true` when every placed ship is sunk.
    pub fn all_ships_sunk(&self) -> bool {
        self.ships.iter().all(|e| e.ship.is_sunk())
    }

    /// Number of ships still afloat.
    pub fn ships_afloat(&self) -> usize {
        self.ships.iter().filter(|e| !e.ship.is_sunk()).count()
    }

    /// Placed ship covering `coord`, if any.
    pub fn ship_at(&self, coord: Coord) -> Option<&PlacedShip> {
        self.ships.iter().find(|e| e.segment_at(coord).is_some())
    }

    /// Render-ready state of one cell.
    pub fn cell(&self, coord: Coord) -> CellView {
        if let Some(entry) = self.ship_at(coord) {
            match entry.segment_at(coord) {
                Some(seg) if entry.ship.hits()[seg] => CellView::Hit,
                _ => CellView::Ship,
            }
        } else if self.missed.contains(&coord) {
            CellView::Miss
        } else {
            CellView::Water
        }
    }

    /// `true` once `coord` has been hit or missed.
    pub fn is_resolved(&self, coord: Coord) -> bool {
        matches!(self.cell(coord), CellView::Hit | CellView::Miss)
    }

    /// Drop every ship and miss, ready for a new match.
    pub fn clear(&mut self) {
        self.ships.clear();
        self.missed.clear();
    }

    /// Find a random placement for a ship of `length` that passes
    /// [`Board::can_place_ship`].
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> Result<Vec<Coord>, PlacementError> {
        if length == 0 || length > BOARD_SIZE as usize {
            return Err(PlacementError::NoRoom);
        }
        let span = (BOARD_SIZE as usize - length) as u8;
        for _ in 0..PLACEMENT_ATTEMPTS {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_x, max_y) = match orientation {
                Orientation::Horizontal => (span, BOARD_SIZE - 1),
                Orientation::Vertical => (BOARD_SIZE - 1, span),
            };
            let origin = Coord::new(rng.random_range(0..=max_x), rng.random_range(0..=max_y));
            if let Some(coords) = orientation.cells(origin, length) {
                if self.can_place_ship(&coords) {
                    return Ok(coords);
                }
            }
        }
        Err(PlacementError::NoRoom)
    }

    /// Place every ship of `fleet` at random, restarting the fleet when a
    /// ship finds no room. Ships placed before the call are kept.
    pub fn place_fleet_randomly<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        fleet: &Fleet,
    ) -> Result<(), PlacementError> {
        let kept = self.ships.len();
        'fleet: for attempt in 0..FLEET_ATTEMPTS {
            self.ships.truncate(kept);
            for def in fleet.ships() {
                match self.random_placement(rng, def.length()) {
                    Ok(coords) => self.place_ship(def.length(), &coords),
                    Err(_) => {
                        debug!("fleet placement attempt {} ran out of room", attempt + 1);
                        continue 'fleet;
                    }
                }
            }
            return Ok(());
        }
        self.ships.truncate(kept);
        Err(PlacementError::NoRoom)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
