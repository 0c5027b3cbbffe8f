//! Ship definitions: per-segment damage tracking and layout helpers.

use alloc::vec;
use alloc::vec::Vec;

use crate::grid::Coord;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Extends towards increasing `x`.
    Horizontal,
    /// Extends towards increasing `y`.
    Vertical,
}

impl Orientation {
    /// Cells covered by a ship of `length` starting at `origin`, or `None`
    /// when it would run off the board.
    pub fn cells(self, origin: Coord, length: usize) -> Option<Vec<Coord>> {
        (0..length)
            .map(|i| {
                let step = i8::try_from(i).ok()?;
                match self {
                    Orientation::Horizontal => origin.offset(step, 0),
                    Orientation::Vertical => origin.offset(0, step),
                }
            })
            .collect()
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    /// Conventional ship type for a given length.
    pub const fn for_length(length: usize) -> Self {
        let name = match length {
            5 => "Carrier",
            4 => "Battleship",
            3 => "Cruiser",
            2 => "Destroyer",
            1 => "Patrol Boat",
            _ => "Dreadnought",
        };
        Self { name, length }
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// One vessel's damage, one flag per segment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct Ship {
    hits: Vec<bool>,
}

impl Ship {
    /// Create an undamaged ship.
    ///
    /// # Panics
    /// When `length` is zero.
    pub fn new(length: usize) -> Self {
        assert!(length > 0, "ship length must be positive");
        Self {
            hits: vec![false; length],
        }
    }

    /// Mark `segment` as damaged. Hitting a damaged segment again is a no-op.
    ///
    /// # Panics
    /// When `segment >= self.length()`.
    pub fn hit(&mut self, segment: usize) {
        assert!(
            segment < self.hits.len(),
            "segment {} out of range for ship of length {}",
            segment,
            self.hits.len()
        );
        self.hits[segment] = true;
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.hits.iter().all(|&h| h)
    }

    pub fn length(&self) -> usize {
        self.hits.len()
    }

    /// Per-segment damage flags, in segment order.
    pub fn hits(&self) -> &[bool] {
        &self.hits
    }

    /// Number of damaged segments.
    pub fn hit_count(&self) -> usize {
        self.hits.iter().filter(|&&h| h).count()
    }
}
