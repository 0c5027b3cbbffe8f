use alloc::vec::Vec;
use core::str::FromStr;

use crate::ship::ShipType;

pub const BOARD_SIZE: u8 = 10;
pub const BOARD_CELLS: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;
pub const STANDARD_FLEET: [ShipType; 5] = [
    ShipType::new("Carrier", 5),
    ShipType::new("Battleship", 4),
    ShipType::new("Cruiser", 3),
    ShipType::new("Submarine", 3),
    ShipType::new("Destroyer", 2),
];

/// Product rules that callers may toggle per match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Rules {
    /// Ships may not touch each other, diagonals included.
    pub adjacency: bool,
    /// A hit lets the attacker fire again.
    pub extra_shot_on_hit: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            adjacency: true,
            extra_shot_on_hit: true,
        }
    }
}

/// The ships each side places before combat, in placement order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    ships: Vec<ShipType>,
}

impl Fleet {
    /// Carrier, Battleship, Cruiser, Submarine, Destroyer.
    pub fn standard() -> Self {
        Self {
            ships: STANDARD_FLEET.to_vec(),
        }
    }

    /// Build a fleet from ship lengths, naming each ship after its size.
    pub fn from_lengths(lengths: &[usize]) -> Result<Self, FleetError> {
        if lengths.is_empty() {
            return Err(FleetError::Empty);
        }
        let mut ships = Vec::with_capacity(lengths.len());
        for &len in lengths {
            if len == 0 || len > BOARD_SIZE as usize {
                return Err(FleetError::BadLength(len));
            }
            ships.push(ShipType::for_length(len));
        }
        Ok(Self { ships })
    }

    /// The ships still to place once `placed` of them are on the board.
    pub fn after(&self, placed: usize) -> Fleet {
        Fleet {
            ships: self.ships.iter().skip(placed).copied().collect(),
        }
    }

    pub fn ships(&self) -> &[ShipType] {
        &self.ships
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Total number of ship segments in the fleet.
    pub fn total_cells(&self) -> usize {
        self.ships.iter().map(|s| s.length()).sum()
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Parses a comma separated list of lengths such as `5,4,3,3,2`.
impl FromStr for Fleet {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lengths = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let len: usize = part.parse().map_err(|_| FleetError::NotANumber)?;
            lengths.push(len);
        }
        Self::from_lengths(&lengths)
    }
}

/// Errors from building a [`Fleet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FleetError {
    /// No ships were listed.
    Empty,
    /// A length is zero or longer than the board.
    BadLength(usize),
    /// A list entry is not a number.
    NotANumber,
}

impl core::fmt::Display for FleetError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FleetError::Empty => write!(f, "Fleet must contain at least one ship"),
            FleetError::BadLength(len) => write!(
                f,
                "Ship length {} must be between 1 and {}",
                len, BOARD_SIZE
            ),
            FleetError::NotANumber => write!(f, "Fleet lengths must be numbers"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FleetError {}
