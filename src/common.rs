//! Common types for Broadside: attack results and error enums.

/// Outcome of resolving one attack against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackResult {
    /// The shot struck a ship. `sunk` reports whether that ship is now sunk.
    Hit { sunk: bool },
    /// The shot landed in open water.
    Miss,
}

impl AttackResult {
    /// `true` for any hit, sinking or not.
    pub fn is_hit(&self) -> bool {
        matches!(self, AttackResult::Hit { .. })
    }

    /// `true` only when the shot finished off a ship.
    pub fn sunk_ship(&self) -> bool {
        matches!(self, AttackResult::Hit { sunk: true })
    }
}

/// Errors produced while parsing or bounds-checking a coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordError {
    /// Input was empty.
    Empty,
    /// Column is not a letter on the board.
    BadColumn(char),
    /// Row is not a number on the board.
    BadRow,
    /// Coordinate lies outside the grid.
    OutOfBounds { x: u8, y: u8 },
}

impl core::fmt::Display for CoordError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CoordError::Empty => write!(f, "Empty coordinate"),
            CoordError::BadColumn(c) => write!(f, "Invalid column '{}' - must be a letter A-J", c),
            CoordError::BadRow => write!(f, "Invalid row - must be a number 1-10"),
            CoordError::OutOfBounds { x, y } => {
                write!(f, "Coordinate ({}, {}) is off the board", x, y)
            }
        }
    }
}

/// Reasons a candidate placement is refused.
///
/// `Board::can_place_ship` collapses all of these into `false`; callers that
/// want a message ask `Board::check_placement` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// No coordinates were given.
    Empty,
    /// The same cell appears twice in the list.
    Duplicate,
    /// A cell lies off the grid.
    OutOfBounds,
    /// A cell is already taken by another ship.
    Overlap,
    /// A cell touches another ship, diagonals included.
    Adjacent,
    /// The coordinate count does not match the ship length.
    LengthMismatch { expected: usize, found: usize },
    /// Random placement gave up after its attempt budget.
    NoRoom,
}

impl core::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PlacementError::Empty => write!(f, "Ship has no coordinates"),
            PlacementError::Duplicate => write!(f, "Ship covers the same cell twice"),
            PlacementError::OutOfBounds => write!(f, "Ship placement is out of bounds"),
            PlacementError::Overlap => write!(f, "Ship placement overlaps with another ship"),
            PlacementError::Adjacent => write!(f, "Ship placement touches another ship"),
            PlacementError::LengthMismatch { expected, found } => write!(
                f,
                "Ship of length {} cannot cover {} cells",
                expected, found
            ),
            PlacementError::NoRoom => write!(f, "Unable to find room for ship"),
        }
    }
}

/// Errors returned by the turn coordinator and players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Placement was refused by the board.
    Placement(PlacementError),
    /// Coordinate is invalid.
    Coord(CoordError),
    /// The cell was already hit or missed on the target board.
    AlreadyResolved,
    /// A human player attacked without naming a cell.
    MissingCoordinate,
    /// A computer player has no untried cells left.
    GridExhausted,
    /// The requested action does not belong to the current phase.
    WrongPhase,
    /// Every ship of the fleet is already on the board.
    FleetComplete,
    /// Combat cannot start until both fleets are placed.
    FleetIncomplete,
}

impl From<PlacementError> for MatchError {
    fn from(err: PlacementError) -> Self {
        MatchError::Placement(err)
    }
}

impl From<CoordError> for MatchError {
    fn from(err: CoordError) -> Self {
        MatchError::Coord(err)
    }
}

impl core::fmt::Display for MatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatchError::Placement(e) => write!(f, "Placement error: {}", e),
            MatchError::Coord(e) => write!(f, "Coordinate error: {}", e),
            MatchError::AlreadyResolved => write!(f, "That cell has already been attacked"),
            MatchError::MissingCoordinate => write!(f, "A target coordinate is required"),
            MatchError::GridExhausted => write!(f, "Every cell has already been attacked"),
            MatchError::WrongPhase => write!(f, "Action not allowed in the current phase"),
            MatchError::FleetComplete => write!(f, "All ships are already placed"),
            MatchError::FleetIncomplete => write!(f, "Both fleets must be placed first"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoordError {}
#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}
#[cfg(feature = "std")]
impl std::error::Error for MatchError {}
