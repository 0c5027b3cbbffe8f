//! Players: a board plus whoever decides where to fire.

use log::debug;
use rand::Rng;

use crate::board::Board;
use crate::common::{AttackResult, CoordError, MatchError, PlacementError};
use crate::config::{Fleet, Rules};
use crate::grid::Coord;
use crate::targeting::HuntTarget;

/// Who chooses this player's shots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Controller {
    /// Shots come from outside, one coordinate per attack.
    Human,
    /// Shots come from the hunt/target search.
    Computer(HuntTarget),
}

/// A resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct Shot {
    pub coord: Coord,
    pub result: AttackResult,
}

/// One side of a match. Owns its board exclusively.
#[derive(Debug, Clone)]
pub struct Player {
    board: Board,
    controller: Controller,
}

impl Player {
    pub fn human(rules: &Rules) -> Self {
        Self {
            board: Board::with_rules(rules),
            controller: Controller::Human,
        }
    }

    pub fn computer(rules: &Rules) -> Self {
        Self {
            board: Board::with_rules(rules),
            controller: Controller::Computer(HuntTarget::new()),
        }
    }

    pub fn is_computer(&self) -> bool {
        matches!(self.controller, Controller::Computer(_))
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Place every ship of `fleet` on this player's board at random.
    pub fn place_fleet_randomly<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        fleet: &Fleet,
    ) -> Result<(), PlacementError> {
        self.board.place_fleet_randomly(rng, fleet)
    }

    /// Fire at `enemy`.
    ///
    /// Humans must supply `coord`. Computers ignore it, choose their own
    /// cell, and learn from the result before returning.
    pub fn attack<R: Rng + ?Sized>(
        &mut self,
        enemy: &mut Board,
        coord: Option<Coord>,
        rng: &mut R,
    ) -> Result<Shot, MatchError> {
        match &mut self.controller {
            Controller::Human => {
                let coord = coord.ok_or(MatchError::MissingCoordinate)?;
                if !coord.in_bounds() {
                    return Err(CoordError::OutOfBounds {
                        x: coord.x,
                        y: coord.y,
                    }
                    .into());
                }
                let result = enemy.receive_attack(coord);
                Ok(Shot { coord, result })
            }
            Controller::Computer(strategy) => {
                let coord = strategy
                    .next_target(rng)
                    .ok_or(MatchError::GridExhausted)?;
                let result = enemy.receive_attack(coord);
                strategy.record(coord, result);
                debug!("computer fired at {}: {:?}", coord, result);
                Ok(Shot { coord, result })
            }
        }
    }

    /// Empty the board and forget targeting state for a new match.
    pub fn reset(&mut self, rules: &Rules) {
        self.board = Board::with_rules(rules);
        if let Controller::Computer(strategy) = &mut self.controller {
            strategy.reset();
        }
    }
}
