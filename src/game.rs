//! Turn coordination for one match: placement phase, alternating fire,
//! replay on hit, and win detection.
//!
//! The match owns the turn state; boards and players know nothing about
//! whose turn it is, so they stay testable on their own.

use log::info;
use rand::Rng;

use crate::common::{MatchError, PlacementError};
use crate::config::{Fleet, Rules};
use crate::grid::Coord;
use crate::player::{Player, Shot};
use crate::ship::ShipType;

/// One of the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }
}

/// Current status of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Phase {
    Placement,
    Combat,
    Finished { winner: Side },
}

/// What happened on one call to [`Match::fire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct TurnReport {
    /// Side that fired.
    pub side: Side,
    pub shot: Shot,
    /// The same side fires again.
    pub again: bool,
    /// Set when this shot ended the match.
    pub winner: Option<Side>,
}

/// Caller-owned coordinator for a two-player match.
#[derive(Debug, Clone)]
pub struct Match {
    players: [Player; 2],
    rules: Rules,
    fleet: Fleet,
    phase: Phase,
    turn: Side,
    shots: [usize; 2],
}

impl Match {
    /// Start a match in the placement phase with side one to fire first.
    pub fn new(one: Player, two: Player, rules: Rules, fleet: Fleet) -> Self {
        Self {
            players: [one, two],
            rules,
            fleet,
            phase: Phase::Placement,
            turn: Side::One,
            shots: [0; 2],
        }
    }

    /// Human on side one against the computer on side two.
    pub fn human_vs_computer(rules: Rules, fleet: Fleet) -> Self {
        Self::new(Player::human(&rules), Player::computer(&rules), rules, fleet)
    }

    /// Two humans sharing one device.
    pub fn hotseat(rules: Rules, fleet: Fleet) -> Self {
        Self::new(Player::human(&rules), Player::human(&rules), rules, fleet)
    }

    pub fn computer_vs_computer(rules: Rules, fleet: Fleet) -> Self {
        Self::new(Player::computer(&rules), Player::computer(&rules), rules, fleet)
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Side due to fire next.
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    /// Shots fired so far by `side`.
    pub fn shots_fired(&self, side: Side) -> usize {
        self.shots[side.index()]
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    /// Next ship `side` has to place, if any remain.
    pub fn next_ship(&self, side: Side) -> Option<ShipType> {
        let placed = self.player(side).board().ships().len();
        self.fleet.ships().get(placed).copied()
    }

    pub fn fleet_placed(&self, side: Side) -> bool {
        self.next_ship(side).is_none()
    }

    fn require(&self, phase: Phase) -> Result<(), MatchError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(MatchError::WrongPhase)
        }
    }

    /// Place the next ship of `side`'s fleet on `coords`.
    pub fn place_next(&mut self, side: Side, coords: &[Coord]) -> Result<ShipType, MatchError> {
        self.require(Phase::Placement)?;
        let def = self.next_ship(side).ok_or(MatchError::FleetComplete)?;
        if coords.len() != def.length() {
            return Err(PlacementError::LengthMismatch {
                expected: def.length(),
                found: coords.len(),
            }
            .into());
        }
        let board = self.players[side.index()].board_mut();
        board.check_placement(coords)?;
        board.place_ship(def.length(), coords);
        Ok(def)
    }

    /// Take back `side`'s most recent placement.
    pub fn undo_placement(&mut self, side: Side) -> Result<Option<ShipType>, MatchError> {
        self.require(Phase::Placement)?;
        let board = self.players[side.index()].board_mut();
        let removed = board.remove_last_ship().map(|_| board.ships().len());
        Ok(removed.and_then(|idx| self.fleet.ships().get(idx).copied()))
    }

    /// Place whatever remains of `side`'s fleet at random.
    pub fn place_randomly<R: Rng + ?Sized>(
        &mut self,
        side: Side,
        rng: &mut R,
    ) -> Result<(), MatchError> {
        self.require(Phase::Placement)?;
        let placed = self.player(side).board().ships().len();
        let remaining = self.fleet.after(placed);
        self.players[side.index()].place_fleet_randomly(rng, &remaining)?;
        Ok(())
    }

    /// Leave the placement phase once both fleets are down.
    pub fn start(&mut self) -> Result<(), MatchError> {
        self.require(Phase::Placement)?;
        if !self.fleet_placed(Side::One) || !self.fleet_placed(Side::Two) {
            return Err(MatchError::FleetIncomplete);
        }
        info!("combat begins; {:?} fires first", self.turn);
        self.phase = Phase::Combat;
        Ok(())
    }

    /// Fire the current side's shot. Humans supply `coord`; computers pick
    /// their own. Cells already hit or missed are refused.
    pub fn fire<R: Rng + ?Sized>(
        &mut self,
        coord: Option<Coord>,
        rng: &mut R,
    ) -> Result<TurnReport, MatchError> {
        self.require(Phase::Combat)?;
        let side = self.turn;
        let [one, two] = &mut self.players;
        let (attacker, defender) = match side {
            Side::One => (one, two),
            Side::Two => (two, one),
        };
        if !attacker.is_computer() {
            if let Some(c) = coord {
                if defender.board().is_resolved(c) {
                    return Err(MatchError::AlreadyResolved);
                }
            }
        }
        let shot = attacker.attack(defender.board_mut(), coord, rng)?;
        self.shots[side.index()] += 1;

        let winner = if defender.board().all_ships_sunk() {
            info!(
                "{:?} wins after {} shots",
                side,
                self.shots[side.index()]
            );
            self.phase = Phase::Finished { winner: side };
            Some(side)
        } else {
            None
        };
        let again = winner.is_none() && shot.result.is_hit() && self.rules.extra_shot_on_hit;
        if winner.is_none() && !again {
            self.turn = side.other();
        }
        Ok(TurnReport {
            side,
            shot,
            again,
            winner,
        })
    }

    /// Clear both boards and targeting state for a fresh match.
    pub fn reset(&mut self) {
        for player in self.players.iter_mut() {
            player.reset(&self.rules);
        }
        self.phase = Phase::Placement;
        self.turn = Side::One;
        self.shots = [0; 2];
    }
}
