//! Commonly used types for ease of import.

pub use crate::{
    AttackResult, Board, Coord, Fleet, Match, MatchError, Phase, Player, Rules, Side, TurnReport,
};

#[cfg(feature = "std")]
pub use crate::render::{describe_shot, render_own_board, render_target_board};
