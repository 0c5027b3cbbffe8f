#![cfg(feature = "std")]

//! Text rendering of boards for the terminal front end. Everything here is a
//! read-only projection of engine state.

use std::fmt::Write;
use std::string::String;

use crate::board::{Board, CellView};
use crate::common::AttackResult;
use crate::config::{Fleet, BOARD_SIZE};
use crate::grid::Coord;

fn render(board: &Board, reveal: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "    ╔═════════════════════════╗");
    let _ = write!(out, "    ║   ");
    for x in 0..BOARD_SIZE {
        let _ = write!(out, " {}", (b'A' + x) as char);
    }
    let _ = writeln!(out, " ║");
    let _ = writeln!(out, "    ╠═════════════════════════╣");
    for y in 0..BOARD_SIZE {
        let _ = write!(out, "    ║ {:2}", y + 1);
        for x in 0..BOARD_SIZE {
            let ch = match board.cell(Coord::new(x, y)) {
                CellView::Hit => 'X',
                CellView::Miss => 'o',
                CellView::Ship if reveal => 'S',
                _ => '.',
            };
            let _ = write!(out, " {}", ch);
        }
        let _ = writeln!(out, " ║");
    }
    let _ = writeln!(out, "    ╚═════════════════════════╝");
    if reveal {
        let _ = write!(out, "    Legend: S=Ship  X=Hit  o=Miss  .=Water");
    } else {
        let _ = write!(out, "    Legend: X=Hit  o=Miss  .=Unknown");
    }
    out
}

/// A board as its owner sees it, ships included.
pub fn render_own_board(board: &Board) -> String {
    render(board, true)
}

/// A board as the opponent sees it: only hits and misses.
pub fn render_target_board(board: &Board) -> String {
    render(board, false)
}

/// One line per placed ship with its damage, named from `fleet`.
pub fn render_fleet_status(board: &Board, fleet: &Fleet) -> String {
    let mut out = String::from("    Ships:");
    for (i, entry) in board.ships().iter().enumerate() {
        let name = fleet.ships().get(i).map(|s| s.name()).unwrap_or("Ship");
        let ship = entry.ship();
        let status = if ship.is_sunk() { "SUNK" } else { "Active" };
        let _ = write!(
            out,
            "\n      {} ({}): {} [{}/{} hit]",
            name,
            ship.length(),
            status,
            ship.hit_count(),
            ship.length()
        );
    }
    out
}

/// Short description of a shot for the turn log.
pub fn describe_shot(shooter: &str, coord: Coord, result: AttackResult) -> String {
    match result {
        AttackResult::Miss => format!("{} fired at {}: miss.", shooter, coord),
        AttackResult::Hit { sunk: false } => format!("{} fired at {}: HIT!", shooter, coord),
        AttackResult::Hit { sunk: true } => {
            format!("{} fired at {}: HIT - ship sunk!", shooter, coord)
        }
    }
}
