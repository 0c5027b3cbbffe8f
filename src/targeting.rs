//! Hunt-then-target shot selection for computer players.
//!
//! In `Hunt` mode shots are drawn uniformly from the untried cells. A hit
//! that does not sink queues the untried orthogonal neighbours and switches
//! to `Target` mode, which fires through the queue in FIFO order. Sinking a
//! ship clears the queue and returns to `Hunt`.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use log::debug;
use rand::Rng;

use crate::common::AttackResult;
use crate::config::BOARD_CELLS;
use crate::grid::{CellSet, Coord};

/// Which half of the search is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Mode {
    /// Nothing queued; shots are uniform over untried cells.
    Hunt,
    /// Following up around a hit that has not sunk its ship yet.
    Target,
}

/// Targeting state owned by a computer player for a whole match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuntTarget {
    tried: CellSet,
    queue: VecDeque<Coord>,
    mode: Mode,
}

impl HuntTarget {
    pub fn new() -> Self {
        Self {
            tried: CellSet::new(),
            queue: VecDeque::new(),
            mode: Mode::Hunt,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Cells already fired at this match.
    pub fn tried(&self) -> &CellSet {
        &self.tried
    }

    /// Follow-up candidates, next shot first.
    pub fn queued(&self) -> impl Iterator<Item = &Coord> + '_ {
        self.queue.iter()
    }

    /// Forget everything for a new match.
    pub fn reset(&mut self) {
        self.tried.clear();
        self.queue.clear();
        self.mode = Mode::Hunt;
    }

    fn sync_mode(&mut self) {
        let next = if self.queue.is_empty() {
            Mode::Hunt
        } else {
            Mode::Target
        };
        if next != self.mode {
            debug!("targeting mode {:?} -> {:?}", self.mode, next);
            self.mode = next;
        }
    }

    /// Pick the next cell and mark it tried. Returns `None` once every cell
    /// on the board has been tried. The mode only changes in `record`, so a
    /// queued follow-up keeps reporting `Target` while it is in flight.
    pub fn next_target<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Coord> {
        let target = loop {
            match self.queue.pop_front() {
                Some(coord) if self.tried.contains(coord) => continue,
                Some(coord) => break coord,
                None => break self.random_untried(rng)?,
            }
        };
        // candidates come from the grid or in-bounds neighbours
        let _ = self.tried.insert(target);
        Some(target)
    }

    fn random_untried<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Coord> {
        let mut pool = Vec::with_capacity(BOARD_CELLS - self.tried.len());
        pool.extend(Coord::all().filter(|c| !self.tried.contains(*c)));
        if pool.is_empty() {
            return None;
        }
        Some(pool[rng.random_range(0..pool.len())])
    }

    /// Feed back the result of the shot at `coord`.
    pub fn record(&mut self, coord: Coord, result: AttackResult) {
        match result {
            AttackResult::Miss => {}
            AttackResult::Hit { sunk: false } => {
                for n in coord.orthogonal() {
                    if !self.tried.contains(n) && !self.queue.contains(&n) {
                        self.queue.push_back(n);
                    }
                }
            }
            AttackResult::Hit { sunk: true } => {
                self.queue.clear();
            }
        }
        self.sync_mode();
    }
}

impl Default for HuntTarget {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn starts_hunting() {
        let ht = HuntTarget::new();
        assert_eq!(ht.mode(), Mode::Hunt);
        assert!(ht.tried().is_empty());
    }

    #[test]
    fn stale_queue_entries_are_skipped() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut ht = HuntTarget::new();
        ht.queue.push_back(Coord::new(2, 2));
        ht.queue.push_back(Coord::new(3, 3));
        let _ = ht.tried.insert(Coord::new(2, 2));
        assert_eq!(ht.next_target(&mut rng), Some(Coord::new(3, 3)));
        assert_eq!(ht.queued().count(), 0);
        assert!(ht.tried().contains(Coord::new(3, 3)));
    }

    #[test]
    fn last_queued_shot_still_reads_as_target() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut ht = HuntTarget::new();
        let corner = Coord::new(0, 0);
        let _ = ht.tried.insert(corner);
        ht.record(corner, AttackResult::Hit { sunk: false });
        assert_eq!(ht.queued().count(), 2);

        let east = ht.next_target(&mut rng).unwrap();
        assert_eq!(east, Coord::new(1, 0));
        ht.record(east, AttackResult::Miss);
        assert_eq!(ht.mode(), Mode::Target);

        let south = ht.next_target(&mut rng).unwrap();
        assert_eq!(south, Coord::new(0, 1));
        assert_eq!(ht.queued().count(), 0);
        assert_eq!(ht.mode(), Mode::Target);

        ht.record(south, AttackResult::Hit { sunk: false });
        assert_eq!(ht.mode(), Mode::Target);
        ht.record(south, AttackResult::Hit { sunk: true });
        assert_eq!(ht.mode(), Mode::Hunt);
    }

    #[test]
    fn mode_follows_queue() {
        let mut ht = HuntTarget::new();
        let _ = ht.tried.insert(Coord::new(5, 5));
        ht.record(Coord::new(5, 5), AttackResult::Hit { sunk: false });
        assert_eq!(ht.mode(), Mode::Target);
        assert_eq!(ht.queued().count(), 4);
        ht.record(Coord::new(5, 5), AttackResult::Hit { sunk: true });
        assert_eq!(ht.mode(), Mode::Hunt);
        assert_eq!(ht.queued().count(), 0);
    }
}
