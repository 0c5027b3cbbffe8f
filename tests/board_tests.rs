use broadside::{AttackResult, Board, Coord, Fleet, PlacementError};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn c(x: u8, y: u8) -> Coord {
    Coord::new(x, y)
}

#[test]
fn test_attack_sequence_sinks_ship() {
    let mut board = Board::new();
    let coords = [c(1, 1), c(1, 2)];
    assert!(board.can_place_ship(&coords));
    board.place_ship(2, &coords);

    assert_eq!(board.receive_attack(c(1, 1)), AttackResult::Hit { sunk: false });
    assert_eq!(board.receive_attack(c(3, 3)), AttackResult::Miss);
    assert_eq!(board.missed_attacks(), &[c(3, 3)]);
    assert!(!board.all_ships_sunk());
    assert_eq!(board.receive_attack(c(1, 2)), AttackResult::Hit { sunk: true });
    assert!(board.all_ships_sunk());
}

#[test]
fn test_touching_ship_rejected() {
    let mut board = Board::new();
    let first = [c(0, 0), c(0, 1)];
    assert!(board.can_place_ship(&first));
    board.place_ship(2, &first);
    assert!(!board.can_place_ship(&[c(1, 0), c(1, 1)]));
    assert_eq!(
        board.check_placement(&[c(1, 2), c(2, 2)]),
        Err(PlacementError::Adjacent)
    );
    assert!(board.can_place_ship(&[c(2, 0), c(2, 1)]));
}

#[test]
fn test_placement_reasons() {
    let mut board = Board::new();
    board.place_ship(3, &[c(5, 5), c(6, 5), c(7, 5)]);

    assert_eq!(board.check_placement(&[]), Err(PlacementError::Empty));
    assert_eq!(
        board.check_placement(&[c(0, 0), c(0, 0)]),
        Err(PlacementError::Duplicate)
    );
    assert_eq!(
        board.check_placement(&[c(9, 9), c(10, 9)]),
        Err(PlacementError::OutOfBounds)
    );
    assert_eq!(
        board.check_placement(&[c(6, 4), c(6, 5)]),
        Err(PlacementError::Overlap)
    );
    assert_eq!(
        board.check_placement(&[c(8, 6), c(9, 6)]),
        Err(PlacementError::Adjacent)
    );
    assert_eq!(board.check_placement(&[c(0, 0), c(1, 0)]), Ok(()));
}

#[test]
fn test_adjacency_can_be_disabled() {
    let mut board = Board::with_adjacency(false);
    board.place_ship(2, &[c(0, 0), c(0, 1)]);
    assert!(board.can_place_ship(&[c(1, 0), c(1, 1)]));
    assert_eq!(
        board.check_placement(&[c(0, 1), c(0, 2)]),
        Err(PlacementError::Overlap)
    );
}

#[test]
fn test_can_place_does_not_mutate() {
    let mut board = Board::new();
    board.place_ship(2, &[c(4, 4), c(4, 5)]);
    let before = board.clone();
    let _ = board.can_place_ship(&[c(0, 0), c(1, 0), c(2, 0)]);
    let _ = board.can_place_ship(&[c(4, 4)]);
    assert_eq!(board, before);
}

#[test]
fn test_placement_order_and_undo() {
    let mut board = Board::new();
    board.place_ship(3, &[c(0, 0), c(1, 0), c(2, 0)]);
    board.place_ship(2, &[c(0, 5), c(0, 6)]);
    assert_eq!(board.ships().len(), 2);
    assert_eq!(board.ships()[1].coords(), &[c(0, 5), c(0, 6)]);

    let removed = board.remove_last_ship().unwrap();
    assert_eq!(removed.ship().length(), 2);
    assert_eq!(board.ships().len(), 1);
    assert!(board.can_place_ship(&[c(0, 5), c(0, 6)]));
}

#[test]
#[should_panic]
fn test_place_ship_length_mismatch_panics() {
    let mut board = Board::new();
    board.place_ship(3, &[c(0, 0), c(1, 0)]);
}

#[test]
fn test_repeated_miss_is_recorded_again() {
    // Boards do not police repeats; the turn coordinator does.
    let mut board = Board::new();
    board.place_ship(1, &[c(9, 9)]);
    assert_eq!(board.receive_attack(c(2, 2)), AttackResult::Miss);
    assert_eq!(board.receive_attack(c(2, 2)), AttackResult::Miss);
    assert_eq!(board.missed_attacks().len(), 2);
    assert_eq!(board.receive_attack(c(9, 9)), AttackResult::Hit { sunk: true });
    assert_eq!(board.receive_attack(c(9, 9)), AttackResult::Hit { sunk: true });
    assert_eq!(board.ships()[0].ship().hit_count(), 1);
}

#[test]
fn test_empty_board_has_no_ships_afloat() {
    let board = Board::new();
    assert!(board.all_ships_sunk());
    assert_eq!(board.ships_afloat(), 0);
}

#[test]
fn test_random_fleet_respects_rules() {
    let mut rng = SmallRng::seed_from_u64(42);
    let fleet = Fleet::standard();
    let mut board = Board::new();
    board.place_fleet_randomly(&mut rng, &fleet).unwrap();

    assert_eq!(board.ships().len(), fleet.len());
    assert_eq!(board.occupied().len(), fleet.total_cells());
    for (i, a) in board.ships().iter().enumerate() {
        assert_eq!(a.ship().length(), fleet.ships()[i].length());
        for b in board.ships().iter().skip(i + 1) {
            for &ca in a.coords() {
                for &cb in b.coords() {
                    assert!(ca != cb && !ca.surrounding().any(|n| n == cb));
                }
            }
        }
    }
}

#[test]
fn test_random_fleet_is_reproducible() {
    let fleet = Fleet::standard();
    let mut a = Board::new();
    let mut b = Board::new();
    a.place_fleet_randomly(&mut SmallRng::seed_from_u64(7), &fleet).unwrap();
    b.place_fleet_randomly(&mut SmallRng::seed_from_u64(7), &fleet).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_random_fleet_without_room() {
    let mut rng = SmallRng::seed_from_u64(3);
    let fleet = Fleet::from_lengths(&[10; 12]).unwrap();
    let mut board = Board::new();
    board.place_ship(1, &[c(5, 5)]);
    assert_eq!(
        board.place_fleet_randomly(&mut rng, &fleet),
        Err(PlacementError::NoRoom)
    );
    assert_eq!(board.ships().len(), 1);
}

#[test]
fn test_clear_resets_board() {
    let mut board = Board::new();
    board.place_ship(2, &[c(0, 0), c(1, 0)]);
    board.receive_attack(c(5, 5));
    board.clear();
    assert!(board.ships().is_empty());
    assert!(board.missed_attacks().is_empty());
    assert!(board.enforces_adjacency());
}
