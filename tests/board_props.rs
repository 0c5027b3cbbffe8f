use broadside::{AttackResult, Board, Coord, Fleet, Orientation};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn straight_ship() -> impl Strategy<Value = Vec<Coord>> {
    (1usize..=5, 0u8..10, 0u8..10, any::<bool>()).prop_filter_map(
        "ship must fit on the board",
        |(len, x, y, vertical)| {
            let orientation = if vertical {
                Orientation::Vertical
            } else {
                Orientation::Horizontal
            };
            orientation.cells(Coord::new(x, y), len)
        },
    )
}

fn touches(a: &[Coord], b: &[Coord]) -> bool {
    a.iter()
        .any(|&ca| b.iter().any(|&cb| ca == cb || ca.surrounding().any(|n| n == cb)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn any_straight_ship_fits_an_empty_board(coords in straight_ship()) {
        let mut board = Board::new();
        prop_assert!(board.can_place_ship(&coords));
        board.place_ship(coords.len(), &coords);
        prop_assert_eq!(board.ships().len(), 1);
        prop_assert_eq!(board.ships()[0].coords(), coords.as_slice());
    }

    #[test]
    fn adjacency_rejection_is_symmetric(a in straight_ship(), b in straight_ship()) {
        let mut first = Board::new();
        first.place_ship(a.len(), &a);
        let mut second = Board::new();
        second.place_ship(b.len(), &b);

        let b_after_a = first.can_place_ship(&b);
        let a_after_b = second.can_place_ship(&a);
        prop_assert_eq!(b_after_a, a_after_b);
        prop_assert_eq!(b_after_a, !touches(&a, &b));
    }

    #[test]
    fn ship_sinks_exactly_on_last_segment(
        order in Just((0usize..5).collect::<Vec<_>>()).prop_shuffle(),
        repeats in 0usize..4,
    ) {
        let coords = Orientation::Horizontal.cells(Coord::new(2, 3), 5).unwrap();
        let mut board = Board::new();
        board.place_ship(5, &coords);

        for (n, &seg) in order.iter().enumerate() {
            let result = board.receive_attack(coords[seg]);
            let last = n + 1 == order.len();
            prop_assert_eq!(result, AttackResult::Hit { sunk: last });
            prop_assert_eq!(board.ships()[0].ship().is_sunk(), last);
        }
        for i in 0..repeats {
            let result = board.receive_attack(coords[order[i]]);
            prop_assert_eq!(result, AttackResult::Hit { sunk: true });
        }
        prop_assert!(board.ships()[0].ship().is_sunk());
        prop_assert!(board.missed_attacks().is_empty());
    }

    #[test]
    fn all_sunk_needs_every_segment(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new();
        board.place_fleet_randomly(&mut rng, &Fleet::standard()).unwrap();

        let cells: Vec<Coord> = board.ships().iter().flat_map(|e| e.coords().to_vec()).collect();
        let spared = rng.random_range(0..cells.len());
        for (i, &cell) in cells.iter().enumerate() {
            if i != spared {
                board.receive_attack(cell);
            }
        }
        prop_assert!(!board.all_ships_sunk());
        prop_assert_eq!(board.ships_afloat(), 1);
        board.receive_attack(cells[spared]);
        prop_assert!(board.all_ships_sunk());
    }
}
