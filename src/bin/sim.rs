use broadside::{init_logging, Fleet, Match, Phase, Rules, Side};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);

    let rules = Rules::default();
    let mut game = Match::computer_vs_computer(rules, Fleet::standard());
    game.place_randomly(Side::One, &mut rng1)?;
    game.place_randomly(Side::Two, &mut rng2)?;
    game.start()?;

    while game.phase() == Phase::Combat {
        let rng = match game.turn() {
            Side::One => &mut rng1,
            Side::Two => &mut rng2,
        };
        game.fire(None, rng)?;
    }

    let winner = match game.winner() {
        Some(Side::One) => Some("player1"),
        Some(Side::Two) => Some("player2"),
        None => None,
    };

    let result = json!({
        "player1": {
            "shots": game.shots_fired(Side::One),
            "ships_afloat": game.player(Side::One).board().ships_afloat(),
        },
        "player2": {
            "shots": game.shots_fired(Side::Two),
            "ships_afloat": game.player(Side::Two).board().ships_afloat(),
        },
        "rules": rules,
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
