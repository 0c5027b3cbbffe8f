use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail};
use broadside::render::{describe_shot, render_fleet_status, render_own_board, render_target_board};
use broadside::{
    init_logging, Coord, Fleet, Match, MatchError, Orientation, Phase, Rules, Side,
};
use clap::{Args, Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug)]
struct GameArgs {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, help = "Allow ships to touch, diagonals included")]
    no_adjacency: bool,
    #[arg(long, help = "Pass the turn after every shot, hit or miss")]
    no_extra_shot: bool,
    #[arg(long, help = "Ship lengths to place, in order (default: 5,4,3,3,2)")]
    fleet: Option<Fleet>,
}

impl GameArgs {
    fn rules(&self) -> Rules {
        Rules {
            adjacency: !self.no_adjacency,
            extra_shot_on_hit: !self.no_extra_shot,
        }
    }

    fn fleet(&self) -> Fleet {
        self.fleet.clone().unwrap_or_else(Fleet::standard)
    }

    fn rng(&self) -> SmallRng {
        if let Some(s) = self.seed {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        } else {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer.
    Play {
        #[command(flatten)]
        game: GameArgs,
        #[arg(long, help = "Place your ships by hand instead of at random")]
        manual: bool,
    },
    /// Two players taking turns at one terminal.
    Hotseat {
        #[command(flatten)]
        game: GameArgs,
    },
    /// Watch the computer play against itself.
    Watch {
        #[command(flatten)]
        game: GameArgs,
    },
}

struct Console {
    stdin: io::StdinLock<'static>,
}

impl Console {
    fn new() -> Self {
        Self {
            stdin: io::stdin().lock(),
        }
    }

    fn prompt(&mut self, msg: &str) -> anyhow::Result<String> {
        print!("{}", msg);
        io::stdout().flush()?;
        let mut line = String::new();
        if self.stdin.read_line(&mut line)? == 0 {
            bail!("input closed");
        }
        Ok(line.trim().to_string())
    }
}

fn side_label(side: Side) -> &'static str {
    match side {
        Side::One => "Player 1",
        Side::Two => "Player 2",
    }
}

fn parse_placement(line: &str, length: usize) -> anyhow::Result<Vec<Coord>> {
    let mut parts = line.split_whitespace();
    let origin: Coord = parts
        .next()
        .ok_or_else(|| anyhow!("Please enter coordinates (e.g., A5 H)"))?
        .parse()?;
    let orientation = match parts.next().and_then(|s| s.chars().next()) {
        None | Some('h') | Some('H') => Orientation::Horizontal,
        Some('v') | Some('V') => Orientation::Vertical,
        Some(other) => bail!("Invalid orientation '{}' - use H or V", other),
    };
    orientation
        .cells(origin, length)
        .ok_or_else(|| anyhow!("Ship does not fit on the board from {}", origin))
}

fn place_by_hand(
    game: &mut Match,
    side: Side,
    console: &mut Console,
    rng: &mut SmallRng,
) -> anyhow::Result<()> {
    println!("\nPlacement for {}:", side_label(side));
    println!("  Enter a cell and orientation (e.g., A5 H or A5 V).");
    println!("  ENTER places the rest at random, 'undo' takes back the last ship.");
    while let Some(def) = game.next_ship(side) {
        println!("\n{}", render_own_board(game.player(side).board()));
        let line = console.prompt(&format!("{} (length {}): ", def.name(), def.length()))?;
        if line.is_empty() {
            game.place_randomly(side, rng)?;
            break;
        }
        if line.eq_ignore_ascii_case("undo") {
            match game.undo_placement(side)? {
                Some(removed) => println!("Removed {}.", removed.name()),
                None => println!("Nothing to undo."),
            }
            continue;
        }
        let coords = match parse_placement(&line, def.length()) {
            Ok(coords) => coords,
            Err(e) => {
                println!("✗ {}", e);
                continue;
            }
        };
        match game.place_next(side, &coords) {
            Ok(placed) => println!("✓ {} placed at {}", placed.name(), coords[0]),
            Err(e) => println!("✗ {}", e),
        }
    }
    println!("\n{}", render_own_board(game.player(side).board()));
    Ok(())
}

fn read_target(console: &mut Console, label: &str) -> anyhow::Result<Coord> {
    loop {
        let line = console.prompt(&format!("{}, enter target (e.g., B7): ", label))?;
        match line.parse() {
            Ok(coord) => return Ok(coord),
            Err(e) => println!("✗ Invalid coordinate: {}", e),
        }
    }
}

fn show_turn_view(game: &Match, side: Side) {
    println!("\nOpponent board:");
    println!("{}", render_target_board(game.player(side.other()).board()));
    println!("\nYour board:");
    println!("{}", render_own_board(game.player(side).board()));
    println!("{}", render_fleet_status(game.player(side).board(), game.fleet()));
}

fn play_vs_computer(game_args: GameArgs, manual: bool) -> anyhow::Result<()> {
    let mut rng = game_args.rng();
    let mut console = Console::new();
    let mut game = Match::human_vs_computer(game_args.rules(), game_args.fleet());

    if manual {
        place_by_hand(&mut game, Side::One, &mut console, &mut rng)?;
    } else {
        game.place_randomly(Side::One, &mut rng)?;
    }
    game.place_randomly(Side::Two, &mut rng)?;
    game.start()?;

    while game.phase() == Phase::Combat {
        let report = if game.turn() == Side::One {
            show_turn_view(&game, Side::One);
            let target = read_target(&mut console, "Captain")?;
            match game.fire(Some(target), &mut rng) {
                Ok(report) => report,
                Err(MatchError::AlreadyResolved) => {
                    println!("✗ You already fired at {}. Choose another target.", target);
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        } else {
            game.fire(None, &mut rng)?
        };
        let shooter = if report.side == Side::One { "You" } else { "Computer" };
        println!("{}", describe_shot(shooter, report.shot.coord, report.shot.result));
        if report.again && report.side == Side::One {
            println!("Fire again!");
        }
    }

    match game.winner() {
        Some(Side::One) => println!("\n🎉 You sank the whole enemy fleet!"),
        Some(Side::Two) => println!("\n💀 The computer sank your fleet."),
        None => {}
    }
    println!("\nEnemy fleet:\n{}", render_own_board(game.player(Side::Two).board()));
    Ok(())
}

fn play_hotseat(game_args: GameArgs) -> anyhow::Result<()> {
    let mut rng = game_args.rng();
    let mut console = Console::new();
    let mut game = Match::hotseat(game_args.rules(), game_args.fleet());

    for side in [Side::One, Side::Two] {
        console.prompt(&format!("\n{}, take the device and press ENTER.", side_label(side)))?;
        place_by_hand(&mut game, side, &mut console, &mut rng)?;
        println!("{}", "\n".repeat(40));
    }
    game.start()?;

    let mut shown = None;
    while game.phase() == Phase::Combat {
        let side = game.turn();
        if shown != Some(side) {
            println!("{}", "\n".repeat(40));
            console.prompt(&format!("{}, take the device and press ENTER.", side_label(side)))?;
            shown = Some(side);
        }
        show_turn_view(&game, side);
        let target = read_target(&mut console, side_label(side))?;
        match game.fire(Some(target), &mut rng) {
            Ok(report) => {
                println!("{}", describe_shot(side_label(side), target, report.shot.result));
                if report.again {
                    println!("Fire again!");
                } else {
                    console.prompt("Press ENTER to end your turn.")?;
                }
            }
            Err(MatchError::AlreadyResolved) => {
                println!("✗ {} was already attacked. Choose another target.", target);
            }
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(winner) = game.winner() {
        println!("\n🎉 {} wins!", side_label(winner));
    }
    Ok(())
}

fn watch(game_args: GameArgs) -> anyhow::Result<()> {
    let mut rng = game_args.rng();
    let mut game = Match::computer_vs_computer(game_args.rules(), game_args.fleet());
    game.place_randomly(Side::One, &mut rng)?;
    game.place_randomly(Side::Two, &mut rng)?;
    game.start()?;

    while game.phase() == Phase::Combat {
        let report = game.fire(None, &mut rng)?;
        println!(
            "{}",
            describe_shot(side_label(report.side), report.shot.coord, report.shot.result)
        );
    }

    for side in [Side::One, Side::Two] {
        println!(
            "\n{} ({} shots):\n{}",
            side_label(side),
            game.shots_fired(side),
            render_own_board(game.player(side).board())
        );
    }
    if let Some(winner) = game.winner() {
        println!("\n{} wins!", side_label(winner));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { game, manual } => play_vs_computer(game, manual),
        Commands::Hotseat { game } => play_hotseat(game),
        Commands::Watch { game } => watch(game),
    }
}
