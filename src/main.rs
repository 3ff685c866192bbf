use clap::{crate_name, crate_version, App, Arg, ArgMatches, SubCommand};
use opaprikkie::game::{Game, TurnOutcome};
use opaprikkie::global::conf_def;
use opaprikkie::strategy::{Strategy, STRATEGY_NAMES};
use rayon::prelude::*;
use serde_json::json;
use std::collections::BTreeMap;

/// Validates the given expression can be parsed as the given type following clap's convention:
/// Return Ok(()) if yes, else Err(string_describing_the_problem)
macro_rules! validate_as {
    ($T:ty, $V:expr) => {
        match $V.parse::<$T>() {
            Ok(_) => Ok(()),
            Err(e) => Err(e.to_string()),
        }
    };
}

/// Assuming you have previously validated the given expression can be parsed successfully as the
/// give type, this saves a tiny bit of typing and hides the unwrap
macro_rules! parse_as {
    ($T:ty, $V:expr) => {
        $V.parse::<$T>().unwrap()
    };
}

fn strategies_from_args(args: &ArgMatches) -> Vec<Strategy> {
    match args.values_of("strategy") {
        Some(vals) => vals.map(|v| parse_as!(Strategy, v)).collect(),
        None => vec![],
    }
}

fn build_game(
    num_players: usize,
    seed: Option<u64>,
    strategies: &[Strategy],
) -> Result<Game, ()> {
    let mut game = match seed {
        Some(s) => Game::with_seed(num_players, s),
        None => Game::new(num_players),
    }
    .map_err(|e| eprintln!("Error creating game: {}", e))?;
    // players without an explicit strategy keep the random default
    for (i, s) in strategies.iter().enumerate().take(num_players) {
        game.set_player_strategy(i, *s)
            .map_err(|e| eprintln!("Error setting strategy: {}", e))?;
    }
    Ok(game)
}

fn play(args: &ArgMatches) -> Result<(), ()> {
    let num_players = parse_as!(usize, args.value_of("numplayers").unwrap());
    let seed = args.value_of("seed").map(|v| parse_as!(u64, v));
    let strategies = strategies_from_args(args);
    let mut game = build_game(num_players, seed, &strategies)?;
    loop {
        let outcome = match game.play_turn() {
            Err(e) => {
                eprintln!("Error playing turn: {}", e);
                return Err(());
            }
            Ok(o) => o,
        };
        println!("{}", json!(&outcome));
        match outcome {
            TurnOutcome::Winner { .. } | TurnOutcome::GameOver { .. } => break,
            _ => {}
        }
    }
    if args.is_present("showboards") {
        for p in game.players() {
            eprintln!("{}'s board:", p.name());
            eprintln!("{}", p.board());
        }
    }
    println!("{}", game.stats().summary());
    Ok(())
}

fn simulate(args: &ArgMatches) -> Result<(), ()> {
    let num_games = parse_as!(u32, args.value_of("numgames").unwrap());
    let num_players = parse_as!(usize, args.value_of("numplayers").unwrap());
    let seed = args.value_of("seed").map(|v| parse_as!(u64, v));
    let strategies = strategies_from_args(args);
    let mut results: Vec<Result<(String, u32), ()>> = (0..num_games)
        .into_par_iter()
        .map(|i| {
            // each game gets its own seed derived from the base seed so runs
            // stay reproducible per game index
            let game_seed = seed.map(|s| s + u64::from(i));
            let mut game = build_game(num_players, game_seed, &strategies)?;
            let (winner_name, winner_strategy) = match game.play_game() {
                Err(e) => {
                    eprintln!("Error playing game: {}", e);
                    return Err(());
                }
                Ok(w) => (w.name().to_string(), w.strategy().name()),
            };
            Ok((format!("{} ({})", winner_name, winner_strategy), game.turn_count()))
        })
        .collect();
    // ignore errors
    let results: Vec<(String, u32)> = results.drain(0..).filter_map(|r| r.ok()).collect();
    let mut wins: BTreeMap<String, u32> = BTreeMap::new();
    let mut turns: Vec<u32> = Vec::with_capacity(results.len());
    for (winner, turn_count) in results {
        *wins.entry(winner).or_insert(0) += 1;
        turns.push(turn_count);
    }
    turns.sort_unstable();
    let total: u64 = turns.iter().map(|&t| u64::from(t)).sum();
    let report = json!({
        "num_games": turns.len(),
        "wins": wins,
        "turns": {
            "min": turns.first(),
            "max": turns.last(),
            "mean": if turns.is_empty() { 0.0 } else { total as f64 / turns.len() as f64 },
            "median": turns.get(turns.len() / 2),
        },
    });
    println!("{}", report);
    Ok(())
}

fn main() {
    let args = App::new(crate_name!())
        .version(crate_version!())
        .subcommand(
            SubCommand::with_name("play")
                .about("Play a single game and print each turn outcome")
                .arg(
                    Arg::with_name("numplayers")
                        .long("num-players")
                        .value_name("N")
                        .default_value(conf_def::NUM_PLAYERS)
                        .validator(|v| validate_as!(usize, v))
                        .help("How many players"),
                )
                .arg(
                    Arg::with_name("seed")
                        .long("seed")
                        .value_name("SEED")
                        .validator(|v| validate_as!(u64, v))
                        .help("Seed the game for a reproducible run"),
                )
                .arg(
                    Arg::with_name("strategy")
                        .long("strategy")
                        .value_name("NAME")
                        .multiple(true)
                        .number_of_values(1)
                        .possible_values(&STRATEGY_NAMES)
                        .default_value(conf_def::STRATEGY)
                        .case_insensitive(true)
                        .help("Strategy per player, in player order"),
                )
                .arg(
                    Arg::with_name("showboards")
                        .long("show-boards")
                        .help("Print every player's board when the game ends"),
                ),
        )
        .subcommand(
            SubCommand::with_name("simulate")
                .about("Run many games and report win counts and game length")
                .arg(
                    Arg::with_name("numgames")
                        .long("num-games")
                        .value_name("N")
                        .default_value(conf_def::NUM_GAMES)
                        .validator(|v| validate_as!(u32, v))
                        .help("How many games to simulate"),
                )
                .arg(
                    Arg::with_name("numplayers")
                        .long("num-players")
                        .value_name("N")
                        .default_value(conf_def::NUM_PLAYERS)
                        .validator(|v| validate_as!(usize, v))
                        .help("How many players per game"),
                )
                .arg(
                    Arg::with_name("seed")
                        .long("seed")
                        .value_name("SEED")
                        .validator(|v| validate_as!(u64, v))
                        .help("Base seed; game i is seeded SEED+i"),
                )
                .arg(
                    Arg::with_name("strategy")
                        .long("strategy")
                        .value_name("NAME")
                        .multiple(true)
                        .number_of_values(1)
                        .possible_values(&STRATEGY_NAMES)
                        .default_value(conf_def::STRATEGY)
                        .case_insensitive(true)
                        .help("Strategy per player, in player order"),
                ),
        )
        .get_matches();
    let _res = if let Some(args) = args.subcommand_matches("play") {
        play(args)
    } else if let Some(args) = args.subcommand_matches("simulate") {
        simulate(args)
    } else if args.subcommand_name().is_none() {
        eprintln!("Must provide subcommand");
        Err(())
    } else {
        eprintln!("Unknown subcommand {}", args.subcommand_name().unwrap());
        Err(())
    };
}
