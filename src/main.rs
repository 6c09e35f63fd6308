use std::error::Error;
use std::process;
use std::str::FromStr;
use std::time::Duration;

use clap::{value_t, App, AppSettings, Arg, ArgMatches, SubCommand};
use log::debug;

use puzzle_search::burrow::path_moves;
use puzzle_search::config::{
    Budget, BurrowConfig, Config, HeuristicKind, Mode, MoveStrategyKind, SearchConfig,
};
use puzzle_search::{LoadPuzzle, Solve};

fn main() {
    env_logger::init();

    let matches = App::new("puzzle-search")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Finds the cheapest way through a risk map or to a sorted amphipod burrow")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("risk")
                .about("Lowest total risk from the top left to the bottom right corner")
                .arg(
                    Arg::with_name("tiles")
                        .short("t")
                        .long("tiles")
                        .value_name("N")
                        .default_value("1")
                        .validator(positive)
                        .help("Repeat the map N times in both directions"),
                )
                .args(&budget_args())
                .arg(verbose_arg())
                .arg(file_arg()),
        )
        .subcommand(
            SubCommand::with_name("burrow")
                .about("Lowest energy needed to sort the amphipods into their rooms")
                .arg(
                    Arg::with_name("unfold")
                        .short("u")
                        .long("unfold")
                        .help("Insert the two hidden rows (rooms become 4 deep)"),
                )
                .arg(
                    Arg::with_name("strategy")
                        .short("s")
                        .long("strategy")
                        .value_name("STRATEGY")
                        .possible_values(&["all-stops", "home-first"])
                        .default_value("all-stops")
                        .help("How moves are generated"),
                )
                .arg(
                    Arg::with_name("heuristic")
                        .long("heuristic")
                        .value_name("HEURISTIC")
                        .possible_values(&["distance", "unsettled", "zero"])
                        .default_value("distance")
                        .help("Estimate of the remaining cost"),
                )
                .arg(
                    Arg::with_name("reparking")
                        .short("r")
                        .long("reparking")
                        .help("Allow moving from one hallway cell to another"),
                )
                .arg(
                    Arg::with_name("enumerate")
                        .short("e")
                        .long("enumerate")
                        .value_name("SLACK")
                        .help("List all solutions costing at most SLACK more than the optimum"),
                )
                .arg(
                    Arg::with_name("max-paths")
                        .long("max-paths")
                        .value_name("N")
                        .default_value("10")
                        .validator(positive)
                        .help("Stop enumerating after N solutions"),
                )
                .args(&budget_args())
                .arg(verbose_arg())
                .arg(file_arg()),
        )
        .get_matches();

    let result = match matches.subcommand() {
        ("risk", Some(sub)) => run_risk(sub),
        ("burrow", Some(sub)) => run_burrow(sub),
        _ => unreachable!("clap requires a subcommand"),
    };

    if let Err(err) = result {
        println!("{}", err);
        process::exit(1);
    }
}

fn verbose_arg() -> Arg<'static, 'static> {
    Arg::with_name("verbose")
        .short("v")
        .long("verbose")
        .help("Print the solution and search statistics")
}

fn budget_args() -> [Arg<'static, 'static>; 2] {
    [
        Arg::with_name("max-expanded")
            .long("max-expanded")
            .value_name("N")
            .help("Give up after expanding N states"),
        Arg::with_name("timeout")
            .long("timeout")
            .value_name("SECS")
            .help("Give up after SECS seconds"),
    ]
}

fn budget(sub: &ArgMatches<'_>) -> Budget {
    Budget {
        max_expanded: optional(sub, "max-expanded"),
        max_duration: optional(sub, "timeout").map(Duration::from_secs),
    }
}

fn file_arg() -> Arg<'static, 'static> {
    Arg::with_name("file").required(true).value_name("FILE")
}

fn positive(value: String) -> Result<(), String> {
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(()),
        _ => Err(format!("expected a positive number, got {}", value)),
    }
}

fn required<T: FromStr>(sub: &ArgMatches<'_>, name: &str) -> T {
    value_t!(sub, name, T).unwrap_or_else(|e| e.exit())
}

fn optional<T: FromStr>(sub: &ArgMatches<'_>, name: &str) -> Option<T> {
    if sub.is_present(name) {
        Some(required(sub, name))
    } else {
        None
    }
}

fn run_risk(sub: &ArgMatches<'_>) -> Result<(), Box<dyn Error>> {
    let path: String = required(sub, "file");
    let tiles: u32 = required(sub, "tiles");
    let verbose = sub.is_present("verbose");

    let map = path
        .load_risk_map()
        .map_err(|err| format!("Can't load {}: {}", path, err))?
        .tiled(tiles)
        .ok_or_else(|| format!("Can't tile {} {} times, the map gets too large", path, tiles))?;
    debug!("Loaded {}: {}x{}", path, map.rows(), map.cols());

    let config = Config {
        search: SearchConfig {
            mode: Mode::FirstOptimal,
            budget: budget(sub),
        },
        ..Config::default()
    };
    let solution = map.solve(&config, verbose)?;
    if verbose {
        println!("{}", map.format_path(&solution.best().states));
        println!("{}", solution.stats);
    }
    println!("{}", solution.cost());
    Ok(())
}

fn run_burrow(sub: &ArgMatches<'_>) -> Result<(), Box<dyn Error>> {
    let path: String = required(sub, "file");
    let verbose = sub.is_present("verbose");

    let mut burrow = path
        .load_burrow()
        .map_err(|err| format!("Can't load {}: {}", path, err))?;
    if sub.is_present("unfold") {
        burrow = burrow.unfold()?;
    }

    let mode = match optional(sub, "enumerate") {
        Some(slack) => Mode::Enumerate {
            slack,
            max_paths: required(sub, "max-paths"),
        },
        None => Mode::FirstOptimal,
    };
    let config = Config {
        search: SearchConfig {
            mode,
            budget: budget(sub),
        },
        burrow: BurrowConfig {
            strategy: required::<MoveStrategyKind>(sub, "strategy"),
            heuristic: required::<HeuristicKind>(sub, "heuristic"),
            reparking: sub.is_present("reparking"),
        },
    };
    debug!("Solving {} with {:?}", path, config);

    let solution = burrow.solve(&config, verbose)?;
    if verbose {
        println!("{}", burrow);
        for (i, found) in solution.paths.iter().enumerate() {
            println!("Solution {}, cost {}:", i + 1, found.cost);
            let moves = path_moves(&found.states);
            for (mov, state) in moves.iter().zip(found.states.iter().skip(1)) {
                println!("{}", mov);
                println!("{}", state);
            }
        }
        println!("{}", solution.stats);
    }
    for found in &solution.paths {
        println!("{}", found.cost);
    }
    Ok(())
}
