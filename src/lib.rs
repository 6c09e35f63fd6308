// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]
// Clippy
#![warn(clippy::all)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate prettytable;

pub mod burrow;
pub mod config;
pub mod moves;
pub mod risk_map;
pub mod solver;

mod data;
mod parser;
mod vec2d;

use std::error::Error;
use std::fs;
use std::path::Path;

use crate::burrow::Burrow;
use crate::config::Config;
use crate::risk_map::RiskMap;
use crate::solver::{SolverErr, SolverOk};

pub use crate::data::{Dir, Pos};
pub use crate::parser::ParserErr;

/// Reads and parses a puzzle file.
pub trait LoadPuzzle {
    fn load_risk_map(&self) -> Result<RiskMap, Box<dyn Error>>;
    fn load_burrow(&self) -> Result<Burrow, Box<dyn Error>>;
}

impl<P: AsRef<Path> + ?Sized> LoadPuzzle for P {
    fn load_risk_map(&self) -> Result<RiskMap, Box<dyn Error>> {
        let text = fs::read_to_string(self)?;
        Ok(text.parse()?)
    }

    fn load_burrow(&self) -> Result<Burrow, Box<dyn Error>> {
        let text = fs::read_to_string(self)?;
        Ok(text.parse()?)
    }
}

pub trait Solve {
    type State;

    fn solve(&self, config: &Config, print_status: bool)
        -> Result<SolverOk<Self::State>, SolverErr>;
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Instant;

    use separator::Separatable;

    use crate::config::{BurrowConfig, MoveStrategyKind};

    #[test]
    fn solving_puzzles() {
        const OK: i32 = 0;
        const SLOW_IN_DEBUG: i32 = 1;

        #[cfg(debug_assertions)]
        const MAX_DIFFICULTY: i32 = OK;

        #[cfg(not(debug_assertions))]
        const MAX_DIFFICULTY: i32 = SLOW_IN_DEBUG;

        let risk_maps = [
            ("puzzles/risk/sample.txt", 1, 40, OK),
            ("puzzles/risk/sample.txt", 5, 315, OK),
            ("puzzles/risk/single.txt", 1, 0, OK),
            ("puzzles/risk/single.txt", 3, 2 + 3 + 4 + 5, OK),
        ];
        for &(path, tiles, expected, difficulty) in &risk_maps {
            if difficulty > MAX_DIFFICULTY {
                continue;
            }
            let started = Instant::now();
            let map = path.load_risk_map().unwrap().tiled(tiles).unwrap();
            let solution = map.solve(&Config::default(), false).unwrap();
            println!(
                "{} x{}: {} in approximately {} ms",
                path,
                tiles,
                solution.cost(),
                (started.elapsed().as_millis() as u64).separated_string(),
            );
            assert_eq!(solution.cost(), expected, "{} x{}", path, tiles);
        }

        let burrows = [
            ("puzzles/burrow/solved.txt", false, 0, OK),
            ("puzzles/burrow/swap.txt", false, 46, OK),
            ("puzzles/burrow/sample.txt", false, 12521, OK),
            ("puzzles/burrow/sample.txt", true, 44169, SLOW_IN_DEBUG),
        ];
        let config = Config {
            burrow: BurrowConfig {
                strategy: MoveStrategyKind::HomeFirst,
                ..BurrowConfig::default()
            },
            ..Config::default()
        };
        for &(path, unfold, expected, difficulty) in &burrows {
            if difficulty > MAX_DIFFICULTY {
                continue;
            }
            let started = Instant::now();
            let mut burrow = path.load_burrow().unwrap();
            if unfold {
                burrow = burrow.unfold().unwrap();
            }
            let solution = burrow.solve(&config, false).unwrap();
            println!(
                "{} (unfolded: {}): {} in approximately {} ms",
                path,
                unfold,
                solution.cost(),
                (started.elapsed().as_millis() as u64).separated_string(),
            );
            println!("{:?}", solution.stats);
            assert_eq!(solution.cost(), expected, "{}", path);
        }
    }

    #[test]
    fn loading_errors() {
        assert!("puzzles/risk/missing.txt".load_risk_map().is_err());

        let err = "puzzles/risk/sample.txt".load_burrow().unwrap_err();
        assert_eq!(err.to_string(), ParserErr::Hallway.to_string());
    }
}
