use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use crate::solver::Cost;

/// What the search returns once it reaches a goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Return the first optimal path found.
    FirstOptimal,
    /// Keep searching and collect every path to a goal whose cost is at most
    /// `optimal + slack`, up to `max_paths` of them.
    Enumerate { slack: Cost, max_paths: usize },
}

impl Default for Mode {
    fn default() -> Self {
        Mode::FirstOptimal
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Mode::FirstOptimal => write!(f, "first-optimal"),
            Mode::Enumerate { slack, max_paths } => {
                write!(f, "enumerate (slack {}, max {} paths)", slack, max_paths)
            }
        }
    }
}

/// Limits after which the search gives up with `SolverErr::SearchExhausted`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Budget {
    pub max_expanded: Option<usize>,
    pub max_duration: Option<Duration>,
}

impl Budget {
    pub fn unlimited() -> Self {
        Budget::default()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchConfig {
    pub mode: Mode,
    pub budget: Budget,
}

/// How burrow moves are enumerated, see `burrow::strategy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveStrategyKind {
    AllStops,
    HomeFirst,
}

impl Default for MoveStrategyKind {
    fn default() -> Self {
        MoveStrategyKind::AllStops
    }
}

impl Display for MoveStrategyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            MoveStrategyKind::AllStops => write!(f, "all-stops"),
            MoveStrategyKind::HomeFirst => write!(f, "home-first"),
        }
    }
}

impl FromStr for MoveStrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all-stops" => Ok(MoveStrategyKind::AllStops),
            "home-first" => Ok(MoveStrategyKind::HomeFirst),
            _ => Err(format!("Unknown move strategy: {}", s)),
        }
    }
}

/// Burrow heuristics - all of them are admissible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeuristicKind {
    Distance,
    Unsettled,
    Zero,
}

impl Default for HeuristicKind {
    fn default() -> Self {
        HeuristicKind::Distance
    }
}

impl Display for HeuristicKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            HeuristicKind::Distance => write!(f, "distance"),
            HeuristicKind::Unsettled => write!(f, "unsettled"),
            HeuristicKind::Zero => write!(f, "zero"),
        }
    }
}

impl FromStr for HeuristicKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "distance" => Ok(HeuristicKind::Distance),
            "unsettled" => Ok(HeuristicKind::Unsettled),
            "zero" => Ok(HeuristicKind::Zero),
            _ => Err(format!("Unknown heuristic: {}", s)),
        }
    }
}

/// Burrow rules and search tuning. Irrelevant for the risk map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BurrowConfig {
    pub strategy: MoveStrategyKind,
    pub heuristic: HeuristicKind,
    /// Allow tokens resting in the hallway to move to another hallway cell.
    pub reparking: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub search: SearchConfig,
    pub burrow: BurrowConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_kinds() {
        for &kind in &[MoveStrategyKind::AllStops, MoveStrategyKind::HomeFirst] {
            assert_eq!(kind.to_string().parse::<MoveStrategyKind>(), Ok(kind));
        }
        for &kind in &[
            HeuristicKind::Distance,
            HeuristicKind::Unsettled,
            HeuristicKind::Zero,
        ] {
            assert_eq!(kind.to_string().parse::<HeuristicKind>(), Ok(kind));
        }
        assert!("greedy".parse::<MoveStrategyKind>().is_err());
        assert!("manhattan".parse::<HeuristicKind>().is_err());
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.search.mode, Mode::FirstOptimal);
        assert_eq!(config.search.budget, Budget::unlimited());
        assert_eq!(config.burrow.strategy, MoveStrategyKind::AllStops);
        assert_eq!(config.burrow.heuristic, HeuristicKind::Distance);
        assert!(!config.burrow.reparking);
    }
}
