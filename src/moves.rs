use std::fmt::{self, Debug, Display, Formatter};
use std::iter::FromIterator;

use crate::burrow::layout::mouth;
use crate::burrow::Amphipod;
use crate::solver::Cost;

/// A cell of the burrow. Room depth 0 is the slot next to the hallway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Hallway(usize),
    Room { room: usize, depth: usize },
}

impl Location {
    /// Hallway column and number of cells below the hallway.
    fn coords(self) -> (usize, usize) {
        match self {
            Location::Hallway(col) => (col, 0),
            Location::Room { room, depth } => (mouth(room), depth + 1),
        }
    }

    /// Length of the shortest walk to `other`, rooms are only connected through the hallway.
    pub fn steps_to(self, other: Location) -> u32 {
        let (from_col, from_down) = self.coords();
        let (to_col, to_down) = other.coords();
        let horizontal = if from_col > to_col {
            from_col - to_col
        } else {
            to_col - from_col
        };
        (from_down + horizontal + to_down) as u32
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Location::Hallway(col) => write!(f, "h{}", col),
            Location::Room { room, depth } => write!(f, "{}{}", Amphipod::for_room(room), depth),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub amphipod: Amphipod,
    pub from: Location,
    pub to: Location,
}

impl Move {
    pub(crate) fn new(amphipod: Amphipod, from: Location, to: Location) -> Self {
        Move { amphipod, from, to }
    }

    pub fn steps(&self) -> u32 {
        self.from.steps_to(self.to)
    }

    pub fn cost(&self) -> Cost {
        self.steps() * self.amphipod.unit_cost()
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {} ({})",
            self.amphipod,
            self.from,
            self.to,
            self.cost()
        )
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Moves(Vec<Move>);

impl Moves {
    pub(crate) fn new(moves: Vec<Move>) -> Self {
        Moves(moves)
    }

    pub fn move_cnt(&self) -> usize {
        self.0.len()
    }

    pub fn total_cost(&self) -> Cost {
        self.0.iter().map(Move::cost).sum()
    }

    pub fn iter(&self) -> ::std::slice::Iter<'_, Move> {
        self.0.iter()
    }
}

impl FromIterator<Move> for Moves {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        Moves::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Moves {
    type Item = Move;
    type IntoIter = ::std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Moves {
    type Item = &'a Move;
    type IntoIter = ::std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for mov in self {
            writeln!(f, "{}", mov)?;
        }
        Ok(())
    }
}

impl Debug for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
