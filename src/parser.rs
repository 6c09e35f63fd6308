use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::burrow::layout::{is_mouth, mouth};
use crate::burrow::{Amphipod, Burrow, Slot, HALLWAY_LEN, MAX_DEPTH, ROOMS};
use crate::risk_map::RiskMap;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    Empty,
    Pos(usize, usize),
    LineLength(usize),
    Hallway,
    RoomDepth,
    Floating(usize),
    TokenCount(char),
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Empty => write!(f, "Empty input"),
            ParserErr::Pos(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            ParserErr::LineLength(r) => write!(f, "Line {} has a different length", r),
            ParserErr::Hallway => write!(f, "Malformed hallway"),
            ParserErr::RoomDepth => write!(f, "Rooms must be 1 to {} cells deep", MAX_DEPTH),
            ParserErr::Floating(room) => write!(
                f,
                "Empty cell under an amphipod in room {}",
                Amphipod::for_room(room)
            ),
            ParserErr::TokenCount(label) => {
                write!(f, "Wrong number of {} amphipods, need one per room cell", label)
            }
        }
    }
}

impl Error for ParserErr {}

impl FromStr for RiskMap {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_risk_map(s)
    }
}

impl FromStr for Burrow {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_burrow(s)
    }
}

/// Trims blank lines around the input and trailing whitespace of each line
/// so raw strings and files with CRLF parse the same.
fn lines(input: &str) -> Vec<&str> {
    input
        .trim_matches(|c: char| c == '\n' || c == '\r')
        .lines()
        .map(str::trim_end)
        .collect()
}

pub(crate) fn parse_risk_map(input: &str) -> Result<RiskMap, ParserErr> {
    let lines = lines(input);
    if lines.iter().all(|line| line.is_empty()) {
        return Err(ParserErr::Empty);
    }

    let mut grid: Vec<Vec<u8>> = Vec::new();
    for (r, line) in lines.iter().enumerate() {
        let mut row = Vec::with_capacity(line.len());
        for (c, ch) in line.chars().enumerate() {
            match ch.to_digit(10) {
                Some(digit) if digit > 0 => row.push(digit as u8),
                _ => return Err(ParserErr::Pos(r, c)),
            }
        }
        if r > 0 && row.len() != grid[0].len() {
            return Err(ParserErr::LineLength(r));
        }
        grid.push(row);
    }

    Ok(RiskMap::new(Vec2d::new(&grid)))
}

pub(crate) fn parse_burrow(input: &str) -> Result<Burrow, ParserErr> {
    let lines = lines(input);
    if lines.iter().all(|line| line.is_empty()) {
        return Err(ParserErr::Empty);
    }
    if lines.len() < 2 {
        return Err(ParserErr::Hallway);
    }

    let hallway = parse_hallway(lines[0], lines[1])?;

    let mut rows = Vec::new();
    let mut walls_reached = false;
    for (r, line) in lines.iter().enumerate().skip(2) {
        let is_room_row = line.chars().any(|ch| ch == '.' || Amphipod::from_char(ch).is_some());
        if !is_room_row {
            check_walls(r, line, |_| false)?;
            walls_reached = true;
            continue;
        }
        if walls_reached {
            return Err(ParserErr::RoomDepth);
        }
        rows.push(parse_room_row(r, line)?);
    }
    if rows.is_empty() || rows.len() > MAX_DEPTH {
        return Err(ParserErr::RoomDepth);
    }

    // tokens rest on the bottom of their room or on top of another token
    for room in 0..ROOMS {
        let column: Vec<Slot> = rows.iter().map(|row| row[room]).collect();
        if let Some(front) = column.iter().position(Option::is_some) {
            if column[front..].iter().any(Option::is_none) {
                return Err(ParserErr::Floating(room));
            }
        }
    }

    let burrow = Burrow::new(hallway, &rows);
    for (&amphipod, &count) in Amphipod::ALL.iter().zip(burrow.token_counts().iter()) {
        if count != burrow.depth() {
            return Err(ParserErr::TokenCount(amphipod.to_char()));
        }
    }
    Ok(burrow)
}

fn parse_hallway(top: &str, line: &str) -> Result<[Slot; HALLWAY_LEN], ParserErr> {
    if top.len() != HALLWAY_LEN + 2 || top.chars().any(|ch| ch != '#') {
        return Err(ParserErr::Hallway);
    }
    let chars: Vec<char> = line.chars().collect();
    if chars.len() != HALLWAY_LEN + 2 || chars[0] != '#' || chars[HALLWAY_LEN + 1] != '#' {
        return Err(ParserErr::Hallway);
    }

    let mut hallway = [None; HALLWAY_LEN];
    for (col, slot) in hallway.iter_mut().enumerate() {
        let ch = chars[col + 1];
        if ch == '.' {
            continue;
        }
        let amphipod = Amphipod::from_char(ch).ok_or(ParserErr::Pos(1, col + 1))?;
        // nobody may stand in front of a room
        if is_mouth(col) {
            return Err(ParserErr::Hallway);
        }
        *slot = Some(amphipod);
    }
    Ok(hallway)
}

/// Room cells are in the columns right under the room mouths, everything else is wall or padding.
fn parse_room_row(r: usize, line: &str) -> Result<[Slot; ROOMS], ParserErr> {
    let chars: Vec<char> = line.chars().collect();
    let mut row = [None; ROOMS];
    for (room, slot) in row.iter_mut().enumerate() {
        let c = room_col(room);
        match chars.get(c) {
            Some(&'.') => {}
            Some(&ch) => *slot = Some(Amphipod::from_char(ch).ok_or(ParserErr::Pos(r, c))?),
            None => return Err(ParserErr::Pos(r, c)),
        }
    }
    check_walls(r, line, |c| (0..ROOMS).any(|room| room_col(room) == c))?;
    Ok(row)
}

fn check_walls<F: Fn(usize) -> bool>(r: usize, line: &str, is_cell: F) -> Result<(), ParserErr> {
    for (c, ch) in line.chars().enumerate() {
        if !is_cell(c) && ch != '#' && ch != ' ' {
            return Err(ParserErr::Pos(r, c));
        }
    }
    Ok(())
}

/// Column of the input text, the hallway starts at column 1.
fn room_col(room: usize) -> usize {
    mouth(room) + 1
}
