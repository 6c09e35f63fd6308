//! The amphipod burrow: tokens labeled A to D have to be sorted into their rooms
//! by walking through a shared hallway.
//!
//! ```text
//! #############
//! #...........#   hallway, columns 0 to 10
//! ###B#C#B#D###   depth 0 of rooms A, B, C and D
//!   #A#D#C#A#     depth 1
//!   #########
//! ```

pub mod layout;
pub mod strategy;

use std::fmt::{self, Debug, Display, Formatter};

use crate::config::{BurrowConfig, Config, HeuristicKind};
use crate::moves::{Location, Move, Moves};
use crate::parser::ParserErr;
use crate::solver::{self, Cost, Edge, SearchSpace, SolverErr, SolverOk};
use crate::Solve;

use self::layout::{mouth, Layout};
use self::strategy::MoveStrategy;

pub const HALLWAY_LEN: usize = 11;
pub const ROOMS: usize = 4;
pub const MAX_DEPTH: usize = 4;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Amphipod {
    A,
    B,
    C,
    D,
}

impl Amphipod {
    pub const ALL: [Amphipod; ROOMS] = [Amphipod::A, Amphipod::B, Amphipod::C, Amphipod::D];

    /// Cost of a single step.
    pub fn unit_cost(self) -> Cost {
        match self {
            Amphipod::A => 1,
            Amphipod::B => 10,
            Amphipod::C => 100,
            Amphipod::D => 1000,
        }
    }

    /// Index of the room this amphipod belongs to.
    pub fn home(self) -> usize {
        self as usize
    }

    pub fn for_room(room: usize) -> Amphipod {
        Self::ALL[room]
    }

    pub fn from_char(c: char) -> Option<Amphipod> {
        match c {
            'A' => Some(Amphipod::A),
            'B' => Some(Amphipod::B),
            'C' => Some(Amphipod::C),
            'D' => Some(Amphipod::D),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Amphipod::A => 'A',
            Amphipod::B => 'B',
            Amphipod::C => 'C',
            Amphipod::D => 'D',
        }
    }
}

impl Display for Amphipod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Debug for Amphipod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

pub type Slot = Option<Amphipod>;

/// One arrangement of the burrow, this is the search state.
///
/// Rooms always hold `MAX_DEPTH` slots, the ones past `depth` stay empty
/// so all depths share one representation.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Burrow {
    hallway: [Slot; HALLWAY_LEN],
    rooms: [[Slot; MAX_DEPTH]; ROOMS],
    depth: u8,
}

impl Burrow {
    /// `rows` go from the hallway down, each lists rooms A to D.
    pub(crate) fn new(hallway: [Slot; HALLWAY_LEN], rows: &[[Slot; ROOMS]]) -> Self {
        assert!(!rows.is_empty() && rows.len() <= MAX_DEPTH);

        let mut rooms = [[None; MAX_DEPTH]; ROOMS];
        for (depth, row) in rows.iter().enumerate() {
            for (room, &slot) in row.iter().enumerate() {
                rooms[room][depth] = slot;
            }
        }
        Burrow {
            hallway,
            rooms,
            depth: rows.len() as u8,
        }
    }

    /// The goal arrangement, rooms have to be 1 to `MAX_DEPTH` deep.
    pub fn sorted(depth: usize) -> Result<Self, ParserErr> {
        if depth == 0 || depth > MAX_DEPTH {
            return Err(ParserErr::RoomDepth);
        }
        let row = [
            Some(Amphipod::A),
            Some(Amphipod::B),
            Some(Amphipod::C),
            Some(Amphipod::D),
        ];
        Ok(Burrow::new([None; HALLWAY_LEN], &vec![row; depth]))
    }

    pub fn depth(&self) -> usize {
        self.depth as usize
    }

    pub fn hallway(&self) -> &[Slot] {
        &self.hallway
    }

    pub fn room(&self, room: usize) -> &[Slot] {
        &self.rooms[room][..self.depth()]
    }

    fn rows(&self) -> Vec<[Slot; ROOMS]> {
        (0..self.depth())
            .map(|depth| {
                let mut row = [None; ROOMS];
                for (room, slot) in row.iter_mut().enumerate() {
                    *slot = self.rooms[room][depth];
                }
                row
            })
            .collect()
    }

    pub fn locations(&self) -> impl Iterator<Item = Location> {
        let depth = self.depth();
        let rooms = (0..ROOMS).flat_map(move |room| {
            (0..depth).map(move |d| Location::Room { room, depth: d })
        });
        (0..HALLWAY_LEN).map(Location::Hallway).chain(rooms)
    }

    pub fn get(&self, location: Location) -> Slot {
        match location {
            Location::Hallway(col) => self.hallway[col],
            Location::Room { room, depth } => self.rooms[room][depth],
        }
    }

    fn set(&mut self, location: Location, slot: Slot) {
        match location {
            Location::Hallway(col) => self.hallway[col] = slot,
            Location::Room { room, depth } => self.rooms[room][depth] = slot,
        }
    }

    pub fn solved(&self) -> bool {
        (0..ROOMS).all(|room| {
            let home = Some(Amphipod::for_room(room));
            self.room(room).iter().all(|&slot| slot == home)
        })
    }

    /// The slot and everything behind it holds the room's own label.
    /// Settled tokens never have to move again.
    pub fn is_settled(&self, room: usize, depth: usize) -> bool {
        let home = Some(Amphipod::for_room(room));
        self.room(room)[depth..].iter().all(|&slot| slot == home)
    }

    /// No stranger is in the room.
    pub fn is_enterable(&self, room: usize) -> bool {
        let home = Amphipod::for_room(room);
        self.room(room)
            .iter()
            .all(|&slot| slot.map_or(true, |amphipod| amphipod == home))
    }

    /// Depth of the occupant closest to the hallway.
    pub fn front(&self, room: usize) -> Option<usize> {
        self.room(room).iter().position(Option::is_some)
    }

    pub fn deepest_free(&self, room: usize) -> Option<usize> {
        self.room(room).iter().rposition(Option::is_none)
    }

    pub fn apply(&self, mov: &Move) -> Burrow {
        debug_assert_eq!(self.get(mov.from), Some(mov.amphipod));
        debug_assert_eq!(self.get(mov.to), None);

        let mut next = self.clone();
        next.set(mov.from, None);
        next.set(mov.to, Some(mov.amphipod));
        next
    }

    /// How many tokens of each label there are, indexed by home room.
    pub fn token_counts(&self) -> [usize; ROOMS] {
        let mut counts = [0; ROOMS];
        for location in self.locations() {
            if let Some(amphipod) = self.get(location) {
                counts[amphipod.home()] += 1;
            }
        }
        counts
    }

    /// The move that turns `self` into `next`, `None` if they don't differ by exactly one move.
    pub fn move_to(&self, next: &Burrow) -> Option<Move> {
        if self.depth != next.depth {
            return None;
        }
        let mut from = None;
        let mut to = None;
        for location in self.locations() {
            match (self.get(location), next.get(location)) {
                (Some(a), None) if from.is_none() => from = Some((location, a)),
                (None, Some(a)) if to.is_none() => to = Some((location, a)),
                (before, after) if before == after => {}
                _ => return None,
            }
        }
        match (from, to) {
            (Some((from, a)), Some((to, b))) if a == b => Some(Move::new(a, from, to)),
            _ => None,
        }
    }

    /// Inserts the two hidden rows between the front and back rows of a depth 2 burrow.
    pub fn unfold(&self) -> Result<Burrow, ParserErr> {
        if self.depth() != 2 {
            return Err(ParserErr::RoomDepth);
        }
        let row = |labels: [Amphipod; ROOMS]| {
            let mut row = [None; ROOMS];
            for (slot, &label) in row.iter_mut().zip(labels.iter()) {
                *slot = Some(label);
            }
            row
        };
        let rows = self.rows();
        let hidden1 = row([Amphipod::D, Amphipod::C, Amphipod::B, Amphipod::A]);
        let hidden2 = row([Amphipod::D, Amphipod::B, Amphipod::A, Amphipod::C]);
        Ok(Burrow::new(self.hallway, &[rows[0], hidden1, hidden2, rows[1]]))
    }

    pub fn estimate(&self, kind: HeuristicKind) -> Cost {
        match kind {
            HeuristicKind::Distance => self.distance_estimate(),
            HeuristicKind::Unsettled => self.unsettled_cnt() as Cost,
            HeuristicKind::Zero => 0,
        }
    }

    /// Every unsettled token has to walk at least to the column of its room and then one step down.
    fn distance_estimate(&self) -> Cost {
        let mut total = 0;
        for (col, &slot) in self.hallway.iter().enumerate() {
            if let Some(amphipod) = slot {
                total += Self::walk_home(col, amphipod);
            }
        }
        for room in 0..ROOMS {
            for (depth, &slot) in self.room(room).iter().enumerate() {
                if let Some(amphipod) = slot {
                    if !self.is_settled(room, depth) {
                        total += Self::walk_home(mouth(room), amphipod);
                    }
                }
            }
        }
        total
    }

    fn walk_home(col: usize, amphipod: Amphipod) -> Cost {
        let target = mouth(amphipod.home());
        let horizontal = if col > target { col - target } else { target - col };
        (horizontal as Cost + 1) * amphipod.unit_cost()
    }

    fn unsettled_cnt(&self) -> usize {
        let in_hallway = self.hallway.iter().filter(|slot| slot.is_some()).count();
        let in_rooms: usize = (0..ROOMS)
            .map(|room| {
                (0..self.depth())
                    .filter(|&depth| {
                        self.rooms[room][depth].is_some() && !self.is_settled(room, depth)
                    })
                    .count()
            })
            .sum();
        in_hallway + in_rooms
    }
}

/// Renders the moves taken along a path of burrow states.
pub fn path_moves(path: &[Burrow]) -> Moves {
    path.windows(2)
        .filter_map(|pair| pair[0].move_to(&pair[1]))
        .collect()
}

impl Display for Burrow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fn slot_char(slot: Slot) -> char {
            slot.map_or('.', Amphipod::to_char)
        }

        writeln!(f, "{}", "#".repeat(HALLWAY_LEN + 2))?;
        write!(f, "#")?;
        for &slot in &self.hallway {
            write!(f, "{}", slot_char(slot))?;
        }
        writeln!(f, "#")?;

        for depth in 0..self.depth() {
            write!(f, "{}", if depth == 0 { "###" } else { "  #" })?;
            for room in 0..ROOMS {
                write!(f, "{}#", slot_char(self.rooms[room][depth]))?;
            }
            if depth == 0 {
                write!(f, "##")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  {}", "#".repeat(2 * ROOMS + 1))
    }
}

impl Debug for Burrow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// The burrow rules plugged into the generic search.
#[derive(Debug)]
pub struct BurrowSpace {
    layout: Layout,
    strategy: Box<dyn MoveStrategy>,
    heuristic: HeuristicKind,
    reparking: bool,
}

impl BurrowSpace {
    pub fn new(config: &BurrowConfig) -> Self {
        BurrowSpace {
            layout: Layout::new(),
            strategy: strategy::from_kind(config.strategy),
            heuristic: config.heuristic,
            reparking: config.reparking,
        }
    }

    pub fn moves(&self, burrow: &Burrow) -> Vec<Move> {
        let mut moves = Vec::new();
        self.strategy
            .moves(&self.layout, burrow, self.reparking, &mut moves);
        moves
    }
}

impl SearchSpace for BurrowSpace {
    type State = Burrow;

    fn expand(&self, burrow: &Burrow, edges: &mut Vec<Edge<Burrow>>) {
        for mov in self.moves(burrow) {
            edges.push(Edge::new(burrow.apply(&mov), mov.cost()));
        }
    }

    fn heuristic(&self, burrow: &Burrow) -> Cost {
        burrow.estimate(self.heuristic)
    }

    fn solved(&self, burrow: &Burrow) -> bool {
        burrow.solved()
    }
}

impl Solve for Burrow {
    type State = Burrow;

    fn solve(&self, config: &Config, print_status: bool) -> Result<SolverOk<Burrow>, SolverErr> {
        debug!(
            "Solving burrow of depth {}: {:?}, initial estimate {}",
            self.depth(),
            config.burrow,
            self.estimate(config.burrow.heuristic)
        );
        let space = BurrowSpace::new(&config.burrow);
        solver::search(&space, self, &config.search, print_status)
    }
}
