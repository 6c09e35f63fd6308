use std::fmt::Debug;

use crate::config::MoveStrategyKind;
use crate::moves::{Location, Move};

use super::layout::{mouth, Layout};
use super::{Amphipod, Burrow, ROOMS};

/// Enumerates the legal moves out of a burrow state.
pub trait MoveStrategy: Debug {
    fn moves(&self, layout: &Layout, burrow: &Burrow, reparking: bool, moves: &mut Vec<Move>);
}

/// Every token that may move considers every hallway stop it can reach
/// and its home room.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllStops;

impl MoveStrategy for AllStops {
    fn moves(&self, layout: &Layout, burrow: &Burrow, reparking: bool, moves: &mut Vec<Move>) {
        home_moves(layout, burrow, moves);
        parking_moves(layout, burrow, reparking, moves);
    }
}

/// When some token can walk straight into its home room, that is the only successor.
///
/// Such a move never makes the solution more expensive so this only prunes the search,
/// but it also hides equally cheap orderings of the same moves from enumeration.
///
/// This takes the place of parking only at the furthest free stop toward a target room,
/// which skips stops the cheapest solution can need and so isn't guaranteed to be optimal.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomeFirst;

impl MoveStrategy for HomeFirst {
    fn moves(&self, layout: &Layout, burrow: &Burrow, reparking: bool, moves: &mut Vec<Move>) {
        let before = moves.len();
        home_moves(layout, burrow, moves);
        if moves.len() > before {
            moves.truncate(before + 1);
        } else {
            parking_moves(layout, burrow, reparking, moves);
        }
    }
}

pub fn from_kind(kind: MoveStrategyKind) -> Box<dyn MoveStrategy> {
    match kind {
        MoveStrategyKind::AllStops => Box::new(AllStops),
        MoveStrategyKind::HomeFirst => Box::new(HomeFirst),
    }
}

/// Moves ending in the mover's home room, from the hallway or directly from another room.
pub(crate) fn home_moves(layout: &Layout, burrow: &Burrow, moves: &mut Vec<Move>) {
    for (col, &slot) in burrow.hallway().iter().enumerate() {
        if let Some(amphipod) = slot {
            if let Some(to) = entry(layout, burrow, col, amphipod) {
                moves.push(Move::new(amphipod, Location::Hallway(col), to));
            }
        }
    }

    for room in 0..ROOMS {
        if let Some((from, amphipod)) = leaving(burrow, room) {
            if amphipod.home() == room {
                continue;
            }
            if let Some(to) = entry(layout, burrow, mouth(room), amphipod) {
                moves.push(Move::new(amphipod, from, to));
            }
        }
    }
}

/// Moves from a room into the hallway, plus hallway to hallway moves when `reparking` is on.
pub(crate) fn parking_moves(
    layout: &Layout,
    burrow: &Burrow,
    reparking: bool,
    moves: &mut Vec<Move>,
) {
    for room in 0..ROOMS {
        if let Some((from, amphipod)) = leaving(burrow, room) {
            for stop in layout.reachable_stops(burrow, mouth(room)) {
                moves.push(Move::new(amphipod, from, Location::Hallway(stop)));
            }
        }
    }

    if !reparking {
        return;
    }
    for (col, &slot) in burrow.hallway().iter().enumerate() {
        if let Some(amphipod) = slot {
            for stop in layout.reachable_stops(burrow, col) {
                moves.push(Move::new(
                    amphipod,
                    Location::Hallway(col),
                    Location::Hallway(stop),
                ));
            }
        }
    }
}

/// The front token of `room` if it has a reason to leave.
fn leaving(burrow: &Burrow, room: usize) -> Option<(Location, Amphipod)> {
    let depth = burrow.front(room)?;
    if burrow.is_settled(room, depth) {
        return None;
    }
    let amphipod = burrow.room(room)[depth]?;
    Some((Location::Room { room, depth }, amphipod))
}

/// Where `amphipod` standing above hallway column `col` would end up in its home room.
fn entry(layout: &Layout, burrow: &Burrow, col: usize, amphipod: Amphipod) -> Option<Location> {
    let room = amphipod.home();
    if !burrow.is_enterable(room) || !layout.path_clear(burrow, col, mouth(room)) {
        return None;
    }
    let depth = burrow.deepest_free(room)?;
    Some(Location::Room { room, depth })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::burrow::Amphipod::*;
    use crate::burrow::HALLWAY_LEN;

    fn sample() -> Burrow {
        Burrow::new(
            [None; HALLWAY_LEN],
            &[
                [Some(B), Some(C), Some(B), Some(D)],
                [Some(A), Some(D), Some(C), Some(A)],
            ],
        )
    }

    fn moves_of(strategy: &dyn MoveStrategy, burrow: &Burrow, reparking: bool) -> Vec<Move> {
        let mut moves = Vec::new();
        strategy.moves(&Layout::new(), burrow, reparking, &mut moves);
        moves
    }

    #[test]
    fn leaving_the_sample() {
        // every front token leaves to one of 7 stops, no room can be entered yet
        let burrow = sample();
        for strategy in &[from_kind(MoveStrategyKind::AllStops), from_kind(MoveStrategyKind::HomeFirst)] {
            let moves = moves_of(&**strategy, &burrow, false);
            assert_eq!(moves.len(), 4 * 7);
            assert!(moves.iter().all(|m| m.steps() >= 2 && match m.to {
                Location::Hallway(_) => true,
                Location::Room { .. } => false,
            }));
            assert_eq!(moves_of(&**strategy, &burrow, true).len(), 4 * 7);
        }
    }

    #[test]
    fn settled_tokens_stay() {
        // A and D are home, B and C have to swap
        let burrow = Burrow::new(
            [None; HALLWAY_LEN],
            &[
                [Some(A), Some(C), Some(B), Some(D)],
                [Some(A), Some(B), Some(C), Some(D)],
            ],
        );
        let moves = moves_of(&AllStops, &burrow, false);
        assert!(moves.iter().all(|m| m.amphipod == C || m.amphipod == B));
        assert!(moves.iter().any(|m| m.from == Location::Room { room: 1, depth: 0 }));
        assert!(moves.iter().any(|m| m.from == Location::Room { room: 2, depth: 0 }));
        // the C behind B is already home
        assert!(!moves.iter().any(|m| m.from == Location::Room { room: 2, depth: 1 }));
    }

    #[test]
    fn home_first_prunes() {
        let mut hallway = [None; HALLWAY_LEN];
        hallway[9] = Some(D);
        hallway[0] = Some(A);
        let burrow = Burrow::new(
            hallway,
            &[[None, Some(C), Some(B), None], [Some(A), Some(B), Some(C), Some(D)]],
        );

        let all = moves_of(&AllStops, &burrow, false);
        let home = moves_of(&HomeFirst, &burrow, false);
        assert_eq!(home.len(), 1);
        assert!(all.len() > 1);
        assert_eq!(home[0], all[0]);
        assert_eq!(
            home[0],
            Move::new(A, Location::Hallway(0), Location::Room { room: 0, depth: 0 })
        );
        assert!(all.contains(&Move::new(
            D,
            Location::Hallway(9),
            Location::Room { room: 3, depth: 0 }
        )));
    }

    #[test]
    fn room_to_room() {
        // B can walk from room C straight into room B, C left it already
        let mut hallway = [None; HALLWAY_LEN];
        hallway[10] = Some(C);
        let burrow = Burrow::new(
            hallway,
            &[[Some(A), None, Some(B), Some(D)], [Some(A), Some(B), Some(C), Some(D)]],
        );
        let moves = moves_of(&AllStops, &burrow, false);
        assert!(moves.contains(&Move::new(
            B,
            Location::Room { room: 2, depth: 0 },
            Location::Room { room: 1, depth: 0 }
        )));
        assert_eq!(moves_of(&HomeFirst, &burrow, false).len(), 1);
    }

    #[test]
    fn reparking() {
        let mut hallway = [None; HALLWAY_LEN];
        hallway[5] = Some(D);
        let burrow = Burrow::new(
            hallway,
            &[[Some(A), Some(B), None, Some(C)], [Some(A), Some(B), Some(C), Some(D)]],
        );
        let without = moves_of(&AllStops, &burrow, false);
        let with = moves_of(&AllStops, &burrow, true);
        assert!(without.iter().all(|m| m.from != Location::Hallway(5)));
        let reparked: Vec<_> = with
            .iter()
            .filter(|m| m.from == Location::Hallway(5))
            .map(|m| m.to)
            .collect();
        assert_eq!(
            reparked,
            vec![0, 1, 3, 7, 9, 10]
                .into_iter()
                .map(Location::Hallway)
                .collect::<Vec<_>>()
        );
    }
}
