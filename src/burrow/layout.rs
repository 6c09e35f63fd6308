use super::{Burrow, HALLWAY_LEN, ROOMS};

/// Hallway cells a token may stop on, every other cell is the mouth of a room.
pub const STOPS: [usize; 7] = [0, 1, 3, 5, 7, 9, 10];

/// Hallway column above the entrance of `room`.
pub(crate) fn mouth(room: usize) -> usize {
    debug_assert!(room < ROOMS);
    2 + 2 * room
}

pub(crate) fn is_mouth(col: usize) -> bool {
    col >= mouth(0) && col <= mouth(ROOMS - 1) && col % 2 == 0
}

/// Precomputed hallway walks between any two columns.
///
/// The corridor from `from` to `to` lists the cells entered on the way,
/// `to` included and `from` excluded, so it is empty when `from == to`.
#[derive(Debug, Clone)]
pub struct Layout {
    corridors: Vec<Vec<usize>>,
}

impl Layout {
    pub fn new() -> Self {
        let mut corridors = Vec::with_capacity(HALLWAY_LEN * HALLWAY_LEN);
        for from in 0..HALLWAY_LEN {
            for to in 0..HALLWAY_LEN {
                let corridor = if from <= to {
                    (from + 1..=to).collect()
                } else {
                    (to..from).rev().collect()
                };
                corridors.push(corridor);
            }
        }
        Layout { corridors }
    }

    pub fn corridor(&self, from: usize, to: usize) -> &[usize] {
        &self.corridors[from * HALLWAY_LEN + to]
    }

    /// Nothing stands in the hallway between `from` (exclusive) and `to` (inclusive).
    pub fn path_clear(&self, burrow: &Burrow, from: usize, to: usize) -> bool {
        let hallway = burrow.hallway();
        self.corridor(from, to)
            .iter()
            .all(|&col| hallway[col].is_none())
    }

    /// Stops a token at hallway column `from` can walk to without passing anybody.
    pub fn reachable_stops<'a>(
        &'a self,
        burrow: &'a Burrow,
        from: usize,
    ) -> impl Iterator<Item = usize> + 'a {
        STOPS
            .iter()
            .cloned()
            .filter(move |&stop| stop != from && self.path_clear(burrow, from, stop))
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::burrow::Amphipod;

    #[test]
    fn mouths() {
        assert_eq!(
            (0..ROOMS).map(mouth).collect::<Vec<_>>(),
            vec![2, 4, 6, 8]
        );
        let mouths: Vec<_> = (0..HALLWAY_LEN).filter(|&col| is_mouth(col)).collect();
        assert_eq!(mouths, vec![2, 4, 6, 8]);
        assert!(STOPS.iter().all(|&stop| !is_mouth(stop)));
        assert_eq!(STOPS.len() + ROOMS, HALLWAY_LEN);
    }

    #[test]
    fn corridors() {
        let layout = Layout::new();
        assert_eq!(layout.corridor(2, 0), &[1, 0]);
        assert_eq!(layout.corridor(0, 2), &[1, 2]);
        assert_eq!(layout.corridor(10, 6), &[9, 8, 7, 6]);
        assert!(layout.corridor(5, 5).is_empty());
    }

    #[test]
    fn blocked_walks() {
        let layout = Layout::new();
        let empty = Burrow::sorted(2).unwrap();
        assert_eq!(
            layout.reachable_stops(&empty, mouth(0)).collect::<Vec<_>>(),
            STOPS.to_vec()
        );

        let mut hallway = [None; HALLWAY_LEN];
        hallway[3] = Some(Amphipod::B);
        hallway[7] = Some(Amphipod::C);
        let rows = [[None, None, None, Some(Amphipod::D)]];
        let burrow = Burrow::new(hallway, &rows);

        assert!(layout.path_clear(&burrow, 3, 1));
        assert!(!layout.path_clear(&burrow, 1, 3));
        assert!(!layout.path_clear(&burrow, mouth(0), mouth(3)));
        assert_eq!(
            layout.reachable_stops(&burrow, mouth(1)).collect::<Vec<_>>(),
            vec![5]
        );
        assert_eq!(
            layout.reachable_stops(&burrow, 3).collect::<Vec<_>>(),
            vec![0, 1, 5]
        );
    }
}
