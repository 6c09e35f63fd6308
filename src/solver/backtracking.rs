use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::mem;

use super::Cost;

/// Follows `prevs` from `final_state` until a state without a predecessor (the start)
/// and returns the states in start -> final order.
pub(crate) fn backtrack_path<S: Clone + Eq + Hash, H: BuildHasher>(
    prevs: &HashMap<&S, &S, H>,
    final_state: &S,
) -> Vec<S> {
    let mut states = Vec::new();
    let mut cur = final_state;
    loop {
        states.push(cur.clone());
        match prevs.get(cur) {
            Some(&prev) => cur = prev,
            None => {
                states.reverse();
                return states;
            }
        }
    }
}

/// Lists paths from `start` to any of `goals` costing at most `max_cost`, cheapest first.
///
/// `incoming` holds every edge the search relaxed (not only the improving ones) and `dists`
/// the best known cost of each state, which bounds every extension from below.
/// At most `limit` paths are returned.
pub(crate) fn enumerate_paths<S: Clone + Eq + Hash, H: BuildHasher>(
    incoming: &HashMap<&S, Vec<(&S, Cost)>, H>,
    dists: &HashMap<&S, Cost, H>,
    start: &S,
    goals: &[&S],
    max_cost: Cost,
    limit: usize,
) -> Vec<(Vec<S>, Cost)> {
    let mut paths = Vec::new();
    if limit == 0 {
        return paths;
    }

    // partial paths in goal -> start order with the cost of the part already walked,
    // ordered by the cheapest cost they can still be completed with (FIFO among equals)
    let mut partials: Vec<(Vec<&S>, Cost)> = Vec::new();
    let mut queue = BinaryHeap::new();
    for &goal in goals {
        if let Some(&dist) = dists.get(goal) {
            if dist <= max_cost {
                queue.push(Reverse((dist, partials.len())));
                partials.push((vec![goal], 0));
            }
        }
    }

    while let Some(Reverse((_, index))) = queue.pop() {
        let (partial, suffix) = mem::replace(&mut partials[index], (Vec::new(), 0));
        let cur = partial[partial.len() - 1];
        if cur == start {
            paths.push((partial.iter().rev().map(|&s| s.clone()).collect(), suffix));
            if paths.len() == limit {
                break;
            }
            continue;
        }

        let edges = incoming.get(cur).map(|v| &v[..]).unwrap_or(&[]);
        for &(prev, cost) in edges {
            // zero cost edges can close a cycle
            if partial.contains(&prev) {
                continue;
            }
            let suffix = suffix + cost;
            let bound = match dists.get(prev) {
                Some(&dist) => dist + suffix,
                None => continue,
            };
            if bound > max_cost {
                continue;
            }
            let mut extended = partial.clone();
            extended.push(prev);
            queue.push(Reverse((bound, partials.len())));
            partials.push((extended, suffix));
        }
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    use fnv::FnvHashMap;

    #[test]
    fn backtracking() {
        let states = ["start", "a", "b", "goal"];
        let mut prevs = FnvHashMap::default();
        prevs.insert(&states[1], &states[0]);
        prevs.insert(&states[2], &states[1]);
        prevs.insert(&states[3], &states[2]);

        assert_eq!(
            backtrack_path(&prevs, &states[3]),
            vec!["start", "a", "b", "goal"]
        );
        assert_eq!(backtrack_path(&prevs, &states[0]), vec!["start"]);
    }

    #[test]
    fn enumerating_diamond() {
        //   start
        //   1/ \2
        //   a   b
        //   3\ /2
        //    goal
        let states = ["start", "a", "b", "goal"];
        let mut dists = FnvHashMap::default();
        dists.insert(&states[0], 0);
        dists.insert(&states[1], 1);
        dists.insert(&states[2], 2);
        dists.insert(&states[3], 4);
        let mut incoming = FnvHashMap::default();
        incoming.insert(&states[1], vec![(&states[0], 1)]);
        incoming.insert(&states[2], vec![(&states[0], 2)]);
        incoming.insert(&states[3], vec![(&states[1], 3), (&states[2], 2)]);
        let goals = [&states[3]];

        let paths = enumerate_paths(&incoming, &dists, &states[0], &goals, 4, 10);
        assert_eq!(
            paths,
            vec![
                (vec!["start", "a", "goal"], 4),
                (vec!["start", "b", "goal"], 4)
            ]
        );
        let paths = enumerate_paths(&incoming, &dists, &states[0], &goals, 4, 1);
        assert_eq!(paths, vec![(vec!["start", "a", "goal"], 4)]);
        assert!(enumerate_paths(&incoming, &dists, &states[0], &goals, 4, 0).is_empty());

        // a dearer edge into the goal only counts once the cost allows it
        incoming.get_mut(&states[3]).unwrap().push((&states[0], 5));
        assert_eq!(
            enumerate_paths(&incoming, &dists, &states[0], &goals, 4, 10).len(),
            2
        );
        let paths = enumerate_paths(&incoming, &dists, &states[0], &goals, 5, 10);
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[2], (vec!["start", "goal"], 5));
    }

    #[test]
    fn enumerating_ignores_cycles() {
        // a and b reach each other for free
        let states = ["start", "a", "b", "goal"];
        let mut dists = FnvHashMap::default();
        dists.insert(&states[0], 0);
        dists.insert(&states[1], 1);
        dists.insert(&states[2], 1);
        dists.insert(&states[3], 2);
        let mut incoming = FnvHashMap::default();
        incoming.insert(&states[1], vec![(&states[0], 1), (&states[2], 0)]);
        incoming.insert(&states[2], vec![(&states[1], 0)]);
        incoming.insert(&states[3], vec![(&states[2], 1)]);

        let paths = enumerate_paths(&incoming, &dists, &states[0], &[&states[3]], 2, 10);
        assert_eq!(paths, vec![(vec!["start", "a", "b", "goal"], 2)]);
    }
}
