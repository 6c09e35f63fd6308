use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::Hash;

use fnv::FnvHashMap;
use prettytable::{format, Table};
use separator::Separatable;

use super::Cost;

#[derive(Clone, PartialEq, Eq, Default)]
pub struct Stats {
    created_states: Vec<usize>,
    visited_states: Vec<usize>,
    duplicate_states: Vec<usize>,
    expanded: usize,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Stats::default()
    }

    pub fn total_created(&self) -> usize {
        self.created_states.iter().sum()
    }

    pub fn total_unique_visited(&self) -> usize {
        self.visited_states.iter().sum()
    }

    pub fn total_reached_duplicates(&self) -> usize {
        self.duplicate_states.iter().sum()
    }

    /// Number of nodes whose neighbors were generated - goals in enumeration mode are visited but not expanded.
    pub fn total_expanded(&self) -> usize {
        self.expanded
    }

    pub(crate) fn add_created<S>(&mut self, node: &SearchNode<'_, S>) -> bool {
        Self::add(&mut self.created_states, node)
    }

    pub(crate) fn add_unique_visited<S>(&mut self, node: &SearchNode<'_, S>) -> bool {
        Self::add(&mut self.visited_states, node)
    }

    pub(crate) fn add_reached_duplicate<S>(&mut self, node: &SearchNode<'_, S>) -> bool {
        Self::add(&mut self.duplicate_states, node)
    }

    pub(crate) fn add_expanded(&mut self) -> usize {
        self.expanded += 1;
        self.expanded
    }

    fn add<S>(counts: &mut Vec<usize>, node: &SearchNode<'_, S>) -> bool {
        let mut ret = false;

        // while because depths can be skipped when the first node of a depth is reached as a duplicate
        while node.depth as usize >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[node.depth as usize] += 1;
        ret
    }

    fn separated(n: usize) -> String {
        (n as u64).separated_string()
    }

    fn count_at(counts: &[usize], depth: usize) -> usize {
        counts.get(depth).cloned().unwrap_or(0)
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created_states)?;
        writeln!(f, "reached duplicates by depth: {:?}", self.duplicate_states)?;
        writeln!(f, "unique visited by depth: {:?}", self.visited_states)?;
        writeln!(f, "total created: {}", Self::separated(self.total_created()))?;
        writeln!(
            f,
            "total reached duplicates: {}",
            Self::separated(self.total_reached_duplicates())
        )?;
        writeln!(
            f,
            "total unique visited: {}",
            Self::separated(self.total_unique_visited())
        )?;
        writeln!(f, "total expanded: {}", Self::separated(self.total_expanded()))
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let created = self.total_created();
        let duplicates = self.total_reached_duplicates();
        let visited = self.total_unique_visited();
        // nodes still queued when the search stopped
        let left = created - visited - duplicates;
        writeln!(f, "States created total: {}", Self::separated(created))?;
        writeln!(f, "Unique visited total: {}", Self::separated(visited))?;
        writeln!(f, "Reached duplicates total: {}", Self::separated(duplicates))?;
        writeln!(f, "Created but not reached total: {}", Self::separated(left))?;
        writeln!(f)?;

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);
        table.set_titles(row![
            "Depth",
            "Created",
            "Unique",
            "Duplicates",
            "Unknown (not reached)"
        ]);
        // created_states is always the longest vec
        for depth in 0..self.created_states.len() {
            let created = self.created_states[depth];
            let visited = Self::count_at(&self.visited_states, depth);
            let duplicates = Self::count_at(&self.duplicate_states, depth);
            table.add_row(row![
                format!("{}:", depth),
                Self::separated(created),
                Self::separated(visited),
                Self::separated(duplicates),
                Self::separated(created - visited - duplicates)
            ]);
        }
        write!(f, "{}", table)
    }
}

/// One frontier entry. `dist` is the cost from start (g), `cost` is `dist + heuristic` (f)
/// and `depth` is the number of moves from start (only used for statistics).
#[derive(Debug)]
pub(crate) struct SearchNode<'a, S> {
    pub(crate) state: &'a S,
    pub(crate) dist: Cost,
    pub(crate) cost: Cost,
    pub(crate) depth: u32,
    pub(crate) seq: usize,
}

impl<'a, S> SearchNode<'a, S> {
    pub(crate) fn new(state: &'a S, dist: Cost, h: Cost, depth: u32, seq: usize) -> Self {
        Self {
            state,
            dist,
            cost: dist + h,
            depth,
            seq,
        }
    }
}

impl<S> Clone for SearchNode<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for SearchNode<'_, S> {}

impl<S> PartialEq for SearchNode<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl<S> Eq for SearchNode<'_, S> {}

impl<S> PartialOrd for SearchNode<'_, S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for SearchNode<'_, S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // equal f is resolved in insertion order
        self.cost
            .cmp(&other.cost)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

#[derive(Debug)]
pub(crate) enum Popped<'a, S> {
    Open(SearchNode<'a, S>),
    /// The state was pushed again with a lower `dist` after this entry.
    Stale(SearchNode<'a, S>),
}

/// Min-priority queue of search nodes with lazy deletion.
///
/// Decreasing a key means pushing the state again. `open` remembers the best `dist`
/// each queued state was pushed with, so superseded entries are recognized when popped
/// and a state counts as queued exactly until its best entry comes out.
#[derive(Debug)]
pub(crate) struct Frontier<'a, S> {
    heap: BinaryHeap<Reverse<SearchNode<'a, S>>>,
    open: FnvHashMap<&'a S, Cost>,
}

impl<'a, S: Eq + Hash> Frontier<'a, S> {
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            open: FnvHashMap::default(),
        }
    }

    pub(crate) fn push(&mut self, node: SearchNode<'a, S>) {
        self.open.insert(node.state, node.dist);
        self.heap.push(Reverse(node));
    }

    pub(crate) fn pop(&mut self) -> Option<Popped<'a, S>> {
        let Reverse(node) = self.heap.pop()?;
        if self.open.get(node.state) == Some(&node.dist) {
            self.open.remove(node.state);
            Some(Popped::Open(node))
        } else {
            Some(Popped::Stale(node))
        }
    }

    pub(crate) fn contains(&self, state: &S) -> bool {
        self.open.contains_key(state)
    }

    /// Number of distinct queued states.
    pub(crate) fn len(&self) -> usize {
        self.open.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_state<'a>(popped: Option<Popped<'a, &'static str>>) -> (&'a str, Cost) {
        match popped {
            Some(Popped::Open(node)) => (*node.state, node.dist),
            other => panic!("expected an open node, got {:?}", other),
        }
    }

    #[test]
    fn frontier_orders_by_cost_then_insertion() {
        let (a, b, c) = ("a", "b", "c");
        let mut frontier = Frontier::new();
        frontier.push(SearchNode::new(&a, 5, 0, 1, 0));
        frontier.push(SearchNode::new(&b, 1, 4, 1, 1));
        frontier.push(SearchNode::new(&c, 2, 0, 1, 2));
        assert_eq!(frontier.len(), 3);

        assert_eq!(open_state(frontier.pop()), ("c", 2));
        // a and b both have f = 5, a was pushed first
        assert_eq!(open_state(frontier.pop()), ("a", 5));
        assert_eq!(open_state(frontier.pop()), ("b", 1));
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn frontier_skips_superseded_entries() {
        let a = "a";
        let mut frontier = Frontier::new();
        frontier.push(SearchNode::new(&a, 10, 0, 1, 0));
        frontier.push(SearchNode::new(&a, 3, 0, 2, 1));
        assert!(frontier.contains(&a));
        assert_eq!(frontier.len(), 1);

        assert_eq!(open_state(frontier.pop()), ("a", 3));
        assert!(!frontier.contains(&a));
        match frontier.pop() {
            Some(Popped::Stale(node)) => assert_eq!(node.dist, 10),
            other => panic!("expected a stale node, got {:?}", other),
        }
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn stats_by_depth() {
        let a = 0u8;
        let mut stats = Stats::new();
        assert!(stats.add_created(&SearchNode::new(&a, 0, 0, 0, 0)));
        assert!(stats.add_created(&SearchNode::new(&a, 0, 0, 2, 1)));
        assert!(!stats.add_created(&SearchNode::new(&a, 0, 0, 1, 2)));
        assert!(stats.add_unique_visited(&SearchNode::new(&a, 0, 0, 0, 0)));
        assert!(stats.add_reached_duplicate(&SearchNode::new(&a, 0, 0, 2, 1)));

        assert_eq!(stats.total_created(), 3);
        assert_eq!(stats.total_unique_visited(), 1);
        assert_eq!(stats.total_reached_duplicates(), 1);

        let table = stats.to_string();
        assert!(table.contains("States created total: 3"));
        assert!(table.contains("Created but not reached total: 1"));
        assert!(table.contains("Unknown (not reached)"));
    }
}
