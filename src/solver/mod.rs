pub(crate) mod a_star;
mod backtracking;
#[cfg(feature = "graph")]
mod graph;

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::Hash;
use std::marker::PhantomData;
use std::time::Instant;

use fnv::FnvHashMap;
use typed_arena::Arena;

use crate::config::{Mode, SearchConfig};

use self::a_star::{Frontier, Popped, SearchNode};
pub use self::a_star::Stats;
use self::backtracking::{backtrack_path, enumerate_paths};
#[cfg(feature = "graph")]
use self::graph::Graph;

pub type Cost = u32;

/// How often (in expanded nodes) the wall clock is checked when there's a time budget.
const CLOCK_CHECK_INTERVAL: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErr {
    SearchExhausted,
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::SearchExhausted => write!(
                f,
                "Search exhausted - no goal state reached before the frontier emptied or the budget ran out"
            ),
        }
    }
}

impl Error for SolverErr {}

/// A transition produced by the neighbor generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<S> {
    pub state: S,
    pub cost: Cost,
}

impl<S> Edge<S> {
    pub fn new(state: S, cost: Cost) -> Self {
        Edge { state, cost }
    }
}

/// A lazily generated state space.
///
/// States are compared and hashed structurally, two equal states are the same node.
pub trait SearchSpace {
    type State: Clone + Eq + Hash + Debug;

    /// Pushes every legal transition from `state` together with its (non-negative) cost.
    fn expand(&self, state: &Self::State, edges: &mut Vec<Edge<Self::State>>);

    /// Must never overestimate the remaining cost. Zero turns the search into Dijkstra.
    fn heuristic(&self, _state: &Self::State) -> Cost {
        0
    }

    fn solved(&self, state: &Self::State) -> bool;
}

/// A `SearchSpace` made of four closures: neighbors, edge cost, heuristic and goal.
pub struct FnSpace<S, N, C, H, G> {
    neighbors: N,
    cost: C,
    heuristic: H,
    goal: G,
    _state: PhantomData<fn(&S)>,
}

impl<S, N, C, H, G> FnSpace<S, N, C, H, G>
where
    N: Fn(&S) -> Vec<S>,
    C: Fn(&S, &S) -> Cost,
    H: Fn(&S) -> Cost,
    G: Fn(&S) -> bool,
{
    pub fn new(neighbors: N, cost: C, heuristic: H, goal: G) -> Self {
        FnSpace {
            neighbors,
            cost,
            heuristic,
            goal,
            _state: PhantomData,
        }
    }
}

impl<S, N, C, H, G> Debug for FnSpace<S, N, C, H, G> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FnSpace")
    }
}

impl<S, N, C, H, G> SearchSpace for FnSpace<S, N, C, H, G>
where
    S: Clone + Eq + Hash + Debug,
    N: Fn(&S) -> Vec<S>,
    C: Fn(&S, &S) -> Cost,
    H: Fn(&S) -> Cost,
    G: Fn(&S) -> bool,
{
    type State = S;

    fn expand(&self, state: &S, edges: &mut Vec<Edge<S>>) {
        for next in (self.neighbors)(state) {
            let cost = (self.cost)(state, &next);
            edges.push(Edge::new(next, cost));
        }
    }

    fn heuristic(&self, state: &S) -> Cost {
        (self.heuristic)(state)
    }

    fn solved(&self, state: &S) -> bool {
        (self.goal)(state)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<S> {
    /// From start to goal, both included.
    pub states: Vec<S>,
    pub cost: Cost,
}

impl<S> Path<S> {
    fn new(states: Vec<S>, cost: Cost) -> Self {
        Path { states, cost }
    }

    pub fn move_cnt(&self) -> usize {
        self.states.len() - 1
    }
}

pub struct SolverOk<S> {
    /// Never empty, the first path is always optimal.
    pub paths: Vec<Path<S>>,
    pub stats: Stats,
    pub(crate) mode: Mode,
}

impl<S> SolverOk<S> {
    fn new(paths: Vec<Path<S>>, stats: Stats, mode: Mode) -> Self {
        debug_assert!(!paths.is_empty());
        Self { paths, stats, mode }
    }

    pub fn best(&self) -> &Path<S> {
        &self.paths[0]
    }

    pub fn cost(&self) -> Cost {
        self.best().cost
    }
}

impl<S> Debug for SolverOk<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: cost {}, {} moves, {} path(s)",
            self.mode,
            self.cost(),
            self.best().move_cnt(),
            self.paths.len()
        )?;
        write!(f, "{:?}", self.stats)
    }
}

/// Runs A* from `start` and returns the optimal path
/// (or, in `Mode::Enumerate`, all paths within the allowed slack).
pub fn search<Space: SearchSpace>(
    space: &Space,
    start: &Space::State,
    config: &SearchConfig,
    print_status: bool,
) -> Result<SolverOk<Space::State>, SolverErr> {
    debug!("Search called, mode: {}", config.mode);

    // every discovered state lives here for the duration of the search,
    // the tables and the frontier only hold references
    let arena = Arena::new();
    let mut search = Search::new(space, &arena, *config);
    let result = search.run(start.clone(), print_status);

    #[cfg(feature = "graph")]
    search.draw();

    result
}

struct Search<'a, Space: SearchSpace + 'a>
where
    Space::State: 'a,
{
    space: &'a Space,
    arena: &'a Arena<Space::State>,
    config: SearchConfig,
    frontier: Frontier<'a, Space::State>,
    dists: FnvHashMap<&'a Space::State, Cost>,
    prevs: FnvHashMap<&'a Space::State, &'a Space::State>,
    /// Every relaxed edge into a state with its cost, only kept when enumerating.
    incoming: FnvHashMap<&'a Space::State, Vec<(&'a Space::State, Cost)>>,
    stats: Stats,
    seq: usize,
    #[cfg(feature = "graph")]
    graph: Graph,
}

impl<'a, Space: SearchSpace + 'a> Search<'a, Space>
where
    Space::State: 'a,
{
    fn new(space: &'a Space, arena: &'a Arena<Space::State>, config: SearchConfig) -> Self {
        Search {
            space,
            arena,
            config,
            frontier: Frontier::new(),
            dists: FnvHashMap::default(),
            prevs: FnvHashMap::default(),
            incoming: FnvHashMap::default(),
            stats: Stats::new(),
            seq: 0,
            #[cfg(feature = "graph")]
            graph: Graph::new(),
        }
    }

    fn enumerating(&self) -> bool {
        match self.config.mode {
            Mode::FirstOptimal => false,
            Mode::Enumerate { .. } => true,
        }
    }

    fn run(
        &mut self,
        start: Space::State,
        print_status: bool,
    ) -> Result<SolverOk<Space::State>, SolverErr> {
        let started = Instant::now();
        let (slack, max_paths) = match self.config.mode {
            Mode::FirstOptimal => (0, 1),
            Mode::Enumerate { slack, max_paths } => (slack, max_paths.max(1)),
        };

        let start: &'a Space::State = self.arena.alloc(start);
        self.dists.insert(start, 0);
        self.queue(start, 0, 0, None);

        let mut goals: Vec<SearchNode<'a, Space::State>> = Vec::new();
        let mut best_goal: Option<Cost> = None;
        let mut edges = Vec::new();

        while let Some(popped) = self.frontier.pop() {
            let cur_node = match popped {
                Popped::Open(node) => node,
                Popped::Stale(node) => {
                    self.stats.add_reached_duplicate(&node);
                    #[cfg(feature = "graph")]
                    self.graph.mark_duplicate(node.seq);
                    continue;
                }
            };

            if let Some(best) = best_goal {
                // f is a lower bound so nothing left in the frontier can be within the slack
                if cur_node.cost > best + slack {
                    debug!("Cost cutoff reached at f = {}", cur_node.cost);
                    break;
                }
            }

            if self.stats.add_unique_visited(&cur_node) && print_status {
                println!("Visited new depth: {}", cur_node.depth);
                println!("{:?}", self.stats);
            }
            #[cfg(feature = "graph")]
            self.graph.mark_unique(cur_node.seq);

            if self.space.solved(cur_node.state) {
                if !self.enumerating() {
                    debug!(
                        "Solved with cost {}, {} states still queued, backtracking path",
                        cur_node.dist,
                        self.frontier.len()
                    );
                    let states = backtrack_path(&self.prevs, cur_node.state);
                    let path = Path::new(states, cur_node.dist);
                    return Ok(SolverOk::new(vec![path], self.stats.clone(), self.config.mode));
                }

                debug!("Reached a goal with cost {}", cur_node.dist);
                goals.retain(|goal| goal.state != cur_node.state);
                goals.push(cur_node);
                best_goal = Some(best_goal.map_or(cur_node.dist, |best| best.min(cur_node.dist)));
                continue;
            }

            if !self.within_budget(started) {
                info!(
                    "Budget exceeded after expanding {} states",
                    self.stats.total_expanded()
                );
                return Err(SolverErr::SearchExhausted);
            }
            self.stats.add_expanded();

            self.space.expand(cur_node.state, &mut edges);
            for edge in edges.drain(..) {
                self.relax(cur_node, edge);
            }
        }

        if goals.is_empty() {
            info!(
                "Frontier exhausted after expanding {} states",
                self.stats.total_expanded()
            );
            return Err(SolverErr::SearchExhausted);
        }

        debug!("Enumerating paths to {} goal state(s)", goals.len());
        goals.sort_by_key(|goal| goal.dist);
        let goal_states: Vec<_> = goals.iter().map(|goal| goal.state).collect();
        let max_cost = goals[0].dist + slack;
        let paths = enumerate_paths(
            &self.incoming,
            &self.dists,
            start,
            &goal_states,
            max_cost,
            max_paths,
        )
        .into_iter()
        .map(|(states, cost)| Path::new(states, cost))
        .collect();
        Ok(SolverOk::new(paths, self.stats.clone(), self.config.mode))
    }

    fn within_budget(&self, started: Instant) -> bool {
        let expanded = self.stats.total_expanded();
        if let Some(max) = self.config.budget.max_expanded {
            if expanded >= max {
                return false;
            }
        }
        if let Some(max) = self.config.budget.max_duration {
            if expanded % CLOCK_CHECK_INTERVAL == 0 && started.elapsed() > max {
                return false;
            }
        }
        true
    }

    fn relax(&mut self, cur_node: SearchNode<'a, Space::State>, edge: Edge<Space::State>) {
        let Edge { state, cost } = edge;
        let dist = cur_node.dist + cost;

        let known = self.dists.get_key_value(&state).map(|(&s, &d)| (s, d));
        let next: &'a Space::State = match known {
            Some((next, _)) => next,
            None => self.arena.alloc(state),
        };
        if self.enumerating() {
            // worse routes too, they can still end within the slack
            self.add_incoming(next, cur_node.state, cost);
        }

        if let Some((_, old_dist)) = known {
            if dist >= old_dist {
                return;
            }
            if self.frontier.contains(next) {
                trace!("Lowering queued state from {} to {}", old_dist, dist);
            }
        }
        self.dists.insert(next, dist);
        self.prevs.insert(next, cur_node.state);
        self.queue(next, dist, cur_node.depth + 1, Some(cur_node.seq));
    }

    fn add_incoming(&mut self, state: &'a Space::State, prev: &'a Space::State, cost: Cost) {
        let edges = self.incoming.entry(state).or_insert_with(Vec::new);
        match edges.iter_mut().find(|edge| edge.0 == prev) {
            Some(edge) => edge.1 = edge.1.min(cost),
            None => edges.push((prev, cost)),
        }
    }

    #[cfg_attr(not(feature = "graph"), allow(unused_variables))]
    fn queue(&mut self, state: &'a Space::State, dist: Cost, depth: u32, prev_seq: Option<usize>) {
        let h = self.space.heuristic(state);
        let node = SearchNode::new(state, dist, h, depth, self.seq);
        self.seq += 1;
        self.stats.add_created(&node);
        #[cfg(feature = "graph")]
        self.graph.add(&node, prev_seq);
        self.frontier.push(node);
    }

    #[cfg(feature = "graph")]
    fn draw(&self) {
        if let Err(err) = self.graph.draw_states() {
            warn!("Failed to draw the state space: {}", err);
        }
    }
}
