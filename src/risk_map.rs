use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Config;
use crate::data::{Pos, DIRECTIONS};
use crate::solver::{self, Cost, Edge, SearchSpace, SolverErr, SolverOk};
use crate::vec2d::Vec2d;
use crate::Solve;

/// A cell of the (possibly tiled) map. `risk` is derived from `pos`,
/// it is stored only so neighbors don't need to recompute it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub pos: Pos,
    pub risk: u8,
}

/// A grid of risk digits, optionally repeated `tiles` times in both directions.
/// Every repetition to the right or down adds 1 to each digit, wrapping from 9 back to 1.
#[derive(Clone, PartialEq, Eq)]
pub struct RiskMap {
    grid: Vec2d<u8>,
    tiles: u32,
}

impl RiskMap {
    pub(crate) fn new(grid: Vec2d<u8>) -> Self {
        RiskMap { grid, tiles: 1 }
    }

    /// The same base grid repeated `tiles` x `tiles` times.
    ///
    /// `None` for zero tiles or when the tiled size or its path costs don't fit in a `Cost`.
    pub fn tiled(&self, tiles: u32) -> Option<Self> {
        if tiles == 0 {
            return None;
        }
        let rows = self.grid.rows().checked_mul(tiles)?;
        let cols = self.grid.cols().checked_mul(tiles)?;
        rows.checked_add(cols)?.checked_mul(9)?;
        Some(RiskMap {
            grid: self.grid.clone(),
            tiles,
        })
    }

    pub fn tiles(&self) -> u32 {
        self.tiles
    }

    pub fn rows(&self) -> u32 {
        self.grid.rows() * self.tiles
    }

    pub fn cols(&self) -> u32 {
        self.grid.cols() * self.tiles
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.r < self.rows() && pos.c < self.cols()
    }

    /// Risk of entering `pos`, always in `1..=9`.
    pub fn risk_at(&self, pos: Pos) -> u8 {
        debug_assert!(self.contains(pos));

        let tile_row = pos.r / self.grid.rows();
        let tile_col = pos.c / self.grid.cols();
        let base = Pos::new(pos.r % self.grid.rows(), pos.c % self.grid.cols());
        let adjusted = u32::from(self.grid[base]) + tile_row + tile_col;
        ((adjusted - 1) % 9 + 1) as u8
    }

    pub fn cell(&self, pos: Pos) -> Cell {
        Cell {
            pos,
            risk: self.risk_at(pos),
        }
    }

    pub fn start(&self) -> Cell {
        self.cell(Pos::new(0, 0))
    }

    pub fn goal(&self) -> Cell {
        self.cell(Pos::new(self.rows() - 1, self.cols() - 1))
    }

    /// Orthogonal neighbors inside the bounds, there is no wrapping around the edges.
    pub fn neighbors(&self, cell: &Cell) -> Vec<Cell> {
        DIRECTIONS
            .iter()
            .filter_map(|&dir| cell.pos.step(dir))
            .filter(|&pos| self.contains(pos))
            .map(|pos| self.cell(pos))
            .collect()
    }

    /// Sum of the risks entered along `path`, the starting cell is never entered.
    pub fn path_risk(path: &[Cell]) -> Cost {
        path.iter().skip(1).map(|cell| Cost::from(cell.risk)).sum()
    }

    pub fn format_path<'a>(&'a self, path: &'a [Cell]) -> PathFormatter<'a> {
        PathFormatter::new(self, path)
    }
}

impl SearchSpace for RiskMap {
    type State = Cell;

    fn expand(&self, cell: &Cell, edges: &mut Vec<Edge<Cell>>) {
        for next in self.neighbors(cell) {
            edges.push(Edge::new(next, Cost::from(next.risk)));
        }
    }

    /// Every step costs at least 1.
    fn heuristic(&self, cell: &Cell) -> Cost {
        cell.pos.dist(self.goal().pos)
    }

    fn solved(&self, cell: &Cell) -> bool {
        cell.pos == self.goal().pos
    }
}

impl Solve for RiskMap {
    type State = Cell;

    fn solve(&self, config: &Config, print_status: bool) -> Result<SolverOk<Cell>, SolverErr> {
        debug!(
            "Solving {}x{} risk map ({} tile(s))",
            self.rows(),
            self.cols(),
            self.tiles
        );
        solver::search(self, &self.start(), &config.search, print_status)
    }
}

impl Display for RiskMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows() {
            for c in 0..self.cols() {
                write!(f, "{}", self.risk_at(Pos::new(r, c)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for RiskMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "tiles: {}", self.tiles)?;
        write!(f, "{:?}", self.grid)
    }
}

/// Renders the map with only the cells of a path visible.
pub struct PathFormatter<'a> {
    map: &'a RiskMap,
    path: &'a [Cell],
}

impl<'a> PathFormatter<'a> {
    fn new(map: &'a RiskMap, path: &'a [Cell]) -> Self {
        Self { map, path }
    }
}

impl Display for PathFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut on_path = Vec2d::new(&vec![
            vec![false; self.map.cols() as usize];
            self.map.rows() as usize
        ]);
        for cell in self.path {
            on_path[cell.pos] = true;
        }

        for pos in on_path.positions() {
            if on_path[pos] {
                write!(f, "{}", self.map.risk_at(pos))?;
            } else {
                write!(f, ".")?;
            }
            if pos.c == on_path.cols() - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl Debug for PathFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
