use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Index, IndexMut};

use crate::data::Pos;

#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Vec2d<T> {
    data: Vec<T>,
    rows: u32,
    cols: u32,
}

impl<T: Copy> Vec2d<T> {
    /// All rows must have the same length, the parser guarantees it.
    pub(crate) fn new(grid: &[Vec<T>]) -> Self {
        assert!(!grid.is_empty() && !grid[0].is_empty());

        let cols = grid[0].len();
        let mut data = Vec::with_capacity(grid.len() * cols);
        for row in grid {
            assert_eq!(row.len(), cols);
            data.extend_from_slice(row);
        }
        Vec2d {
            data,
            rows: grid.len() as u32,
            cols: cols as u32,
        }
    }
}

impl<T> Vec2d<T> {
    pub(crate) fn rows(&self) -> u32 {
        self.rows
    }

    pub(crate) fn cols(&self) -> u32 {
        self.cols
    }

    pub(crate) fn positions(&self) -> impl Iterator<Item = Pos> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| Pos::new(r, c)))
    }

    fn offset(&self, pos: Pos) -> usize {
        pos.r as usize * self.cols as usize + pos.c as usize
    }
}

impl<T: Display> Display for Vec2d<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols as usize) {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: Display> Debug for Vec2d<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl<T> Index<Pos> for Vec2d<T> {
    type Output = T;

    fn index(&self, pos: Pos) -> &Self::Output {
        let index = self.offset(pos);
        &self.data[index]
    }
}

impl<T> IndexMut<Pos> for Vec2d<T> {
    fn index_mut(&mut self, pos: Pos) -> &mut Self::Output {
        let index = self.offset(pos);
        &mut self.data[index]
    }
}
