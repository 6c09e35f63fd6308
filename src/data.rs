use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: u32,
    pub c: u32,
}

impl Pos {
    pub fn new(r: u32, c: u32) -> Pos {
        Pos { r, c }
    }

    /// Manhattan distance
    pub fn dist(self, other: Pos) -> u32 {
        diff(self.r, other.r) + diff(self.c, other.c)
    }

    /// The neighboring position in `dir`, `None` when it would leave the first quadrant.
    /// Upper bounds are the caller's business.
    pub(crate) fn step(self, dir: Dir) -> Option<Pos> {
        let pos = match dir {
            Dir::Up => Pos::new(self.r.checked_sub(1)?, self.c),
            Dir::Right => Pos::new(self.r, self.c.checked_add(1)?),
            Dir::Down => Pos::new(self.r.checked_add(1)?, self.c),
            Dir::Left => Pos::new(self.r, self.c.checked_sub(1)?),
        };
        Some(pos)
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.r, self.c)
    }
}

fn diff(a: u32, b: u32) -> u32 {
    if a > b {
        a - b
    } else {
        b - a
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

pub(crate) const DIRECTIONS: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dir::Up => write!(f, "u"),
            Dir::Right => write!(f, "r"),
            Dir::Down => write!(f, "d"),
            Dir::Left => write!(f, "l"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping() {
        let pos = Pos::new(0, 0);
        assert_eq!(pos.step(Dir::Up), None);
        assert_eq!(pos.step(Dir::Left), None);
        assert_eq!(pos.step(Dir::Right), Some(Pos::new(0, 1)));
        assert_eq!(pos.step(Dir::Down), Some(Pos::new(1, 0)));
    }

    #[test]
    fn manhattan() {
        assert_eq!(Pos::new(2, 7).dist(Pos::new(5, 1)), 9);
        assert_eq!(Pos::new(5, 1).dist(Pos::new(2, 7)), 9);
        assert_eq!(Pos::new(3, 3).dist(Pos::new(3, 3)), 0);
    }
}
