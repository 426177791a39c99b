use crate::snake::Direction;

/// A grid-aligned cell, in whole cells (not pixels).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }
}

/// The playing field. Edges wrap around, there are no walls.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Field {
    width: i32,
    height: i32,
}

impl Field {
    pub const fn new(width: u32, height: u32) -> Self {
        Field { width: width as i32, height: height as i32 }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell::new(cell.x.rem_euclid(self.width), cell.y.rem_euclid(self.height))
    }

    /// The neighbouring cell in `dir`, wrapped onto the field.
    pub fn step(&self, from: Cell, dir: Direction) -> Cell {
        let (dx, dy) = dir.offset();
        self.wrap(Cell::new(from.x + dx, from.y + dy))
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;

    #[test]
    fn wraps_both_edges() {
        let field = Field::new(32, 24);
        assert_eq!(field.step(Cell::new(31, 5), Right), Cell::new(0, 5));
        assert_eq!(field.step(Cell::new(0, 5), Left), Cell::new(31, 5));
        assert_eq!(field.step(Cell::new(7, 0), Up), Cell::new(7, 23));
        assert_eq!(field.step(Cell::new(7, 23), Down), Cell::new(7, 0));
    }

    #[test]
    fn center_and_count() {
        let field = Field::new(32, 24);
        assert_eq!(field.center(), Cell::new(16, 12));
        assert_eq!(field.cell_count(), 768);
        assert_eq!(field.cells().count(), 768);
        assert!(field.cells().all(|c| field.contains(c)));
    }
}
