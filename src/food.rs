use rand::{seq::IteratorRandom, Rng};

use crate::grid::{Cell, Field};

pub struct Food {
    cell: Cell,
    previous: Option<Cell>,
}

impl Food {
    pub fn new(cell: Cell) -> Self {
        Food { cell, previous: None }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Where the food was before the last relocation, if it moved.
    pub fn previous(&self) -> Option<Cell> {
        self.previous
    }

    /// Moves the food to a random cell for which `occupied` is false.
    ///
    /// Samples uniformly up to `max_attempts` times, then picks uniformly
    /// among the remaining free cells. Returns `None` and leaves the food in
    /// place when the field is full.
    pub fn relocate<R, F>(&mut self, field: &Field, occupied: F, rng: &mut R, max_attempts: u32) -> Option<Cell>
    where
        R: Rng,
        F: Fn(Cell) -> bool,
    {
        let sampled = (0..max_attempts)
            .map(|_| Cell::new(rng.gen_range(0..field.width()), rng.gen_range(0..field.height())))
            .find(|&c| !occupied(c));

        let cell = sampled.or_else(|| field.cells().filter(|&c| !occupied(c)).choose(rng))?;

        if cell != self.cell {
            self.previous = Some(self.cell);
        }
        self.cell = cell;
        Some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    const FIELD: Field = Field::new(32, 24);

    #[test]
    fn never_lands_on_occupied_cells() {
        let mut rng = StdRng::seed_from_u64(42);
        let occupied: HashSet<Cell> = (0..32).map(|x| Cell::new(x, 10)).collect();
        let mut food = Food::new(Cell::new(0, 0));

        for _ in 0..500 {
            let cell = food.relocate(&FIELD, |c| occupied.contains(&c), &mut rng, 1000).unwrap();
            assert!(!occupied.contains(&cell));
            assert!(FIELD.contains(cell));
            assert_eq!(food.cell(), cell);
        }
    }

    #[test]
    fn falls_back_to_the_only_free_cell() {
        let mut rng = StdRng::seed_from_u64(1);
        let free = Cell::new(13, 7);
        let mut food = Food::new(Cell::new(0, 0));

        // One attempt is nearly certain to miss a single free cell out of 768
        let cell = food.relocate(&FIELD, |c| c != free, &mut rng, 1);
        assert_eq!(cell, Some(free));
        assert_eq!(food.previous(), Some(Cell::new(0, 0)));
    }

    #[test]
    fn full_field_leaves_food_in_place() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut food = Food::new(Cell::new(4, 4));

        assert_eq!(food.relocate(&FIELD, |_| true, &mut rng, 10), None);
        assert_eq!(food.cell(), Cell::new(4, 4));
        assert_eq!(food.previous(), None);
    }
}
