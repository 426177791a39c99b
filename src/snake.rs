use std::collections::VecDeque;

use rand::{seq::SliceRandom, Rng};

use crate::config::ResetPolicy;
use crate::grid::{Cell, Field};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn reverse(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Direction {
        *Self::ALL.choose(rng).unwrap_or(&Right)
    }
}

/// Result of a single move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub new_head: Cell,
    /// Cells that are no longer occupied after the move, tail first.
    pub vacated: Vec<Cell>,
}

pub struct Snake {
    // Head at the front
    body: VecDeque<Cell>,
    target_len: usize,
    direction: Direction,
    next_direction: Option<Direction>,
}

impl Snake {
    pub fn new(pos: Cell, direction: Direction) -> Self {
        Snake {
            body: VecDeque::from(vec![pos]),
            target_len: 1,
            direction,
            next_direction: None,
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    /// Buffers a heading for the next move. A request to turn straight back
    /// is dropped; the last accepted request before the move wins.
    pub fn request_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.reverse() {
            return false;
        }

        self.next_direction = Some(new_direction);
        true
    }

    pub fn apply_pending_direction(&mut self) {
        if let Some(dir) = self.next_direction.take() {
            self.direction = dir;
        }
    }

    /// Moves one cell along the current heading, wrapping at the field edges.
    /// Does not check the heading against reversal.
    pub fn advance(&mut self, field: &Field) -> Step {
        let new_head = field.step(self.head(), self.direction);
        self.body.push_front(new_head);

        let keep = self.target_len.min(self.body.len());
        let vacated = self.body.drain(keep..).rev().collect();

        Step { new_head, vacated }
    }

    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&c| c == head)
    }

    pub fn grow(&mut self) {
        self.target_len += 1;
    }

    /// Shrinks the target length back to 1 and takes the new heading.
    /// Returns the cells that stopped being occupied.
    pub fn reset(&mut self, start: Cell, direction: Direction, policy: ResetPolicy) -> Vec<Cell> {
        self.target_len = 1;
        self.direction = direction;
        self.next_direction = None;

        match policy {
            ResetPolicy::FullClear => {
                let vacated = self.body.drain(..).filter(|&c| c != start).collect();
                self.body.push_back(start);
                vacated
            }
            ResetPolicy::LengthOnly => vec![],
        }
    }
}
