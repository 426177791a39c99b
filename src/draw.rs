use crate::food::Food;
use crate::grid::Cell;
use crate::snake::Snake;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BACKGROUND_COLOR: Rgb = Rgb(0, 0, 0);
pub const BORDER_COLOR: Rgb = Rgb(93, 216, 228);
pub const APPLE_COLOR: Rgb = Rgb(255, 0, 0);
pub const SNAKE_COLOR: Rgb = Rgb(0, 255, 0);

/// Something cells can be painted on.
pub trait Canvas {
    fn fill_cell(&mut self, cell: Cell, color: Rgb);

    fn clear_cell(&mut self, cell: Cell);

    fn fill_background(&mut self);
}

pub trait Drawable {
    fn draw<C: Canvas>(&self, canvas: &mut C);
}

impl Drawable for Snake {
    fn draw<C: Canvas>(&self, canvas: &mut C) {
        for cell in self.cells() {
            canvas.fill_cell(cell, SNAKE_COLOR);
        }
    }
}

impl Drawable for Food {
    fn draw<C: Canvas>(&self, canvas: &mut C) {
        canvas.fill_cell(self.cell(), APPLE_COLOR);
    }
}
