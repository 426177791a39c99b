use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{bail, Context};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

use crate::draw::{Canvas, Rgb, BACKGROUND_COLOR, BORDER_COLOR};
use crate::grid::{Cell, Field};

type TermInt = u16;

// Each cell is two columns wide so it looks roughly square
const CELL_WIDTH: TermInt = 2;
const CELL_GLYPH: &str = "██";
const EMPTY_GLYPH: &str = "  ";

/// Owns the terminal while the game runs. The cell canvas is double
/// buffered: drawing only touches `pending`, and `present` writes the cells
/// that differ from what is on screen.
pub struct TermManager {
    stdout: Stdout,
    field: Field,
    top_left: (TermInt, TermInt),
    shown: Vec<Option<Rgb>>,
    pending: Vec<Option<Rgb>>,
    force_redraw: bool,
    active: bool,
}

impl TermManager {
    pub fn new(field: Field) -> anyhow::Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;

        let needed_width = field.width() as TermInt * CELL_WIDTH + 2;
        let needed_height = field.height() as TermInt + 3;
        if width < needed_width || height < needed_height {
            bail!(
                "terminal is {}x{}, the game needs at least {}x{}",
                width, height, needed_width, needed_height
            );
        }

        let top_left = ((width - needed_width) / 2, (height - needed_height) / 2);
        let cells = vec![None; field.cell_count()];

        Ok(TermManager {
            stdout: stdout(),
            field,
            top_left,
            shown: cells.clone(),
            pending: cells,
            force_redraw: true,
            active: false,
        })
    }

    pub fn setup(&mut self) -> anyhow::Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        self.active = true;
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        execute!(
            self.stdout,
            cursor::Hide,
            cursor::DisableBlinking,
            style::SetBackgroundColor(color(BACKGROUND_COLOR)),
            terminal::Clear(ClearType::All)
        )
        .context("Error preparing the screen")?;
        Ok(())
    }

    pub fn restore(&mut self) -> anyhow::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode().context("Error resetting raw mode")?;
        execute!(
            self.stdout,
            style::ResetColor,
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        )
        .context("Error leaving alt screen")?;
        Ok(())
    }

    /// Drains every pending key press without blocking.
    pub fn read_key_events_queue(&self) -> anyhow::Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn draw_borders(&mut self) -> anyhow::Result<()> {
        let (left, top) = self.top_left;
        let width = self.field.width() as TermInt * CELL_WIDTH + 2;
        let height = self.field.height() as TermInt + 2;
        let (end_x, end_y) = (left + width - 1, top + height - 1);

        queue!(self.stdout, style::SetForegroundColor(color(BORDER_COLOR)))?;

        for x in left..=end_x {
            let ch = if x == left || x == end_x {'+'} else {'-'};
            self.print_at((x, top), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in top + 1..end_y {
            self.print_at((left, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        self.flush()
    }

    /// Writes `line` just below the field, padded to the field width.
    pub fn show_status(&mut self, line: &str) -> anyhow::Result<()> {
        let width = self.field.width() as usize * CELL_WIDTH as usize + 2;
        let y = self.top_left.1 + self.field.height() as TermInt + 2;
        let padded = format!("{line: <width$}", line = line, width = width);

        queue!(
            self.stdout,
            cursor::MoveTo(self.top_left.0, y),
            style::SetForegroundColor(color(BORDER_COLOR)),
            style::Print(padded)
        )?;
        self.flush()
    }

    /// Writes the changed cells to the terminal.
    pub fn present(&mut self) -> anyhow::Result<()> {
        queue!(self.stdout, style::SetBackgroundColor(color(BACKGROUND_COLOR)))?;

        for idx in 0..self.pending.len() {
            let next = self.pending[idx];
            if !self.force_redraw && next == self.shown[idx] {
                continue;
            }

            let pos = cell_origin(self.top_left, cell_at(&self.field, idx));
            match next {
                Some(rgb) => queue!(
                    self.stdout,
                    cursor::MoveTo(pos.0, pos.1),
                    style::SetForegroundColor(color(rgb)),
                    style::Print(CELL_GLYPH)
                )?,
                None => queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(EMPTY_GLYPH))?,
            }
            self.shown[idx] = next;
        }

        self.force_redraw = false;
        self.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at(&mut self, pos: (TermInt, TermInt), ch: char) -> anyhow::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.stdout.flush().context("Error flushing")
    }
}

impl Canvas for TermManager {
    fn fill_cell(&mut self, cell: Cell, rgb: Rgb) {
        if let Some(idx) = cell_index(&self.field, cell) {
            self.pending[idx] = Some(rgb);
        }
    }

    fn clear_cell(&mut self, cell: Cell) {
        if let Some(idx) = cell_index(&self.field, cell) {
            self.pending[idx] = None;
        }
    }

    fn fill_background(&mut self) {
        self.pending.iter_mut().for_each(|c| *c = None);
        self.force_redraw = true;
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

fn color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}

/// Terminal position of the left column of `cell`, inside the frame whose
/// corner is at `top_left`.
fn cell_origin(top_left: (TermInt, TermInt), cell: Cell) -> (TermInt, TermInt) {
    let (left, top) = top_left;
    (left + 1 + cell.x as TermInt * CELL_WIDTH, top + 1 + cell.y as TermInt)
}

fn cell_index(field: &Field, cell: Cell) -> Option<usize> {
    if field.contains(cell) {
        Some(cell.y as usize * field.width() as usize + cell.x as usize)
    } else {
        None
    }
}

fn cell_at(field: &Field, idx: usize) -> Cell {
    Cell::new(idx as i32 % field.width(), idx as i32 / field.width())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: Field = Field::new(32, 24);

    #[test]
    fn cells_are_two_columns_wide_inside_the_frame() {
        assert_eq!(cell_origin((0, 0), Cell::new(0, 0)), (1, 1));
        assert_eq!(cell_origin((0, 0), Cell::new(1, 0)), (3, 1));
        assert_eq!(cell_origin((7, 2), Cell::new(31, 23)), (7 + 1 + 62, 2 + 1 + 23));
    }

    #[test]
    fn index_is_row_major() {
        assert_eq!(cell_index(&FIELD, Cell::new(0, 0)), Some(0));
        assert_eq!(cell_index(&FIELD, Cell::new(5, 0)), Some(5));
        assert_eq!(cell_index(&FIELD, Cell::new(0, 1)), Some(32));
        assert_eq!(cell_index(&FIELD, Cell::new(31, 23)), Some(767));
    }

    #[test]
    fn off_field_cells_have_no_index() {
        assert_eq!(cell_index(&FIELD, Cell::new(32, 0)), None);
        assert_eq!(cell_index(&FIELD, Cell::new(0, -1)), None);
    }

    #[test]
    fn index_and_cell_agree() {
        for cell in FIELD.cells() {
            let idx = cell_index(&FIELD, cell).unwrap();
            assert_eq!(cell_at(&FIELD, idx), cell);
        }
    }
}
