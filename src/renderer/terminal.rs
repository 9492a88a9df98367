//! Drawing to a crossterm output stream

use std::io::{self, Write};

use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, queue, terminal};

use super::frame::{Glyph, compose_frame, hud_line};
use super::screens::{Line, Tone};
use crate::sim::{Grid, Snapshot};

/// Terminal columns per grid cell
pub const CELL_COLUMNS: u16 = 2;

const BACKGROUND: Color = Color::Rgb { r: 50, g: 50, b: 50 };
const SNAKE: Color = Color::Rgb { r: 34, g: 139, b: 34 };
const SNAKE_HEAD: Color = Color::Rgb { r: 60, g: 179, b: 60 };
const APPLE: Color = Color::Rgb { r: 220, g: 20, b: 60 };
const GOLD: Color = Color::Rgb { r: 255, g: 215, b: 0 };
const BOMB: Color = Color::Rgb { r: 105, g: 105, b: 105 };
const TEXT: Color = Color::White;

fn glyph_color(glyph: Glyph) -> Color {
    match glyph {
        Glyph::Empty => BACKGROUND,
        Glyph::SnakeHead => SNAKE_HEAD,
        Glyph::SnakeBody => SNAKE,
        Glyph::Food => APPLE,
        Glyph::GoldenApple => GOLD,
        Glyph::Bomb => BOMB,
    }
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Title => GOLD,
        Tone::Body => TEXT,
        Tone::Prompt => APPLE,
    }
}

/// Renders snapshots and screens; the first row is the HUD, the grid follows
pub struct TerminalRenderer<W: Write> {
    out: W,
    /// Width of the play area in terminal columns
    columns: u16,
    /// Height of the play area in terminal rows, HUD excluded
    rows: u16,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, grid: Grid) -> Self {
        let mut renderer = Self {
            out,
            columns: 0,
            rows: 0,
        };
        renderer.set_grid(grid);
        renderer
    }

    /// Follow a new play area size, e.g. after settings were reloaded
    pub fn set_grid(&mut self, grid: Grid) {
        self.columns = (grid.width as u16).saturating_mul(CELL_COLUMNS);
        self.rows = grid.height as u16;
    }

    /// Draw a full game frame
    pub fn draw_snapshot(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            ResetColor,
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(TEXT),
            Print(hud_line(snapshot)),
        )?;

        for (y, row) in compose_frame(snapshot).iter().enumerate() {
            queue!(self.out, cursor::MoveTo(0, y as u16 + 1))?;
            let mut current = None;
            for &glyph in row {
                let color = glyph_color(glyph);
                if current != Some(color) {
                    queue!(self.out, SetBackgroundColor(color))?;
                    current = Some(color);
                }
                queue!(self.out, Print("  "))?;
            }
        }

        queue!(self.out, ResetColor)?;
        self.out.flush()
    }

    /// Clear the play area and draw centered lines
    pub fn draw_screen(&mut self, lines: &[Line]) -> io::Result<()> {
        queue!(
            self.out,
            ResetColor,
            SetBackgroundColor(BACKGROUND),
            terminal::Clear(terminal::ClearType::All),
        )?;
        for y in 0..=self.rows {
            queue!(
                self.out,
                cursor::MoveTo(0, y),
                Print(" ".repeat(self.columns as usize))
            )?;
        }
        self.draw_lines(lines)
    }

    /// Draw centered lines over whatever is on screen
    pub fn draw_overlay(&mut self, lines: &[Line]) -> io::Result<()> {
        queue!(self.out, SetBackgroundColor(BACKGROUND))?;
        self.draw_lines(lines)
    }

    fn draw_lines(&mut self, lines: &[Line]) -> io::Result<()> {
        let top = (self.rows + 1).saturating_sub(lines.len() as u16) / 2;
        for (i, line) in lines.iter().enumerate() {
            let width = line.text.chars().count() as u16;
            let x = self.columns.saturating_sub(width) / 2;
            queue!(
                self.out,
                cursor::MoveTo(x, top + i as u16),
                SetForegroundColor(tone_color(line.tone)),
                Print(&line.text),
            )?;
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::screens::pause_screen;
    use crate::sim::GamePhase;
    use glam::IVec2;

    #[test]
    fn test_snapshot_output_contains_hud() {
        let snapshot = Snapshot {
            grid: Grid::new(5, 4),
            snake: vec![IVec2::new(2, 2)],
            food: Some(IVec2::new(0, 0)),
            golden_apple: None,
            bombs: Vec::new(),
            score: 12,
            speed: 12.0,
            phase: GamePhase::Running,
        };
        let mut renderer = TerminalRenderer::new(Vec::new(), snapshot.grid);
        renderer.draw_snapshot(&snapshot).unwrap();

        let text = String::from_utf8(renderer.out).unwrap();
        assert!(text.contains("Score: 12"));
        // 5x4 grid, two columns per cell
        assert!(text.matches("  ").count() >= 20);
    }

    #[test]
    fn test_screen_output_contains_lines() {
        let mut renderer = TerminalRenderer::new(Vec::new(), Grid::new(64, 36));
        renderer.draw_screen(&pause_screen()).unwrap();

        let text = String::from_utf8(renderer.out).unwrap();
        assert!(text.contains("Game Paused"));
        assert!(text.contains("Press Space to Resume or Esc to Exit"));
    }

    #[test]
    fn test_set_grid_resizes_play_area() {
        let mut renderer = TerminalRenderer::new(Vec::new(), Grid::new(64, 36));
        assert_eq!((renderer.columns, renderer.rows), (128, 36));

        renderer.set_grid(Grid::new(96, 54));
        assert_eq!((renderer.columns, renderer.rows), (192, 54));
    }
}
