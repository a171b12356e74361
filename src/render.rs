//! Render boundary: what the game hands to a display each frame.

use crate::piece::{ActivePiece, PieceKind};
use crate::playfield::{Cell, Grid, HEIGHT, WIDTH};
use anyhow::Result;

/// Drawing capabilities the game loop needs from a presentation layer.
pub trait Renderer {
    fn draw_grid(&mut self, grid: &Grid);
    /// Drawn with the same rotation transform used for collision.
    fn draw_active_piece(&mut self, piece: &ActivePiece);
    /// Drawn at rotation 0 in the preview box.
    fn draw_next_piece(&mut self, kind: PieceKind);
    fn draw_score(&mut self, score: u32);
    fn draw_lines_cleared(&mut self, lines: u32);
    /// Push everything drawn since the last call to the display.
    fn present(&mut self) -> Result<()>;
}

/// One frame's worth of drawable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub grid: Grid,
    pub piece: Option<ActivePiece>,
    pub next: Option<PieceKind>,
    pub score: u32,
    pub lines: u32,
    /// Number of frames presented so far.
    pub frames: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            grid: [[Cell::Empty; WIDTH]; HEIGHT],
            piece: None,
            next: None,
            score: 0,
            lines: 0,
            frames: 0,
        }
    }
}

impl Scene {
    /// Locked cells with the falling piece drawn on top. Blocks above the
    /// field or outside the walls are not shown.
    pub fn composed(&self) -> Grid {
        let mut grid = self.grid;
        if let Some(piece) = self.piece {
            for (x, y) in piece.blocks() {
                if (0..WIDTH as i32).contains(&x) && (0..HEIGHT as i32).contains(&y) {
                    grid[y as usize][x as usize] = Cell::Filled;
                }
            }
        }
        grid
    }
}

impl Renderer for Scene {
    fn draw_grid(&mut self, grid: &Grid) {
        self.grid = *grid;
    }

    fn draw_active_piece(&mut self, piece: &ActivePiece) {
        self.piece = Some(*piece);
    }

    fn draw_next_piece(&mut self, kind: PieceKind) {
        self.next = Some(kind);
    }

    fn draw_score(&mut self, score: u32) {
        self.score = score;
    }

    fn draw_lines_cleared(&mut self, lines: u32) {
        self.lines = lines;
    }

    fn present(&mut self) -> Result<()> {
        self.frames += 1;
        Ok(())
    }
}
