//! Game state: playfield, falling piece, next piece, score.

use crate::input::Command;
use crate::piece::{ActivePiece, PieceKind};
use crate::playfield::{Playfield, WIDTH};
use crate::render::Renderer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Points per cleared line.
pub const LINE_BONUS: u32 = 10;

/// Spawn anchor: horizontally centred, one row above the visible field.
const SPAWN_X: i32 = WIDTH as i32 / 2 - 1;
const SPAWN_Y: i32 = -1;

/// The stack reached above the field. Terminal; carries the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Game Over! No space for new piece. Final Score: {score}")]
pub struct GameOver {
    pub score: u32,
}

/// Game state: playfield, current piece, next piece, score.
#[derive(Debug)]
pub struct GameState {
    pub playfield: Playfield,
    pub piece: ActivePiece,
    pub next: PieceKind,
    pub score: u32,
    pub lines_cleared: u32,
    rng: StdRng,
}

impl GameState {
    /// New game. `seed` makes the piece sequence reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self::with_playfield(Playfield::new(), rng)
    }

    /// Start on a prepared field; the first piece is spawned immediately.
    pub fn with_playfield(playfield: Playfield, mut rng: StdRng) -> Self {
        let next = random_kind(&mut rng);
        let mut state = Self {
            playfield,
            piece: spawn_piece(next),
            next,
            score: 0,
            lines_cleared: 0,
            rng,
        };
        state.spawn();
        state
    }

    /// Promote the next piece to the falling piece and draw a fresh next piece.
    /// Overlap at the spawn point is not checked here; it surfaces when the
    /// piece locks above the field.
    pub fn spawn(&mut self) {
        self.piece = spawn_piece(self.next);
        self.next = random_kind(&mut self.rng);
    }

    /// Turn clockwise if the result fits; otherwise leave the piece alone.
    pub fn rotate(&mut self) {
        let candidate = self.piece.rotated();
        if !self.playfield.collides(&candidate) {
            self.piece = candidate;
        }
    }

    /// Shift the piece. A blocked downward step lands it: lock, clear, spawn.
    /// Blocked sideways steps are ignored.
    pub fn move_piece(&mut self, dx: i32, dy: i32) -> Result<(), GameOver> {
        let candidate = self.piece.shifted(dx, dy);
        if !self.playfield.collides(&candidate) {
            self.piece = candidate;
        } else if dy == 1 {
            self.land()?;
        }
        Ok(())
    }

    /// One automatic step down.
    pub fn gravity(&mut self) -> Result<(), GameOver> {
        self.move_piece(0, 1)
    }

    /// Apply a player command. `Quit` is handled by the loop and is a no-op here.
    pub fn apply(&mut self, command: Command) -> Result<(), GameOver> {
        match command {
            Command::MoveLeft => self.move_piece(-1, 0),
            Command::MoveRight => self.move_piece(1, 0),
            Command::SoftDrop => self.move_piece(0, 1),
            Command::Rotate => {
                self.rotate();
                Ok(())
            }
            Command::Quit => Ok(()),
        }
    }

    fn land(&mut self) -> Result<(), GameOver> {
        self.playfield
            .lock(&self.piece)
            .map_err(|_| GameOver { score: self.score })?;
        let cleared = self.playfield.clear_full_lines();
        self.lines_cleared = self.lines_cleared.saturating_add(cleared);
        self.score = self.score.saturating_add(cleared.saturating_mul(LINE_BONUS));
        self.spawn();
        Ok(())
    }

    /// Hand the current frame to a renderer.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.draw_grid(self.playfield.rows());
        renderer.draw_active_piece(&self.piece);
        renderer.draw_next_piece(self.next);
        renderer.draw_score(self.score);
        renderer.draw_lines_cleared(self.lines_cleared);
    }
}

fn spawn_piece(kind: PieceKind) -> ActivePiece {
    ActivePiece {
        kind,
        x: SPAWN_X,
        y: SPAWN_Y,
        rotation: 0,
    }
}

fn random_kind(rng: &mut StdRng) -> PieceKind {
    PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())]
}
