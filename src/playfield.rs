//! Playfield: fixed 10x20 grid, collision, locking and line clearing.

use crate::piece::ActivePiece;
use thiserror::Error;

pub const WIDTH: usize = 10;
pub const HEIGHT: usize = 20;

/// Single cell: empty or occupied by a locked block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled,
}

/// grid[y][x] = cell. grid[0] is the top row.
pub type Grid = [[Cell; WIDTH]; HEIGHT];

const EMPTY_ROW: [Cell; WIDTH] = [Cell::Empty; WIDTH];

/// A piece was locked with at least one block above the visible field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("piece locked above the top of the playfield")]
pub struct StackOverflow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    rows: Grid,
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new()
    }
}

impl Playfield {
    pub fn new() -> Self {
        Self {
            rows: [EMPTY_ROW; HEIGHT],
        }
    }

    #[inline]
    pub fn rows(&self) -> &Grid {
        &self.rows
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if let Some(c) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *c = cell;
        }
    }

    /// Walls and floor block, as do filled cells. Rows above the field
    /// (y < 0) are open so pieces can spawn there.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return true;
        }
        y >= 0 && self.get(x as usize, y as usize) == Some(Cell::Filled)
    }

    /// True if any block of `piece` lands on a blocked cell.
    pub fn collides(&self, piece: &ActivePiece) -> bool {
        piece.blocks().iter().any(|&(x, y)| self.is_blocked(x, y))
    }

    /// Write the piece's blocks into the grid. Refuses (and writes nothing)
    /// when any block is above row 0.
    pub fn lock(&mut self, piece: &ActivePiece) -> Result<(), StackOverflow> {
        let blocks = piece.blocks();
        if blocks.iter().any(|&(_, y)| y < 0) {
            return Err(StackOverflow);
        }
        for (x, y) in blocks {
            self.set(x as usize, y as usize, Cell::Filled);
        }
        Ok(())
    }

    /// Remove every full row, bottom to top, dropping the rows above by one.
    /// Returns how many rows were removed.
    pub fn clear_full_lines(&mut self) -> u32 {
        let mut cleared = 0u32;
        let mut y = HEIGHT;
        while y > 0 {
            let row = y - 1;
            if self.rows[row].iter().all(|&c| c == Cell::Filled) {
                self.rows.copy_within(0..row, 1);
                self.rows[0] = EMPTY_ROW;
                cleared += 1;
                // Re-examine the same row: the one above has just moved into it.
                continue;
            }
            y -= 1;
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceKind;

    fn piece(kind: PieceKind, x: i32, y: i32, rotation: u8) -> ActivePiece {
        ActivePiece {
            kind,
            x,
            y,
            rotation,
        }
    }

    fn fill_row(field: &mut Playfield, y: usize) {
        for x in 0..WIDTH {
            field.set(x, y, Cell::Filled);
        }
    }

    #[test]
    fn test_bounds() {
        let field = Playfield::new();
        assert!(field.is_blocked(-1, 5));
        assert!(field.is_blocked(WIDTH as i32, 5));
        assert!(field.is_blocked(3, HEIGHT as i32));
        assert!(!field.is_blocked(0, -3));
        assert!(!field.is_blocked(WIDTH as i32 - 1, HEIGHT as i32 - 1));
        assert!(field.is_blocked(-1, -3));
    }

    #[test]
    fn test_filled_cell_blocks() {
        let mut field = Playfield::new();
        field.set(2, 7, Cell::Filled);
        assert!(field.is_blocked(2, 7));
        assert!(!field.is_blocked(3, 7));
    }

    #[test]
    fn test_collision_at_every_boundary() {
        let field = Playfield::new();
        for kind in PieceKind::ALL {
            for rotation in 0..4u8 {
                for x in -6..WIDTH as i32 + 6 {
                    for y in -6..HEIGHT as i32 + 6 {
                        let p = piece(kind, x, y, rotation);
                        let outside = p.blocks().iter().any(|&(bx, by)| {
                            bx < 0 || bx >= WIDTH as i32 || by >= HEIGHT as i32
                        });
                        assert_eq!(
                            field.collides(&p),
                            outside,
                            "{kind:?} rot {rotation} at ({x}, {y})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_lock_writes_four_cells() {
        let mut field = Playfield::new();
        field.lock(&piece(PieceKind::T, 3, 18, 0)).unwrap();
        let filled: Vec<(usize, usize)> = (0..HEIGHT)
            .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| field.get(x, y) == Some(Cell::Filled))
            .collect();
        assert_eq!(filled, vec![(4, 18), (3, 19), (4, 19), (5, 19)]);
    }

    #[test]
    fn test_lock_above_field_overflows_without_writing() {
        let mut field = Playfield::new();
        let before = field.clone();
        assert_eq!(
            field.lock(&piece(PieceKind::Square, 4, -1, 0)),
            Err(StackOverflow)
        );
        assert_eq!(field, before);
    }

    #[test]
    fn test_partial_rows_are_kept() {
        let mut field = Playfield::new();
        for x in 0..WIDTH - 1 {
            field.set(x, HEIGHT - 1, Cell::Filled);
        }
        let before = field.clone();
        assert_eq!(field.clear_full_lines(), 0);
        assert_eq!(field, before);
    }

    #[test]
    fn test_single_line_clear_shifts_rows_down() {
        let mut field = Playfield::new();
        fill_row(&mut field, HEIGHT - 1);
        field.set(0, HEIGHT - 2, Cell::Filled);
        field.set(6, HEIGHT - 3, Cell::Filled);
        field.set(9, 0, Cell::Filled);

        assert_eq!(field.clear_full_lines(), 1);
        assert_eq!(field.get(0, HEIGHT - 1), Some(Cell::Filled));
        assert_eq!(field.get(1, HEIGHT - 1), Some(Cell::Empty));
        assert_eq!(field.get(6, HEIGHT - 2), Some(Cell::Filled));
        assert_eq!(field.get(9, 1), Some(Cell::Filled));
        assert!(field.rows()[0].iter().all(|&c| c == Cell::Empty));
    }

    #[test]
    fn test_adjacent_full_lines_clear_in_one_pass() {
        let mut field = Playfield::new();
        fill_row(&mut field, HEIGHT - 1);
        fill_row(&mut field, HEIGHT - 2);
        field.set(3, HEIGHT - 3, Cell::Filled);

        assert_eq!(field.clear_full_lines(), 2);
        assert_eq!(field.get(3, HEIGHT - 1), Some(Cell::Filled));
        let filled = field
            .rows()
            .iter()
            .flatten()
            .filter(|&&c| c == Cell::Filled)
            .count();
        assert_eq!(filled, 1);
    }

    #[test]
    fn test_separated_full_lines_both_clear() {
        let mut field = Playfield::new();
        fill_row(&mut field, HEIGHT - 1);
        field.set(2, HEIGHT - 2, Cell::Filled);
        fill_row(&mut field, HEIGHT - 3);

        assert_eq!(field.clear_full_lines(), 2);
        assert_eq!(field.get(2, HEIGHT - 1), Some(Cell::Filled));
        assert!(field.rows()[..HEIGHT - 1]
            .iter()
            .flatten()
            .all(|&c| c == Cell::Empty));
    }
}
