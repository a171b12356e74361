//! Piece catalog, rotation about each piece's local origin, and the falling piece.

/// The seven piece kinds, indexed 0..=6 in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Square,
    Line,
    T,
    L,
    J,
    S,
    Z,
}

impl PieceKind {
    pub const ALL: [Self; 7] = [
        Self::Square,
        Self::Line,
        Self::T,
        Self::L,
        Self::J,
        Self::S,
        Self::Z,
    ];

    /// 4 cells relative to the local origin (0,0) at rotation 0; each (dx, dy).
    ///
    /// The origin is the pivot for every rotation, so pieces whose origin is
    /// off-centre swing around a corner rather than their middle.
    pub fn cells(&self) -> &'static [(i8, i8); 4] {
        match self {
            Self::Square => &[(0, 0), (1, 0), (0, 1), (1, 1)],
            Self::Line => &[(0, 0), (1, 0), (2, 0), (3, 0)],
            Self::T => &[(1, 0), (0, 1), (1, 1), (2, 1)],
            Self::L => &[(0, 0), (1, 0), (2, 0), (2, 1)],
            Self::J => &[(0, 1), (1, 1), (2, 1), (2, 0)],
            Self::S => &[(1, 0), (2, 0), (0, 1), (1, 1)],
            Self::Z => &[(0, 0), (1, 0), (1, 1), (2, 1)],
        }
    }
}

/// Rotate `(x, y)` by 90° clockwise `rotation` times: `(x, y) -> (-y, x)`.
/// No recentring; only `rotation % 4` matters.
pub fn rotate_offset(x: i32, y: i32, rotation: u8) -> (i32, i32) {
    match rotation % 4 {
        0 => (x, y),
        1 => (-y, x),
        2 => (-x, -y),
        _ => (y, -x),
    }
}

/// The falling piece: kind, anchor (may sit above the field) and rotation (0..4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub x: i32,
    pub y: i32,
    pub rotation: u8,
}

impl ActivePiece {
    /// Absolute (column, row) of each of the 4 blocks.
    pub fn blocks(&self) -> [(i32, i32); 4] {
        let mut out = [(0i32, 0i32); 4];
        for (i, &(dx, dy)) in self.kind.cells().iter().enumerate() {
            let (rx, ry) = rotate_offset(i32::from(dx), i32::from(dy), self.rotation);
            out[i] = (self.x + rx, self.y + ry);
        }
        out
    }

    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece turned one step clockwise.
    pub fn rotated(&self) -> Self {
        Self {
            rotation: (self.rotation + 1) % 4,
            ..*self
        }
    }
}
