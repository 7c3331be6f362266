//! Grid geometry shared by the stencil builder and the cipher engine.

use std::fmt;

/// Side length of the cipher grid and of the stencil
pub const GRILLE_SIZE: usize = 6;

/// Side length of the seed matrix (one stencil quadrant)
pub const BASE_SIZE: usize = 3;

/// Number of 90° turns in a full revolution
pub const ROTATION_COUNT: usize = 4;

/// Letters a single grid can hold
pub const CAPACITY: usize = GRILLE_SIZE * GRILLE_SIZE;

/// Quadrant origin used by rotation k when building the stencil:
/// top-left, top-right, bottom-right, bottom-left
pub const QUADRANT_OFFSETS: [(usize, usize); ROTATION_COUNT] = [
    (0, 0),
    (0, BASE_SIZE),
    (BASE_SIZE, BASE_SIZE),
    (BASE_SIZE, 0),
];

/// Rotate a square matrix 90° clockwise `times` times.
///
/// The entry at (r, c) moves to (c, N-1-r). Four turns are the identity,
/// so only `times % 4` turns are actually performed.
pub fn rotate<T: Copy, const N: usize>(matrix: &[[T; N]; N], times: usize) -> [[T; N]; N] {
    let mut current = *matrix;
    for _ in 0..times % ROTATION_COUNT {
        let mut next = current;
        for (r, row) in current.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                next[c][N - 1 - r] = value;
            }
        }
        current = next;
    }
    current
}

/// Label for a rotation step, in degrees
pub fn rotation_degrees(rotation_step: usize) -> usize {
    (rotation_step % ROTATION_COUNT) * 90
}

/// A cell coordinate on the 6×6 grid.
///
/// Ordering is row-major, which is also the canonical fill/read order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Static 6×6 hole mask derived once from a seed (`true` = hole).
///
/// The stencil never changes after construction; rotations are simulated
/// by rotating copies of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stencil {
    holes: [[bool; GRILLE_SIZE]; GRILLE_SIZE],
}

impl Stencil {
    pub fn from_holes(holes: [[bool; GRILLE_SIZE]; GRILLE_SIZE]) -> Self {
        Self { holes }
    }

    pub fn holes(&self) -> &[[bool; GRILLE_SIZE]; GRILLE_SIZE] {
        &self.holes
    }

    pub fn is_hole(&self, pos: Position) -> bool {
        self.holes[pos.row][pos.col]
    }

    /// Number of holes in the static (unrotated) mask
    pub fn hole_count(&self) -> usize {
        self.holes.iter().flatten().filter(|&&h| h).count()
    }

    /// Hole coordinates of the unrotated mask in row-major order
    pub fn positions(&self) -> Vec<Position> {
        let mut out = Vec::with_capacity(self.hole_count());
        for (r, row) in self.holes.iter().enumerate() {
            for (c, &hole) in row.iter().enumerate() {
                if hole {
                    out.push(Position::new(r, c));
                }
            }
        }
        out
    }
}

/// 6×6 character grid; `None` marks an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Grid {
    cells: [[Option<char>; GRILLE_SIZE]; GRILLE_SIZE],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: Position) -> Option<char> {
        self.cells[pos.row][pos.col]
    }

    pub fn set(&mut self, pos: Position, ch: char) {
        self.cells[pos.row][pos.col] = Some(ch);
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.cells[pos.row][pos.col].is_none()
    }

    pub fn rows(&self) -> &[[Option<char>; GRILLE_SIZE]; GRILLE_SIZE] {
        &self.cells
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Concatenate filled cells row by row, skipping empty ones
    pub fn read_row_major(&self) -> String {
        self.cells.iter().flatten().flatten().collect()
    }
}
