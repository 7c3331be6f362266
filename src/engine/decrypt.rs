use crate::engine::text::normalize;
use crate::grid::{Grid, Position, Stencil, ROTATION_COUNT};
use crate::stencil::{fill_order, holes_at_rotation};
use tracing::trace;

/// Outcome of reading through the stencil at one rotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptStep {
    pub rotation_step: usize,
    /// Every hole visible at this rotation, row-major
    pub holes: Vec<Position>,
    /// Letters read through those holes; empty cells contribute nothing
    pub chars: String,
}

/// Result of a full decryption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decryption {
    pub plaintext: String,
    pub grid: Grid,
    pub steps: Vec<DecryptStep>,
}

/// Lay normalized ciphertext into a grid row by row.
///
/// A ciphertext of n letters only occupies the n cells an encryption of
/// that length fills, so a short text skips the cells left empty. A full
/// 36-letter text covers every cell. Letters past 36 are ignored.
pub fn load_ciphertext(ciphertext: &str, stencil: &Stencil) -> Grid {
    let letters: Vec<char> = normalize(ciphertext).chars().collect();
    let mut cells = fill_order(stencil);
    cells.truncate(letters.len());
    cells.sort();

    let mut grid = Grid::new();
    for (pos, ch) in cells.into_iter().zip(letters) {
        grid.set(pos, ch);
    }
    grid
}

/// Read the letters visible through the holes of one rotation
pub fn decrypt_step(grid: &Grid, stencil: &Stencil, rotation_step: usize) -> DecryptStep {
    let holes = holes_at_rotation(stencil, rotation_step);
    let chars: String = holes.iter().filter_map(|&pos| grid.get(pos)).collect();
    trace!(rotation_step, read = chars.len(), "decrypt step");
    DecryptStep {
        rotation_step,
        holes,
        chars,
    }
}

/// Decrypt by reading all four rotations in order.
///
/// Always performs exactly four steps, whatever the ciphertext length.
pub fn decrypt(ciphertext: &str, stencil: &Stencil) -> Decryption {
    let grid = load_ciphertext(ciphertext, stencil);
    let steps: Vec<DecryptStep> = (0..ROTATION_COUNT)
        .map(|k| decrypt_step(&grid, stencil, k))
        .collect();
    let plaintext = steps.iter().map(|s| s.chars.as_str()).collect();

    Decryption {
        plaintext,
        grid,
        steps,
    }
}
