use crate::config::OverflowPolicy;
use crate::engine::text::normalize;
use crate::error::{GrilleError, Result};
use crate::grid::{Grid, Position, Stencil, CAPACITY, ROTATION_COUNT};
use crate::stencil::holes_at_rotation;
use std::collections::VecDeque;
use tracing::{trace, warn};

/// Outcome of writing through the stencil at one rotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptStep {
    pub rotation_step: usize,
    /// Cells written in this step, in fill order
    pub filled: Vec<Position>,
    /// Letters still waiting after this step
    pub remaining: usize,
    /// Grid after this step
    pub grid: Grid,
}

/// Result of a full encryption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encryption {
    pub ciphertext: String,
    pub grid: Grid,
    /// Letters actually placed
    pub used_chars: usize,
    /// Letters that did not fit
    pub dropped_chars: usize,
    pub steps: Vec<EncryptStep>,
}

/// Write the next letters through the holes of one rotation.
///
/// Holes are visited in row-major order; a hole is filled only if its cell
/// is still empty and letters remain. `chars` and `grid` belong to the
/// caller and carry the state between steps.
pub fn encrypt_step(
    chars: &mut VecDeque<char>,
    grid: &mut Grid,
    stencil: &Stencil,
    rotation_step: usize,
) -> EncryptStep {
    let mut filled = Vec::new();
    for pos in holes_at_rotation(stencil, rotation_step) {
        if !grid.is_empty_at(pos) {
            continue;
        }
        let Some(ch) = chars.pop_front() else {
            break;
        };
        grid.set(pos, ch);
        filled.push(pos);
    }
    trace!(
        rotation_step,
        filled = filled.len(),
        remaining = chars.len(),
        "encrypt step"
    );
    EncryptStep {
        rotation_step,
        filled,
        remaining: chars.len(),
        grid: *grid,
    }
}

/// Encrypt by running `encrypt_step` for rotations 0 through 3.
///
/// Letters beyond the grid capacity are dropped; `used_chars` tells how
/// many made it in.
pub fn encrypt(plaintext: &str, stencil: &Stencil) -> Encryption {
    let mut chars: VecDeque<char> = normalize(plaintext).chars().collect();
    let total = chars.len();
    let mut grid = Grid::new();

    let steps: Vec<EncryptStep> = (0..ROTATION_COUNT)
        .map(|k| encrypt_step(&mut chars, &mut grid, stencil, k))
        .collect();

    let dropped_chars = chars.len();
    if dropped_chars > 0 {
        warn!(total, dropped = dropped_chars, "plaintext exceeds grid capacity, dropping overflow");
    }

    Encryption {
        ciphertext: grid.read_row_major(),
        grid,
        used_chars: total - dropped_chars,
        dropped_chars,
        steps,
    }
}

/// Like `encrypt`, but refuses plaintext longer than the grid
pub fn encrypt_strict(plaintext: &str, stencil: &Stencil) -> Result<Encryption> {
    let len = normalize(plaintext).len();
    if len > CAPACITY {
        return Err(GrilleError::CapacityExceeded { len, max: CAPACITY });
    }
    Ok(encrypt(plaintext, stencil))
}

/// Encrypt according to the configured overflow policy
pub fn encrypt_with_policy(
    plaintext: &str,
    stencil: &Stencil,
    policy: OverflowPolicy,
) -> Result<Encryption> {
    match policy {
        OverflowPolicy::Reject => encrypt_strict(plaintext, stencil),
        OverflowPolicy::Truncate => Ok(encrypt(plaintext, stencil)),
    }
}
