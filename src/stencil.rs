//! Stencil construction and the hole positions visible at each rotation.

use crate::error::Result;
use crate::grid::{
    rotate, Position, Stencil, BASE_SIZE, CAPACITY, GRILLE_SIZE, QUADRANT_OFFSETS,
    ROTATION_COUNT,
};
use crate::seed::{RawSeed, SeedMatrix};
use tracing::debug;

/// Derive the static 6×6 stencil from a 3×3 seed.
///
/// For rotation k the seed is turned k times and every cell equal to k+1
/// becomes a hole in quadrant k. The seed is not validated here: values
/// outside 1..=4 simply never produce holes.
pub fn build(seed: &[[u8; BASE_SIZE]; BASE_SIZE]) -> Stencil {
    let mut holes = [[false; GRILLE_SIZE]; GRILLE_SIZE];

    for (k, &(row_offset, col_offset)) in QUADRANT_OFFSETS.iter().enumerate() {
        let rotated = rotate(seed, k);
        for (r, row) in rotated.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value as usize == k + 1 {
                    holes[row_offset + r][col_offset + c] = true;
                }
            }
        }
    }

    Stencil::from_holes(holes)
}

/// Validate a raw seed and build its stencil in one go
pub fn generate(raw: &RawSeed) -> Result<(SeedMatrix, Stencil)> {
    let seed = SeedMatrix::from_raw(raw)?;
    let stencil = build(seed.cells());
    debug!(seed = %seed, holes = stencil.hole_count(), "stencil generated");
    Ok((seed, stencil))
}

/// Turn the stencil 90° clockwise: a hole at (r, c) moves to (c, 5-r)
pub fn rotate_stencil_90(stencil: &Stencil) -> Stencil {
    Stencil::from_holes(rotate(stencil.holes(), 1))
}

/// Hole coordinates after `rotation_step` clockwise turns, row-major.
///
/// This is the canonical order in which letters are written and read.
pub fn holes_at_rotation(stencil: &Stencil, rotation_step: usize) -> Vec<Position> {
    let mut current = *stencil;
    for _ in 0..rotation_step % ROTATION_COUNT {
        current = rotate_stencil_90(&current);
    }
    current.positions()
}

/// Cells in the order encryption writes them: the holes of rotation 0
/// row-major, then rotation 1, and so on. A cell exposed again at a later
/// rotation keeps its first place.
pub fn fill_order(stencil: &Stencil) -> Vec<Position> {
    let mut seen = [[false; GRILLE_SIZE]; GRILLE_SIZE];
    let mut order = Vec::with_capacity(CAPACITY);
    for k in 0..ROTATION_COUNT {
        for pos in holes_at_rotation(stencil, k) {
            if !seen[pos.row][pos.col] {
                seen[pos.row][pos.col] = true;
                order.push(pos);
            }
        }
    }
    order
}

/// Number of holes exposed at each of the four rotations
pub fn hole_counts(stencil: &Stencil) -> [usize; ROTATION_COUNT] {
    let mut counts = [0usize; ROTATION_COUNT];
    for (k, count) in counts.iter_mut().enumerate() {
        *count = holes_at_rotation(stencil, k).len();
    }
    counts
}

/// True when the four rotations together expose every cell exactly once
pub fn covers_grid_exactly(stencil: &Stencil) -> bool {
    let mut seen = [[0u8; GRILLE_SIZE]; GRILLE_SIZE];
    for k in 0..ROTATION_COUNT {
        for pos in holes_at_rotation(stencil, k) {
            seen[pos.row][pos.col] += 1;
        }
    }
    seen.iter().flatten().all(|&n| n == 1)
        && hole_counts(stencil).iter().sum::<usize>() == CAPACITY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::DEFAULT_SEED;

    #[test]
    fn test_build_default_seed_quadrants() {
        let stencil = build(&DEFAULT_SEED);
        // Quadrant 0 holds the unrotated 1s: (0,2) and (1,0)
        assert!(stencil.is_hole(Position::new(0, 2)));
        assert!(stencil.is_hole(Position::new(1, 0)));
        // Every seed cell lands in exactly one quadrant
        assert_eq!(stencil.hole_count(), 9);
    }

    #[test]
    fn test_build_places_each_rotation_in_its_quadrant() {
        let stencil = build(&[[1, 2, 3], [4, 1, 2], [3, 4, 1]]);
        let counts: Vec<usize> = QUADRANT_OFFSETS
            .iter()
            .map(|&(ro, co)| {
                (0..BASE_SIZE)
                    .flat_map(|r| (0..BASE_SIZE).map(move |c| (r, c)))
                    .filter(|&(r, c)| stencil.is_hole(Position::new(ro + r, co + c)))
                    .count()
            })
            .collect();
        // Occurrences of 1, 2, 3 and 4 in the seed
        assert_eq!(counts, vec![3, 2, 2, 2]);
    }

    #[test]
    fn test_out_of_range_values_make_no_holes() {
        let stencil = build(&[[0, 5, 9], [0, 0, 0], [7, 7, 7]]);
        assert_eq!(stencil.hole_count(), 0);
    }

    #[test]
    fn test_rotate_stencil_maps_cell() {
        let mut holes = [[false; GRILLE_SIZE]; GRILLE_SIZE];
        holes[0][0] = true;
        holes[2][4] = true;
        let rotated = rotate_stencil_90(&Stencil::from_holes(holes));
        assert_eq!(rotated.positions(), vec![Position::new(0, 5), Position::new(4, 3)]);
    }

    #[test]
    fn test_holes_at_rotation_wraps() {
        let stencil = build(&DEFAULT_SEED);
        assert_eq!(holes_at_rotation(&stencil, 0), stencil.positions());
        assert_eq!(holes_at_rotation(&stencil, 4), holes_at_rotation(&stencil, 0));
        assert_eq!(holes_at_rotation(&stencil, 6), holes_at_rotation(&stencil, 2));
    }

    #[test]
    fn test_default_stencil_covers_grid() {
        let stencil = build(&DEFAULT_SEED);
        assert_eq!(hole_counts(&stencil), [9, 9, 9, 9]);
        assert!(covers_grid_exactly(&stencil));
    }

    #[test]
    fn test_fill_order_starts_with_first_rotation() {
        let stencil = build(&DEFAULT_SEED);
        let order = fill_order(&stencil);
        assert_eq!(order.len(), CAPACITY);
        assert_eq!(&order[..9], holes_at_rotation(&stencil, 0).as_slice());
        assert_eq!(&order[27..], holes_at_rotation(&stencil, 3).as_slice());
    }

    #[test]
    fn test_generate_rejects_incomplete_seed() {
        let raw: RawSeed = [[Some(1); 3]; 3];
        assert!(generate(&raw).is_err());
    }
}
