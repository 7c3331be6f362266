//! Seed matrices: the 3×3 input a stencil is derived from.
//!
//! Cell (r, c) holding value v means "this quadrant position is a hole in
//! rotation v-1". A seed is only usable when every cell lies in 1..=4 and
//! all four values occur at least once.

use crate::error::{GrilleError, Result};
use crate::grid::{BASE_SIZE, ROTATION_COUNT};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SEED_VALUE_MIN: u8 = 1;
pub const SEED_VALUE_MAX: u8 = 4;

/// Seed used when the caller supplies none
pub const DEFAULT_SEED: [[u8; BASE_SIZE]; BASE_SIZE] = [[2, 4, 1], [1, 4, 3], [3, 2, 2]];

/// Unvalidated seed as entered by a user. `None` marks a missing or
/// non-numeric cell.
pub type RawSeed = [[Option<i64>; BASE_SIZE]; BASE_SIZE];

/// Reasons a seed cannot be turned into a usable stencil
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedError {
    /// Cell is absent, non-numeric, or outside 1..=4
    InvalidValue { row: usize, col: usize },
    /// At least one of 1..=4 never appears
    MissingValues { missing: Vec<u8> },
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&GrilleError::from(self.clone()), f)
    }
}

impl From<SeedError> for GrilleError {
    fn from(err: SeedError) -> Self {
        match err {
            SeedError::InvalidValue { row, col } => GrilleError::InvalidSeedValue { row, col },
            SeedError::MissingValues { missing } => GrilleError::IncompleteSeed { missing },
        }
    }
}

/// Check a raw seed. Returns at most one error, the most relevant one:
/// range problems are reported before completeness problems.
pub fn validate_seed(seed: &RawSeed) -> Vec<SeedError> {
    for (row, cells) in seed.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let in_range = matches!(
                cell,
                Some(v) if (SEED_VALUE_MIN as i64..=SEED_VALUE_MAX as i64).contains(v)
            );
            if !in_range {
                return vec![SeedError::InvalidValue { row, col }];
            }
        }
    }

    let missing: Vec<u8> = (SEED_VALUE_MIN..=SEED_VALUE_MAX)
        .filter(|v| !seed.iter().flatten().any(|cell| *cell == Some(*v as i64)))
        .collect();
    if !missing.is_empty() {
        return vec![SeedError::MissingValues { missing }];
    }

    Vec::new()
}

/// Parse seed text into a raw seed without validating values.
///
/// Rows are separated by `/`, `;` or newlines; cells by commas or
/// whitespace. A row written as three adjacent digits (`241`) and a single
/// nine-digit run (`241143322`) are accepted too. Cells that are not
/// integers become `None`.
pub fn parse_raw_seed(text: &str) -> Result<RawSeed> {
    let rows: Vec<Vec<&str>> = text
        .split(['/', ';', '\n'])
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .map(split_cells)
        .collect();

    let cells: Vec<&str> = match rows.as_slice() {
        [single] if single.len() == BASE_SIZE * BASE_SIZE => single.clone(),
        _ if rows.len() == BASE_SIZE && rows.iter().all(|r| r.len() == BASE_SIZE) => {
            rows.iter().flatten().copied().collect()
        }
        _ => {
            return Err(GrilleError::SeedFormat(format!(
                "expected {} rows of {} values, got {:?}",
                BASE_SIZE,
                BASE_SIZE,
                text.trim()
            )))
        }
    };

    let mut raw: RawSeed = [[None; BASE_SIZE]; BASE_SIZE];
    for (i, cell) in cells.iter().enumerate() {
        raw[i / BASE_SIZE][i % BASE_SIZE] = cell.parse().ok();
    }
    Ok(raw)
}

fn split_cells(row: &str) -> Vec<&str> {
    let tokens: Vec<&str> = row
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    // "241" style rows carry no separators
    if let [digits] = tokens[..] {
        if digits.len() > 1 && digits.chars().all(|c| c.is_ascii_digit()) {
            return (0..digits.len()).map(move |i| &digits[i..i + 1]).collect();
        }
    }
    tokens
}

/// A validated seed: every cell in 1..=4, all four values present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[[i64; 3]; 3]", into = "[[u8; 3]; 3]")]
pub struct SeedMatrix {
    cells: [[u8; BASE_SIZE]; BASE_SIZE],
}

impl SeedMatrix {
    /// Validate a raw seed, surfacing the first error
    pub fn from_raw(raw: &RawSeed) -> Result<Self> {
        if let Some(err) = validate_seed(raw).into_iter().next() {
            return Err(err.into());
        }
        let mut cells = [[0u8; BASE_SIZE]; BASE_SIZE];
        for (r, row) in raw.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                // Range already checked above
                cells[r][c] = cell.map(|v| v as u8).unwrap_or_default();
            }
        }
        Ok(Self { cells })
    }

    pub fn cells(&self) -> &[[u8; BASE_SIZE]; BASE_SIZE] {
        &self.cells
    }

    /// Random complete seed: each of 1..=4 placed once, the remaining
    /// cells drawn uniformly, then the whole layout shuffled
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut values: Vec<u8> = (SEED_VALUE_MIN..=SEED_VALUE_MAX).collect();
        while values.len() < BASE_SIZE * BASE_SIZE {
            values.push(rng.gen_range(SEED_VALUE_MIN..=SEED_VALUE_MAX));
        }
        values.shuffle(rng);

        let mut cells = [[0u8; BASE_SIZE]; BASE_SIZE];
        for (i, v) in values.into_iter().enumerate() {
            cells[i / BASE_SIZE][i % BASE_SIZE] = v;
        }
        Self { cells }
    }

    /// How many holes rotation k contributes (occurrences of value k+1)
    pub fn holes_per_rotation(&self) -> [usize; ROTATION_COUNT] {
        let mut counts = [0usize; ROTATION_COUNT];
        for &v in self.cells.iter().flatten() {
            counts[(v - SEED_VALUE_MIN) as usize] += 1;
        }
        counts
    }
}

impl Default for SeedMatrix {
    fn default() -> Self {
        Self { cells: DEFAULT_SEED }
    }
}

impl TryFrom<[[i64; BASE_SIZE]; BASE_SIZE]> for SeedMatrix {
    type Error = GrilleError;

    fn try_from(values: [[i64; BASE_SIZE]; BASE_SIZE]) -> Result<Self> {
        Self::from_raw(&values.map(|row| row.map(Some)))
    }
}

impl From<SeedMatrix> for [[u8; BASE_SIZE]; BASE_SIZE] {
    fn from(seed: SeedMatrix) -> Self {
        seed.cells
    }
}

impl FromStr for SeedMatrix {
    type Err = GrilleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_raw(&parse_raw_seed(s)?)
    }
}

impl fmt::Display for SeedMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .cells
            .iter()
            .map(|row| row.iter().map(u8::to_string).collect::<Vec<_>>().join(","))
            .collect();
        write!(f, "{}", rows.join("/"))
    }
}
