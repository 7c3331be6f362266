use crate::grid::{Grid, Position, Stencil, GRILLE_SIZE};
use crate::seed::SeedMatrix;
use crate::stencil::holes_at_rotation;

/// Letters row by row, `.` for empty cells
pub fn format_grid(grid: &Grid) -> String {
    let mut output = String::new();
    for row in grid.rows() {
        let line: Vec<String> = row
            .iter()
            .map(|cell| cell.map(String::from).unwrap_or_else(|| ".".to_string()))
            .collect();
        output.push_str(&format!("  {}\n", line.join(" ")));
    }
    output
}

/// Stencil turned `rotation_step` times: `#` for holes, `.` for card
pub fn format_stencil(stencil: &Stencil, rotation_step: usize) -> String {
    let holes = holes_at_rotation(stencil, rotation_step);
    let mut output = String::new();
    for r in 0..GRILLE_SIZE {
        let line: Vec<&str> = (0..GRILLE_SIZE)
            .map(|c| if holes.contains(&Position::new(r, c)) { "#" } else { "." })
            .collect();
        output.push_str(&format!("  {}\n", line.join(" ")));
    }
    output
}

pub fn format_seed(seed: &SeedMatrix) -> String {
    let mut output = String::new();
    for row in seed.cells() {
        let line: Vec<String> = row.iter().map(u8::to_string).collect();
        output.push_str(&format!("  {}\n", line.join(" ")));
    }
    output
}

pub fn format_positions(positions: &[Position]) -> String {
    positions
        .iter()
        .map(Position::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
