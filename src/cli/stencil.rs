use crate::cli::render::{format_positions, format_seed, format_stencil};
use crate::config::SeedSource;
use crate::error::Result;
use crate::grid::rotation_degrees;
use crate::stencil::{build, covers_grid_exactly, hole_counts, holes_at_rotation};

/// Describe the stencil a seed produces and the holes of every rotation
pub fn show_stencil(source: &SeedSource) -> Result<String> {
    let seed = source.resolve()?;
    let stencil = build(seed.cells());
    let counts = hole_counts(&stencil);

    let mut output = String::new();
    output.push_str("Grille Stencil\n");
    output.push_str("==============\n\n");
    output.push_str(&format!("Seed: {}\n", seed));
    output.push_str(&format_seed(&seed));
    output.push('\n');

    for (k, count) in counts.iter().enumerate() {
        output.push_str(&format!(
            "Rotation {}° ({} holes): {}\n",
            rotation_degrees(k),
            count,
            format_positions(&holes_at_rotation(&stencil, k))
        ));
        output.push_str(&format_stencil(&stencil, k));
        output.push('\n');
    }

    output.push_str(&format!(
        "Total holes across rotations: {}\n",
        counts.iter().sum::<usize>()
    ));
    output.push_str(&format!(
        "Full coverage: {}\n",
        if covers_grid_exactly(&stencil) { "yes" } else { "no" }
    ));
    Ok(output)
}
