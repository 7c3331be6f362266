use crate::cli::render::{format_seed, format_stencil};
use crate::config::KeyFile;
use crate::error::Result;
use crate::seed::SeedMatrix;
use crate::stencil::build;
use rand::rngs::{OsRng, StdRng};
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;

/// Options for the keygen command
#[derive(Debug, Clone, Default)]
pub struct KeygenOptions {
    /// Reproducible generation; OS randomness when `None`
    pub rng_seed: Option<u64>,
    /// Where to write the key file, if anywhere
    pub output: Option<PathBuf>,
}

/// Draw a random complete seed and optionally save it as a key file
pub fn generate_key(options: &KeygenOptions) -> Result<SeedMatrix> {
    let seed = match options.rng_seed {
        Some(n) => SeedMatrix::random(&mut StdRng::seed_from_u64(n)),
        None => SeedMatrix::random(&mut OsRng),
    };

    if let Some(path) = &options.output {
        KeyFile::new(seed).save(path)?;
        info!(path = %path.display(), "key file written");
    }
    Ok(seed)
}

/// Run keygen and describe the result
pub fn show_keygen(options: &KeygenOptions) -> Result<String> {
    let seed = generate_key(options)?;
    let mut output = String::new();
    output.push_str(&format!("Seed: {}\n", seed));
    output.push_str(&format_seed(&seed));
    let per_rotation: Vec<String> = seed
        .holes_per_rotation()
        .iter()
        .map(usize::to_string)
        .collect();
    output.push_str(&format!("Holes per quadrant: {}\n", per_rotation.join(" ")));
    output.push_str("\nStencil:\n");
    output.push_str(&format_stencil(&build(seed.cells()), 0));
    if let Some(path) = &options.output {
        output.push_str(&format!("\nKey written to {}\n", path.display()));
    }
    Ok(output)
}
