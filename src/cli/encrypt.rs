use crate::cli::render::{format_grid, format_positions};
use crate::config::{Direction, OverflowPolicy, SeedSource};
use crate::engine::{encrypt_with_policy, normalize};
use crate::error::{GrilleError, Result};
use crate::grid::{rotation_degrees, ROTATION_COUNT};
use crate::session::Workbench;
use crate::stencil::build;
use crate::validate::{validate_text, Severity};
use tracing::warn;

/// Options for the encrypt command
#[derive(Debug, Clone, Default)]
pub struct EncryptOptions {
    pub seed: SeedSource,
    pub overflow: OverflowPolicy,
    /// Print the grid after every rotation
    pub steps: bool,
}

/// Surface validator findings: errors abort, warnings are logged
pub(crate) fn check_text(text: &str, field: &'static str) -> Result<()> {
    for issue in validate_text(text, field) {
        match issue.severity() {
            Severity::Error => return Err(GrilleError::EmptyInput),
            Severity::Warning => warn!("{}", issue),
        }
    }
    if normalize(text).is_empty() {
        return Err(GrilleError::EmptyInput);
    }
    Ok(())
}

/// Encrypt plaintext and return the printable report
pub fn run_encrypt(plaintext: &str, options: &EncryptOptions) -> Result<String> {
    check_text(plaintext, "plaintext")?;
    let seed = options.seed.resolve()?;

    if !options.steps {
        let result = encrypt_with_policy(plaintext, &build(seed.cells()), options.overflow)?;
        if result.dropped_chars > 0 {
            warn!(dropped = result.dropped_chars, "letters beyond the grid were dropped");
        }
        return Ok(format!("{}\n", result.ciphertext));
    }

    let mut bench = Workbench::new(options.overflow);
    bench.set_seed(seed);
    bench.start(Direction::Encrypt, plaintext)?;

    let mut output = String::new();
    output.push_str(&format!("Seed: {}\n\n", seed));
    let session_total = bench.session(Direction::Encrypt).progress().total_chars;
    while !bench.session(Direction::Encrypt).is_complete() {
        let report = bench.advance(Direction::Encrypt)?;
        let progress = bench.session(Direction::Encrypt).progress();
        output.push_str(&format!(
            "Step {}/{}, rotation {}°: placed {} letters at {}\n",
            report.rotation_step + 1,
            ROTATION_COUNT,
            rotation_degrees(report.rotation_step),
            report.positions.len(),
            format_positions(&report.positions)
        ));
        output.push_str(&format!(
            "  {}/{} letters placed\n",
            progress.used_chars, session_total
        ));
        output.push_str(&format_grid(bench.session(Direction::Encrypt).grid()));
        output.push('\n');
    }

    let session = bench.session(Direction::Encrypt);
    if session.remaining() > 0 {
        warn!(dropped = session.remaining(), "letters beyond the grid were dropped");
    }
    output.push_str(&format!("Ciphertext: {}\n", session.output()));
    Ok(output)
}
