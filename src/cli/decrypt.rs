use crate::cli::encrypt::check_text;
use crate::cli::render::format_grid;
use crate::config::{Direction, SeedSource};
use crate::engine::decrypt;
use crate::engine::normalized_len;
use crate::error::{GrilleError, Result};
use crate::grid::{rotation_degrees, CAPACITY, ROTATION_COUNT};
use crate::session::Workbench;
use crate::stencil::build;

/// Options for the decrypt command
#[derive(Debug, Clone, Default)]
pub struct DecryptOptions {
    pub seed: SeedSource,
    /// Print the letters read at every rotation
    pub steps: bool,
}

/// Decrypt ciphertext and return the printable report.
///
/// A ciphertext longer than the grid cannot come from `encrypt` and is
/// refused.
pub fn run_decrypt(ciphertext: &str, options: &DecryptOptions) -> Result<String> {
    check_text(ciphertext, "ciphertext")?;
    let len = normalized_len(ciphertext);
    if len > CAPACITY {
        return Err(GrilleError::CapacityExceeded { len, max: CAPACITY });
    }
    let seed = options.seed.resolve()?;

    if !options.steps {
        let result = decrypt(ciphertext, &build(seed.cells()));
        return Ok(format!("{}\n", result.plaintext));
    }

    let mut bench = Workbench::default();
    bench.set_seed(seed);
    bench.start(Direction::Decrypt, ciphertext)?;

    let mut output = String::new();
    output.push_str(&format!("Seed: {}\n\n", seed));
    output.push_str(&format_grid(bench.session(Direction::Decrypt).grid()));
    output.push('\n');
    while !bench.session(Direction::Decrypt).is_complete() {
        let report = bench.advance(Direction::Decrypt)?;
        let progress = bench.session(Direction::Decrypt).progress();
        output.push_str(&format!(
            "Step {}/{}, rotation {}°: read {:?} ({}/{} letters)\n",
            report.rotation_step + 1,
            ROTATION_COUNT,
            rotation_degrees(report.rotation_step),
            report.chars,
            progress.used_chars,
            progress.total_chars
        ));
    }

    output.push_str(&format!(
        "\nPlaintext: {}\n",
        bench.session(Direction::Decrypt).output()
    ));
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CIPHERTEXT: &str = "TDHOAAPYHPEHUNFYASMFNROHOLTIIINLMGYT";

    #[test]
    fn test_run_decrypt_default() {
        let out = run_decrypt(CIPHERTEXT, &DecryptOptions::default()).unwrap();
        assert_eq!(out, "HAPPYHOLIDAYSFROMTHEHUNTINGTONFAMILY\n");
    }

    #[test]
    fn test_run_decrypt_steps() {
        let options = DecryptOptions {
            steps: true,
            ..Default::default()
        };
        let out = run_decrypt(CIPHERTEXT, &options).unwrap();
        assert!(out.contains("Step 1/4, rotation 0°: read \"HAPPYHOLI\""));
        assert!(out.contains("Step 4/4, rotation 270°"));
        assert!(out.ends_with("Plaintext: HAPPYHOLIDAYSFROMTHEHUNTINGTONFAMILY\n"));
    }

    #[test]
    fn test_run_decrypt_rejects_empty() {
        assert!(matches!(
            run_decrypt("", &DecryptOptions::default()),
            Err(GrilleError::EmptyInput)
        ));
    }

    #[test]
    fn test_run_decrypt_rejects_overlong_ciphertext() {
        let long = "A".repeat(40);
        for steps in [false, true] {
            let options = DecryptOptions {
                steps,
                ..Default::default()
            };
            assert!(matches!(
                run_decrypt(&long, &options),
                Err(GrilleError::CapacityExceeded { len: 40, max: 36 })
            ));
        }
    }

    #[test]
    fn test_run_decrypt_short_message() {
        let out = run_decrypt("DHAAPYPYSHOLI", &DecryptOptions::default()).unwrap();
        assert_eq!(out, "HAPPYHOLIDAYS\n");
    }
}
