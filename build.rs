use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Run git and return trimmed stdout, or None outside a checkout
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// A VERSION file overrides the manifest version for release tagging
fn version() -> String {
    fs::read_to_string(Path::new("VERSION"))
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string())
}

/// CI supplies GRILLE_BUILD_NUMBER; local builds count commits instead
fn build_number() -> String {
    env::var("GRILLE_BUILD_NUMBER")
        .ok()
        .filter(|n| n.parse::<u64>().is_ok())
        .or_else(|| git(&["rev-list", "--count", "HEAD"]))
        .unwrap_or_else(|| "0".to_string())
}

fn main() {
    let profile = match env::var("PROFILE").as_deref() {
        Ok("release") => "release",
        _ => "development",
    };
    let git_hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=GRILLE_VERSION={}", version());
    println!("cargo:rustc-env=GRILLE_BUILD={}", build_number());
    println!("cargo:rustc-env=GRILLE_PROFILE={}", profile);
    println!("cargo:rustc-env=GRILLE_GIT_HASH={}", git_hash);

    println!("cargo:rerun-if-changed=VERSION");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=GRILLE_BUILD_NUMBER");
    println!("cargo:rerun-if-env-changed=PROFILE");
}
