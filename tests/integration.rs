use grille::config::{KeyFile, DEFAULT_PLAINTEXT};
use grille::engine::{decrypt, encrypt, encrypt_strict};
use grille::grid::{Position, CAPACITY};
use grille::seed::{parse_raw_seed, validate_seed, SeedError, DEFAULT_SEED};
use grille::stencil::build;
use grille::{Direction, GrilleError, OverflowPolicy, SeedMatrix, SessionState, Workbench};
use std::error::Error;
use tempfile::tempdir;

const GOLDEN_CIPHERTEXT: &str = "TDHOAAPYHPEHUNFYASMFNROHOLTIIINLMGYT";

#[test]
fn default_greeting_roundtrips_through_known_ciphertext() {
    let stencil = build(&DEFAULT_SEED);
    let sealed = encrypt(DEFAULT_PLAINTEXT, &stencil);
    assert_eq!(sealed.ciphertext, GOLDEN_CIPHERTEXT);
    assert_eq!(sealed.used_chars, CAPACITY);

    let opened = decrypt(&sealed.ciphertext, &stencil);
    assert_eq!(opened.plaintext, "HAPPYHOLIDAYSFROMTHEHUNTINGTONFAMILY");
}

#[test]
fn short_messages_roundtrip_without_padding() {
    let stencil = build(&DEFAULT_SEED);
    let sealed = encrypt("Happy holidays", &stencil);
    assert_eq!(sealed.ciphertext, "DHAAPYPYSHOLI");
    assert_eq!(decrypt(&sealed.ciphertext, &stencil).plaintext, "HAPPYHOLIDAYS");

    let odd = build(&[[3, 4, 3], [4, 2, 4], [4, 3, 1]]);
    let sealed = encrypt("Ca", &odd);
    assert_eq!(decrypt(&sealed.ciphertext, &odd).plaintext, "CA");
}

#[test]
fn wrong_seed_does_not_recover_plaintext() {
    let right = build(&DEFAULT_SEED);
    let wrong = build(&[[1, 2, 3], [4, 1, 2], [3, 4, 1]]);
    let sealed = encrypt(DEFAULT_PLAINTEXT, &right);
    let opened = decrypt(&sealed.ciphertext, &wrong);
    assert_ne!(opened.plaintext, "HAPPYHOLIDAYSFROMTHEHUNTINGTONFAMILY");
}

#[test]
fn seed_text_from_user_goes_through_validation() {
    let raw = parse_raw_seed("2 4 1 / 1 ? 3 / 3 2 2").expect("shape is fine");
    assert_eq!(
        validate_seed(&raw),
        vec![SeedError::InvalidValue { row: 1, col: 1 }]
    );

    let raw = parse_raw_seed("1 1 1 / 1 2 1 / 3 1 1").expect("shape is fine");
    assert_eq!(
        validate_seed(&raw),
        vec![SeedError::MissingValues { missing: vec![4] }]
    );
}

#[test]
fn workbench_drives_both_directions() -> Result<(), Box<dyn Error>> {
    let mut bench = Workbench::new(OverflowPolicy::Reject);
    let raw = parse_raw_seed("2,4,1/1,4,3/3,2,2")?;
    bench.generate_stencil(&raw)?;

    bench.start(Direction::Encrypt, DEFAULT_PLAINTEXT)?;
    let mut filled = Vec::new();
    while !bench.session(Direction::Encrypt).is_complete() {
        filled.extend(bench.advance(Direction::Encrypt)?.positions);
    }
    assert_eq!(filled.len(), CAPACITY);
    let ciphertext = bench.session(Direction::Encrypt).output();
    assert_eq!(ciphertext, GOLDEN_CIPHERTEXT);

    bench.start(Direction::Decrypt, &ciphertext)?;
    let first = bench.advance(Direction::Decrypt)?;
    assert_eq!(first.chars, "HAPPYHOLI");
    assert_eq!(first.positions[0], Position::new(0, 2));
    assert_eq!(bench.session(Direction::Decrypt).state(), SessionState::Filling(1));

    bench.reset();
    assert_eq!(bench.session(Direction::Decrypt).state(), SessionState::Idle);
    assert!(bench.stencil().is_some());
    Ok(())
}

#[test]
fn strict_encrypt_reports_capacity() {
    let stencil = build(&DEFAULT_SEED);
    let text = format!("{} and friends", DEFAULT_PLAINTEXT);
    match encrypt_strict(&text, &stencil) {
        Err(GrilleError::CapacityExceeded { len, max }) => {
            assert_eq!(len, 46);
            assert_eq!(max, CAPACITY);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn key_file_reproduces_stencil() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("key.json");
    let seed: SeedMatrix = "3,1,4/1,2,4/2,3,1".parse()?;
    KeyFile::new(seed).save(&path)?;

    let loaded = KeyFile::load(&path)?;
    assert_eq!(build(loaded.seed.cells()), build(seed.cells()));
    Ok(())
}
