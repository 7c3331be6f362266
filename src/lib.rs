//! Grille - rotating (Fleissner) grille cipher
//!
//! A 3×3 seed of values 1–4 defines a static 6×6 stencil. Turning the
//! stencil 90° clockwise four times exposes every cell of a 6×6 grid once,
//! so up to 36 letters are written through the holes and read back out
//! row by row.
//!
//! ## Data flow
//!
//! ```text
//! seed → validate_seed → build → stencil → encrypt / decrypt → text + grid
//! ```
//!
//! - **Seed**: 3×3 values; all of 1, 2, 3 and 4 must appear
//! - **Stencil**: rotation k's holes are placed in quadrant k
//! - **Encrypt**: fill holes rotation by rotation, read the grid row-major
//! - **Decrypt**: lay the text row-major over the cells it occupies, read
//!   holes rotation by rotation
//!
//! Bulk `encrypt`/`decrypt` are built on the single-step primitives that
//! `CipherSession` drives one rotation at a time.
//!
//! ## Example
//!
//! ```
//! use grille::{decrypt, encrypt, stencil, SeedMatrix};
//!
//! let seed: SeedMatrix = "2,4,1/1,4,3/3,2,2".parse().unwrap();
//! let stencil = stencil::build(seed.cells());
//!
//! let sealed = encrypt("Happy holidays", &stencil);
//! let opened = decrypt(&sealed.ciphertext, &stencil);
//! assert_eq!(opened.plaintext, "HAPPYHOLIDAYS");
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod seed;
pub mod session;
pub mod stencil;
pub mod validate;

pub use config::{Direction, KeyFile, OverflowPolicy};
pub use engine::{decrypt, encrypt, encrypt_strict, normalize};
pub use error::{GrilleError, Result};
pub use grid::{Grid, Position, Stencil};
pub use seed::{validate_seed, SeedMatrix};
pub use session::{CipherSession, SessionState, Workbench};
