//! Stepwise cipher sessions.
//!
//! A `CipherSession` holds the working state of one direction (letters
//! still waiting, the partially filled grid, the current rotation) and
//! advances one rotation per call. `Workbench` owns the current stencil
//! and one session per direction; callers keep it wherever they like
//! instead of relying on global state.

use crate::config::{Direction, OverflowPolicy};
use crate::engine::{decrypt_step, encrypt_step, load_ciphertext, normalize};
use crate::error::{GrilleError, Result};
use crate::grid::{rotation_degrees, Grid, Position, Stencil, CAPACITY, ROTATION_COUNT};
use crate::seed::{RawSeed, SeedMatrix};
use crate::stencil::{build, holes_at_rotation};
use std::collections::VecDeque;
use tracing::debug;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// Next `advance` processes this rotation step (0..=3)
    Filling(usize),
    Complete,
}

/// What one `advance` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub direction: Direction,
    pub rotation_step: usize,
    /// Cells written (encrypt) or holes read (decrypt)
    pub positions: Vec<Position>,
    /// Letters read in this step; empty when encrypting
    pub chars: String,
    /// Letters not yet placed (encrypt) or not yet read (decrypt)
    pub remaining: usize,
    pub complete: bool,
}

/// Progress figures for a front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based step about to run or just run
    pub step: usize,
    pub total_steps: usize,
    pub used_chars: usize,
    pub total_chars: usize,
    /// Holes visible at the next rotation, 0 once complete
    pub next_step_holes: usize,
    pub degrees: usize,
}

#[derive(Debug, Clone)]
pub struct CipherSession {
    direction: Direction,
    stencil: Option<Stencil>,
    remaining: VecDeque<char>,
    grid: Grid,
    state: SessionState,
    total_chars: usize,
    recovered: String,
    last_step: usize,
}

impl CipherSession {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            stencil: None,
            remaining: VecDeque::new(),
            grid: Grid::new(),
            state: SessionState::Idle,
            total_chars: 0,
            recovered: String::new(),
            last_step: 0,
        }
    }

    /// Load input and move to `Filling(0)`.
    ///
    /// Fails on empty normalized input. Under `OverflowPolicy::Reject`, text
    /// longer than the grid fails too, in either direction. A rejected
    /// input leaves the previous session untouched.
    pub fn start(&mut self, stencil: Stencil, text: &str, policy: OverflowPolicy) -> Result<()> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Err(GrilleError::EmptyInput);
        }
        if policy == OverflowPolicy::Reject && normalized.len() > CAPACITY {
            return Err(GrilleError::CapacityExceeded {
                len: normalized.len(),
                max: CAPACITY,
            });
        }

        self.reset();
        match self.direction {
            Direction::Encrypt => self.remaining = normalized.chars().collect(),
            Direction::Decrypt => self.grid = load_ciphertext(&normalized, &stencil),
        }
        self.total_chars = match self.direction {
            Direction::Encrypt => self.remaining.len(),
            Direction::Decrypt => self.grid.filled_count(),
        };
        self.stencil = Some(stencil);
        self.state = SessionState::Filling(0);
        debug!(direction = ?self.direction, letters = self.total_chars, "session started");
        Ok(())
    }

    /// Process the current rotation and move the state machine on
    pub fn advance(&mut self) -> Result<StepReport> {
        let k = match self.state {
            SessionState::Idle => return Err(GrilleError::SessionNotStarted),
            SessionState::Complete => return Err(GrilleError::SessionComplete),
            SessionState::Filling(k) => k,
        };
        let stencil = self.stencil.ok_or(GrilleError::StencilNotGenerated)?;

        let (positions, chars) = match self.direction {
            Direction::Encrypt => {
                let step = encrypt_step(&mut self.remaining, &mut self.grid, &stencil, k);
                (step.filled, String::new())
            }
            Direction::Decrypt => {
                let step = decrypt_step(&self.grid, &stencil, k);
                self.recovered.push_str(&step.chars);
                (step.holes, step.chars)
            }
        };

        let remaining = self.remaining();
        let done = k + 1 >= ROTATION_COUNT
            || (self.direction == Direction::Encrypt && remaining == 0);
        self.last_step = k;
        self.state = if done {
            SessionState::Complete
        } else {
            SessionState::Filling(k + 1)
        };
        debug!(direction = ?self.direction, rotation_step = k, remaining, state = ?self.state, "session advanced");

        Ok(StepReport {
            direction: self.direction,
            rotation_step: k,
            positions,
            chars,
            remaining,
            complete: done,
        })
    }

    /// Advance until complete, collecting every step
    pub fn run_to_completion(&mut self) -> Result<Vec<StepReport>> {
        let mut reports = Vec::new();
        while !self.is_complete() {
            reports.push(self.advance()?);
        }
        Ok(reports)
    }

    /// Back to `Idle`, dropping all working state
    pub fn reset(&mut self) {
        *self = Self::new(self.direction);
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Rotation the stencil is currently turned to
    pub fn rotation_step(&self) -> usize {
        match self.state {
            SessionState::Filling(k) => k,
            _ => self.last_step,
        }
    }

    pub fn remaining(&self) -> usize {
        match self.direction {
            Direction::Encrypt => self.remaining.len(),
            Direction::Decrypt => self.total_chars.saturating_sub(self.recovered.len()),
        }
    }

    /// Ciphertext so far (encrypt) or recovered plaintext so far (decrypt)
    pub fn output(&self) -> String {
        match self.direction {
            Direction::Encrypt => self.grid.read_row_major(),
            Direction::Decrypt => self.recovered.clone(),
        }
    }

    pub fn progress(&self) -> Progress {
        let step = match self.state {
            SessionState::Idle => 0,
            SessionState::Filling(k) => k + 1,
            SessionState::Complete => self.last_step + 1,
        };
        let next_step_holes = match (self.state, self.stencil) {
            (SessionState::Filling(k), Some(stencil)) => holes_at_rotation(&stencil, k).len(),
            _ => 0,
        };
        Progress {
            step,
            total_steps: ROTATION_COUNT,
            used_chars: self.total_chars.saturating_sub(self.remaining()),
            total_chars: self.total_chars,
            next_step_holes,
            degrees: rotation_degrees(self.rotation_step()),
        }
    }
}

/// Caller-owned working state: the current stencil plus one session per
/// direction
#[derive(Debug, Clone)]
pub struct Workbench {
    seed: Option<SeedMatrix>,
    stencil: Option<Stencil>,
    policy: OverflowPolicy,
    encryption: CipherSession,
    decryption: CipherSession,
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new(OverflowPolicy::default())
    }
}

impl Workbench {
    pub fn new(policy: OverflowPolicy) -> Self {
        Self {
            seed: None,
            stencil: None,
            policy,
            encryption: CipherSession::new(Direction::Encrypt),
            decryption: CipherSession::new(Direction::Decrypt),
        }
    }

    /// Validate a raw seed and make its stencil current.
    /// On failure the previous stencil stays in place.
    pub fn generate_stencil(&mut self, raw: &RawSeed) -> Result<Stencil> {
        let seed = SeedMatrix::from_raw(raw)?;
        Ok(self.set_seed(seed))
    }

    pub fn set_seed(&mut self, seed: SeedMatrix) -> Stencil {
        let stencil = build(seed.cells());
        debug!(seed = %seed, "workbench stencil replaced");
        self.seed = Some(seed);
        self.stencil = Some(stencil);
        self.reset();
        stencil
    }

    pub fn seed(&self) -> Option<&SeedMatrix> {
        self.seed.as_ref()
    }

    pub fn stencil(&self) -> Option<&Stencil> {
        self.stencil.as_ref()
    }

    pub fn start(&mut self, direction: Direction, text: &str) -> Result<()> {
        let stencil = self.stencil.ok_or(GrilleError::StencilNotGenerated)?;
        let policy = self.policy;
        self.session_mut(direction).start(stencil, text, policy)
    }

    pub fn advance(&mut self, direction: Direction) -> Result<StepReport> {
        self.session_mut(direction).advance()
    }

    pub fn session(&self, direction: Direction) -> &CipherSession {
        match direction {
            Direction::Encrypt => &self.encryption,
            Direction::Decrypt => &self.decryption,
        }
    }

    fn session_mut(&mut self, direction: Direction) -> &mut CipherSession {
        match direction {
            Direction::Encrypt => &mut self.encryption,
            Direction::Decrypt => &mut self.decryption,
        }
    }

    /// Clear both sessions; the stencil is kept
    pub fn reset(&mut self) {
        self.encryption.reset();
        self.decryption.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{decrypt, encrypt};
    use crate::seed::DEFAULT_SEED;

    const PLAINTEXT: &str = "HAPPY HOLIDAYS FROM THE HUNTINGTON FAMILY";

    fn default_stencil() -> Stencil {
        build(&DEFAULT_SEED)
    }

    #[test]
    fn test_encrypt_session_matches_bulk() {
        let stencil = default_stencil();
        let mut session = CipherSession::new(Direction::Encrypt);
        session.start(stencil, PLAINTEXT, OverflowPolicy::Reject).unwrap();
        let reports = session.run_to_completion().unwrap();
        assert_eq!(reports.len(), 4);
        let bulk = encrypt(PLAINTEXT, &stencil);
        assert_eq!(session.output(), bulk.ciphertext);
        assert_eq!(session.grid(), &bulk.grid);
    }

    #[test]
    fn test_encrypt_session_completes_early_when_letters_run_out() {
        let mut session = CipherSession::new(Direction::Encrypt);
        session.start(default_stencil(), "SHORT", OverflowPolicy::Reject).unwrap();
        let report = session.advance().unwrap();
        assert!(report.complete);
        assert_eq!(report.positions.len(), 5);
        assert_eq!(session.state(), SessionState::Complete);
        assert!(matches!(session.advance(), Err(GrilleError::SessionComplete)));
    }

    #[test]
    fn test_decrypt_session_always_four_steps() {
        let stencil = default_stencil();
        let ciphertext = encrypt("SHORT", &stencil).ciphertext;
        let mut session = CipherSession::new(Direction::Decrypt);
        session.start(stencil, &ciphertext, OverflowPolicy::Reject).unwrap();
        let reports = session.run_to_completion().unwrap();
        assert_eq!(reports.len(), 4);
        assert_eq!(session.output(), decrypt(&ciphertext, &stencil).plaintext);
        assert_eq!(session.remaining(), 0);
    }

    #[test]
    fn test_state_transitions() {
        let mut session = CipherSession::new(Direction::Encrypt);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(matches!(session.advance(), Err(GrilleError::SessionNotStarted)));

        session.start(default_stencil(), PLAINTEXT, OverflowPolicy::Reject).unwrap();
        assert_eq!(session.state(), SessionState::Filling(0));
        session.advance().unwrap();
        assert_eq!(session.state(), SessionState::Filling(1));
        assert_eq!(session.rotation_step(), 1);

        session.reset();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.grid().filled_count(), 0);
    }

    #[test]
    fn test_start_rejects_empty_and_overflow() {
        let mut session = CipherSession::new(Direction::Encrypt);
        assert!(matches!(
            session.start(default_stencil(), " 42 !", OverflowPolicy::Reject),
            Err(GrilleError::EmptyInput)
        ));
        let long = "X".repeat(37);
        assert!(matches!(
            session.start(default_stencil(), &long, OverflowPolicy::Reject),
            Err(GrilleError::CapacityExceeded { len: 37, max: 36 })
        ));
        session.start(default_stencil(), &long, OverflowPolicy::Truncate).unwrap();
        session.run_to_completion().unwrap();
        assert_eq!(session.remaining(), 1);
        assert_eq!(session.output().len(), 36);
    }

    #[test]
    fn test_rejected_start_keeps_running_session() {
        let mut session = CipherSession::new(Direction::Encrypt);
        session.start(default_stencil(), PLAINTEXT, OverflowPolicy::Reject).unwrap();
        session.advance().unwrap();

        for bad in [" 42 !".to_string(), "X".repeat(37)] {
            assert!(session.start(default_stencil(), &bad, OverflowPolicy::Reject).is_err());
            assert_eq!(session.state(), SessionState::Filling(1));
            assert_eq!(session.grid().filled_count(), 9);
        }
    }

    #[test]
    fn test_decrypt_session_rejects_overlong_ciphertext() {
        let mut session = CipherSession::new(Direction::Decrypt);
        assert!(matches!(
            session.start(default_stencil(), &"A".repeat(40), OverflowPolicy::Reject),
            Err(GrilleError::CapacityExceeded { len: 40, max: 36 })
        ));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_decrypt_session_recovers_short_message() {
        let stencil = default_stencil();
        let ciphertext = encrypt("Happy holidays", &stencil).ciphertext;
        let mut session = CipherSession::new(Direction::Decrypt);
        session.start(stencil, &ciphertext, OverflowPolicy::Reject).unwrap();
        session.run_to_completion().unwrap();
        assert_eq!(session.output(), "HAPPYHOLIDAYS");
    }

    #[test]
    fn test_progress_reports_counts() {
        let mut session = CipherSession::new(Direction::Encrypt);
        session.start(default_stencil(), PLAINTEXT, OverflowPolicy::Reject).unwrap();
        let before = session.progress();
        assert_eq!(before.step, 1);
        assert_eq!(before.used_chars, 0);
        assert_eq!(before.total_chars, 36);
        assert_eq!(before.next_step_holes, 9);

        session.advance().unwrap();
        let after = session.progress();
        assert_eq!(after.used_chars, 9);
        assert_eq!(after.degrees, 90);

        session.run_to_completion().unwrap();
        let done = session.progress();
        assert_eq!(done.step, 4);
        assert_eq!(done.next_step_holes, 0);
        assert_eq!(done.used_chars, 36);
    }

    #[test]
    fn test_workbench_requires_stencil() {
        let mut bench = Workbench::default();
        assert!(matches!(
            bench.start(Direction::Encrypt, PLAINTEXT),
            Err(GrilleError::StencilNotGenerated)
        ));
    }

    #[test]
    fn test_workbench_keeps_stencil_on_bad_seed() {
        let mut bench = Workbench::default();
        let good: RawSeed = DEFAULT_SEED.map(|row| row.map(|v| Some(v as i64)));
        let stencil = bench.generate_stencil(&good).unwrap();

        let mut bad = good;
        bad[0][0] = Some(9);
        assert!(bench.generate_stencil(&bad).is_err());
        assert_eq!(bench.stencil(), Some(&stencil));
    }

    #[test]
    fn test_workbench_new_stencil_resets_sessions() {
        let mut bench = Workbench::default();
        bench.set_seed(SeedMatrix::default());
        bench.start(Direction::Encrypt, PLAINTEXT).unwrap();
        bench.advance(Direction::Encrypt).unwrap();
        assert_eq!(bench.session(Direction::Encrypt).state(), SessionState::Filling(1));

        bench.set_seed("1,2,3/4,1,2/3,4,1".parse().unwrap());
        assert_eq!(bench.session(Direction::Encrypt).state(), SessionState::Idle);
    }
}
