use crate::error::{GrilleError, Result};
use crate::seed::SeedMatrix;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Plaintext used by demos when none is given
pub const DEFAULT_PLAINTEXT: &str = "HAPPY HOLIDAYS FROM THE HUNTINGTON FAMILY";

/// What to do with letters beyond the 36 a grid can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Fail with `CapacityExceeded` before touching the grid
    #[default]
    Reject,
    /// Fill the grid and silently drop the rest
    Truncate,
}

impl std::str::FromStr for OverflowPolicy {
    type Err = GrilleError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "truncate" => Ok(Self::Truncate),
            _ => Err(GrilleError::UnsupportedOption(format!("overflow: {}", s))),
        }
    }
}

/// Which way a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl std::str::FromStr for Direction {
    type Err = GrilleError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "encrypt" | "enc" => Ok(Self::Encrypt),
            "decrypt" | "dec" => Ok(Self::Decrypt),
            _ => Err(GrilleError::UnsupportedOption(format!("direction: {}", s))),
        }
    }
}

/// On-disk key: the seed a stencil is rebuilt from.
/// Stored as JSON, e.g. `{"version":1,"seed":[[2,4,1],[1,4,3],[3,2,2]]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFile {
    /// Format version
    pub version: u32,
    /// Validated on load
    pub seed: SeedMatrix,
}

impl KeyFile {
    pub const VERSION: u32 = 1;

    pub fn new(seed: SeedMatrix) -> Self {
        Self {
            version: Self::VERSION,
            seed,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let key: Self = serde_json::from_slice(data)?;
        if key.version != Self::VERSION {
            return Err(GrilleError::UnsupportedOption(format!(
                "key file version {}",
                key.version
            )));
        }
        Ok(key)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_bytes(&std::fs::read(path)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }
}

/// Where a command takes its seed from
#[derive(Debug, Clone, Default)]
pub enum SeedSource {
    /// Seed text such as `2,4,1/1,4,3/3,2,2`
    Inline(String),
    /// JSON key file
    KeyFile(std::path::PathBuf),
    #[default]
    Default,
}

impl SeedSource {
    /// Inline text wins over a key file; neither means the default seed
    pub fn from_args(seed: Option<String>, key: Option<std::path::PathBuf>) -> Self {
        match (seed, key) {
            (Some(text), _) => Self::Inline(text),
            (None, Some(path)) => Self::KeyFile(path),
            (None, None) => Self::Default,
        }
    }

    pub fn resolve(&self) -> Result<SeedMatrix> {
        match self {
            Self::Inline(text) => text.parse(),
            Self::KeyFile(path) => Ok(KeyFile::load(path)?.seed),
            Self::Default => Ok(SeedMatrix::default()),
        }
    }
}
