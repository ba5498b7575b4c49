use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Breakpoints of a membership function are not monotonically non-decreasing
    #[error("invalid {shape} parameters {params:?}: breakpoints must be non-decreasing")]
    InvalidParameters { shape: &'static str, params: Vec<f64> },
    #[error("{shape} membership function takes {expected} breakpoints, got {got}")]
    InvalidShape {
        shape: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("invalid universe {min}..={max} with step {step}")]
    InvalidUniverse { min: f64, max: f64, step: f64 },
    #[error("rule weight {0} is outside of [0, 1]")]
    InvalidWeight(f64),
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),
    #[error("variable `{0}` is defined more than once")]
    DuplicateVariable(String),
    #[error("variable `{variable}` has no term `{term}`")]
    UnknownTerm { variable: String, term: String },
    #[error("no input value for variable `{variable}`")]
    MissingInput { variable: String },
    #[error("no rule concludes on variable `{variable}`")]
    NoOutput { variable: String },
    #[error("rule {rule} consequence may only combine `is` propositions with `and`")]
    InvalidConsequence { rule: usize },
    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse system definition")]
    Config(#[from] toml::de::Error),
}
