//! # annkit_core
//!
//! Small numeric helpers used around neural-network experiments:
//!
//! - [`bits`]: probabilistic generation, mutation and degradation of
//!   fixed-length binary codes, plus their canonical string form.
//! - [`registry`]: the [`Codebook`], a bidirectional key <-> code store that
//!   guarantees every registered key gets a globally unique code.
//! - [`functions`]: element-wise activation and utility functions (sigmoid,
//!   tanh, probabilistic thresholding, a stateful stochastic unit).
//! - [`confusion`]: a confusion-matrix tally with a human-readable printer.
//! - [`pixel`]: stacks rows of normalized values into an RGB image file.
//!
//! All randomness flows through an explicitly passed [`rand::Rng`] handle, so
//! every sampling operation is reproducible from a seed.

use core::fmt;

pub mod bits;
pub mod config;
pub mod confusion;
pub mod functions;
pub mod pixel;
pub mod registry;

pub use bits::{canonical, degrade, flip, mutate, sample, Bit, Code, SymbolPair};
pub use config::CodeConfig;
pub use confusion::ConfusionMatrix;
pub use pixel::{Channel, PixelGrid};
pub use registry::Codebook;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AnnkitError>;

/// Errors surfaced by the toolkit.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnkitError {
    /// A key or code was looked up that was never registered.
    NotFound,
    /// The uniqueness rejection-loop ran out of attempts; the code length is
    /// too small for the requested alphabet size at the configured density.
    CapacityExhausted { attempts: usize },
    /// A probability parameter fell outside `[0, 1]`.
    InvalidProbability(f64),
    /// A configuration failed validation.
    InvalidConfig(String),
    /// Paired slices had different lengths, or a row width changed mid-grid.
    ShapeMismatch { expected: usize, got: usize },
    /// A row or column index exceeded the label set it addresses.
    LabelOutOfRange { index: usize, len: usize },
    /// Image encoding or file output failed.
    Image(String),
}

impl fmt::Display for AnnkitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnkitError::NotFound => write!(f, "Key or code was never registered"),
            AnnkitError::CapacityExhausted { attempts } => {
                write!(
                    f,
                    "No unique code found after {attempts} attempts; code space is too occupied"
                )
            }
            AnnkitError::InvalidProbability(p) => {
                write!(f, "Probability {p} is outside [0, 1]")
            }
            AnnkitError::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
            AnnkitError::ShapeMismatch { expected, got } => {
                write!(f, "Shape mismatch: expected length {expected}, got {got}")
            }
            AnnkitError::LabelOutOfRange { index, len } => {
                write!(f, "Index {index} out of range for {len} labels")
            }
            AnnkitError::Image(msg) => write!(f, "Image output failed: {msg}"),
        }
    }
}

impl std::error::Error for AnnkitError {}
