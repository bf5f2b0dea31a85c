use serde::{Deserialize, Serialize};

use crate::{AnnkitError, Result};

/// Generation parameters for a [`Codebook`](crate::registry::Codebook).
///
/// Serializable so experiment configs can be written to and read from JSON
/// alongside the rest of a run's settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeConfig {
    /// Code length. Picks the size of the code space (`2^n`).
    pub n: usize,

    /// Probability that any one position samples `On`.
    pub p_on: f64,

    /// Symbol used for `On` positions in canonical form.
    pub on_symbol: char,

    /// Symbol used for `Off` positions in canonical form.
    pub off_symbol: char,

    /// Attempt budget for the uniqueness rejection-loop in `add`. Exceeding
    /// it surfaces `CapacityExhausted` instead of looping forever.
    pub max_attempts: usize,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            n: 64,
            p_on: 0.5,
            on_symbol: crate::bits::ON_SYMBOL,
            off_symbol: crate::bits::OFF_SYMBOL,
            max_attempts: 1024,
        }
    }
}

impl CodeConfig {
    /// Shorthand for the two parameters that vary most between experiments.
    pub fn new(n: usize, p_on: f64) -> Self {
        Self {
            n,
            p_on,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.p_on) || self.p_on.is_nan() {
            return Err(AnnkitError::InvalidProbability(self.p_on));
        }
        if self.on_symbol == self.off_symbol {
            return Err(AnnkitError::InvalidConfig(
                "on_symbol and off_symbol must differ or canonical forms collide".into(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(AnnkitError::InvalidConfig(
                "max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
