/// Element-wise activation and utility functions.
///
/// These operate on plain `f64` slices and return fresh vectors; callers own
/// the layout. The stochastic ones take an explicit RNG handle like all
/// sampling in this crate.
use rand::Rng;

use crate::{AnnkitError, Result};

/// Logistic sigmoid, optionally with temperature `t` multiplying the input.
pub fn sigmoid(a: &[f64], t: Option<f64>) -> Vec<f64> {
    let t = t.unwrap_or(1.0);
    a.iter().map(|&x| 1.0 / (1.0 + (-t * x).exp())).collect()
}

/// Hyperbolic tangent, optionally with temperature `t`.
pub fn tanh(a: &[f64], t: Option<f64>) -> Vec<f64> {
    let t = t.unwrap_or(1.0);
    a.iter().map(|&x| (t * x).tanh()).collect()
}

/// Probabilistic threshold: each element becomes `1.0` with probability equal
/// to its own value, else `0.0`. Values are expected in `[0, 1]`; anything
/// at or below 0 never fires and anything at or above 1 always does.
pub fn pthresh<R: Rng>(rng: &mut R, a: &[f64]) -> Vec<f64> {
    a.iter()
        .map(|&x| if rng.gen::<f64>() < x { 1.0 } else { 0.0 })
        .collect()
}

/// Set the main diagonal of a row-major `rows x cols` matrix buffer to `x`.
pub fn set_diagonal(m: &mut [f64], rows: usize, cols: usize, x: f64) -> Result<()> {
    if m.len() != rows * cols {
        return Err(AnnkitError::ShapeMismatch {
            expected: rows * cols,
            got: m.len(),
        });
    }
    for i in 0..rows.min(cols) {
        m[i * cols + i] = x;
    }
    Ok(())
}

/// One step of a stochastic unit with a refractory period.
///
/// `x` is the unit's state, `i` the incoming drive. Returns
/// `(output, next_state)`:
/// - `x < 0`: the unit just fired and is refractory; emits `(0, 0)`.
/// - `x + i < 0`: inhibited; emits `(0, 0)`.
/// - otherwise the sigmoid of the drive gives the fire probability; firing
///   emits `(1, -1)` (the `-1` state is the refractory marker), silence
///   emits `(0, a)` where `a` is the activation that failed to fire.
pub fn stateful_step<R: Rng>(rng: &mut R, x: f64, i: f64) -> (f64, f64) {
    if x < 0.0 {
        return (0.0, 0.0);
    }
    let a = x + i;
    if a < 0.0 {
        return (0.0, 0.0);
    }
    let a = 1.0 / (1.0 + (-a).exp());
    if rng.gen::<f64>() < a {
        (1.0, -1.0)
    } else {
        (0.0, a)
    }
}

/// [`stateful_step`] across paired state/drive slices.
/// Returns the output vector and the next-state vector.
pub fn stateful<R: Rng>(rng: &mut R, xs: &[f64], is: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    if xs.len() != is.len() {
        return Err(AnnkitError::ShapeMismatch {
            expected: xs.len(),
            got: is.len(),
        });
    }
    let mut out = Vec::with_capacity(xs.len());
    let mut next = Vec::with_capacity(xs.len());
    for (&x, &i) in xs.iter().zip(is.iter()) {
        let (o, s) = stateful_step(rng, x, i);
        out.push(o);
        next.push(s);
    }
    Ok((out, next))
}
