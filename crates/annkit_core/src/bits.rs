/// Probabilistic binary codes.
///
/// A [`Code`] is a fixed-length sequence of [`Bit`]s produced under a
/// Bernoulli model: each position is drawn `On` independently with some
/// probability. Codes are immutable once produced; [`mutate`] and [`degrade`]
/// return perturbed copies. The canonical string form (one symbol character
/// per position) is what the [`Codebook`](crate::registry::Codebook) uses as
/// its collision-detection key.
use core::fmt;

use rand::Rng;

use crate::{AnnkitError, Result};

/// Default symbol for an `On` position in canonical form.
pub const ON_SYMBOL: char = '+';
/// Default symbol for an `Off` position in canonical form.
pub const OFF_SYMBOL: char = '-';

/// One position of a binary code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bit {
    On,
    Off,
}

impl Bit {
    /// The opposite bit.
    pub fn not(self) -> Bit {
        match self {
            Bit::On => Bit::Off,
            Bit::Off => Bit::On,
        }
    }

    pub fn is_on(self) -> bool {
        matches!(self, Bit::On)
    }
}

impl From<bool> for Bit {
    fn from(b: bool) -> Self {
        if b {
            Bit::On
        } else {
            Bit::Off
        }
    }
}

/// A fixed-length binary code.
///
/// Semantically an ordered sequence over a two-symbol alphabet. Equality and
/// hashing are positional, so two codes compare equal exactly when their
/// canonical forms do.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Code(Vec<Bit>);

impl Code {
    pub fn from_bits(bits: Vec<Bit>) -> Self {
        Code(bits)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bits(&self) -> &[Bit] {
        &self.0
    }

    /// Number of `On` positions.
    pub fn count_on(&self) -> usize {
        self.0.iter().filter(|b| b.is_on()).count()
    }

    /// Canonical form with the default `'+'`/`'-'` symbols.
    pub fn canonical(&self) -> String {
        canonical(self, ON_SYMBOL, OFF_SYMBOL)
    }

    /// Project into `1.0`/`0.0`, the common dense-vector view of a code.
    pub fn to_f32s(&self) -> Vec<f32> {
        SymbolPair::new(1.0f32, 0.0).project(self)
    }
}

impl FromIterator<Bit> for Code {
    fn from_iter<I: IntoIterator<Item = Bit>>(iter: I) -> Self {
        Code(iter.into_iter().collect())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Maps a code into an arbitrary pair of sentinel values.
///
/// The on/off values need not be boolean or even numeric; anything cloneable
/// works as a projection target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SymbolPair<T> {
    pub on: T,
    pub off: T,
}

impl<T: Clone> SymbolPair<T> {
    pub fn new(on: T, off: T) -> Self {
        SymbolPair { on, off }
    }

    /// One sentinel value per position, in order.
    pub fn project(&self, code: &Code) -> Vec<T> {
        code.bits()
            .iter()
            .map(|b| match b {
                Bit::On => self.on.clone(),
                Bit::Off => self.off.clone(),
            })
            .collect()
    }
}

fn check_probability(p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) || p.is_nan() {
        return Err(AnnkitError::InvalidProbability(p));
    }
    Ok(())
}

/// Draw a fresh code of length `n`: each position is `On` independently with
/// probability `p_on`. `n = 0` yields the empty code.
pub fn sample<R: Rng>(rng: &mut R, n: usize, p_on: f64) -> Result<Code> {
    check_probability(p_on)?;
    Ok((0..n).map(|_| flip_draw(rng, p_on)).collect())
}

fn flip_draw<R: Rng>(rng: &mut R, p_on: f64) -> Bit {
    Bit::from(rng.gen::<f64>() < p_on)
}

/// With probability `p`, return the opposite bit; otherwise `bit` unchanged.
///
/// `p` must already be in `[0, 1]`; the public entry points validate it.
pub fn flip<R: Rng>(rng: &mut R, bit: Bit, p: f64) -> Bit {
    if rng.gen::<f64>() < p {
        bit.not()
    } else {
        bit
    }
}

/// A noisy copy of `code`: every position flips independently with
/// probability `p_change`, regardless of its current value.
pub fn mutate<R: Rng>(rng: &mut R, code: &Code, p_change: f64) -> Result<Code> {
    check_probability(p_change)?;
    Ok(code.bits().iter().map(|&b| flip(rng, b, p_change)).collect())
}

/// Like [`mutate`] but only `On` positions are candidates: each `On` position
/// drops to `Off` with probability `p_change`, `Off` positions pass through.
/// The result never has more `On` positions than the input.
pub fn degrade<R: Rng>(rng: &mut R, code: &Code, p_change: f64) -> Result<Code> {
    check_probability(p_change)?;
    Ok(code
        .bits()
        .iter()
        .map(|&b| match b {
            Bit::On => flip(rng, b, p_change),
            Bit::Off => b,
        })
        .collect())
}

/// Canonical string form: one symbol character per position, concatenated in
/// order. Injective for a fixed length as long as the two symbols differ.
pub fn canonical(code: &Code, on_symbol: char, off_symbol: char) -> String {
    code.bits()
        .iter()
        .map(|b| match b {
            Bit::On => on_symbol,
            Bit::Off => off_symbol,
        })
        .collect()
}
