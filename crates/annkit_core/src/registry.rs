/// The Codebook: a bidirectional key <-> code store with a uniqueness
/// guarantee.
///
/// Every registered key gets a freshly sampled [`Code`]; a rejection-sampling
/// loop re-draws on collision so no two keys ever share a canonical form.
/// The forward map (key -> code) and reverse map (canonical form -> key) are
/// kept as exact inverses after every mutating operation.
///
/// Expected draws per insert are `1 / (1 - occupancy)` where occupancy is the
/// used fraction of the `2^n` code space, so with `n` comfortably larger than
/// the alphabet size the loop terminates almost immediately. The attempt
/// budget in [`CodeConfig`] turns the pathological case (tiny `n`, large
/// alphabet) into a [`CapacityExhausted`](crate::AnnkitError::CapacityExhausted)
/// error instead of an infinite loop.
use std::collections::HashMap;
use std::hash::Hash;

use log::{debug, warn};
use rand::Rng;

use crate::bits::{canonical, sample, Code};
use crate::config::CodeConfig;
use crate::{AnnkitError, Result};

/// Bidirectional store of generated codes, one per key.
///
/// Keys are any hashable, cloneable type. Single-threaded by design: the
/// check-then-insert sequence in [`add`](Codebook::add) is not atomic, so a
/// shared instance must serialize its mutations externally.
#[derive(Debug, Clone)]
pub struct Codebook<K> {
    config: CodeConfig,
    forward: HashMap<K, Code>,
    reverse: HashMap<String, K>,
}

impl<K: Eq + Hash + Clone> Codebook<K> {
    /// Empty codebook. Fails if the config does not validate.
    pub fn new(config: CodeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Codebook {
            config,
            forward: HashMap::new(),
            reverse: HashMap::new(),
        })
    }

    /// Codebook pre-seeded with an alphabet, registered in iteration order.
    /// Duplicate keys in the alphabet are idempotent no-ops.
    pub fn with_alphabet<R, I>(config: CodeConfig, rng: &mut R, alphabet: I) -> Result<Self>
    where
        R: Rng,
        I: IntoIterator<Item = K>,
    {
        let mut book = Codebook::new(config)?;
        book.add_alphabet(rng, alphabet)?;
        Ok(book)
    }

    pub fn config(&self) -> &CodeConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.forward.contains_key(key)
    }

    /// Iterate over registered `(key, code)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Code)> {
        self.forward.iter()
    }

    /// Register `key`, sampling a code no other key holds.
    ///
    /// Idempotent: a key that is already registered keeps its code and no
    /// randomness is consumed. Returns the code now associated with `key`.
    pub fn add<R: Rng>(&mut self, rng: &mut R, key: K) -> Result<&Code> {
        if self.forward.contains_key(&key) {
            return self.value_of(&key);
        }

        let mut attempts = 0usize;
        let code = loop {
            if attempts >= self.config.max_attempts {
                warn!(
                    "codebook capacity exhausted: {} keys in a 2^{} space, {} attempts",
                    self.forward.len(),
                    self.config.n,
                    attempts
                );
                return Err(AnnkitError::CapacityExhausted { attempts });
            }
            attempts += 1;

            let candidate = sample(rng, self.config.n, self.config.p_on)?;
            if !self.reverse.contains_key(&self.canonical_of(&candidate)) {
                break candidate;
            }
            debug!("code collision on attempt {attempts}, resampling");
        };

        self.reverse.insert(self.canonical_of(&code), key.clone());
        self.forward.insert(key.clone(), code);
        self.value_of(&key)
    }

    /// Register every key of `alphabet` in sequence order.
    pub fn add_alphabet<R, I>(&mut self, rng: &mut R, alphabet: I) -> Result<()>
    where
        R: Rng,
        I: IntoIterator<Item = K>,
    {
        for key in alphabet {
            self.add(rng, key)?;
        }
        Ok(())
    }

    /// The key that was assigned `code`, or `NotFound` if no registered key
    /// holds a code with this canonical form.
    pub fn key_of(&self, code: &Code) -> Result<&K> {
        self.reverse
            .get(&self.canonical_of(code))
            .ok_or(AnnkitError::NotFound)
    }

    /// The code registered for `key`, or `NotFound`.
    pub fn value_of(&self, key: &K) -> Result<&Code> {
        self.forward.get(key).ok_or(AnnkitError::NotFound)
    }

    fn canonical_of(&self, code: &Code) -> String {
        canonical(code, self.config.on_symbol, self.config.off_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(0xA1FABE7)
    }

    #[test]
    fn test_add_and_lookup() {
        let mut rng = rng();
        let mut book = Codebook::new(CodeConfig::new(32, 0.5)).unwrap();
        book.add(&mut rng, "alpha").unwrap();

        let code = book.value_of(&"alpha").unwrap().clone();
        assert_eq!(code.len(), 32);
        assert_eq!(book.key_of(&code).unwrap(), &"alpha");
    }

    #[test]
    fn test_lookup_of_unregistered_fails() {
        let mut rng = rng();
        let mut book = Codebook::new(CodeConfig::new(16, 0.5)).unwrap();
        book.add(&mut rng, "present").unwrap();

        assert_eq!(book.value_of(&"absent"), Err(AnnkitError::NotFound));
        let foreign = crate::bits::sample(&mut rng, 16, 0.5).unwrap();
        // Vanishingly unlikely to collide with the single registered code.
        if book.value_of(&"present").unwrap() != &foreign {
            assert_eq!(book.key_of(&foreign), Err(AnnkitError::NotFound));
        }
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut rng = rng();
        let mut book = Codebook::new(CodeConfig::new(24, 0.4)).unwrap();
        let first = book.add(&mut rng, "k").unwrap().clone();
        let second = book.add(&mut rng, "k").unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_capacity_exhausted_on_tiny_space() {
        let mut rng = rng();
        let config = CodeConfig {
            max_attempts: 50,
            ..CodeConfig::new(2, 0.5)
        };
        // 2^2 = 4 possible codes; the fifth key cannot get a unique one.
        let mut book = Codebook::new(config).unwrap();
        let result = book.add_alphabet(&mut rng, 0..5);
        assert!(matches!(
            result,
            Err(AnnkitError::CapacityExhausted { .. })
        ));
        assert_eq!(book.len(), 4);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let bad = CodeConfig::new(8, 2.0);
        assert!(Codebook::<u8>::new(bad).is_err());
    }

    #[test]
    fn test_custom_symbols_flow_into_canonical_lookup() {
        let mut rng = rng();
        let config = CodeConfig {
            on_symbol: '#',
            off_symbol: '.',
            ..CodeConfig::new(12, 0.5)
        };
        let mut book = Codebook::new(config).unwrap();
        book.add(&mut rng, 42u32).unwrap();
        let code = book.value_of(&42).unwrap().clone();
        assert_eq!(book.key_of(&code).unwrap(), &42);
    }
}
