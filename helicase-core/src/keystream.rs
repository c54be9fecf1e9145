//! Keyed pseudorandom selector stream.
//!
//! Every emission position draws a 64-bit selector that is a deterministic
//! function of the strand seed, the strand position, and the trailing message
//! bits. The three inputs occupy disjoint bit fields of the mixer input, so a
//! one-bit difference in any of them decorrelates the whole selector; a
//! misread at one position therefore cannot echo into an unrelated position.

use crate::config::CodecConfig;
use crate::constants::{HASH_INCREMENT, HASH_MULTIPLIER_A, HASH_MULTIPLIER_B};

/// Mix a packed selector input into a decorrelated 64-bit value.
///
/// Two odd-multiplier rounds interleaved with xorshifts; wrapping arithmetic
/// throughout, so this is a total function.
#[must_use]
pub const fn mix(value: u64) -> u64 {
    let mut mixed = value.wrapping_mul(HASH_MULTIPLIER_A);
    mixed = mixed.wrapping_add(HASH_INCREMENT);
    mixed ^= mixed >> 21;
    mixed ^= mixed << 37;
    mixed ^= mixed >> 4;
    mixed = mixed.wrapping_mul(HASH_MULTIPLIER_B);
    mixed ^= mixed << 20;
    mixed ^= mixed >> 41;
    mixed ^= mixed << 5;
    mixed
}

/// Deterministic per-position selector source for one strand.
///
/// Construction masks the seed to the configured salt width; afterwards the
/// generator is immutable and can be shared freely.
///
/// # Examples
///
/// ```rust
/// use helicase_core::config::CodecConfig;
/// use helicase_core::keystream::KeystreamGenerator;
///
/// let config = CodecConfig::default();
/// let keystream = KeystreamGenerator::new(42, &config);
/// assert_eq!(keystream.selector(0, 0), keystream.selector(0, 0));
/// assert_ne!(keystream.selector(0, 0), keystream.selector(1, 0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct KeystreamGenerator {
    salt: u64,
    position_bits: u32,
    history_bits: u32,
    position_mask: u64,
    history_mask: u64,
}

impl KeystreamGenerator {
    /// Build a generator for one strand seed under the given field widths.
    ///
    /// The widths are assumed valid (each at least 1, summing to at most 64);
    /// [`CodecConfig::validate`](crate::config::CodecConfig::validate)
    /// enforces this before any generator is built.
    #[must_use]
    pub fn new(seed: u64, config: &CodecConfig) -> Self {
        Self {
            salt: seed & field_mask(config.salt_bits),
            position_bits: config.position_bits,
            history_bits: config.history_bits,
            position_mask: field_mask(config.position_bits),
            history_mask: field_mask(config.history_bits),
        }
    }

    /// The selector for `position` given the trailing message bits.
    ///
    /// Total function: any position and any history value produce a selector.
    #[must_use]
    pub fn selector(&self, position: usize, prior_bits: u64) -> u64 {
        let packed = (self.salt << (self.position_bits + self.history_bits))
            | ((position as u64 & self.position_mask) << self.history_bits)
            | (prior_bits & self.history_mask);
        mix(packed)
    }

    /// Fold `width` freshly consumed message bits into the rolling history.
    #[must_use]
    pub const fn advance_history(&self, prior_bits: u64, value: u64, width: usize) -> u64 {
        ((prior_bits << width) | value) & self.history_mask
    }
}

const fn field_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}
