//! Message-to-strand encoding.
//!
//! The encoder walks emission positions, asking the constraint engine which
//! bases are admissible, drawing a selector from the keystream, and letting
//! the mapper fold the next message bits into one emitted nucleotide. All
//! mutable state lives in locals here; the public entry is a pure function of
//! (seed, message, constraints, config).

use crate::bits::{BitReader, BitString};
use crate::config::CodecConfig;
use crate::constants::{MAX_FORCED_RUN, MAX_PENDING_BITS, MAX_SYMBOL_BITS};
use crate::constraints::{ConstraintSet, HistoryWindow};
use crate::keystream::KeystreamGenerator;
use crate::mapper::{bits_per_symbol, map_symbol};
use crate::results::EncodedStrand;
use crate::strand::gc_content;
use crate::types::HelicaseError;

/// Bounded FIFO staging message bits between the source and the mapper.
///
/// Invariant: never holds more than [`MAX_PENDING_BITS`] bits. The encoder
/// refills it from the bit source and the mapper drains at most two bits per
/// emission, so the bound can only be violated by a logic error.
#[derive(Debug, Clone, Copy, Default)]
struct PendingBits {
    bits: u16,
    len: usize,
}

impl PendingBits {
    fn push(&mut self, bit: u8) {
        debug_assert!(self.len < MAX_PENDING_BITS);
        self.bits = (self.bits << 1) | u16::from(bit & 1);
        self.len += 1;
    }

    /// Take up to `width` bits, oldest first, as a single value.
    fn take(&mut self, width: usize) -> (u64, usize) {
        let taken = width.min(self.len);
        if taken == 0 {
            return (0, 0);
        }
        let kept = self.len - taken;
        let value = u64::from(self.bits >> kept) & ((1u64 << taken) - 1);
        self.bits &= (1u16 << kept) - 1;
        self.len = kept;
        (value, taken)
    }

    const fn len(&self) -> usize {
        self.len
    }

    const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Encode a message into a nucleotide strand.
///
/// Emission continues until every message bit (and the staging buffer) is
/// drained; positions whose admissible set has a single member are emitted
/// without consuming bits. An empty message encodes to an empty strand.
///
/// # Errors
///
/// Returns [`HelicaseError::StuckEncoding`] when the admissible set empties,
/// or when more than [`MAX_FORCED_RUN`] consecutive forced positions occur
/// while message bits remain; both mean the constraint configuration cannot
/// carry this message forward from the current history.
pub fn encode_message(
    seed: u64,
    message: &BitString,
    constraints: &ConstraintSet,
    config: &CodecConfig,
) -> Result<EncodedStrand, HelicaseError> {
    let keystream = KeystreamGenerator::new(seed, config);
    let mut reader = BitReader::new(message);
    let mut history = HistoryWindow::new(constraints.max_lookback());
    let mut pending = PendingBits::default();
    let mut prior_bits = 0u64;
    let mut position = 0usize;
    let mut forced_run = 0usize;
    let mut padded_bits = 0usize;
    let mut nucleotides = Vec::with_capacity(message.len() / 2 + 1);

    loop {
        while pending.len() < MAX_PENDING_BITS {
            match reader.next_bit() {
                Some(bit) => pending.push(bit),
                None => break,
            }
        }
        if pending.is_empty() {
            break;
        }

        let set = constraints.admissible(&history);
        let width = bits_per_symbol(set.len());
        debug_assert!(width <= MAX_SYMBOL_BITS);
        let selector = keystream.selector(position, prior_bits);
        let (value, taken) = pending.take(width);
        let nucleotide =
            map_symbol(selector, set, value).ok_or_else(|| HelicaseError::StuckEncoding {
                position,
                history: history.to_string(),
            })?;

        if width == 0 {
            forced_run += 1;
            if forced_run > MAX_FORCED_RUN {
                return Err(HelicaseError::StuckEncoding {
                    position,
                    history: history.to_string(),
                });
            }
        } else {
            forced_run = 0;
        }
        padded_bits += width - taken;

        nucleotides.push(nucleotide);
        history.push(nucleotide);
        prior_bits = keystream.advance_history(prior_bits, value, taken);
        position += 1;
    }

    let gc = gc_content(&nucleotides);
    Ok(EncodedStrand {
        length: nucleotides.len(),
        message_bits: message.len(),
        padded_bits,
        gc_content: gc,
        nucleotides,
    })
}
