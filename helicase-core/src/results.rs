use crate::bits::BitString;
use crate::strand::strand_to_string;
use crate::types::Nucleotide;

/// One encoded strand with its composition statistics.
///
/// # Examples
///
/// ```rust
/// use helicase_core::{bits::BitString, Codec};
///
/// let codec = Codec::with_defaults()?;
/// let strand = codec.encode(3, &BitString::from_bytes(&[0xA5]))?;
///
/// assert_eq!(strand.message_bits, 8);
/// assert_eq!(strand.length, strand.nucleotides.len());
/// assert!(strand.gc_content >= 0.0 && strand.gc_content <= 1.0);
/// # Ok::<(), helicase_core::types::HelicaseError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EncodedStrand {
    /// The emitted nucleotides, in synthesis order.
    pub nucleotides: Vec<Nucleotide>,

    /// Strand length in nucleotides.
    pub length: usize,

    /// Number of message bits the strand carries.
    pub message_bits: usize,

    /// Bit slots left unfilled at the final emission when the message ended
    /// mid-position. Zero for messages that fill every position exactly.
    pub padded_bits: usize,

    /// GC content of the strand as a fraction (0.0 to 1.0).
    pub gc_content: f64,
}

impl EncodedStrand {
    /// The strand as an uppercase ASCII string.
    #[must_use]
    pub fn sequence(&self) -> String {
        strand_to_string(&self.nucleotides)
    }
}

/// One ranked candidate decoding.
#[derive(Debug, Clone)]
pub struct DecodedCandidate {
    /// The recovered message bits.
    pub bits: BitString,

    /// Accumulated alignment cost; lower is better, 0.0 is an error-free
    /// explanation of the read.
    pub cost: f64,

    /// Whether the candidate decoded exactly the expected number of bits.
    /// Partial, best-effort candidates report `false`.
    pub exact_length: bool,
}

/// Outcome of one decode run.
///
/// Exhaustion is reported here rather than as an error: when the search
/// frontier empties or a budget expires before any complete decoding is
/// found, `exhausted` is `true` and `candidates` holds the best partial
/// decodings seen, so the caller can widen the bounds and resubmit.
#[derive(Debug, Clone)]
pub struct DecodeOutcome {
    /// Ranked candidates, ascending by cost, capped at the configured count.
    pub candidates: Vec<DecodedCandidate>,

    /// `true` when no complete decoding was found before the search ran out
    /// of frontier, hypothesis space, or step budget. Candidates are then
    /// low-confidence partial results.
    pub exhausted: bool,

    /// Frontier expansions performed.
    pub steps_taken: u64,

    /// Hypothesis nodes allocated over the whole search.
    pub hypotheses_allocated: usize,
}

impl DecodeOutcome {
    /// The top-ranked candidate, if any survived the search.
    #[must_use]
    pub fn best(&self) -> Option<&DecodedCandidate> {
        self.candidates.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_is_first() {
        let outcome = DecodeOutcome {
            candidates: vec![
                DecodedCandidate {
                    bits: BitString::from_bits(&[1]),
                    cost: 0.0,
                    exact_length: true,
                },
                DecodedCandidate {
                    bits: BitString::from_bits(&[0]),
                    cost: 2.0,
                    exact_length: true,
                },
            ],
            exhausted: false,
            steps_taken: 5,
            hypotheses_allocated: 9,
        };
        assert_eq!(outcome.best().unwrap().cost, 0.0);
    }

    #[test]
    fn test_best_empty() {
        let outcome = DecodeOutcome {
            candidates: Vec::new(),
            exhausted: true,
            steps_taken: 0,
            hypotheses_allocated: 1,
        };
        assert!(outcome.best().is_none());
    }
}
