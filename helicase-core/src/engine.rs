//! High-level codec facade and batch processing.
//!
//! [`Codec`] owns a validated configuration and constraint set and exposes
//! the whole encode/decode surface. Strands are independent units of work,
//! so the batch methods fan out across the Rayon thread pool with no shared
//! mutable state.

use rayon::prelude::*;

use crate::bits::BitString;
use crate::config::CodecConfig;
use crate::constraints::{ConstraintSet, ConstraintSpec};
use crate::decoder::decode_strand;
use crate::encoder::encode_message;
use crate::results::{DecodeOutcome, EncodedStrand};
use crate::strand::parse_strand;
use crate::types::{HelicaseError, Nucleotide};

/// One batch encode job: (strand seed, message bits).
pub type EncodeJob = (u64, BitString);

/// One batch decode job: (strand seed, noisy read, expected message bits).
pub type DecodeJob = (u64, Vec<Nucleotide>, usize);

/// Constraint-aware DNA storage codec.
///
/// Construction validates every knob up front, so encode and decode never
/// fail because of configuration. The codec is immutable afterwards and safe
/// to share across threads.
///
/// # Examples
///
/// ## Round trip
///
/// ```rust
/// use helicase_core::{bits::BitString, Codec};
///
/// let codec = Codec::with_defaults()?;
/// let message = BitString::from_bytes(b"hi");
///
/// let strand = codec.encode(7, &message)?;
/// let outcome = codec.decode(7, &strand.nucleotides, message.len());
///
/// assert_eq!(outcome.best().unwrap().bits, message);
/// # Ok::<(), helicase_core::types::HelicaseError>(())
/// ```
///
/// ## Custom constraints
///
/// ```rust
/// use helicase_core::config::CodecConfig;
/// use helicase_core::constraints::ConstraintSpec;
/// use helicase_core::Codec;
///
/// let spec = ConstraintSpec {
///     max_homopolymer: Some(2),
///     excluded_motifs: vec!["GGCGG".to_string()],
///     ..Default::default()
/// };
/// let codec = Codec::new(CodecConfig::default(), spec)?;
/// # Ok::<(), helicase_core::types::HelicaseError>(())
/// ```
#[derive(Debug)]
pub struct Codec {
    /// The validated configuration in effect.
    pub config: CodecConfig,
    constraints: ConstraintSet,
}

impl Codec {
    /// Build a codec from a configuration and constraint parameters.
    ///
    /// # Errors
    ///
    /// Returns [`HelicaseError::Configuration`] (or
    /// [`HelicaseError::InputFormat`] for malformed motifs) when any
    /// parameter is invalid, and surfaces thread-pool setup failures when
    /// `num_threads` is set.
    pub fn new(config: CodecConfig, spec: ConstraintSpec) -> Result<Self, HelicaseError> {
        config.validate()?;
        let constraints = ConstraintSet::new(spec)?;

        if let Some(num_threads) = config.num_threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build_global()
                .map_err(|e| {
                    HelicaseError::Configuration(format!(
                        "Failed to configure thread pool: {}",
                        e
                    ))
                })?;
        }

        Ok(Self {
            config,
            constraints,
        })
    }

    /// A codec with the default configuration and the standard synthesis
    /// constraint profile (homopolymer runs ≤ 3, windowed GC in [0.4, 0.6]).
    ///
    /// # Errors
    ///
    /// Returns [`HelicaseError::Configuration`] only if the built-in
    /// defaults were made inconsistent; practically infallible.
    pub fn with_defaults() -> Result<Self, HelicaseError> {
        Self::new(CodecConfig::default(), ConstraintSpec::standard())
    }

    /// The validated constraint set in effect.
    #[must_use]
    pub const fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// Encode a message into a strand.
    ///
    /// # Errors
    ///
    /// Returns [`HelicaseError::StuckEncoding`] when the constraints cannot
    /// carry the message forward; the error names the failing position.
    pub fn encode(&self, seed: u64, message: &BitString) -> Result<EncodedStrand, HelicaseError> {
        encode_message(seed, message, &self.constraints, &self.config)
    }

    /// Encode raw bytes, most-significant bit of each byte first.
    ///
    /// # Errors
    ///
    /// Same as [`Codec::encode`].
    pub fn encode_bytes(&self, seed: u64, bytes: &[u8]) -> Result<EncodedStrand, HelicaseError> {
        self.encode(seed, &BitString::from_bytes(bytes))
    }

    /// Decode a noisy read of `message_bits` worth of message.
    ///
    /// Never fails: exhaustion is reported inside the outcome with the best
    /// partial candidates found.
    #[must_use]
    pub fn decode(&self, seed: u64, read: &[Nucleotide], message_bits: usize) -> DecodeOutcome {
        decode_strand(seed, read, message_bits, &self.constraints, &self.config)
    }

    /// Parse and decode an ASCII read.
    ///
    /// # Errors
    ///
    /// Returns [`HelicaseError::InputFormat`] for any symbol outside
    /// {A, C, G, T} before any search work begins.
    pub fn decode_str(
        &self,
        seed: u64,
        read: &str,
        message_bits: usize,
    ) -> Result<DecodeOutcome, HelicaseError> {
        let read = parse_strand(read)?;
        Ok(self.decode(seed, &read, message_bits))
    }

    /// Encode a batch of strands in parallel, one worker per strand.
    ///
    /// # Errors
    ///
    /// Returns the first [`HelicaseError::StuckEncoding`] any strand hits.
    pub fn encode_batch(&self, jobs: &[EncodeJob]) -> Result<Vec<EncodedStrand>, HelicaseError> {
        if !self.config.quiet {
            eprintln!("Encoding {} strands...", jobs.len());
        }
        jobs.par_iter()
            .map(|(seed, message)| self.encode(*seed, message))
            .collect()
    }

    /// Decode a batch of reads in parallel, one worker per strand.
    #[must_use]
    pub fn decode_batch(&self, jobs: &[DecodeJob]) -> Vec<DecodeOutcome> {
        if !self.config.quiet {
            eprintln!("Decoding {} strands...", jobs.len());
        }
        jobs.par_iter()
            .map(|(seed, read, message_bits)| self.decode(*seed, read, *message_bits))
            .collect()
    }
}
