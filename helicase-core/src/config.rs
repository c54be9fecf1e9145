use crate::constants::{
    DEFAULT_DELETION_PENALTY, DEFAULT_HISTORY_BITS, DEFAULT_INSERTION_PENALTY, DEFAULT_MATCH_COST,
    DEFAULT_MAX_CANDIDATES, DEFAULT_MAX_HYPOTHESES, DEFAULT_POSITION_BITS, DEFAULT_SALT_BITS,
    DEFAULT_SUBSTITUTION_PENALTY, SELECTOR_INPUT_BITS,
};
use crate::types::HelicaseError;

/// Configuration settings for strand encoding and decoding.
///
/// This struct controls the keystream geometry, the alignment cost model used
/// by the decoder, and the resource bounds of the decode search. All values
/// are validated once, when a [`Codec`](crate::engine::Codec) is built;
/// nothing fails later because of a bad knob.
///
/// # Examples
///
/// ## Default configuration
///
/// ```rust
/// use helicase_core::config::CodecConfig;
///
/// let config = CodecConfig::default();
/// assert_eq!(config.max_candidates, 1);
/// ```
///
/// ## Wider search for noisier reads
///
/// ```rust
/// use helicase_core::config::CodecConfig;
///
/// let config = CodecConfig {
///     max_hypotheses: 4_000_000,
///     max_candidates: 4,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Number of strand-seed bits mixed into every selector.
    ///
    /// Seeds wider than this alias onto the same keystream.
    ///
    /// **Default**: `46`
    pub salt_bits: u32,

    /// Number of low-order strand-position bits mixed into every selector.
    ///
    /// **Default**: `10`
    pub position_bits: u32,

    /// Number of trailing message bits mixed into every selector.
    ///
    /// Couples each emission to the recent message content, so a wrong bit
    /// guess in the decoder quickly decorrelates from the read.
    ///
    /// **Default**: `8`
    pub history_bits: u32,

    /// Cost added when a hypothesis explains a read symbol as correct.
    ///
    /// Must be non-negative: child hypotheses may never become cheaper than
    /// their parent, or the best-first search loses its optimality guarantee.
    ///
    /// **Default**: `0.0`
    pub match_cost: f64,

    /// Penalty for explaining a read symbol as a substitution.
    ///
    /// **Default**: `1.0`
    pub substitution_penalty: f64,

    /// Penalty for explaining a read symbol as a spurious insertion.
    ///
    /// **Default**: `1.0`
    pub insertion_penalty: f64,

    /// Penalty for assuming a strand symbol is missing from the read.
    ///
    /// **Default**: `1.0`
    pub deletion_penalty: f64,

    /// Ceiling on the number of hypotheses one decode may allocate.
    ///
    /// When the arena fills, the search stops and returns the best
    /// candidates found so far.
    ///
    /// **Default**: `1_000_000`
    pub max_hypotheses: usize,

    /// Absolute cost bound; hypotheses above it are dropped.
    ///
    /// **Default**: `None` (no bound)
    pub cost_cutoff: Option<f64>,

    /// Maximum number of frontier expansions before the decoder returns
    /// best-so-far results. A budget of zero returns immediately.
    ///
    /// **Default**: `None` (unbounded)
    pub step_budget: Option<u64>,

    /// Maximum number of ranked candidates a decode returns.
    ///
    /// **Default**: `1`
    pub max_candidates: usize,

    /// Number of threads for batch encode/decode.
    ///
    /// When set, configures the global Rayon thread pool. Set to `None`
    /// for automatic detection.
    ///
    /// **Default**: `None`
    pub num_threads: Option<usize>,

    /// Suppress informational output during batch processing.
    ///
    /// **Default**: `false`
    pub quiet: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            salt_bits: DEFAULT_SALT_BITS,
            position_bits: DEFAULT_POSITION_BITS,
            history_bits: DEFAULT_HISTORY_BITS,
            match_cost: DEFAULT_MATCH_COST,
            substitution_penalty: DEFAULT_SUBSTITUTION_PENALTY,
            insertion_penalty: DEFAULT_INSERTION_PENALTY,
            deletion_penalty: DEFAULT_DELETION_PENALTY,
            max_hypotheses: DEFAULT_MAX_HYPOTHESES,
            cost_cutoff: None,
            step_budget: None,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            num_threads: None,
            quiet: false,
        }
    }
}

impl CodecConfig {
    /// Check every knob, reporting the first contradiction found.
    ///
    /// # Errors
    ///
    /// Returns [`HelicaseError::Configuration`] describing the offending
    /// field.
    pub fn validate(&self) -> Result<(), HelicaseError> {
        for (name, bits) in [
            ("salt_bits", self.salt_bits),
            ("position_bits", self.position_bits),
            ("history_bits", self.history_bits),
        ] {
            if bits == 0 {
                return Err(HelicaseError::Configuration(format!(
                    "{} must be at least 1",
                    name
                )));
            }
        }
        let total_bits = self.salt_bits + self.position_bits + self.history_bits;
        if total_bits > SELECTOR_INPUT_BITS {
            return Err(HelicaseError::Configuration(format!(
                "selector field widths sum to {} bits (maximum {})",
                total_bits, SELECTOR_INPUT_BITS
            )));
        }

        if !self.match_cost.is_finite() || self.match_cost < 0.0 {
            return Err(HelicaseError::Configuration(format!(
                "match_cost must be finite and non-negative, got {}",
                self.match_cost
            )));
        }
        for (name, penalty) in [
            ("substitution_penalty", self.substitution_penalty),
            ("insertion_penalty", self.insertion_penalty),
            ("deletion_penalty", self.deletion_penalty),
        ] {
            if !penalty.is_finite() || penalty <= 0.0 {
                return Err(HelicaseError::Configuration(format!(
                    "{} must be finite and positive, got {}",
                    name, penalty
                )));
            }
        }

        if let Some(cutoff) = self.cost_cutoff {
            if !cutoff.is_finite() || cutoff < 0.0 {
                return Err(HelicaseError::Configuration(format!(
                    "cost_cutoff must be finite and non-negative, got {}",
                    cutoff
                )));
            }
        }
        if self.max_hypotheses == 0 {
            return Err(HelicaseError::Configuration(
                "max_hypotheses must be at least 1".to_string(),
            ));
        }
        if self.max_candidates == 0 {
            return Err(HelicaseError::Configuration(
                "max_candidates must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
