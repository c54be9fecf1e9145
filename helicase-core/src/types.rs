use std::fmt;

use thiserror::Error;

/// The four DNA bases in canonical order.
///
/// Used wherever an ordered walk over the alphabet is needed, e.g. when
/// ranking the members of an admissible set.
pub const NUCLEOTIDES: [Nucleotide; 4] = [
    Nucleotide::A,
    Nucleotide::C,
    Nucleotide::G,
    Nucleotide::T,
];

/// A single DNA base.
///
/// The canonical order A < C < G < T matters only for indexing into an
/// admissible set; no biological ordering is implied.
///
/// # Examples
///
/// ```rust
/// use helicase_core::types::Nucleotide;
///
/// let base = Nucleotide::G;
/// assert_eq!(base.to_index(), 2);
/// assert_eq!(Nucleotide::from_symbol(b'g'), Some(Nucleotide::G));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Nucleotide {
    /// Adenine
    A = 0,
    /// Cytosine
    C = 1,
    /// Guanine
    G = 2,
    /// Thymine
    T = 3,
}

impl Nucleotide {
    /// Convert to the canonical array index (A=0, C=1, G=2, T=3).
    #[must_use]
    pub const fn to_index(self) -> usize {
        self as usize
    }

    /// Convert a canonical index back to a base. Only the low two bits
    /// of `index` are significant.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        match index & 0b11 {
            0 => Self::A,
            1 => Self::C,
            2 => Self::G,
            _ => Self::T,
        }
    }

    /// Parse an ASCII symbol (case-insensitive). Returns `None` for
    /// anything outside {A, C, G, T}.
    #[must_use]
    pub const fn from_symbol(symbol: u8) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            b'A' => Some(Self::A),
            b'C' => Some(Self::C),
            b'G' => Some(Self::G),
            b'T' => Some(Self::T),
            _ => None,
        }
    }

    /// The ASCII symbol for this base.
    #[must_use]
    pub const fn to_symbol(self) -> u8 {
        match self {
            Self::A => b'A',
            Self::C => b'C',
            Self::G => b'G',
            Self::T => b'T',
        }
    }

    /// Whether this base contributes to GC content.
    #[must_use]
    pub const fn is_gc(self) -> bool {
        matches!(self, Self::G | Self::C)
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_symbol() as char)
    }
}

/// Error types that can occur while configuring or running the codec.
///
/// Decode exhaustion is deliberately not represented here: an exhausted
/// search returns a low-confidence [`DecodeOutcome`](crate::results::DecodeOutcome)
/// rather than an error, so the caller always receives the best candidates
/// found so far.
#[derive(Error, Debug)]
pub enum HelicaseError {
    /// Invalid or contradictory configuration, detected before any
    /// encode or decode runs.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    /// The admissible set emptied mid-encode, or the encoder stopped
    /// making progress on the message. Carries the failing strand
    /// position and the nucleotide history for diagnosis.
    #[error("Encoding stuck at strand position {position} (history \"{history}\")")]
    StuckEncoding {
        /// Strand position at which no nucleotide could be emitted.
        position: usize,
        /// The recent nucleotide history leading up to the failure.
        history: String,
    },
    /// A symbol outside {A, C, G, T} appeared in a strand read.
    #[error("Invalid nucleotide symbol '{symbol}' at position {position}")]
    InputFormat {
        /// The offending character.
        symbol: char,
        /// Byte offset of the symbol within the input.
        position: usize,
    },
}
