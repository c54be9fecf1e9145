//! Local biochemical constraints and admissible-set computation.
//!
//! A [`ConstraintSet`] answers one question at every emission position: given
//! the last few nucleotides, which bases may legally come next? The answer,
//! an [`AdmissibleSet`], floats between one and four members as the history
//! changes, and the encoder and decoder call the same code so they always
//! agree on it.
//!
//! Constraints compose by conjunction: a base is admissible only if every
//! active predicate accepts it.

use std::fmt;

use crate::constants::MAX_HISTORY_WINDOW;
use crate::strand::parse_strand;
use crate::types::{HelicaseError, Nucleotide, NUCLEOTIDES};

/// GC-content bounds over a sliding window of emitted nucleotides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GcWindow {
    /// Window length in nucleotides; enforced once a full window exists.
    pub size: usize,
    /// Minimum GC fraction, inclusive.
    pub low: f64,
    /// Maximum GC fraction, inclusive.
    pub high: f64,
}

/// Named constraint parameters, validated into a [`ConstraintSet`].
///
/// # Examples
///
/// ```rust
/// use helicase_core::constraints::{ConstraintSet, ConstraintSpec, GcWindow};
///
/// let spec = ConstraintSpec {
///     max_homopolymer: Some(3),
///     gc_window: Some(GcWindow { size: 12, low: 0.4, high: 0.6 }),
///     excluded_motifs: vec!["GGC".to_string()],
/// };
/// let constraints = ConstraintSet::new(spec)?;
/// assert_eq!(constraints.max_lookback(), 11);
/// # Ok::<(), helicase_core::types::HelicaseError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConstraintSpec {
    /// Longest permitted run of one base; `None` disables the check.
    pub max_homopolymer: Option<usize>,
    /// Sliding-window GC bounds; `None` disables the check.
    pub gc_window: Option<GcWindow>,
    /// Subsequences that must never appear in a strand (ASCII, {A,C,G,T}).
    pub excluded_motifs: Vec<String>,
}

impl ConstraintSpec {
    /// The standard synthesis profile: homopolymer runs capped at three and
    /// windowed GC content held between 40% and 60%.
    #[must_use]
    pub fn standard() -> Self {
        use crate::constants::{
            DEFAULT_GC_HIGH, DEFAULT_GC_LOW, DEFAULT_GC_WINDOW_SIZE, DEFAULT_MAX_HOMOPOLYMER,
        };
        Self {
            max_homopolymer: Some(DEFAULT_MAX_HOMOPOLYMER),
            gc_window: Some(GcWindow {
                size: DEFAULT_GC_WINDOW_SIZE,
                low: DEFAULT_GC_LOW,
                high: DEFAULT_GC_HIGH,
            }),
            excluded_motifs: Vec::new(),
        }
    }
}

/// A validated, immutable conjunction of local constraints.
///
/// Safe to share across concurrent strand workers: construction is the only
/// mutation it ever sees.
#[derive(Debug, Clone)]
pub struct ConstraintSet {
    max_homopolymer: Option<usize>,
    gc_window: Option<GcWindow>,
    excluded_motifs: Vec<Vec<Nucleotide>>,
    max_lookback: usize,
}

impl ConstraintSet {
    /// Validate a spec into a usable constraint set.
    ///
    /// # Errors
    ///
    /// Returns [`HelicaseError::Configuration`] for out-of-range parameters
    /// (zero-length runs or motifs, inverted or non-finite GC bounds, motifs
    /// that ban the whole alphabet, lookbacks beyond the window cap) and
    /// [`HelicaseError::InputFormat`] for motif symbols outside {A,C,G,T}.
    pub fn new(spec: ConstraintSpec) -> Result<Self, HelicaseError> {
        if let Some(limit) = spec.max_homopolymer {
            if limit == 0 {
                return Err(HelicaseError::Configuration(
                    "max_homopolymer must be at least 1".to_string(),
                ));
            }
        }

        if let Some(window) = spec.gc_window {
            if window.size < 2 {
                return Err(HelicaseError::Configuration(format!(
                    "gc_window size must be at least 2, got {}",
                    window.size
                )));
            }
            if !(0.0..=1.0).contains(&window.low) || !(0.0..=1.0).contains(&window.high) {
                return Err(HelicaseError::Configuration(format!(
                    "gc_window bounds must lie in [0, 1], got [{}, {}]",
                    window.low, window.high
                )));
            }
            if window.low > window.high {
                return Err(HelicaseError::Configuration(format!(
                    "gc_window bounds are inverted: [{}, {}]",
                    window.low, window.high
                )));
            }
        }

        let mut excluded_motifs = Vec::with_capacity(spec.excluded_motifs.len());
        let mut banned_bases = [false; 4];
        for motif in &spec.excluded_motifs {
            if motif.is_empty() {
                return Err(HelicaseError::Configuration(
                    "excluded motifs must not be empty".to_string(),
                ));
            }
            let parsed = parse_strand(motif)?;
            if parsed.len() == 1 {
                banned_bases[parsed[0].to_index()] = true;
            }
            excluded_motifs.push(parsed);
        }
        if banned_bases.iter().all(|&banned| banned) {
            return Err(HelicaseError::Configuration(
                "excluded motifs ban every nucleotide".to_string(),
            ));
        }

        let mut max_lookback = 0usize;
        if let Some(limit) = spec.max_homopolymer {
            max_lookback = max_lookback.max(limit);
        }
        if let Some(window) = spec.gc_window {
            max_lookback = max_lookback.max(window.size - 1);
        }
        for motif in &excluded_motifs {
            max_lookback = max_lookback.max(motif.len() - 1);
        }
        if max_lookback > MAX_HISTORY_WINDOW {
            return Err(HelicaseError::Configuration(format!(
                "constraints need a lookback of {} nucleotides (maximum {})",
                max_lookback, MAX_HISTORY_WINDOW
            )));
        }

        Ok(Self {
            max_homopolymer: spec.max_homopolymer,
            gc_window: spec.gc_window,
            excluded_motifs,
            max_lookback,
        })
    }

    /// A constraint set that admits every base at every position.
    #[must_use]
    pub const fn unconstrained() -> Self {
        Self {
            max_homopolymer: None,
            gc_window: None,
            excluded_motifs: Vec::new(),
            max_lookback: 0,
        }
    }

    /// The longest history any active predicate inspects.
    #[must_use]
    pub const fn max_lookback(&self) -> usize {
        self.max_lookback
    }

    /// The bases that may legally follow `history`.
    ///
    /// May be empty for histories an encoder can never produce; the encoder
    /// treats that as a fatal stuck state, the decoder as a dead hypothesis.
    #[must_use]
    pub fn admissible(&self, history: &HistoryWindow) -> AdmissibleSet {
        let mut set = AdmissibleSet::empty();
        for nucleotide in NUCLEOTIDES {
            if self.permits(history, nucleotide) {
                set.insert(nucleotide);
            }
        }
        set
    }

    fn permits(&self, history: &HistoryWindow, candidate: Nucleotide) -> bool {
        if let Some(limit) = self.max_homopolymer {
            if history.trailing_run(candidate) + 1 > limit {
                return false;
            }
        }

        if let Some(window) = self.gc_window {
            if history.len() + 1 >= window.size {
                let tail = history.tail(window.size - 1);
                let gc = tail.iter().filter(|nucleotide| nucleotide.is_gc()).count()
                    + usize::from(candidate.is_gc());
                let fraction = gc as f64 / window.size as f64;
                if fraction < window.low || fraction > window.high {
                    return false;
                }
            }
        }

        for motif in &self.excluded_motifs {
            let tail_len = motif.len() - 1;
            if history.len() < tail_len {
                continue;
            }
            if motif[tail_len] == candidate && history.tail(tail_len) == &motif[..tail_len] {
                return false;
            }
        }

        true
    }
}

/// The last few nucleotides of a strand, oldest first.
///
/// Fixed capacity and `Copy`, so every decode hypothesis can carry its own
/// window without allocation. Pushing beyond capacity drops the oldest entry.
#[derive(Debug, Clone, Copy)]
pub struct HistoryWindow {
    nucleotides: [Nucleotide; MAX_HISTORY_WINDOW],
    len: u8,
    capacity: u8,
}

impl HistoryWindow {
    /// An empty window retaining at most `capacity` nucleotides.
    ///
    /// `capacity` comes from [`ConstraintSet::max_lookback`] and is therefore
    /// already known to fit [`MAX_HISTORY_WINDOW`].
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity <= MAX_HISTORY_WINDOW);
        Self {
            nucleotides: [Nucleotide::A; MAX_HISTORY_WINDOW],
            len: 0,
            capacity: capacity.min(MAX_HISTORY_WINDOW) as u8,
        }
    }

    /// Record an emitted nucleotide, evicting the oldest when full.
    pub fn push(&mut self, nucleotide: Nucleotide) {
        let capacity = self.capacity as usize;
        if capacity == 0 {
            return;
        }
        let len = self.len as usize;
        if len < capacity {
            self.nucleotides[len] = nucleotide;
            self.len += 1;
        } else {
            self.nucleotides.copy_within(1..len, 0);
            self.nucleotides[len - 1] = nucleotide;
        }
    }

    /// Number of nucleotides currently held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the window holds nothing yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The window contents, oldest first.
    #[must_use]
    pub fn as_slice(&self) -> &[Nucleotide] {
        &self.nucleotides[..self.len as usize]
    }

    /// The most recent `count` nucleotides (all of them if fewer are held).
    #[must_use]
    pub fn tail(&self, count: usize) -> &[Nucleotide] {
        let len = self.len as usize;
        &self.nucleotides[len.saturating_sub(count)..len]
    }

    /// Length of the trailing run of `nucleotide`.
    #[must_use]
    pub fn trailing_run(&self, nucleotide: Nucleotide) -> usize {
        self.as_slice()
            .iter()
            .rev()
            .take_while(|&&held| held == nucleotide)
            .count()
    }
}

impl fmt::Display for HistoryWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for nucleotide in self.as_slice() {
            write!(f, "{}", nucleotide)?;
        }
        Ok(())
    }
}

/// A subset of {A, C, G, T}, ranked in canonical base order.
///
/// The rank of a member (its position in A < C < G < T order restricted to
/// the set) is what the variable-radix mapper indexes by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissibleSet(u8);

impl AdmissibleSet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// The full alphabet.
    #[must_use]
    pub const fn full() -> Self {
        Self(0b1111)
    }

    /// Add a base.
    pub fn insert(&mut self, nucleotide: Nucleotide) {
        self.0 |= 1 << nucleotide.to_index();
    }

    /// Membership test.
    #[must_use]
    pub const fn contains(self, nucleotide: Nucleotide) -> bool {
        self.0 & (1 << nucleotide.to_index()) != 0
    }

    /// Number of members (0 to 4).
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set has no members.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The member with rank `index`, in canonical order.
    #[must_use]
    pub fn nth(self, index: usize) -> Option<Nucleotide> {
        let mut seen = 0usize;
        for nucleotide in NUCLEOTIDES {
            if self.contains(nucleotide) {
                if seen == index {
                    return Some(nucleotide);
                }
                seen += 1;
            }
        }
        None
    }

    /// The rank of a member, or `None` if absent.
    #[must_use]
    pub const fn index_of(self, nucleotide: Nucleotide) -> Option<usize> {
        if !self.contains(nucleotide) {
            return None;
        }
        let below = self.0 & ((1 << nucleotide.to_index()) - 1);
        Some(below.count_ones() as usize)
    }

    /// Iterate members in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Nucleotide> {
        NUCLEOTIDES
            .into_iter()
            .filter(move |nucleotide| self.contains(*nucleotide))
    }
}
