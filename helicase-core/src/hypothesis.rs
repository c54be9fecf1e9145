//! Search-tree nodes and the alignment cost model.
//!
//! The decoder's tree lives in an index-addressed arena: nodes reference
//! their parent by index, are written once at creation, and are never
//! rewritten apart from lifecycle bookkeeping. Traceback is a plain walk up
//! parent indices, so completed decodings can be reconstructed without any
//! pointer chasing or ownership cycles.

use crate::bits::BitString;
use crate::config::CodecConfig;
use crate::constraints::HistoryWindow;

/// Lifecycle of a hypothesis in the decode search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HypothesisState {
    /// In the frontier, eligible for expansion.
    #[default]
    Active,
    /// Expanded; its children carry the search forward.
    Expanded,
    /// Explained the whole read with the expected number of message bits.
    Completed,
    /// Pruned: constraint violation or no way forward.
    Dead,
}

/// One candidate partial decoding.
///
/// `step_width`/`step_value` record the message bits this node's creation
/// consumed (zero for forced positions and insertion steps); traceback
/// concatenates them root-to-leaf to recover the full message.
#[derive(Debug, Clone, Copy)]
pub struct Hypothesis {
    /// Arena index of the parent; `None` for the root.
    pub parent: Option<usize>,
    /// Emission positions accounted for on the clean strand.
    pub strand_position: u32,
    /// Read symbols consumed so far.
    pub read_position: u32,
    /// Message bits decoded so far.
    pub bit_count: u32,
    /// Bits consumed by this step (0 to 2).
    pub step_width: u8,
    /// Value of the bits consumed by this step.
    pub step_value: u8,
    /// Rolling trailing-message-bit value fed to the keystream.
    pub prior_bits: u64,
    /// Recent emitted nucleotides, as the constraint engine sees them.
    pub history: HistoryWindow,
    /// Accumulated alignment cost; never less than the parent's.
    pub cost: f64,
    /// Lifecycle state.
    pub state: HypothesisState,
}

impl Hypothesis {
    /// The root of a decode: empty history, zero cost, Active.
    #[must_use]
    pub fn root(lookback: usize) -> Self {
        Self {
            parent: None,
            strand_position: 0,
            read_position: 0,
            bit_count: 0,
            step_width: 0,
            step_value: 0,
            prior_bits: 0,
            history: HistoryWindow::new(lookback),
            cost: 0.0,
            state: HypothesisState::Active,
        }
    }
}

/// Arena of hypothesis nodes addressed by index.
#[derive(Debug, Default)]
pub struct HypothesisArena {
    nodes: Vec<Hypothesis>,
}

impl HypothesisArena {
    /// An empty arena with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Store a node, returning its index.
    pub fn push(&mut self, hypothesis: Hypothesis) -> usize {
        self.nodes.push(hypothesis);
        self.nodes.len() - 1
    }

    /// The node at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> &Hypothesis {
        &self.nodes[index]
    }

    /// Number of nodes allocated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Lifecycle bookkeeping; the only mutation a stored node ever sees.
    pub fn set_state(&mut self, index: usize, state: HypothesisState) {
        self.nodes[index].state = state;
    }

    /// Reconstruct the message bits decoded along the path to `index`.
    #[must_use]
    pub fn traceback_bits(&self, index: usize) -> BitString {
        let mut steps = Vec::new();
        let mut cursor = Some(index);
        while let Some(node_index) = cursor {
            let node = &self.nodes[node_index];
            if node.step_width > 0 {
                steps.push((node.step_width, node.step_value));
            }
            cursor = node.parent;
        }

        let mut bits = BitString::with_capacity(self.nodes[index].bit_count as usize);
        for (width, value) in steps.iter().rev() {
            for shift in (0..*width).rev() {
                bits.push((value >> shift) & 1);
            }
        }
        bits
    }
}

/// Alignment cost weights applied during hypothesis expansion.
///
/// All weights are non-negative (validated with the rest of the
/// configuration), which keeps cost monotone along every path and makes the
/// first completed hypothesis popped from the frontier optimal.
#[derive(Debug, Clone, Copy)]
pub struct CostModel {
    /// Added when a read symbol matches the expected emission.
    pub match_cost: f64,
    /// Added when a read symbol is explained as a substitution.
    pub substitution: f64,
    /// Added when a read symbol is explained as spurious.
    pub insertion: f64,
    /// Added when an expected emission is missing from the read.
    pub deletion: f64,
}

impl CostModel {
    /// Extract the weights from a validated configuration.
    #[must_use]
    pub const fn from_config(config: &CodecConfig) -> Self {
        Self {
            match_cost: config.match_cost,
            substitution: config.substitution_penalty,
            insertion: config.insertion_penalty,
            deletion: config.deletion_penalty,
        }
    }
}
