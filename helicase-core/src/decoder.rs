//! Best-first recovery of a message from a noisy strand read.
//!
//! The decoder grows a tree of [`Hypothesis`] nodes, each one explaining a
//! prefix of the read as some mix of correct, substituted, inserted, and
//! deleted symbols. A cost-ordered frontier expands the cheapest explanation
//! first; because every expansion step adds a non-negative cost, the first
//! hypothesis that accounts for the whole read with the expected number of
//! message bits is the optimal decoding.
//!
//! Fan-out per expansion is not fixed: each alignment case splits further
//! into one child per legal bit value at the current position, and the number
//! of legal values floats with the admissible-set size.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::config::CodecConfig;
use crate::constraints::ConstraintSet;
use crate::hypothesis::{CostModel, Hypothesis, HypothesisArena, HypothesisState};
use crate::keystream::KeystreamGenerator;
use crate::mapper::{bits_per_symbol, map_symbol, unmap_symbol};
use crate::results::{DecodeOutcome, DecodedCandidate};
use crate::types::Nucleotide;

/// Frontier entry ordered for a min-heap: lowest cost pops first, ties going
/// to the deeper decoding, then to the older node for determinism.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    cost: f64,
    bit_count: u32,
    index: usize,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| self.bit_count.cmp(&other.bit_count))
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Decode a noisy read back into message bits.
///
/// `message_bits` is the expected message length; the caller knows it from
/// the strand layout. The read must already be validated nucleotides;
/// [`parse_strand`](crate::strand::parse_strand) rejects malformed text
/// before this runs.
///
/// Never fails: an unproductive search returns a [`DecodeOutcome`] with
/// `exhausted` set and the best partial candidates found, so pathologically
/// noisy reads cost bounded time and still report what was recovered.
pub fn decode_strand(
    seed: u64,
    read: &[Nucleotide],
    message_bits: usize,
    constraints: &ConstraintSet,
    config: &CodecConfig,
) -> DecodeOutcome {
    let keystream = KeystreamGenerator::new(seed, config);
    let costs = CostModel::from_config(config);
    let mut arena = HypothesisArena::with_capacity(config.max_hypotheses.min(4096));
    let mut frontier = BinaryHeap::new();

    let root = arena.push(Hypothesis::root(constraints.max_lookback()));
    frontier.push(FrontierEntry {
        cost: 0.0,
        bit_count: 0,
        index: root,
    });

    let mut completed: Vec<usize> = Vec::new();
    let mut best_leaf: Option<usize> = None;
    let mut steps = 0u64;

    loop {
        if completed.len() >= config.max_candidates {
            break;
        }
        if let Some(budget) = config.step_budget {
            if steps >= budget {
                break;
            }
        }
        if arena.len() >= config.max_hypotheses {
            break;
        }
        let Some(entry) = frontier.pop() else {
            break;
        };

        let node = *arena.get(entry.index);
        if node.read_position as usize == read.len() && node.bit_count as usize == message_bits {
            arena.set_state(entry.index, HypothesisState::Completed);
            completed.push(entry.index);
            continue;
        }

        steps += 1;
        track_best_leaf(&arena, &mut best_leaf, entry.index);
        expand(
            &mut arena,
            &mut frontier,
            entry.index,
            read,
            message_bits,
            constraints,
            &keystream,
            &costs,
            config,
        );
    }

    let exhausted = completed.is_empty();
    let mut candidates: Vec<DecodedCandidate> = Vec::with_capacity(config.max_candidates);
    for index in completed {
        push_candidate(&mut candidates, &arena, index, message_bits, read.len());
    }

    if candidates.is_empty() {
        // Best-effort salvage: surface the cheapest surviving explanations.
        while candidates.len() < config.max_candidates {
            let Some(entry) = frontier.pop() else {
                break;
            };
            push_candidate(&mut candidates, &arena, entry.index, message_bits, read.len());
        }
        if candidates.is_empty() {
            if let Some(index) = best_leaf {
                push_candidate(&mut candidates, &arena, index, message_bits, read.len());
            }
        }
    }

    DecodeOutcome {
        candidates,
        exhausted,
        steps_taken: steps,
        hypotheses_allocated: arena.len(),
    }
}

/// Remember the deepest (then cheapest) node seen, for exhausted salvage.
fn track_best_leaf(arena: &HypothesisArena, best: &mut Option<usize>, index: usize) {
    let node = arena.get(index);
    let better = match best {
        None => true,
        Some(current) => {
            let held = arena.get(*current);
            node.bit_count > held.bit_count
                || (node.bit_count == held.bit_count && node.cost < held.cost)
        }
    };
    if better {
        *best = Some(index);
    }
}

fn push_candidate(
    candidates: &mut Vec<DecodedCandidate>,
    arena: &HypothesisArena,
    index: usize,
    message_bits: usize,
    read_len: usize,
) {
    let node = arena.get(index);
    let bits = arena.traceback_bits(index);
    if candidates.iter().any(|candidate| candidate.bits == bits) {
        return;
    }
    candidates.push(DecodedCandidate {
        bits,
        cost: node.cost,
        exact_length: node.bit_count as usize == message_bits
            && node.read_position as usize == read_len,
    });
}

/// Expand one Active hypothesis into its children.
///
/// Children enumerate every plausible explanation of the next read symbol:
/// for each legal bit value, a match-or-substitution child (consumes a read
/// symbol) and a deletion child (does not); plus a single insertion child
/// that discards the read symbol outright. The parent leaves the frontier as
/// Expanded, or Dead when the admissible set offers no way forward.
#[allow(clippy::too_many_arguments)]
fn expand(
    arena: &mut HypothesisArena,
    frontier: &mut BinaryHeap<FrontierEntry>,
    parent_index: usize,
    read: &[Nucleotide],
    message_bits: usize,
    constraints: &ConstraintSet,
    keystream: &KeystreamGenerator,
    costs: &CostModel,
    config: &CodecConfig,
) {
    let parent = *arena.get(parent_index);
    let remaining = message_bits - parent.bit_count as usize;
    let observed = read.get(parent.read_position as usize).copied();
    let mut expanded_any = false;

    if remaining > 0 {
        let set = constraints.admissible(&parent.history);
        if set.is_empty() {
            arena.set_state(parent_index, HypothesisState::Dead);
            return;
        }

        let selector = keystream.selector(parent.strand_position as usize, parent.prior_bits);
        let width = bits_per_symbol(set.len());
        let effective = width.min(remaining);
        let matched_value = observed.and_then(|symbol| unmap_symbol(selector, set, symbol));

        for value in 0..(1u64 << effective) {
            let Some(emitted) = map_symbol(selector, set, value) else {
                continue;
            };
            let mut history = parent.history;
            history.push(emitted);
            let prior_bits = keystream.advance_history(parent.prior_bits, value, effective);
            let step = Hypothesis {
                parent: Some(parent_index),
                strand_position: parent.strand_position + 1,
                read_position: parent.read_position,
                bit_count: parent.bit_count + effective as u32,
                step_width: effective as u8,
                step_value: value as u8,
                prior_bits,
                history,
                cost: parent.cost,
                state: HypothesisState::Active,
            };

            if observed.is_some() {
                let delta = if matched_value == Some(value) {
                    costs.match_cost
                } else {
                    costs.substitution
                };
                expanded_any |= push_child(
                    arena,
                    frontier,
                    Hypothesis {
                        read_position: parent.read_position + 1,
                        cost: parent.cost + delta,
                        ..step
                    },
                    config,
                );
            }

            expanded_any |= push_child(
                arena,
                frontier,
                Hypothesis {
                    cost: parent.cost + costs.deletion,
                    ..step
                },
                config,
            );
        }
    }

    if observed.is_some() {
        expanded_any |= push_child(
            arena,
            frontier,
            Hypothesis {
                parent: Some(parent_index),
                read_position: parent.read_position + 1,
                step_width: 0,
                step_value: 0,
                cost: parent.cost + costs.insertion,
                state: HypothesisState::Active,
                ..parent
            },
            config,
        );
    }

    let state = if expanded_any {
        HypothesisState::Expanded
    } else {
        HypothesisState::Dead
    };
    arena.set_state(parent_index, state);
}

/// Admit a child to the arena and frontier, honoring the search bounds.
fn push_child(
    arena: &mut HypothesisArena,
    frontier: &mut BinaryHeap<FrontierEntry>,
    child: Hypothesis,
    config: &CodecConfig,
) -> bool {
    if arena.len() >= config.max_hypotheses {
        return false;
    }
    if let Some(cutoff) = config.cost_cutoff {
        if child.cost > cutoff {
            return false;
        }
    }
    let cost = child.cost;
    let bit_count = child.bit_count;
    let index = arena.push(child);
    frontier.push(FrontierEntry {
        cost,
        bit_count,
        index,
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::BitString;
    use crate::constraints::ConstraintSpec;
    use crate::encoder::encode_message;

    fn standard_constraints() -> ConstraintSet {
        ConstraintSet::new(ConstraintSpec::standard()).unwrap()
    }

    #[test]
    fn test_frontier_orders_by_cost_then_depth() {
        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierEntry { cost: 2.0, bit_count: 4, index: 0 });
        frontier.push(FrontierEntry { cost: 0.0, bit_count: 1, index: 1 });
        frontier.push(FrontierEntry { cost: 0.0, bit_count: 6, index: 2 });
        frontier.push(FrontierEntry { cost: 1.0, bit_count: 9, index: 3 });

        let order: Vec<usize> = std::iter::from_fn(|| frontier.pop().map(|e| e.index)).collect();
        assert_eq!(order, vec![2, 1, 3, 0]);
    }

    #[test]
    fn test_clean_read_decodes_at_zero_cost() {
        let constraints = standard_constraints();
        let config = CodecConfig::default();
        let message = BitString::from_bytes(&[0x3C, 0x7A]);
        let strand = encode_message(21, &message, &constraints, &config).unwrap();

        let outcome = decode_strand(21, &strand.nucleotides, message.len(), &constraints, &config);

        assert!(!outcome.exhausted);
        let best = outcome.best().unwrap();
        assert_eq!(best.bits, message);
        assert_eq!(best.cost, 0.0);
        assert!(best.exact_length);
    }

    #[test]
    fn test_zero_step_budget_returns_immediately() {
        let constraints = standard_constraints();
        let config = CodecConfig {
            step_budget: Some(0),
            ..Default::default()
        };
        let message = BitString::from_bytes(&[0xAA]);
        let strand = encode_message(1, &message, &constraints, &CodecConfig::default()).unwrap();

        let outcome = decode_strand(1, &strand.nucleotides, message.len(), &constraints, &config);

        assert!(outcome.exhausted);
        assert_eq!(outcome.steps_taken, 0);
        assert_eq!(outcome.hypotheses_allocated, 1);
        let best = outcome.best().unwrap();
        assert!(best.bits.is_empty());
        assert!(!best.exact_length);
    }

    #[test]
    fn test_children_never_cheaper_than_parent() {
        let constraints = standard_constraints();
        let config = CodecConfig::default();
        let keystream = KeystreamGenerator::new(13, &config);
        let costs = CostModel::from_config(&config);
        let read = encode_message(
            13,
            &BitString::from_bytes(&[0x5E]),
            &constraints,
            &config,
        )
        .unwrap()
        .nucleotides;

        let mut arena = HypothesisArena::default();
        let mut frontier = BinaryHeap::new();
        let root = arena.push(Hypothesis::root(constraints.max_lookback()));

        expand(
            &mut arena,
            &mut frontier,
            root,
            &read,
            8,
            &constraints,
            &keystream,
            &costs,
            &config,
        );

        assert!(arena.len() > 1);
        assert_eq!(arena.get(root).state, HypothesisState::Expanded);
        while let Some(entry) = frontier.pop() {
            assert!(entry.cost >= arena.get(root).cost);
            assert!(arena.get(entry.index).parent == Some(root));
        }
    }

    #[test]
    fn test_fanout_tracks_admissible_width() {
        // Unconstrained root position: four bit values, each yielding a
        // match-or-substitution child and a deletion child, plus one
        // insertion child.
        let constraints = ConstraintSet::unconstrained();
        let config = CodecConfig::default();
        let keystream = KeystreamGenerator::new(0, &config);
        let costs = CostModel::from_config(&config);
        let read = vec![Nucleotide::A, Nucleotide::C];

        let mut arena = HypothesisArena::default();
        let mut frontier = BinaryHeap::new();
        let root = arena.push(Hypothesis::root(0));

        expand(
            &mut arena,
            &mut frontier,
            root,
            &read,
            8,
            &constraints,
            &keystream,
            &costs,
            &config,
        );

        assert_eq!(arena.len(), 1 + 4 * 2 + 1);
    }

    #[test]
    fn test_truncated_read_completed_via_deletions() {
        let constraints = standard_constraints();
        let config = CodecConfig::default();
        let message = BitString::from_bytes(&[0x91, 0x4D, 0xE2]);
        let strand = encode_message(30, &message, &constraints, &config).unwrap();

        // Drop the final two symbols; the decoder must bridge them. The bits
        // carried by the missing positions are unobservable, so only the
        // prefix covered by the read is checked.
        let read = &strand.nucleotides[..strand.nucleotides.len() - 2];
        let outcome = decode_strand(30, read, message.len(), &constraints, &config);

        assert!(!outcome.exhausted);
        let best = outcome.best().unwrap();
        assert!(best.exact_length);
        assert_eq!(best.bits.len(), message.len());
        assert!((best.cost - 2.0 * config.deletion_penalty).abs() < 1e-9);
        for index in 0..message.len() - 4 {
            assert_eq!(best.bits.get(index), message.get(index), "bit {}", index);
        }
    }

    #[test]
    fn test_dead_end_read_reports_exhaustion() {
        // Constraints that block every second emission: nothing can complete.
        let mut motifs = Vec::new();
        for first in ["A", "C", "G", "T"] {
            for second in ["A", "C", "G", "T"] {
                if first != second {
                    motifs.push(format!("{}{}", first, second));
                }
            }
        }
        let constraints = ConstraintSet::new(ConstraintSpec {
            max_homopolymer: Some(1),
            excluded_motifs: motifs,
            ..Default::default()
        })
        .unwrap();
        let config = CodecConfig::default();
        let read = vec![Nucleotide::G, Nucleotide::T, Nucleotide::A];

        let outcome = decode_strand(2, &read, 8, &constraints, &config);

        assert!(outcome.exhausted);
        // The salvage candidate is a partial decoding, flagged as such.
        let best = outcome.best().unwrap();
        assert!(!best.exact_length);
        assert!(best.bits.len() < 8);
    }

    #[test]
    fn test_trailing_garbage_absorbed_as_insertions() {
        let constraints = standard_constraints();
        let config = CodecConfig::default();
        let message = BitString::from_bytes(&[0x42]);
        let strand = encode_message(17, &message, &constraints, &config).unwrap();

        let mut read = strand.nucleotides.clone();
        read.push(Nucleotide::G);

        let outcome = decode_strand(17, &read, message.len(), &constraints, &config);

        assert!(!outcome.exhausted);
        let best = outcome.best().unwrap();
        assert_eq!(best.bits, message);
        assert!(best.cost >= config.insertion_penalty - 1e-9);
    }

    #[test]
    fn test_candidate_cap_respected() {
        let constraints = standard_constraints();
        let config = CodecConfig {
            max_candidates: 3,
            ..Default::default()
        };
        let message = BitString::from_bytes(&[0x77]);
        let strand = encode_message(6, &message, &constraints, &CodecConfig::default()).unwrap();

        let outcome = decode_strand(6, &strand.nucleotides, message.len(), &constraints, &config);

        assert!(!outcome.exhausted);
        assert!(outcome.candidates.len() <= 3);
        assert_eq!(outcome.candidates[0].bits, message);
        for pair in outcome.candidates.windows(2) {
            assert!(pair[0].cost <= pair[1].cost);
        }
    }

    #[test]
    fn test_empty_read_empty_message_completes() {
        let constraints = standard_constraints();
        let config = CodecConfig::default();
        let outcome = decode_strand(0, &[], 0, &constraints, &config);

        assert!(!outcome.exhausted);
        let best = outcome.best().unwrap();
        assert!(best.bits.is_empty());
        assert_eq!(best.cost, 0.0);
        assert!(best.exact_length);
    }
}
