//! Variable-radix mapping between message bits and nucleotides.
//!
//! At each position the admissible set has between one and four members, so
//! the number of message bits one nucleotide can carry floats between zero
//! and two. The mapper turns a (selector, admissible set, bit value) triple
//! into the emitted base, and inverts an observed base back to its bit value.
//!
//! Sets of three are the delicate case: one bit is carried, the selector and
//! bit value are combined modulo 3, and the leftover residue is simply never
//! produced by an encoder. The inverse applies the same modulo rule and
//! reports that residue as unmappable.

use crate::constraints::AdmissibleSet;
use crate::types::Nucleotide;

/// Message bits carried by one emission for a given admissible-set size.
#[must_use]
pub const fn bits_per_symbol(set_len: usize) -> usize {
    match set_len {
        0 | 1 => 0,
        2 | 3 => 1,
        _ => 2,
    }
}

/// The base emitted for `value` under `selector`.
///
/// `value` must be below `2^bits_per_symbol(set.len())`; a forced position
/// (single-member set) takes only `value == 0`. Returns `None` only for the
/// empty set, which an encoder reports as a stuck state.
#[must_use]
pub fn map_symbol(selector: u64, set: AdmissibleSet, value: u64) -> Option<Nucleotide> {
    let size = set.len() as u64;
    if size == 0 {
        return None;
    }
    let index = ((selector % size) + value) % size;
    set.nth(index as usize)
}

/// Recover the bit value that would emit `observed` under `selector`.
///
/// Returns `None` when `observed` is outside the set, or when the derived
/// value falls in the unused residue range of a non-power-of-two set; either
/// way no encoder could have produced `observed` here, so a decoder prunes
/// that explanation.
#[must_use]
pub fn unmap_symbol(selector: u64, set: AdmissibleSet, observed: Nucleotide) -> Option<u64> {
    let size = set.len() as u64;
    if size == 0 {
        return None;
    }
    let index = set.index_of(observed)? as u64;
    let value = (index + size - (selector % size)) % size;
    if value < (1u64 << bits_per_symbol(size as usize)) {
        Some(value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Nucleotide, NUCLEOTIDES};

    fn set_from_mask(mask: u8) -> AdmissibleSet {
        let mut set = AdmissibleSet::empty();
        for nucleotide in NUCLEOTIDES {
            if mask & (1 << nucleotide.to_index()) != 0 {
                set.insert(nucleotide);
            }
        }
        set
    }

    #[test]
    fn test_bits_per_symbol() {
        assert_eq!(bits_per_symbol(0), 0);
        assert_eq!(bits_per_symbol(1), 0);
        assert_eq!(bits_per_symbol(2), 1);
        assert_eq!(bits_per_symbol(3), 1);
        assert_eq!(bits_per_symbol(4), 2);
    }

    #[test]
    fn test_round_trip_all_sets_and_selectors() {
        for mask in 1u8..16 {
            let set = set_from_mask(mask);
            let width = bits_per_symbol(set.len());
            for selector in 0..64u64 {
                for value in 0..(1u64 << width) {
                    let emitted = map_symbol(selector, set, value)
                        .unwrap_or_else(|| panic!("no emission for mask {:#06b}", mask));
                    assert!(set.contains(emitted));
                    assert_eq!(
                        unmap_symbol(selector, set, emitted),
                        Some(value),
                        "mask {:#06b}, selector {}, value {}",
                        mask,
                        selector,
                        value
                    );
                }
            }
        }
    }

    #[test]
    fn test_forward_injective_per_position() {
        for mask in 1u8..16 {
            let set = set_from_mask(mask);
            let width = bits_per_symbol(set.len());
            for selector in 0..16u64 {
                let mut emitted: Vec<Nucleotide> = (0..(1u64 << width))
                    .filter_map(|value| map_symbol(selector, set, value))
                    .collect();
                let total = emitted.len();
                emitted.dedup();
                assert_eq!(emitted.len(), total);
            }
        }
    }

    #[test]
    fn test_out_of_set_symbol_unmappable() {
        let set = set_from_mask(0b0110); // {C, G}
        for selector in 0..16u64 {
            assert_eq!(unmap_symbol(selector, set, Nucleotide::A), None);
            assert_eq!(unmap_symbol(selector, set, Nucleotide::T), None);
        }
    }

    #[test]
    fn test_three_member_residue_unmappable() {
        // With three members and one carried bit, exactly one member of the
        // set is never emitted for a given selector.
        let set = set_from_mask(0b0111); // {A, C, G}
        for selector in 0..32u64 {
            let reachable: Vec<Nucleotide> = (0..2u64)
                .filter_map(|value| map_symbol(selector, set, value))
                .collect();
            assert_eq!(reachable.len(), 2);

            let unreachable = set
                .iter()
                .find(|nucleotide| !reachable.contains(nucleotide))
                .unwrap();
            assert_eq!(unmap_symbol(selector, set, unreachable), None);
        }
    }

    #[test]
    fn test_forced_position_consumes_nothing() {
        for mask in [0b0001u8, 0b0010, 0b0100, 0b1000] {
            let set = set_from_mask(mask);
            assert_eq!(bits_per_symbol(set.len()), 0);
            for selector in 0..8u64 {
                let only = set.nth(0).unwrap();
                assert_eq!(map_symbol(selector, set, 0), Some(only));
                assert_eq!(unmap_symbol(selector, set, only), Some(0));
            }
        }
    }

    #[test]
    fn test_empty_set_maps_nothing() {
        let set = AdmissibleSet::empty();
        assert_eq!(map_symbol(0, set, 0), None);
        assert_eq!(unmap_symbol(0, set, Nucleotide::A), None);
    }

    #[test]
    fn test_selector_shifts_assignment() {
        // The same bit value lands on different bases as the selector moves.
        let set = set_from_mask(0b1111);
        let landed: Vec<Option<Nucleotide>> = (0..4u64)
            .map(|selector| map_symbol(selector, set, 0))
            .collect();
        assert_eq!(landed[0], Some(Nucleotide::A));
        assert_eq!(landed[1], Some(Nucleotide::C));
        assert_eq!(landed[2], Some(Nucleotide::G));
        assert_eq!(landed[3], Some(Nucleotide::T));
    }
}
