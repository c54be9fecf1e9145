//! Strand parsing, rendering, and composition statistics.
//!
//! Noisy reads arrive as ASCII text restricted to {A, C, G, T} (case
//! insensitive). Parsing validates and converts in 32-byte SIMD chunks with a
//! scalar tail, so a malformed read is rejected with its exact offset before
//! any search work begins.

use wide::CmpEq;
use wide::u8x32;

use crate::constants::CHUNK_SIZE;
use crate::types::{HelicaseError, Nucleotide};

/// Parse an ASCII strand into nucleotides.
///
/// # Errors
///
/// Returns [`HelicaseError::InputFormat`] with the byte offset of the first
/// symbol outside {A, C, G, T} (case insensitive).
///
/// # Examples
///
/// ```rust
/// use helicase_core::strand::parse_strand;
/// use helicase_core::types::Nucleotide;
///
/// let nucleotides = parse_strand("ACgt")?;
/// assert_eq!(
///     nucleotides,
///     vec![Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T]
/// );
/// # Ok::<(), helicase_core::types::HelicaseError>(())
/// ```
pub fn parse_strand(strand: &str) -> Result<Vec<Nucleotide>, HelicaseError> {
    let bytes = strand.as_bytes();
    let mut nucleotides = Vec::with_capacity(bytes.len());
    let chunks = bytes.len() / CHUNK_SIZE;

    for chunk_index in 0..chunks {
        let start = chunk_index * CHUNK_SIZE;
        let mut block = [0u8; CHUNK_SIZE];
        block.copy_from_slice(&bytes[start..start + CHUNK_SIZE]);
        let input = u8x32::from(block);

        let is_a = input.cmp_eq(u8x32::splat(b'A')) | input.cmp_eq(u8x32::splat(b'a'));
        let is_c = input.cmp_eq(u8x32::splat(b'C')) | input.cmp_eq(u8x32::splat(b'c'));
        let is_g = input.cmp_eq(u8x32::splat(b'G')) | input.cmp_eq(u8x32::splat(b'g'));
        let is_t = input.cmp_eq(u8x32::splat(b'T')) | input.cmp_eq(u8x32::splat(b't'));

        let valid = is_a | is_c | is_g | is_t;
        let invalid_mask = !(valid.move_mask() as u32);
        if invalid_mask != 0 {
            let position = start + invalid_mask.trailing_zeros() as usize;
            return Err(input_format_error(strand, position));
        }

        // Lane codes match the canonical base indices (A=0, C=1, G=2, T=3).
        let codes = ((is_c & u8x32::splat(1))
            | (is_g & u8x32::splat(2))
            | (is_t & u8x32::splat(3)))
        .to_array();
        for code in codes {
            nucleotides.push(Nucleotide::from_index(code as usize));
        }
    }

    for position in chunks * CHUNK_SIZE..bytes.len() {
        match Nucleotide::from_symbol(bytes[position]) {
            Some(nucleotide) => nucleotides.push(nucleotide),
            None => return Err(input_format_error(strand, position)),
        }
    }

    Ok(nucleotides)
}

fn input_format_error(strand: &str, position: usize) -> HelicaseError {
    // The first invalid byte of a multi-byte character is a char boundary,
    // so slicing here cannot panic.
    let symbol = strand[position..].chars().next().unwrap_or('?');
    HelicaseError::InputFormat { symbol, position }
}

/// Render nucleotides as an uppercase ASCII string.
#[must_use]
pub fn strand_to_string(nucleotides: &[Nucleotide]) -> String {
    nucleotides
        .iter()
        .map(|nucleotide| nucleotide.to_symbol() as char)
        .collect()
}

/// GC content as a fraction in [0, 1]; 0.0 for an empty strand.
#[must_use]
pub fn gc_content(nucleotides: &[Nucleotide]) -> f64 {
    if nucleotides.is_empty() {
        return 0.0;
    }
    let gc = nucleotides
        .iter()
        .filter(|nucleotide| nucleotide.is_gc())
        .count();
    gc as f64 / nucleotides.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NUCLEOTIDES;

    #[test]
    fn test_parse_short_strand() {
        let nucleotides = parse_strand("ACGT").unwrap();
        assert_eq!(nucleotides, NUCLEOTIDES.to_vec());
    }

    #[test]
    fn test_parse_lowercase() {
        let nucleotides = parse_strand("acgt").unwrap();
        assert_eq!(nucleotides, NUCLEOTIDES.to_vec());
    }

    #[test]
    fn test_parse_long_strand_crosses_simd_chunks() {
        // 80 symbols: two full 32-byte chunks plus a scalar tail.
        let text = "ACGTACGTACGTACGTACGT".repeat(4);
        let nucleotides = parse_strand(&text).unwrap();
        assert_eq!(nucleotides.len(), 80);
        assert_eq!(strand_to_string(&nucleotides), text);
    }

    #[test]
    fn test_parse_rejects_symbol_in_chunk() {
        let mut text = "ACGT".repeat(10);
        text.replace_range(17..18, "N");
        let error = parse_strand(&text).unwrap_err();
        match error {
            HelicaseError::InputFormat { symbol, position } => {
                assert_eq!(symbol, 'N');
                assert_eq!(position, 17);
            }
            other => panic!("Expected InputFormat error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_symbol_in_tail() {
        let error = parse_strand("ACGTX").unwrap_err();
        match error {
            HelicaseError::InputFormat { symbol, position } => {
                assert_eq!(symbol, 'X');
                assert_eq!(position, 4);
            }
            other => panic!("Expected InputFormat error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_strand("").unwrap().is_empty());
    }

    #[test]
    fn test_render_round_trip() {
        let text = "GGCATTACGGCAT";
        let nucleotides = parse_strand(text).unwrap();
        assert_eq!(strand_to_string(&nucleotides), text);
    }

    #[test]
    fn test_gc_content() {
        assert_eq!(gc_content(&[]), 0.0);
        let all_gc = parse_strand("GGCC").unwrap();
        assert_eq!(gc_content(&all_gc), 1.0);
        let half = parse_strand("ATGC").unwrap();
        assert_eq!(gc_content(&half), 0.5);
    }
}
