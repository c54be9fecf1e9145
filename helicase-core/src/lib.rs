//! # Helicase - DNA Data Storage Codec
//!
//! A codec for storing digital data in DNA: it converts an arbitrary
//! bitstream into a nucleotide strand suitable for chemical synthesis, and
//! reconstructs the original bitstream from a noisy read of that strand.
//!
//! ## Overview
//!
//! Encoding threads message bits through a keyed pseudorandom selector
//! stream: at every position, a pluggable constraint engine determines which
//! bases are biochemically admissible, and a variable-radix mapper folds the
//! next zero, one, or two message bits into one emitted nucleotide. Decoding
//! runs the same machinery in reverse inside a best-first tree search that
//! explains the read as a mix of correct, substituted, inserted, and deleted
//! symbols, returning ranked candidates with confidence costs.
//!
//! ## Features
//!
//! - **Arbitrary local constraints**: homopolymer-run limits, windowed GC
//!   bounds, and custom motif exclusions, composed by conjunction
//! - **Edit-error recovery**: substitutions, insertions, and deletions are
//!   searched jointly under a tunable cost model
//! - **Bounded search**: hypothesis caps, cost cutoffs, and step budgets
//!   turn pathological reads into fast, explicit low-confidence results
//! - **Parallel batches**: independent strands encode and decode across the
//!   Rayon thread pool with no shared mutable state
//!
//! ## Quick Start
//!
//! ```rust
//! use helicase_core::{bits::BitString, Codec};
//!
//! let codec = Codec::with_defaults()?;
//! let message = BitString::from_bytes(b"hello");
//!
//! // Encode under the standard synthesis constraints.
//! let strand = codec.encode(42, &message)?;
//! println!("{} nucleotides, {:.0}% GC", strand.length, strand.gc_content * 100.0);
//!
//! // Decode an error-free read.
//! let outcome = codec.decode(42, &strand.nucleotides, message.len());
//! assert_eq!(outcome.best().unwrap().bits, message);
//! # Ok::<(), helicase_core::types::HelicaseError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`bits`]: packed bit containers for messages
//! - [`config`]: codec configuration and validation
//! - [`constraints`]: constraint engine, history windows, admissible sets
//! - [`decoder`]: best-first tree search over candidate decodings
//! - [`encoder`]: message-to-strand emission loop
//! - [`engine`]: the high-level [`Codec`] facade and batch processing
//! - [`hypothesis`]: search-tree arena and the alignment cost model
//! - [`keystream`]: keyed pseudorandom selector stream
//! - [`mapper`]: variable-radix bits-to-nucleotide mapping
//! - [`results`]: encoded-strand and decode-outcome records
//! - [`strand`]: ASCII strand parsing and rendering
//! - [`types`]: nucleotides and error types
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, HelicaseError>`](types::HelicaseError):
//!
//! - Invalid configuration or constraints fail at construction, never later
//! - Stuck encodings report the failing position and history
//! - Malformed reads report the offending symbol and offset
//!
//! Decode exhaustion is not an error: the decoder returns its best-effort
//! candidates with an explicit low-confidence flag, and the caller may retry
//! with wider bounds.

pub mod bits;
pub mod config;
pub mod constants;
pub mod constraints;
pub mod decoder;
pub mod encoder;
pub mod engine;
pub mod hypothesis;
pub mod keystream;
pub mod mapper;
pub mod results;
pub mod strand;
pub mod types;

pub use engine::Codec;
