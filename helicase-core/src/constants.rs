// =============================================================================
// =============================================================================

/// First multiplier of the 64-bit selector mix
pub const HASH_MULTIPLIER_A: u64 = 3_935_559_000_370_003_845;

/// Additive round constant of the selector mix
pub const HASH_INCREMENT: u64 = 2_691_343_689_449_507_681;

/// Second multiplier of the 64-bit selector mix
pub const HASH_MULTIPLIER_B: u64 = 4_768_777_513_237_032_717;

// =============================================================================
// =============================================================================

/// Default number of strand-seed (salt) bits mixed into each selector
pub const DEFAULT_SALT_BITS: u32 = 46;

/// Default number of low-order strand-position bits mixed into each selector
pub const DEFAULT_POSITION_BITS: u32 = 10;

/// Default number of trailing message bits mixed into each selector
pub const DEFAULT_HISTORY_BITS: u32 = 8;

/// Total selector input width; field widths must fit within it
pub const SELECTOR_INPUT_BITS: u32 = 64;

// =============================================================================
// =============================================================================

/// Maximum message bits a single emission can carry (log2 of the alphabet)
pub const MAX_SYMBOL_BITS: usize = 2;

/// Capacity ceiling for the nucleotide history window any constraint may use
pub const MAX_HISTORY_WINDOW: usize = 24;

/// Bound on the encoder's pending-bit staging buffer
pub const MAX_PENDING_BITS: usize = 8;

/// Consecutive forced (zero-bit) emissions tolerated while message bits remain
pub const MAX_FORCED_RUN: usize = 64;

/// SIMD processing chunk size for strand parsing
pub const CHUNK_SIZE: usize = 32;

// =============================================================================
// =============================================================================

/// Default cost added to a hypothesis when the read symbol matches
pub const DEFAULT_MATCH_COST: f64 = 0.0;

/// Default penalty for assuming a substituted read symbol
pub const DEFAULT_SUBSTITUTION_PENALTY: f64 = 1.0;

/// Default penalty for assuming a spurious (inserted) read symbol
pub const DEFAULT_INSERTION_PENALTY: f64 = 1.0;

/// Default penalty for assuming a strand symbol missing from the read
pub const DEFAULT_DELETION_PENALTY: f64 = 1.0;

/// Default ceiling on the number of hypotheses a decode may allocate
pub const DEFAULT_MAX_HYPOTHESES: usize = 1_000_000;

/// Default number of ranked candidates a decode returns
pub const DEFAULT_MAX_CANDIDATES: usize = 1;

// =============================================================================
// =============================================================================

/// Default homopolymer-run limit for the standard constraint profile
pub const DEFAULT_MAX_HOMOPOLYMER: usize = 3;

/// Default GC-content window size for the standard constraint profile
pub const DEFAULT_GC_WINDOW_SIZE: usize = 12;

/// Default lower GC-content bound for the standard constraint profile
pub const DEFAULT_GC_LOW: f64 = 0.4;

/// Default upper GC-content bound for the standard constraint profile
pub const DEFAULT_GC_HIGH: f64 = 0.6;
