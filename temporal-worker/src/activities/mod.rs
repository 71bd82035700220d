pub use calculate_ssdeep_hash::*;

/// Activity for calculating SSDeep hashes of input files.
///
mod calculate_ssdeep_hash;
