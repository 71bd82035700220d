//! Code used by the Temporal worker.
//!
#![warn(missing_docs)]

/// Temporal activity definitions.
///
pub mod activities;
