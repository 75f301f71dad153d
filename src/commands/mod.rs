//! Command implementations for svev.

pub mod print_evidence;

pub use print_evidence::{PrintEvidenceCommand, PrintEvidenceStats};
