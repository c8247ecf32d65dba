//! Value objects representing immutable domain concepts.

pub mod revocation;

pub use revocation::{AccessRevocation, RevocationOutcome};
